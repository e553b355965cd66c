//! Shared test harness: one isolated in-memory registry per server.

#![allow(dead_code)]

use axum_test::TestServer;
use hospital_api::{create_app, AppState, ServerConfig};
use serde_json::{json, Value};

pub fn test_server() -> TestServer {
    test_server_with(ServerConfig::for_testing())
}

pub fn test_server_with(config: ServerConfig) -> TestServer {
    let state = AppState::open(config).expect("store should open");
    TestServer::new(create_app(state)).expect("test server should start")
}

pub fn st_mary() -> Value {
    json!({
        "name": "St. Mary",
        "foundation_year": 1950,
        "address": "1 Main St",
        "capacity": 200
    })
}

pub async fn create_hospital(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/hospital")
        .json(&json!({
            "name": name,
            "foundation_year": 1950,
            "address": format!("{name} street"),
            "capacity": 100
        }))
        .await;
    response.json::<Value>()["id"]
        .as_i64()
        .expect("created hospital should have an id")
}

pub async fn create_department(server: &TestServer, name: &str, hospital_id: i64) -> i64 {
    let response = server
        .post("/department")
        .json(&json!({ "name": name, "hospital_id": hospital_id }))
        .await;
    response.json::<Value>()["id"]
        .as_i64()
        .expect("created department should have an id")
}

pub async fn create_doctor(server: &TestServer, name: &str, department_id: i64) -> i64 {
    let response = server
        .post("/doctor")
        .json(&json!({
            "name": name,
            "birth_year": 1975,
            "start_year": 2001,
            "gender": "female",
            "department_id": department_id
        }))
        .await;
    response.json::<Value>()["id"]
        .as_i64()
        .expect("created doctor should have an id")
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
