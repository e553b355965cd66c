mod common;

use axum::http::StatusCode;
use common::{create_department, create_doctor, create_hospital, error_code, test_server};
use serde_json::{json, Value};

#[tokio::test]
async fn department_roundtrip() {
    let server = test_server();
    let hospital_id = create_hospital(&server, "North").await;

    let created = server
        .post("/department")
        .json(&json!({ "name": "Cardiology", "hospital_id": hospital_id }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    assert_eq!(
        body,
        json!({ "id": 1, "name": "Cardiology", "hospital_id": hospital_id })
    );

    let fetched = server.get("/department/1").await.json::<Value>();
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn department_with_unknown_hospital_is_rejected() {
    let server = test_server();

    let response = server
        .post("/department")
        .json(&json!({ "name": "Orphan", "hospital_id": 77 }))
        .await;
    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(error_code(&body), "validation");
    assert_eq!(body["error"]["message"], "hospital 77 does not exist");

    assert!(server
        .get("/department")
        .await
        .json::<Vec<Value>>()
        .is_empty());
}

#[tokio::test]
async fn department_put_and_missing_id() {
    let server = test_server();
    let north = create_hospital(&server, "North").await;
    let south = create_hospital(&server, "South").await;
    let id = create_department(&server, "Radiology", north).await;

    let response = server
        .put(&format!("/department/{id}"))
        .json(&json!({ "name": "Imaging", "hospital_id": south }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "id": id, "name": "Imaging", "hospital_id": south })
    );

    server
        .put("/department/999")
        .json(&json!({ "name": "Ghost", "hospital_id": south }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn doctor_roundtrip_and_list() {
    let server = test_server();
    let hospital_id = create_hospital(&server, "East").await;
    let department_id = create_department(&server, "Surgery", hospital_id).await;

    let payload = json!({
        "name": "Dr. Grey",
        "birth_year": 1978,
        "start_year": 2005,
        "gender": "female",
        "department_id": department_id
    });
    let created = server.post("/doctor").json(&payload).await;
    created.assert_status(StatusCode::CREATED);
    let body = created.json::<Value>();
    let id = body["id"].as_i64().unwrap();

    let mut expected = payload.clone();
    expected["id"] = json!(id);
    assert_eq!(body, expected);
    assert_eq!(
        server.get(&format!("/doctor/{id}")).await.json::<Value>(),
        expected
    );
    assert_eq!(server.get("/doctor").await.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn doctor_with_unknown_department_is_rejected() {
    let server = test_server();

    let response = server
        .post("/doctor")
        .json(&json!({
            "name": "Dr. Nobody",
            "birth_year": 1980,
            "start_year": 2010,
            "gender": "male",
            "department_id": 5
        }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "department 5 does not exist"
    );
}

#[tokio::test]
async fn doctor_put_delete_lifecycle() {
    let server = test_server();
    let hospital_id = create_hospital(&server, "West").await;
    let department_id = create_department(&server, "ER", hospital_id).await;
    let id = create_doctor(&server, "Dr. Carter", department_id).await;

    let response = server
        .put(&format!("/doctor/{id}"))
        .json(&json!({
            "name": "Dr. Carter",
            "birth_year": 1975,
            "start_year": 2002,
            "gender": "male",
            "department_id": department_id
        }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["start_year"], 2002);

    let deleted = server.delete(&format!("/doctor/{id}")).await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>()["id"], id);

    server
        .get(&format!("/doctor/{id}"))
        .await
        .assert_status_not_found();
    server
        .put(&format!("/doctor/{id}"))
        .json(&json!({
            "name": "Dr. Carter",
            "birth_year": 1975,
            "start_year": 2002,
            "gender": "male",
            "department_id": department_id
        }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn delete_missing_department_is_not_found() {
    let server = test_server();
    let hospital_id = create_hospital(&server, "Harbor").await;
    create_department(&server, "Oncology", hospital_id).await;

    let response = server.delete("/department/42").await;
    response.assert_status_not_found();
    let body = response.json::<Value>();
    assert_eq!(error_code(&body), "not_found");
    assert_eq!(body["error"]["message"], "department 42 not found");

    assert_eq!(server.get("/department").await.json::<Vec<Value>>().len(), 1);
}

#[tokio::test]
async fn doctor_put_to_unknown_department_leaves_row_unchanged() {
    let server = test_server();
    let hospital_id = create_hospital(&server, "Ridge").await;
    let department_id = create_department(&server, "Neurology", hospital_id).await;
    let id = create_doctor(&server, "Dr. Grey", department_id).await;
    let before = server.get(&format!("/doctor/{id}")).await.json::<Value>();

    let response = server
        .put(&format!("/doctor/{id}"))
        .json(&json!({
            "name": "Dr. Grey",
            "birth_year": 1975,
            "start_year": 2001,
            "gender": "female",
            "department_id": 999
        }))
        .await;
    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(error_code(&body), "validation");
    assert_eq!(body["error"]["message"], "department 999 does not exist");

    let after = server.get(&format!("/doctor/{id}")).await.json::<Value>();
    assert_eq!(after, before);
    assert_eq!(after["department_id"], department_id);
}
