use hospital_core::db::open_db_in_memory;
use hospital_core::{
    DepartmentRepository, DepartmentService, DoctorRepository, DoctorService,
    HospitalRepository, HospitalService, NewDepartment, NewDoctor, NewHospital,
    SqliteDepartmentRepository, SqliteDoctorRepository, SqliteHospitalRepository,
};
use rusqlite::Connection;

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

struct Seeded {
    hospital_id: i64,
    department_ids: Vec<i64>,
    doctor_ids: Vec<i64>,
}

fn seed(conn: &Connection, name: &str, departments: usize, doctors_each: usize) -> Seeded {
    let hospitals = HospitalService::new(SqliteHospitalRepository::try_new(conn).unwrap());
    let dept_service = DepartmentService::new(SqliteDepartmentRepository::try_new(conn).unwrap());
    let doctor_service = DoctorService::new(SqliteDoctorRepository::try_new(conn).unwrap());

    let hospital = hospitals
        .create_hospital(&NewHospital::new(name, 1950, format!("{name} street"), 100))
        .unwrap();

    let mut department_ids = Vec::new();
    let mut doctor_ids = Vec::new();
    for d in 0..departments {
        let department = dept_service
            .create_department(&NewDepartment::new(format!("Dept {d}"), hospital.id))
            .unwrap();
        for m in 0..doctors_each {
            let doctor = doctor_service
                .create_doctor(&NewDoctor::new(
                    format!("Dr {d}-{m}"),
                    1970,
                    2000,
                    "female",
                    department.id,
                ))
                .unwrap();
            doctor_ids.push(doctor.id);
        }
        department_ids.push(department.id);
    }

    Seeded {
        hospital_id: hospital.id,
        department_ids,
        doctor_ids,
    }
}

#[test]
fn deleting_hospital_removes_all_departments_and_doctors() {
    let conn = open_db_in_memory().unwrap();
    let target = seed(&conn, "Target", 3, 4);
    let bystander = seed(&conn, "Bystander", 2, 2);
    assert_eq!(count(&conn, "departments"), 5);
    assert_eq!(count(&conn, "doctors"), 16);

    let hospitals = SqliteHospitalRepository::try_new(&conn).unwrap();
    hospitals.delete_hospital(target.hospital_id).unwrap();

    let departments = SqliteDepartmentRepository::try_new(&conn).unwrap();
    let doctors = SqliteDoctorRepository::try_new(&conn).unwrap();
    for id in &target.department_ids {
        assert!(departments.get_department(*id).unwrap().is_none());
    }
    for id in &target.doctor_ids {
        assert!(doctors.get_doctor(*id).unwrap().is_none());
    }

    assert_eq!(count(&conn, "departments"), 2);
    assert_eq!(count(&conn, "doctors"), 4);
    assert!(hospitals
        .get_hospital(bystander.hospital_id)
        .unwrap()
        .is_some());
    for id in &bystander.doctor_ids {
        assert!(doctors.get_doctor(*id).unwrap().is_some());
    }
}

#[test]
fn deleting_department_removes_only_its_doctors() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn, "Only", 2, 3);

    let departments = SqliteDepartmentRepository::try_new(&conn).unwrap();
    let removed = departments
        .delete_department(seeded.department_ids[0])
        .unwrap();
    assert_eq!(removed.hospital_id, seeded.hospital_id);

    assert_eq!(count(&conn, "departments"), 1);
    assert_eq!(count(&conn, "doctors"), 3);

    let doctors = SqliteDoctorRepository::try_new(&conn).unwrap();
    let remaining: Vec<_> = doctors
        .list_doctors()
        .unwrap()
        .into_iter()
        .map(|d| d.department_id)
        .collect();
    assert!(remaining.iter().all(|id| *id == seeded.department_ids[1]));
}

#[test]
fn deleting_doctor_leaves_department_intact() {
    let conn = open_db_in_memory().unwrap();
    let seeded = seed(&conn, "Solo", 1, 2);

    let doctors = SqliteDoctorRepository::try_new(&conn).unwrap();
    doctors.delete_doctor(seeded.doctor_ids[0]).unwrap();

    assert_eq!(count(&conn, "doctors"), 1);
    assert_eq!(count(&conn, "departments"), 1);
}
