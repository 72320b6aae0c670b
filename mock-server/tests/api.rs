use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use student_mock_server::{app, app_with, Student};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn seeded(id: &str, name: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        lastname: "Lee".to_string(),
        age: 20,
        grade: "A".to_string(),
    }
}

const ANA: &str = r#"{"name":"Ana","lastname":"Lee","age":20,"grade":"A"}"#;

// --- list ---

#[tokio::test]
async fn list_students_empty() {
    let resp = app().oneshot(empty_request("GET", "/students")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let students: Vec<Student> = body_json(resp).await;
    assert!(students.is_empty());
}

#[tokio::test]
async fn list_students_keeps_insertion_order() {
    let app = app_with(vec![seeded("b", "Bea"), seeded("a", "Ana"), seeded("c", "Cai")]);
    let resp = app.oneshot(empty_request("GET", "/students")).await.unwrap();

    let students: Vec<Student> = body_json(resp).await;
    let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

// --- create ---

#[tokio::test]
async fn create_student_returns_201_with_id() {
    let resp = app()
        .oneshot(json_request("POST", "/students", ANA))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let student: Student = body_json(resp).await;
    assert!(!student.id.is_empty());
    assert_eq!(student.name, "Ana");
    assert_eq!(student.age, 20);
}

#[tokio::test]
async fn create_student_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/students", r#"{"name":"Ana"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_student_not_found() {
    let resp = app().oneshot(empty_request("GET", "/students/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_student_by_seeded_id() {
    let app = app_with(vec![seeded("7", "Ana")]);
    let resp = app.oneshot(empty_request("GET", "/students/7")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let student: Student = body_json(resp).await;
    assert_eq!(student, seeded("7", "Ana"));
}

// --- update ---

#[tokio::test]
async fn update_student_not_found() {
    let resp = app()
        .oneshot(json_request("PUT", "/students/7", ANA))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_student_replaces_record_and_keeps_id() {
    let app = app_with(vec![seeded("7", "Ana")]);
    let resp = app
        .oneshot(json_request(
            "PUT",
            "/students/7",
            r#"{"name":"Bea","lastname":"Kim","age":31,"grade":"C"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let student: Student = body_json(resp).await;
    assert_eq!(student.id, "7");
    assert_eq!(student.name, "Bea");
    assert_eq!(student.lastname, "Kim");
    assert_eq!(student.age, 31);
}

// --- delete ---

#[tokio::test]
async fn delete_student_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/students/7"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/students", ANA))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Student = body_json(resp).await;
    let id = created.id.clone();

    // list — should contain the one student
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/students"))
        .await
        .unwrap();
    let students: Vec<Student> = body_json(resp).await;
    assert_eq!(students, vec![created.clone()]);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/students/{id}"),
            r#"{"name":"Ana","lastname":"Lee","age":21,"grade":"B"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Student = body_json(resp).await;
    assert_eq!(updated.age, 21);
    assert_eq!(updated.grade, "B");

    // get reflects the update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/students/{id}")))
        .await
        .unwrap();
    let fetched: Student = body_json(resp).await;
    assert_eq!(fetched, updated);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/students/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/students/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // list after delete — empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/students"))
        .await
        .unwrap();
    let students: Vec<Student> = body_json(resp).await;
    assert!(students.is_empty());
}
