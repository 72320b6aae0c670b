//! Controller scenarios against the mock server's router, in process.
//!
//! `RouterTransport` turns each `HttpRequest` into an axum request and runs
//! it through `tower::ServiceExt::oneshot`, so the controller talks to the
//! real route handlers without binding a socket.

use std::cell::RefCell;

use axum::http::Request;
use http_body_util::BodyExt;
use student_core::{
    ApiError, Controller, FormMode, Grid, HttpMethod, HttpRequest, HttpResponse, Intent,
    StudentClient, StudentDraft, StudentId, TextSurface, Transport,
};
use student_mock_server::{app, app_with, Student};
use tower::ServiceExt;

const ENDPOINT: &str = "http://mock.local/students";

struct RouterTransport {
    app: axum::Router,
    requests: RefCell<Vec<HttpRequest>>,
}

impl RouterTransport {
    fn new(app: axum::Router) -> Self {
        Self {
            app,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn methods(&self) -> Vec<HttpMethod> {
        self.requests.borrow().iter().map(|r| r.method).collect()
    }
}

impl Transport for RouterTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());

        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let req = builder
            .body(request.body.unwrap_or_default())
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status().as_u16();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

type TestController = Controller<RouterTransport, TextSurface<Vec<u8>>, fn(&str) -> bool>;

fn controller(app: axum::Router, confirm: fn(&str) -> bool) -> TestController {
    Controller::new(
        StudentClient::new(ENDPOINT),
        RouterTransport::new(app),
        TextSurface::new(Vec::new()),
        confirm,
    )
}

fn always(_: &str) -> bool {
    true
}

fn never(_: &str) -> bool {
    false
}

fn output(c: TestController) -> String {
    let (_, surface, _) = c.into_parts();
    String::from_utf8(surface.into_inner()).unwrap()
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

#[tokio::test]
async fn empty_collection_shows_no_students_placeholder() {
    let mut c = controller(app(), always);
    c.load_list().await.unwrap();

    assert!(c.students().is_empty());
    assert_eq!(Grid::from_students(c.students()), Grid::Empty);
    assert!(output(c).contains("No students registered."));
}

#[tokio::test]
async fn created_student_round_trips_into_edit_draft() {
    let mut c = controller(app(), always);
    let original = StudentDraft::new("Ana", "Lee", "20", "A");

    c.submit(original.clone()).await.unwrap();
    assert_eq!(c.mode(), &FormMode::Creating);
    assert!(c.draft().is_empty());
    assert_eq!(c.students().len(), 1);

    let id = c.students()[0].id().cloned().unwrap();
    c.request_edit(id.clone()).await.unwrap();

    assert_eq!(c.mode(), &FormMode::Editing(id));
    assert_eq!(c.draft(), &original);
}

#[tokio::test]
async fn edit_then_update_then_list_reflects_change() {
    let mut c = controller(app_with(vec![seeded("7", "Ana")]), always);
    c.dispatch(Intent::Load).await;
    c.dispatch(Intent::Edit(StudentId::from("7"))).await;
    c.dispatch(Intent::Submit(StudentDraft::new("Ana", "Lee", "21", "B"))).await;

    assert_eq!(c.mode(), &FormMode::Creating);
    assert_eq!(c.students()[0].age, Some(21));
    assert_eq!(c.students()[0].grade.as_deref(), Some("B"));
    assert_eq!(
        c.transport().methods(),
        vec![HttpMethod::Get, HttpMethod::Get, HttpMethod::Put, HttpMethod::Get]
    );
}

#[tokio::test]
async fn missing_record_keeps_creating_mode() {
    let mut c = controller(app(), always);
    let err = c.request_edit(StudentId::from("7")).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(c.mode(), &FormMode::Creating);
    assert!(output(c).contains("Failed to load student for editing: HTTP error! status: 404"));
}

#[tokio::test]
async fn declined_delete_leaves_store_untouched() {
    let mut c = controller(app_with(vec![seeded("3", "Ana")]), never);
    c.load_list().await.unwrap();
    c.request_delete(StudentId::from("3")).await.unwrap();

    assert_eq!(c.transport().methods(), vec![HttpMethod::Get]);
    assert_eq!(c.students().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_empties_the_grid() {
    let mut c = controller(app_with(vec![seeded("3", "Ana")]), always);
    c.load_list().await.unwrap();
    c.request_delete(StudentId::from("3")).await.unwrap();

    assert!(c.students().is_empty());
    assert_eq!(
        c.transport().methods(),
        vec![HttpMethod::Get, HttpMethod::Delete, HttpMethod::Get]
    );
    let text = output(c);
    assert!(text.contains("Ana"));
    assert!(text.trim_end().ends_with("No students registered."));
}

#[tokio::test]
async fn invalid_submit_sends_nothing() {
    let mut c = controller(app(), always);
    let err = c
        .submit(StudentDraft::new("Ana", "Lee", "abc", "A"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(c.transport().methods().is_empty());
    assert!(output(c).contains("invalid: age"));
}
