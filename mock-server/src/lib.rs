//! In-memory student REST backend with json-server semantics.
//!
//! Records keep insertion order, ids are opaque strings, `PUT` replaces the
//! whole record and `DELETE` answers with an empty body.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub age: u32,
    pub grade: String,
}

#[derive(Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub lastname: String,
    pub age: u32,
    pub grade: String,
}

impl StudentInput {
    fn into_student(self, id: String) -> Student {
        Student {
            id,
            name: self.name,
            lastname: self.lastname,
            age: self.age,
            grade: self.grade,
        }
    }
}

pub type Db = Arc<RwLock<Vec<Student>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-seeded with `students`.
pub fn app_with(students: Vec<Student>) -> Router {
    let db: Db = Arc::new(RwLock::new(students));
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_students(State(db): State<Db>) -> Json<Vec<Student>> {
    Json(db.read().await.clone())
}

async fn create_student(
    State(db): State<Db>,
    Json(input): Json<StudentInput>,
) -> (StatusCode, Json<Student>) {
    let student = input.into_student(Uuid::new_v4().to_string());
    tracing::info!(id = %student.id, "student created");
    db.write().await.push(student.clone());
    (StatusCode::CREATED, Json(student))
}

async fn get_student(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Student>, StatusCode> {
    let students = db.read().await;
    students
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<StudentInput>,
) -> Result<Json<Student>, StatusCode> {
    let mut students = db.write().await;
    let slot = students
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_student(id);
    tracing::info!(id = %slot.id, "student replaced");
    Ok(Json(slot.clone()))
}

async fn delete_student(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut students = db.write().await;
    let index = students
        .iter()
        .position(|s| s.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    students.remove(index);
    tracing::info!(%id, "student deleted");
    Ok(StatusCode::NO_CONTENT)
}
