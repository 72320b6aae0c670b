//! Stateless HTTP request builder and response parser for the student API.
//!
//! # Design
//! `StudentClient` holds only the collection endpoint and carries no mutable
//! state between calls. Each CRUD operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Student, StudentId, StudentPayload};

/// Builds requests for, and parses responses from, one student collection.
#[derive(Debug, Clone)]
pub struct StudentClient {
    endpoint: String,
}

impl StudentClient {
    /// `endpoint` is the collection URL itself, e.g.
    /// `http://localhost:3000/students`.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn member_url(&self, id: &StudentId) -> String {
        format!("{}/{id}", self.endpoint)
    }

    pub fn build_list_students(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_student(&self, id: &StudentId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.member_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_student(&self, input: &StudentPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint.clone(),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_student(
        &self,
        id: &StudentId,
        input: &StudentPayload,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.member_url(id),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_delete_student(&self, id: &StudentId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.member_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A blank body on success is an empty collection.
    pub fn parse_list_students(&self, response: HttpResponse) -> Result<Vec<Student>, ApiError> {
        Ok(decode_response(response)?.unwrap_or_default())
    }

    pub fn parse_get_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        require_record(decode_response(response)?)
    }

    pub fn parse_create_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        require_record(decode_response(response)?)
    }

    pub fn parse_update_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        require_record(decode_response(response)?)
    }

    /// Any 2xx is success; whatever the server echoes back is ignored.
    pub fn parse_delete_student(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

/// Normalize a raw response: non-2xx is an `Http` error, a blank body is
/// `None`, anything else must decode as `T`.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, ApiError> {
    check_status(&response)?;
    if !response.has_body() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn require_record(student: Option<Student>) -> Result<Student, ApiError> {
    student.ok_or_else(|| ApiError::Decode("expected a student record, got an empty body".to_string()))
}

fn encode(input: &StudentPayload) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}
