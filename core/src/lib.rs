//! Client core for a REST collection of student records.
//!
//! # Overview
//! `StudentClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A
//! `Transport` executes the round-trip. `Controller` sits on top: it owns
//! the create/edit form state, validates drafts, issues the right verb and
//! reloads the full list after every mutation, reflecting everything onto a
//! `Surface`.
//!
//! # Design
//! - `StudentClient` is stateless; it holds only the collection endpoint.
//! - The form is a two-state machine (`FormMode::Creating` /
//!   `FormMode::Editing(id)`) owned by the controller; there is no global
//!   state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod view;

pub use client::{decode_response, StudentClient};
pub use config::ClientConfig;
pub use controller::{Controller, FormMode, Intent};
pub use error::{ApiError, ControllerError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{Student, StudentDraft, StudentId, StudentPayload};
pub use view::{Confirm, FormView, Grid, GridRow, Surface, TextSurface};
