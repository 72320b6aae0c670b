//! The CRUD controller: a two-state form machine over the student API.
//!
//! # Design
//! `Controller` owns everything that changes during a session: the form
//! mode, the current draft and the last fetched list. Each user intent is a
//! named method taking `&mut self`, so a single control path can never run
//! two of them at once. Each network call is awaited to
//! completion; nothing is retried or cancelled.
//!
//! Every mutation is followed by a full reload of the collection. The
//! remote store is the only source of truth and the list snapshot is
//! replaced wholesale each time.
//!
//! Errors are shown on the surface at this boundary and then returned so
//! the caller can inspect them. `dispatch` only logs them.

use tracing::{debug, info, warn};

use crate::client::StudentClient;
use crate::error::{ApiError, ControllerError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Student, StudentDraft, StudentId, StudentPayload};
use crate::view::{Confirm, FormView, Grid, Surface, LOADING_MESSAGE};

const LOAD_FAILED: &str = "Failed to load students";
const SAVE_FAILED: &str = "Failed to save student";
const DELETE_FAILED: &str = "Failed to delete student";
const EDIT_FAILED: &str = "Failed to load student for editing";

/// Which HTTP verb a submit performs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    /// No id bound; submit POSTs to the collection.
    #[default]
    Creating,
    /// Submit PUTs to `{endpoint}/{id}`.
    Editing(StudentId),
}

/// A discrete user action, as delivered by an input adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Initial page load or manual refresh.
    Load,
    Submit(StudentDraft),
    Edit(StudentId),
    Delete(StudentId),
    Cancel,
}

pub struct Controller<T, S, C> {
    client: StudentClient,
    transport: T,
    surface: S,
    confirm: C,
    mode: FormMode,
    draft: StudentDraft,
    students: Vec<Student>,
}

impl<T, S, C> Controller<T, S, C>
where
    T: Transport,
    S: Surface,
    C: Confirm,
{
    /// Starts in `Creating` with an empty draft. Nothing is fetched until
    /// `load_list` (or `Intent::Load`) runs.
    pub fn new(client: StudentClient, transport: T, surface: S, confirm: C) -> Self {
        Self {
            client,
            transport,
            surface,
            confirm,
            mode: FormMode::Creating,
            draft: StudentDraft::default(),
            students: Vec::new(),
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    /// The last successfully fetched collection.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_parts(self) -> (T, S, C) {
        (self.transport, self.surface, self.confirm)
    }

    /// Route an intent to its handler. Failures are already on the surface,
    /// so they are only logged here.
    pub async fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatching intent");
        let result = match intent {
            Intent::Load => self.load_list().await,
            Intent::Submit(draft) => self.submit(draft).await,
            Intent::Edit(id) => self.request_edit(id).await,
            Intent::Delete(id) => self.request_delete(id).await,
            Intent::Cancel => {
                self.cancel_edit();
                Ok(())
            }
        };
        if let Err(e) = result {
            debug!(error = %e, "intent failed");
        }
    }

    /// Fetch the whole collection and redraw the grid.
    ///
    /// On failure the grid shows the "could not be loaded" placeholder and
    /// the snapshot is cleared. The loading indicator is hidden either way.
    pub async fn load_list(&mut self) -> Result<(), ControllerError> {
        self.surface.show_loading(LOADING_MESSAGE);
        self.surface.clear_error();

        let outcome = match self.fetch_students().await {
            Ok(students) => {
                debug!(count = students.len(), "students loaded");
                self.surface.render_grid(&Grid::from_students(&students));
                self.students = students;
                Ok(())
            }
            Err(e) => {
                self.students.clear();
                let err = self.fail(LOAD_FAILED, e);
                self.surface.render_grid(&Grid::Unavailable);
                Err(err)
            }
        };

        self.surface.hide_loading();
        outcome
    }

    /// Validate `draft` and create or update depending on the mode.
    ///
    /// An invalid draft never reaches the network. On success the form is
    /// reset to `Creating` and the list is reloaded exactly once; a failed
    /// reload is returned as the result. On a failed save the mode and the
    /// draft are kept.
    pub async fn submit(&mut self, draft: StudentDraft) -> Result<(), ControllerError> {
        self.draft = draft;

        let payload = match self.draft.validate() {
            Ok(payload) => payload,
            Err(e) => {
                warn!(fields = ?e.fields, "draft rejected");
                self.surface.show_error(&e.to_string());
                return Err(e.into());
            }
        };
        self.surface.clear_error();

        let saved = match &self.mode {
            FormMode::Creating => self.create(&payload).await,
            FormMode::Editing(id) => self.update(id, &payload).await,
        };

        match saved {
            Ok(student) => {
                info!(id = ?student.id(), "student saved");
                self.reset_form();
                self.load_list().await
            }
            Err(e) => Err(self.fail(SAVE_FAILED, e)),
        }
    }

    /// Fetch one record and switch the form to editing it.
    pub async fn request_edit(&mut self, id: StudentId) -> Result<(), ControllerError> {
        let request = self.client.build_get_student(&id);
        let fetched = self
            .send(request)
            .await
            .and_then(|response| self.client.parse_get_student(response));

        match fetched {
            Ok(student) => {
                debug!(%id, "editing student");
                self.draft = StudentDraft::from_student(&student);
                self.mode = FormMode::Editing(id);
                self.render_form();
                self.surface.clear_error();
                Ok(())
            }
            Err(e) => Err(self.fail(EDIT_FAILED, e)),
        }
    }

    /// Delete one record after confirmation, then reload.
    ///
    /// A declined confirmation does nothing at all. The form mode is never
    /// touched, even when the deleted record is the one being edited.
    pub async fn request_delete(&mut self, id: StudentId) -> Result<(), ControllerError> {
        let prompt = format!("Are you sure you want to delete the student with ID {id}?");
        if !self.confirm.confirm(&prompt) {
            debug!(%id, "delete declined");
            return Ok(());
        }

        let request = self.client.build_delete_student(&id);
        let deleted = self
            .send(request)
            .await
            .and_then(|response| self.client.parse_delete_student(response));

        match deleted {
            Ok(()) => {
                info!(%id, "student deleted");
                self.load_list().await
            }
            Err(e) => Err(self.fail(DELETE_FAILED, e)),
        }
    }

    /// Drop whatever is in the form and go back to `Creating`.
    pub fn cancel_edit(&mut self) {
        debug!(mode = ?self.mode, "edit cancelled");
        self.reset_form();
    }

    async fn fetch_students(&self) -> Result<Vec<Student>, ApiError> {
        let response = self.send(self.client.build_list_students()).await?;
        self.client.parse_list_students(response)
    }

    async fn create(&self, payload: &StudentPayload) -> Result<Student, ApiError> {
        let request = self.client.build_create_student(payload)?;
        let response = self.send(request).await?;
        self.client.parse_create_student(response)
    }

    async fn update(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> Result<Student, ApiError> {
        let request = self.client.build_update_student(id, payload)?;
        let response = self.send(request).await?;
        self.client.parse_update_student(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        self.transport.execute(request).await
    }

    fn reset_form(&mut self) {
        self.mode = FormMode::Creating;
        self.draft = StudentDraft::default();
        self.render_form();
        self.surface.clear_error();
    }

    fn render_form(&mut self) {
        let form = FormView::new(&self.mode, &self.draft);
        self.surface.render_form(&form);
    }

    fn fail(&mut self, context: &str, err: ApiError) -> ControllerError {
        let message = format!("{context}: {err}");
        warn!(%message, "operation failed");
        self.surface.show_error(&message);
        err.into()
    }
}
