use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use validator::Validate;

use crate::api::EmployeeApi;
use crate::errors::AppError;
use crate::models::employee::{EmployeeRecord, FormMode, FormState};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this employee?";
const LOAD_FAILED: &str = "Failed to fetch employees";
const SEARCH_FAILED: &str = "Failed to search employees";
const DELETE_FAILED: &str = "Failed to delete employee";
pub const EDIT_MISSING: &str = "Employee not found";

/// Yes/no answer to a blocking confirmation prompt.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl Confirm for bool {
    fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

/// Everything the management view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManagerState {
    pub employees: Vec<EmployeeRecord>,
    pub query: String,
    pub loading: bool,
    pub error: String,
    pub form: FormState,
    pub mode: FormMode,
}

impl ManagerState {
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }
}

#[derive(Default)]
struct Inner {
    view: ManagerState,
    list_ticket: u64,
    list_pending: bool,
    writes_pending: usize,
    dismissed: bool,
}

impl Inner {
    fn refresh_loading(&mut self) {
        self.view.loading = self.list_pending || self.writes_pending > 0;
    }
}

/// Per-session employee management view.
///
/// Every list fetch takes a ticket; its response only lands if the ticket is still
/// the newest one issued, so a slow early search can never overwrite a later one.
/// Write outcomes are never superseded. Nothing lands once the view is dismissed.
pub struct EmployeeManager {
    api: Arc<dyn EmployeeApi>,
    inner: Mutex<Inner>,
}

impl EmployeeManager {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        EmployeeManager { api, inner: Mutex::new(Inner::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ManagerState {
        self.lock().view.clone()
    }

    /// The view went away; anything still in flight is discarded on arrival.
    pub fn dismiss(&self) {
        self.lock().dismissed = true;
    }

    /// Puts a message in the error banner.
    pub fn show_error(&self, message: impl Into<String>) {
        self.lock().view.error = message.into();
    }

    fn begin_list(&self) -> u64 {
        let mut inner = self.lock();
        inner.list_ticket += 1;
        inner.list_pending = true;
        inner.view.error.clear();
        inner.refresh_loading();
        inner.list_ticket
    }

    fn finish_list(&self, ticket: u64, result: Result<Vec<EmployeeRecord>, AppError>, failure: &'static str) {
        if let Err(err) = &result {
            log::error!("{}: {}", failure, err);
        }
        let mut inner = self.lock();
        if inner.dismissed || ticket != inner.list_ticket {
            log::debug!("Dropping stale list response #{}", ticket);
            return;
        }
        match result {
            Ok(records) => inner.view.employees = records,
            Err(_) => inner.view.error = failure.to_string(),
        }
        inner.list_pending = false;
        inner.refresh_loading();
    }

    fn begin_write(&self) {
        let mut inner = self.lock();
        inner.writes_pending += 1;
        inner.view.error.clear();
        inner.refresh_loading();
    }

    fn finish_write(&self, failure: Option<String>) {
        let mut inner = self.lock();
        inner.writes_pending = inner.writes_pending.saturating_sub(1);
        if inner.dismissed {
            return;
        }
        if let Some(message) = failure {
            inner.view.error = message;
        }
        inner.refresh_loading();
    }

    pub async fn load_all(&self) {
        let ticket = self.begin_list();
        let result = self.api.list_all().await;
        self.finish_list(ticket, result, LOAD_FAILED);
    }

    pub async fn search(&self, query: &str) {
        self.lock().view.query = query.to_string();
        if query.trim().is_empty() {
            return self.load_all().await;
        }

        let ticket = self.begin_list();
        let result = self.api.search(query).await;
        self.finish_list(ticket, result, SEARCH_FAILED);
    }

    pub fn update_form(&self, form: FormState) {
        self.lock().view.form = form;
    }

    pub fn begin_edit(&self, record: &EmployeeRecord) {
        let mut inner = self.lock();
        inner.view.form = FormState::from_record(record);
        inner.view.mode = FormMode::Edit { id: record.id.clone() };
    }

    /// Starts editing the displayed record with the given identifier.
    pub fn begin_edit_by_id(&self, id: &str) -> Result<(), AppError> {
        let record = self
            .lock()
            .view
            .employees
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(EDIT_MISSING.to_string()))?;
        self.begin_edit(&record);
        Ok(())
    }

    pub fn cancel_edit(&self) {
        let mut inner = self.lock();
        inner.view.form = FormState::default();
        inner.view.mode = FormMode::Create;
    }

    /// Creates or updates from the current draft. Returns whether the backend accepted it.
    pub async fn submit(&self) -> bool {
        let (form, mode) = {
            let inner = self.lock();
            (inner.view.form.clone(), inner.view.mode.clone())
        };

        if let Err(errors) = form.validate() {
            let err = AppError::from(errors);
            log::error!("Rejected employee form: {}", err);
            self.show_error(err.submit_message());
            return false;
        }

        let payload = form.to_payload();
        self.begin_write();
        let result = match &mode {
            FormMode::Edit { id } if !id.is_empty() => self.api.update(id, &payload).await,
            _ => self.api.create(&payload).await,
        };

        match result {
            Ok(()) => {
                self.finish_write(None);
                self.load_all().await;
                self.cancel_edit();
                true
            }
            Err(err) => {
                log::error!("Failed to save employee: {}", err);
                self.finish_write(Some(err.submit_message()));
                false
            }
        }
    }

    /// Deletes after confirmation. Returns whether a delete succeeded.
    pub async fn delete<C: Confirm + ?Sized>(&self, id: &str, confirm: &C) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }

        self.begin_write();
        match self.api.delete(id).await {
            Ok(()) => {
                self.finish_write(None);
                self.load_all().await;
                true
            }
            Err(err) => {
                log::error!("{}: {}", DELETE_FAILED, err);
                self.finish_write(Some(DELETE_FAILED.to_string()));
                false
            }
        }
    }
}
