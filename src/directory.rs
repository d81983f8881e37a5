//! View state of a user directory session.
//!
//! A [`UserDirectory`] owns what a screen would show: the last fetched
//! collection, whether the form is creating a record or editing one, field
//! annotations for each form, and a single status line. Every action issues
//! at most one mutation request and then discards and re-fetches the
//! collection; nothing here is authoritative.

use tracing::debug;

use crate::client::UserClient;
use crate::error::DirectoryError;
use crate::transport::Transport;
use crate::types::{FieldErrors, StatusMessage, User, UserRequest};
use crate::validation;

/// Which form is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Edit { id: u64 },
}

/// Contents of a name/email form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub name: String,
    pub email: String,
    pub errors: FieldErrors,
}

impl Form {
    fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
    }

    fn fill(&mut self, name: &str, email: &str) {
        self.name = name.to_string();
        self.email = email.to_string();
    }
}

pub struct UserDirectory<T> {
    client: UserClient<T>,
    validate: bool,
    users: Vec<User>,
    mode: Mode,
    create_form: Form,
    edit_form: Form,
    status: Option<StatusMessage>,
    search: String,
}

impl<T: Transport> UserDirectory<T> {
    /// `validate` enables the local form checks before create and update.
    pub fn new(client: UserClient<T>, validate: bool) -> Self {
        Self {
            client,
            validate,
            users: Vec::new(),
            mode: Mode::Create,
            create_form: Form::default(),
            edit_form: Form::default(),
            status: None,
            search: String::new(),
        }
    }

    pub fn client(&self) -> &UserClient<T> {
        &self.client
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn editing(&self) -> Option<u64> {
        match self.mode {
            Mode::Edit { id } => Some(id),
            Mode::Create => None,
        }
    }

    /// The record open in the edit form, as last fetched or typed.
    pub fn selected(&self) -> Option<User> {
        self.editing().map(|id| User {
            id,
            name: self.edit_form.name.clone(),
            email: self.edit_form.email.clone(),
        })
    }

    pub fn create_form(&self) -> &Form {
        &self.create_form
    }

    pub fn edit_form(&self) -> &Form {
        &self.edit_form
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Take the status line, leaving none behind.
    pub fn take_status(&mut self) -> Option<StatusMessage> {
        self.status.take()
    }

    /// Annotations of whichever form is active.
    pub fn field_errors(&self) -> &FieldErrors {
        match self.mode {
            Mode::Create => &self.create_form.errors,
            Mode::Edit { .. } => &self.edit_form.errors,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Users whose name or email contains the search term, ignoring case.
    pub fn filtered(&self) -> Vec<&User> {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return self.users.iter().collect();
        }
        self.users.iter().filter(|u| u.matches(&term)).collect()
    }

    /// Re-fetch the collection, replacing what is displayed.
    pub async fn refresh(&mut self) {
        self.status = None;
        self.clear_errors();
        match self.client.list().await {
            Ok(users) => {
                debug!(count = users.len(), "collection refreshed");
                self.users = users;
            }
            Err(e) => self.warn_from(e, |status| format!("Failed to load users: {status}")),
        }
    }

    /// Fetch one record and open it in the edit form.
    pub async fn view(&mut self, id: u64) {
        self.status = None;
        self.clear_errors();
        match self.client.get(id).await {
            Ok(user) => self.enter_edit(&user),
            Err(DirectoryError::NotFound(_)) => {
                self.status = Some(StatusMessage::warn("User not found"));
                self.show_create();
            }
            Err(e) => self.warn_from(e, |status| format!("Error: {status}")),
        }
    }

    /// Submit the create form. Returns the created record on success.
    pub async fn create(&mut self, name: &str, email: &str) -> Option<User> {
        self.status = None;
        self.show_create();
        self.create_form.errors.clear();
        self.create_form.fill(name, email);

        let request = UserRequest::new(name, email);
        if !self.passes_validation(&request, FormKind::Create) {
            return None;
        }

        match self.client.create(&request).await {
            Ok(created) => {
                self.status = Some(StatusMessage::info(format!(
                    "Created user id {}",
                    created.id
                )));
                self.create_form.reset();
                self.refresh_after_success().await;
                Some(created)
            }
            Err(DirectoryError::Validation(fields)) => {
                self.create_form.errors.merge(fields);
                None
            }
            Err(e) => {
                self.warn_from(e, |status| format!("Create failed: {status}"));
                None
            }
        }
    }

    /// Submit the edit form for the record currently being edited.
    pub async fn save(&mut self, name: &str, email: &str) {
        self.status = None;
        let Some(id) = self.editing() else {
            self.status = Some(StatusMessage::warn("No user selected for editing"));
            return;
        };

        self.edit_form.errors.clear();
        self.edit_form.fill(name, email);

        let request = UserRequest::new(name, email);
        if !self.passes_validation(&request, FormKind::Edit) {
            return;
        }

        match self.client.update(id, &request).await {
            Ok(_) => {
                self.status = Some(StatusMessage::info("User updated"));
                self.show_create();
                self.refresh_after_success().await;
            }
            Err(DirectoryError::Validation(fields)) => {
                self.edit_form.errors.merge(fields);
            }
            Err(DirectoryError::NotFound(_)) => {
                self.status = Some(StatusMessage::warn("User not found"));
                self.show_create();
            }
            Err(e) => self.warn_from(e, |status| format!("Update failed: {status}")),
        }
    }

    pub async fn delete(&mut self, id: u64) {
        self.status = None;
        self.clear_errors();
        match self.client.delete(id).await {
            Ok(()) => {
                self.status = Some(StatusMessage::info("Deleted"));
                self.leave_edit_of(id);
                self.refresh_after_success().await;
            }
            Err(DirectoryError::NotFound(_)) => {
                self.leave_edit_of(id);
                self.refresh().await;
                self.status = Some(StatusMessage::warn("User not found"));
            }
            Err(e) => self.warn_from(e, |status| format!("Delete failed: {status}")),
        }
    }

    /// Abandon the edit form without saving.
    pub fn cancel_edit(&mut self) {
        self.show_create();
        self.clear_errors();
    }

    /// Empty the create form and drop all annotations.
    pub fn clear_form(&mut self) {
        self.create_form.reset();
        self.clear_errors();
    }

    fn passes_validation(&mut self, request: &UserRequest, kind: FormKind) -> bool {
        if !self.validate {
            return true;
        }
        match validation::validate(request) {
            Ok(()) => true,
            Err(fields) => {
                debug!(fields = fields.len(), "submission rejected locally");
                let form = match kind {
                    FormKind::Create => &mut self.create_form,
                    FormKind::Edit => &mut self.edit_form,
                };
                form.errors.merge(fields);
                false
            }
        }
    }

    /// Refresh without letting a successful refresh erase the action's status.
    async fn refresh_after_success(&mut self) {
        let status = self.status.take();
        self.refresh().await;
        if self.status.is_none() {
            self.status = status;
        }
    }

    fn enter_edit(&mut self, user: &User) {
        self.mode = Mode::Edit { id: user.id };
        self.edit_form.fill(&user.name, &user.email);
        self.edit_form.errors.clear();
    }

    fn show_create(&mut self) {
        self.mode = Mode::Create;
        self.edit_form.reset();
    }

    fn leave_edit_of(&mut self, id: u64) {
        if self.editing() == Some(id) {
            self.show_create();
        }
    }

    fn clear_errors(&mut self) {
        self.create_form.errors.clear();
        self.edit_form.errors.clear();
    }

    /// Turn an error into the status line. `describe` words unexpected statuses.
    fn warn_from(&mut self, error: DirectoryError, describe: impl FnOnce(u16) -> String) {
        let text = match error {
            DirectoryError::Status(status) => describe(status),
            DirectoryError::ValidationFailed => "Validation failed".to_string(),
            other => other.to_string(),
        };
        self.status = Some(StatusMessage::warn(text));
    }
}

#[derive(Clone, Copy)]
enum FormKind {
    Create,
    Edit,
}
