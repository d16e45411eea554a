//! Application state and the interaction controller.
//!
//! [`App`] owns the record cache, the open form/modals, the notification
//! stack and the store handle. Store calls are described as [`Request`]s and
//! their results fed back through [`App::complete`], so the event loop can run
//! them in the background and keep handling input meanwhile. At most one
//! request is in flight at a time.

use crate::forms::{FormPhase, RecordForm};
use crate::keys::{Action, InputMode};
use crate::notifications::{NotificationCenter, NotificationKind};
use crate::theme::SynthBruteTheme;
use crate::view_model::{self, TableView};
use crate::views::modal::is_outside_modal;
use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use roster_client::{Operation, RecordStore, RemoteError};
use roster_core::{validate_fields, Record, RecordFields, RecordId, ValidationError};
use std::sync::Arc;
use std::time::Duration;

/// Why a reload was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTrigger {
    Startup,
    Manual,
    Timer,
    AfterMutation,
    Reconnect,
}

impl ReloadTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadTrigger::Startup => "startup",
            ReloadTrigger::Manual => "manual",
            ReloadTrigger::Timer => "timer",
            ReloadTrigger::AfterMutation => "after_mutation",
            ReloadTrigger::Reconnect => "reconnect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Result of a controller operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The remote call succeeded.
    Done,
    /// Rejected locally; nothing was sent.
    Invalid(ValidationError),
    /// The remote call failed.
    Failed,
    /// Nothing to do in the current state.
    Ignored,
}

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A store call the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List(ReloadTrigger),
    Create(RecordFields),
    Update(RecordId, RecordFields),
    Delete(RecordId),
}

impl Request {
    pub async fn execute<S: RecordStore>(self, store: &S) -> Response {
        match self {
            Request::List(trigger) => Response::Listed {
                trigger,
                result: store.list().await,
            },
            Request::Create(fields) => Response::Created(store.create(&fields).await),
            Request::Update(target, fields) => {
                let result = store.update(&target, &fields).await;
                Response::Updated { target, result }
            }
            Request::Delete(target) => {
                let result = store.delete(&target).await;
                Response::Deleted { target, result }
            }
        }
    }
}

/// What came back from a [`Request`].
#[derive(Debug)]
pub enum Response {
    Listed {
        trigger: ReloadTrigger,
        result: Result<Vec<Record>, RemoteError>,
    },
    Created(Result<Record, RemoteError>),
    Updated {
        target: RecordId,
        result: Result<Record, RemoteError>,
    },
    Deleted {
        target: RecordId,
        result: Result<(), RemoteError>,
    },
}

/// What the event loop should do after an input was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Continue,
    Quit,
    Send(Request),
}

/// A finished request, plus the reload it may have scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub outcome: Outcome,
    pub follow_up: Option<Request>,
}

impl Completion {
    fn settled(outcome: Outcome) -> Self {
        Self {
            outcome,
            follow_up: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditModal {
    pub target: RecordId,
    pub form: RecordForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteModal {
    pub target: RecordId,
    pub summary: String,
}

pub struct App<S> {
    store: Arc<S>,
    pub theme: SynthBruteTheme,
    pub records: Vec<Record>,
    pub loading: bool,
    pub in_flight: bool,
    pub selected: Option<RecordId>,
    pub add_form: Option<RecordForm>,
    pub edit_modal: Option<EditModal>,
    pub delete_modal: Option<DeleteModal>,
    pub notifications: NotificationCenter,
    pub connectivity: Connectivity,
}

impl<S: RecordStore> App<S> {
    pub fn new(store: S, notification_ttl: Duration) -> Self {
        Self {
            store: Arc::new(store),
            theme: SynthBruteTheme::synthbrute(),
            records: Vec::new(),
            loading: true,
            in_flight: false,
            selected: None,
            add_form: None,
            edit_modal: None,
            delete_modal: None,
            notifications: NotificationCenter::new(notification_ttl),
            connectivity: Connectivity::Online,
        }
    }

    /// Shared handle for running requests off the event loop.
    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    pub fn input_mode(&self) -> InputMode {
        if self.delete_modal.is_some() {
            InputMode::Confirm
        } else if self.edit_modal.is_some() || self.add_form.is_some() {
            InputMode::Form
        } else {
            InputMode::Browse
        }
    }

    pub fn has_modal(&self) -> bool {
        self.input_mode() != InputMode::Browse
    }

    pub fn table_view(&self) -> TableView {
        view_model::project(&self.records, self.loading)
    }

    pub fn selected_record(&self) -> Option<&Record> {
        let id = self.selected.as_ref()?;
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_ref()?;
        self.records.iter().position(|r| &r.id == id)
    }

    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.notifications.push(kind, title, message);
    }

    pub fn prune_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications.prune(now);
    }

    /// Trigger the ticker should use for its next periodic reload.
    pub fn periodic_trigger(&self) -> ReloadTrigger {
        match self.connectivity {
            Connectivity::Online => ReloadTrigger::Timer,
            Connectivity::Offline => ReloadTrigger::Reconnect,
        }
    }

    // ------------------------------------------------------------------------
    // Request lifecycle
    // ------------------------------------------------------------------------

    fn issue(&mut self, request: Request) -> Result<Request, Outcome> {
        if self.in_flight {
            match &request {
                Request::List(trigger) => {
                    tracing::debug!(trigger = trigger.as_str(), "Reload skipped, request in flight");
                }
                _ => self.notify(
                    NotificationKind::Info,
                    "Busy",
                    "Wait for the current request to finish",
                ),
            }
            return Err(Outcome::Ignored);
        }
        self.in_flight = true;
        if matches!(request, Request::List(_)) {
            self.loading = true;
        }
        Ok(request)
    }

    /// Apply the result of a request issued earlier.
    ///
    /// A successful mutation schedules the reload that must follow it.
    pub fn complete(&mut self, response: Response) -> Completion {
        self.in_flight = false;
        match response {
            Response::Listed { trigger, result } => {
                Completion::settled(self.finish_reload(trigger, result))
            }
            Response::Created(result) => self.finish_add(result),
            Response::Updated { target, result } => self.finish_edit(target, result),
            Response::Deleted { target, result } => self.finish_delete(target, result),
        }
    }

    /// Run a request and every follow-up it schedules to completion.
    pub async fn drive(&mut self, request: Request) -> Outcome {
        let store = self.store();
        let response = request.execute(store.as_ref()).await;
        let Completion {
            outcome,
            mut follow_up,
        } = self.complete(response);
        while let Some(request) = follow_up.take() {
            let response = request.execute(store.as_ref()).await;
            follow_up = self.complete(response).follow_up;
        }
        outcome
    }

    async fn run(&mut self, begun: Result<Request, Outcome>) -> Outcome {
        match begun {
            Ok(request) => self.drive(request).await,
            Err(outcome) => outcome,
        }
    }

    fn after_mutation(&mut self) -> Option<Request> {
        self.begin_reload(ReloadTrigger::AfterMutation).ok()
    }

    // ------------------------------------------------------------------------
    // Reload
    // ------------------------------------------------------------------------

    /// Greet the user and issue the startup reload. The greeting is visible
    /// while the first load is still pending.
    pub fn start(&mut self) -> Result<Request, Outcome> {
        self.notify(NotificationKind::Info, "Welcome!", "Roster client started");
        self.begin_reload(ReloadTrigger::Startup)
    }

    pub fn begin_reload(&mut self, trigger: ReloadTrigger) -> Result<Request, Outcome> {
        self.issue(Request::List(trigger))
    }

    /// Replace the cache with the server's collection.
    ///
    /// On failure the cache is emptied and an error is surfaced.
    pub async fn reload(&mut self, trigger: ReloadTrigger) -> Outcome {
        let begun = self.begin_reload(trigger);
        self.run(begun).await
    }

    fn finish_reload(
        &mut self,
        trigger: ReloadTrigger,
        result: Result<Vec<Record>, RemoteError>,
    ) -> Outcome {
        self.loading = false;
        match result {
            Ok(records) => {
                tracing::info!(trigger = trigger.as_str(), count = records.len(), "Records loaded");
                self.records = records;
                self.reconcile_selection();
                if self.connectivity == Connectivity::Offline {
                    self.connectivity = Connectivity::Online;
                    self.notify(NotificationKind::Success, "Connection Restored", "You are back online");
                }
                let message = format!("Loaded {} records", self.records.len());
                self.notify(NotificationKind::Success, "Success", message);
                Outcome::Done
            }
            Err(err) => {
                tracing::error!(trigger = trigger.as_str(), error = %err, "Error loading records");
                self.records.clear();
                self.reconcile_selection();
                if err.is_transport() && self.connectivity == Connectivity::Online {
                    self.connectivity = Connectivity::Offline;
                    tracing::warn!("Connection lost");
                    self.notify(
                        NotificationKind::Error,
                        "Connection Lost",
                        "You are offline. Some features may not work.",
                    );
                }
                self.notify_remote_failure(Operation::List, &err);
                Outcome::Failed
            }
        }
    }

    fn reconcile_selection(&mut self) {
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|id| self.records.iter().any(|r| &r.id == id));
        if !still_present {
            self.selected = self.records.first().map(|r| r.id.clone());
        }
    }

    // ------------------------------------------------------------------------
    // Add form
    // ------------------------------------------------------------------------

    pub fn open_add_form(&mut self) {
        self.add_form = Some(RecordForm::new());
    }

    pub fn close_add_form(&mut self) {
        self.add_form = None;
    }

    pub fn begin_add(&mut self) -> Result<Request, Outcome> {
        let Some(form) = self.add_form.as_ref() else {
            return Err(Outcome::Ignored);
        };
        if form.is_submitting() {
            return Err(Outcome::Ignored);
        }
        let fields = form.fields();
        if let Err(err) = validate_fields(&fields) {
            return Err(self.reject(err));
        }
        let request = self.issue(Request::Create(fields))?;
        if let Some(form) = self.add_form.as_mut() {
            form.phase = FormPhase::Submitting;
        }
        Ok(request)
    }

    pub async fn submit_add(&mut self) -> Outcome {
        let begun = self.begin_add();
        self.run(begun).await
    }

    fn finish_add(&mut self, result: Result<Record, RemoteError>) -> Completion {
        if let Some(form) = self.add_form.as_mut() {
            form.phase = FormPhase::Idle;
        }
        match result {
            Ok(record) => {
                tracing::info!(id = %record.id, "Record added");
                self.notify(NotificationKind::Success, "Success", "Record added successfully");
                self.close_add_form();
                Completion {
                    outcome: Outcome::Done,
                    follow_up: self.after_mutation(),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "Error adding record");
                self.notify_remote_failure(Operation::Create, &err);
                Completion::settled(Outcome::Failed)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Edit modal
    // ------------------------------------------------------------------------

    /// Open the edit modal for the selected record, if any.
    pub fn open_edit_modal(&mut self) -> bool {
        let Some(record) = self.selected_record() else {
            return false;
        };
        let modal = EditModal {
            target: record.id.clone(),
            form: RecordForm::from_record(record),
        };
        self.edit_modal = Some(modal);
        true
    }

    /// Close without side effects, clearing the pending target.
    pub fn close_edit_modal(&mut self) {
        self.edit_modal = None;
    }

    pub fn pending_edit(&self) -> Option<&RecordId> {
        self.edit_modal.as_ref().map(|m| &m.target)
    }

    pub fn begin_edit(&mut self) -> Result<Request, Outcome> {
        let Some(modal) = self.edit_modal.as_ref() else {
            return Err(self.reject(ValidationError::NoPendingTarget { action: "update" }));
        };
        if modal.form.is_submitting() {
            return Err(Outcome::Ignored);
        }
        let target = modal.target.clone();
        let fields = modal.form.fields();
        if let Err(err) = validate_fields(&fields) {
            return Err(self.reject(err));
        }
        let request = self.issue(Request::Update(target, fields))?;
        if let Some(modal) = self.edit_modal.as_mut() {
            modal.form.phase = FormPhase::Submitting;
        }
        Ok(request)
    }

    pub async fn submit_edit(&mut self) -> Outcome {
        let begun = self.begin_edit();
        self.run(begun).await
    }

    fn finish_edit(&mut self, target: RecordId, result: Result<Record, RemoteError>) -> Completion {
        if let Some(modal) = self.edit_modal.as_mut() {
            modal.form.phase = FormPhase::Idle;
        }
        match result {
            Ok(_) => {
                tracing::info!(id = %target, "Record updated");
                self.notify(NotificationKind::Success, "Success", "Record updated successfully");
                if self.pending_edit() == Some(&target) {
                    self.close_edit_modal();
                }
                Completion {
                    outcome: Outcome::Done,
                    follow_up: self.after_mutation(),
                }
            }
            Err(err) => {
                tracing::error!(id = %target, error = %err, "Error updating record");
                self.notify_remote_failure(Operation::Update, &err);
                Completion::settled(Outcome::Failed)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Delete modal
    // ------------------------------------------------------------------------

    pub fn open_delete_modal(&mut self) -> bool {
        let Some(record) = self.selected_record() else {
            return false;
        };
        let modal = DeleteModal {
            target: record.id.clone(),
            summary: record.summary(),
        };
        self.delete_modal = Some(modal);
        true
    }

    pub fn close_delete_modal(&mut self) {
        self.delete_modal = None;
    }

    pub fn pending_delete(&self) -> Option<&RecordId> {
        self.delete_modal.as_ref().map(|m| &m.target)
    }

    pub fn begin_delete(&mut self) -> Result<Request, Outcome> {
        let Some(target) = self.pending_delete().cloned() else {
            return Err(self.reject(ValidationError::NoPendingTarget { action: "deletion" }));
        };
        self.issue(Request::Delete(target))
    }

    pub async fn confirm_delete(&mut self) -> Outcome {
        let begun = self.begin_delete();
        self.run(begun).await
    }

    fn finish_delete(&mut self, target: RecordId, result: Result<(), RemoteError>) -> Completion {
        match result {
            Ok(()) => {
                tracing::info!(id = %target, "Record deleted");
                self.notify(NotificationKind::Success, "Success", "Record deleted successfully");
                if self.pending_delete() == Some(&target) {
                    self.close_delete_modal();
                }
                Completion {
                    outcome: Outcome::Done,
                    follow_up: self.after_mutation(),
                }
            }
            Err(err) => {
                tracing::error!(id = %target, error = %err, "Error deleting record");
                self.notify_remote_failure(Operation::Delete, &err);
                Completion::settled(Outcome::Failed)
            }
        }
    }

    /// Close whichever modal or form is open. Escape and outside clicks land
    /// here.
    pub fn close_modals(&mut self) {
        self.close_delete_modal();
        self.close_edit_modal();
        self.close_add_form();
    }

    /// Left click at (`column`, `row`) on a screen of the given size. A click
    /// outside an open modal closes it; returns whether it did.
    pub fn click(&mut self, screen: Rect, column: u16, row: u16) -> bool {
        if !self.has_modal() || !is_outside_modal(screen, column, row) {
            return false;
        }
        self.close_modals();
        true
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.records.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected_index() {
            Some(index) => (index + 1) % self.records.len(),
            None => 0,
        };
        self.selected = Some(self.records[next].id.clone());
    }

    pub fn select_previous(&mut self) {
        if self.records.is_empty() {
            self.selected = None;
            return;
        }
        let prev = match self.selected_index() {
            Some(0) | None => self.records.len() - 1,
            Some(index) => index - 1,
        };
        self.selected = Some(self.records[prev].id.clone());
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Apply an action without waiting on the network. Store calls come back
    /// as [`Effect::Send`] for the caller to run.
    pub fn handle(&mut self, action: Action) -> Effect {
        let begun = match self.input_mode() {
            InputMode::Confirm => self.handle_confirm(action),
            InputMode::Form => self.handle_form(action),
            InputMode::Browse => match action {
                Action::Quit => return Effect::Quit,
                other => self.handle_browse(other),
            },
        };
        match begun {
            Some(Ok(request)) => Effect::Send(request),
            Some(Err(_)) | None => Effect::Continue,
        }
    }

    /// Handle an action and wait for any store call it makes.
    pub async fn dispatch(&mut self, action: Action) -> Control {
        match self.handle(action) {
            Effect::Quit => Control::Quit,
            Effect::Send(request) => {
                self.drive(request).await;
                Control::Continue
            }
            Effect::Continue => Control::Continue,
        }
    }

    fn handle_browse(&mut self, action: Action) -> Option<Result<Request, Outcome>> {
        match action {
            Action::Refresh => return Some(self.begin_reload(ReloadTrigger::Manual)),
            Action::MoveUp => self.select_previous(),
            Action::MoveDown => self.select_next(),
            Action::NewItem => self.open_add_form(),
            Action::EditItem => {
                if !self.open_edit_modal() {
                    self.notify(NotificationKind::Info, "Edit", "Select a record first");
                }
            }
            Action::DeleteItem => {
                if !self.open_delete_modal() {
                    self.notify(NotificationKind::Info, "Delete", "Select a record first");
                }
            }
            // Stray confirmation with nothing pending.
            Action::Confirm => return Some(self.begin_delete()),
            Action::DismissNotification => {
                self.notifications.dismiss_latest();
            }
            Action::ClearNotifications => self.notifications.clear(),
            Action::Quit
            | Action::Cancel
            | Action::NextField
            | Action::PrevField
            | Action::Input(_)
            | Action::Backspace => {}
        }
        None
    }

    fn handle_form(&mut self, action: Action) -> Option<Result<Request, Outcome>> {
        match action {
            Action::Cancel => self.close_modals(),
            Action::Refresh => return Some(self.begin_reload(ReloadTrigger::Manual)),
            Action::Confirm => {
                return Some(if self.edit_modal.is_some() {
                    self.begin_edit()
                } else {
                    self.begin_add()
                });
            }
            Action::NextField => self.with_form(|f| f.focus_next()),
            Action::PrevField => self.with_form(|f| f.focus_previous()),
            Action::Input(c) => self.with_form(|f| f.insert_char(c)),
            Action::Backspace => self.with_form(|f| f.backspace()),
            _ => {}
        }
        None
    }

    fn handle_confirm(&mut self, action: Action) -> Option<Result<Request, Outcome>> {
        match action {
            Action::Cancel => self.close_modals(),
            Action::Confirm => return Some(self.begin_delete()),
            Action::Refresh => return Some(self.begin_reload(ReloadTrigger::Manual)),
            _ => {}
        }
        None
    }

    fn with_form(&mut self, f: impl FnOnce(&mut RecordForm)) {
        if let Some(modal) = self.edit_modal.as_mut() {
            f(&mut modal.form);
        } else if let Some(form) = self.add_form.as_mut() {
            f(form);
        }
    }

    // ------------------------------------------------------------------------
    // Error surfacing
    // ------------------------------------------------------------------------

    fn reject(&mut self, err: ValidationError) -> Outcome {
        tracing::warn!(error = %err, "Input rejected");
        let title = match err {
            ValidationError::NoPendingTarget { .. } => "Error",
            _ => "Validation Error",
        };
        self.notify(NotificationKind::Error, title, err.to_string());
        Outcome::Invalid(err)
    }

    fn notify_remote_failure(&mut self, operation: Operation, err: &RemoteError) {
        let message = format!("{}: {}", operation.generic_failure(), err);
        self.notify(NotificationKind::Error, "Error", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Notification;
    use roster_test_utils::{sample_records, MockFailure, MockRecordStore, StoreCall};

    fn app_with(records: Vec<Record>) -> (App<MockRecordStore>, MockRecordStore) {
        let store = MockRecordStore::with_records(records);
        let app = App::new(store.clone(), Duration::from_secs(5));
        (app, store)
    }

    async fn loaded_app() -> (App<MockRecordStore>, MockRecordStore) {
        let (mut app, store) = app_with(sample_records());
        app.reload(ReloadTrigger::Startup).await;
        store.clear_calls();
        app.notifications.clear();
        (app, store)
    }

    fn store_handle(app: &App<MockRecordStore>) -> Arc<MockRecordStore> {
        app.store()
    }

    fn latest(app: &App<MockRecordStore>) -> &Notification {
        app.notifications.latest().expect("notification")
    }

    fn type_into(app: &mut App<MockRecordStore>, name: &str, email: &str, phone: &str) {
        let form = app.add_form.as_mut().expect("add form open");
        form.name = name.to_string();
        form.email = email.to_string();
        form.phone = phone.to_string();
    }

    #[tokio::test]
    async fn test_startup_reload_populates_cache() {
        let (mut app, store) = app_with(sample_records());
        assert!(app.loading);
        assert_eq!(app.table_view(), TableView::Loading);
        assert_eq!(app.reload(ReloadTrigger::Startup).await, Outcome::Done);
        assert!(!app.loading);
        assert_eq!(app.records.len(), 3);
        assert_eq!(app.selected, Some(RecordId::Number(1)));
        assert_eq!(latest(&app).message, "Loaded 3 records");
        assert_eq!(store.calls(), vec![StoreCall::List]);
    }

    #[tokio::test]
    async fn test_failed_reload_empties_cache() {
        let (mut app, store) = loaded_app().await;
        store.fail_next(Operation::List, MockFailure::Rejected(Some("Quota".to_string())));
        assert_eq!(app.reload(ReloadTrigger::Manual).await, Outcome::Failed);
        assert!(app.records.is_empty());
        assert_eq!(app.table_view(), TableView::Empty);
        assert_eq!(app.selected, None);
        let note = latest(&app);
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Failed to load records: Quota");
        assert_eq!(app.connectivity, Connectivity::Online);
    }

    #[tokio::test]
    async fn test_empty_name_never_reaches_store() {
        let (mut app, store) = loaded_app().await;
        app.open_add_form();
        type_into(&mut app, "   ", "a@x.com", "");
        let outcome = app.submit_add().await;
        assert!(matches!(outcome, Outcome::Invalid(_)));
        assert_eq!(store.call_count(), 0);
        assert_eq!(latest(&app).title, "Validation Error");
        assert!(app.add_form.is_some());
    }

    #[tokio::test]
    async fn test_add_success_reloads_once_and_resets_form() {
        let (mut app, store) = loaded_app().await;
        app.open_add_form();
        type_into(&mut app, " New Person ", "new@x.com", "");
        assert_eq!(app.submit_add().await, Outcome::Done);
        assert_eq!(store.count_of(Operation::Create), 1);
        assert_eq!(store.count_of(Operation::List), 1);
        assert!(matches!(store.calls()[0], StoreCall::Create(ref f) if f.name == "New Person"));
        assert!(app.add_form.is_none());
        assert_eq!(app.records.len(), 4);
    }

    #[tokio::test]
    async fn test_add_failure_keeps_cache_and_form() {
        let (mut app, store) = loaded_app().await;
        store.fail_next(Operation::Create, MockFailure::Rejected(None));
        app.open_add_form();
        type_into(&mut app, "X", "x@x.com", "");
        assert_eq!(app.submit_add().await, Outcome::Failed);
        assert_eq!(store.count_of(Operation::List), 0);
        assert_eq!(app.records.len(), 3);
        let form = app.add_form.as_ref().unwrap();
        assert_eq!(form.phase, FormPhase::Idle);
        assert_eq!(form.name, "X");
        assert_eq!(latest(&app).message, "Failed to add record: Failed to add record");
    }

    #[tokio::test]
    async fn test_edit_flow_updates_pending_target() {
        let (mut app, store) = loaded_app().await;
        app.select_next();
        assert!(app.open_edit_modal());
        assert_eq!(app.pending_edit(), Some(&RecordId::Number(2)));
        assert_eq!(app.edit_modal.as_ref().unwrap().form.name, "Grace Hopper");
        app.edit_modal.as_mut().unwrap().form.phone = "555 0199".to_string();
        assert_eq!(app.submit_edit().await, Outcome::Done);
        assert_eq!(store.count_of(Operation::Update), 1);
        assert_eq!(store.count_of(Operation::List), 1);
        assert!(app.edit_modal.is_none());
        assert_eq!(app.records[1].phone.as_deref(), Some("555 0199"));
        assert_eq!(app.selected, Some(RecordId::Number(2)));
    }

    #[tokio::test]
    async fn test_edit_without_pending_target_is_local_error() {
        let (mut app, store) = loaded_app().await;
        let outcome = app.submit_edit().await;
        assert!(matches!(outcome, Outcome::Invalid(ValidationError::NoPendingTarget { .. })));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_closing_edit_clears_target_without_calls() {
        let (mut app, store) = loaded_app().await;
        app.open_edit_modal();
        app.dispatch(Action::Input('z')).await;
        app.dispatch(Action::Cancel).await;
        assert!(app.pending_edit().is_none());
        assert_eq!(app.input_mode(), InputMode::Browse);
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_confirm_without_pending_id() {
        let (mut app, store) = loaded_app().await;
        assert!(matches!(app.confirm_delete().await, Outcome::Invalid(_)));
        assert_eq!(store.call_count(), 0);
        let note = latest(&app);
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "No record selected for deletion");
    }

    #[tokio::test]
    async fn test_delete_after_close_is_rejected() {
        let (mut app, store) = loaded_app().await;
        app.open_delete_modal();
        app.close_delete_modal();
        assert!(app.pending_delete().is_none());
        assert!(matches!(app.confirm_delete().await, Outcome::Invalid(_)));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_flow_via_dispatch() {
        let (mut app, store) = loaded_app().await;
        app.dispatch(Action::DeleteItem).await;
        assert_eq!(app.input_mode(), InputMode::Confirm);
        assert_eq!(
            app.delete_modal.as_ref().unwrap().summary,
            "Ada Lovelace (ada@example.com)"
        );
        app.dispatch(Action::Confirm).await;
        assert_eq!(
            store.calls(),
            vec![StoreCall::Delete(RecordId::Number(1)), StoreCall::List]
        );
        assert!(app.delete_modal.is_none());
        assert_eq!(app.records.len(), 2);
        assert_eq!(app.selected, Some(RecordId::Number(2)));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_modal_open() {
        let (mut app, store) = loaded_app().await;
        store.fail_next(Operation::Delete, MockFailure::Rejected(Some("Locked".to_string())));
        app.open_delete_modal();
        assert_eq!(app.confirm_delete().await, Outcome::Failed);
        assert!(app.delete_modal.is_some());
        assert_eq!(store.count_of(Operation::List), 0);
        assert_eq!(latest(&app).message, "Failed to delete record: Locked");
    }

    #[tokio::test]
    async fn test_connectivity_lost_and_restored() {
        let (mut app, store) = loaded_app().await;
        store.set_offline(true);
        app.reload(ReloadTrigger::Timer).await;
        assert_eq!(app.connectivity, Connectivity::Offline);
        assert_eq!(app.periodic_trigger(), ReloadTrigger::Reconnect);
        assert!(app
            .notifications
            .active()
            .iter()
            .any(|n| n.title == "Connection Lost"));

        store.set_offline(false);
        app.reload(app.periodic_trigger()).await;
        assert_eq!(app.connectivity, Connectivity::Online);
        assert!(app
            .notifications
            .active()
            .iter()
            .any(|n| n.title == "Connection Restored"));
    }

    #[tokio::test]
    async fn test_selection_wraps() {
        let (mut app, _store) = loaded_app().await;
        app.select_previous();
        assert_eq!(app.selected, Some(RecordId::from("legacy-7")));
        app.select_next();
        assert_eq!(app.selected, Some(RecordId::Number(1)));
    }

    #[tokio::test]
    async fn test_quit_only_from_browse() {
        let (mut app, _store) = loaded_app().await;
        app.open_add_form();
        assert_eq!(app.dispatch(Action::Quit).await, Control::Continue);
        app.close_modals();
        assert_eq!(app.dispatch(Action::Quit).await, Control::Quit);
    }

    #[tokio::test]
    async fn test_welcome_shown_while_startup_load_pending() {
        let (mut app, store) = app_with(sample_records());
        let request = app.start().unwrap();
        assert_eq!(request, Request::List(ReloadTrigger::Startup));
        assert_eq!(app.table_view(), TableView::Loading);
        assert_eq!(latest(&app).title, "Welcome!");

        let response = request.execute(store_handle(&app).as_ref()).await;
        app.complete(response);
        let titles: Vec<_> = app.notifications.active().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Welcome!", "Success"]);
        assert_eq!(store.calls(), vec![StoreCall::List]);
    }

    #[tokio::test]
    async fn test_input_handled_while_request_pending() {
        let (mut app, store) = loaded_app().await;
        let Effect::Send(request) = app.handle(Action::Refresh) else {
            panic!("refresh should issue a request");
        };
        assert_eq!(request, Request::List(ReloadTrigger::Manual));
        assert!(app.in_flight);
        assert!(app.loading);

        app.handle(Action::MoveDown);
        assert_eq!(app.selected, Some(RecordId::Number(2)));
        assert_eq!(app.handle(Action::Refresh), Effect::Continue);
        assert_eq!(app.begin_reload(ReloadTrigger::Timer), Err(Outcome::Ignored));
        assert_eq!(store.call_count(), 0);

        let response = request.execute(store_handle(&app).as_ref()).await;
        let completion = app.complete(response);
        assert_eq!(completion.outcome, Outcome::Done);
        assert!(completion.follow_up.is_none());
        assert!(!app.in_flight);
        assert!(!app.loading);
        assert_eq!(app.selected, Some(RecordId::Number(2)));
        assert_eq!(app.handle(Action::Quit), Effect::Quit);
    }

    #[tokio::test]
    async fn test_mutation_refused_while_request_pending() {
        let (mut app, store) = loaded_app().await;
        let pending = app.begin_reload(ReloadTrigger::Timer).unwrap();
        app.open_add_form();
        type_into(&mut app, "Ann", "ann@x.com", "");
        assert_eq!(app.handle(Action::Confirm), Effect::Continue);
        assert_eq!(latest(&app).title, "Busy");
        assert_eq!(app.add_form.as_ref().unwrap().phase, FormPhase::Idle);

        let response = pending.execute(store_handle(&app).as_ref()).await;
        app.complete(response);
        assert!(matches!(app.handle(Action::Confirm), Effect::Send(Request::Create(_))));
        assert_eq!(app.add_form.as_ref().unwrap().phase, FormPhase::Submitting);
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn test_completed_delete_schedules_one_reload() {
        let (mut app, store) = loaded_app().await;
        app.handle(Action::DeleteItem);
        let Effect::Send(request) = app.handle(Action::Confirm) else {
            panic!("confirm should issue a delete");
        };
        let response = request.execute(store_handle(&app).as_ref()).await;
        let completion = app.complete(response);
        assert_eq!(completion.outcome, Outcome::Done);
        assert_eq!(
            completion.follow_up,
            Some(Request::List(ReloadTrigger::AfterMutation))
        );
        assert!(app.delete_modal.is_none());
        assert!(app.in_flight);
        assert_eq!(store.calls(), vec![StoreCall::Delete(RecordId::Number(1))]);
    }

    #[tokio::test]
    async fn test_outside_click_clears_pending_target() {
        let (mut app, store) = loaded_app().await;
        let screen = Rect::new(0, 0, 100, 40);
        let inside = crate::views::modal_area(screen);

        app.open_delete_modal();
        assert!(!app.click(screen, inside.x + 1, inside.y + 1));
        assert!(app.pending_delete().is_some());
        assert!(app.click(screen, 0, 0));
        assert!(app.pending_delete().is_none());

        app.open_edit_modal();
        assert!(app.click(screen, 99, 39));
        assert!(app.pending_edit().is_none());
        assert_eq!(app.input_mode(), InputMode::Browse);
        assert!(!app.click(screen, 0, 0));
        assert_eq!(store.call_count(), 0);
    }
}
