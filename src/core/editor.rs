use super::action_fields::fields_for_action;
use super::debounce::Debouncer;
use super::definition::{DerivedDefinition, WorkflowDefinition};
use super::session::{EditSession, SessionStore, WorkflowDetails, WorkflowId};
use super::step::{parse_conditions, Step, StepField};
use super::template::SaveRequest;
use super::validation::{validate_definition, ValidationStatus};
use crate::client::PersistenceClient;
use crate::constants::*;
use crate::errors::Error;
use crate::host::{ModalHost, Notification};
use crate::render::{action_field_views, step_view, step_views, RenderSurface};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Timings used by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    /// Quiet period before an action change redraws the step's action fields
    pub refresh_debounce: Duration,
    /// Pause between a successful save and the host reload, so the banner is seen
    pub reload_delay: Duration,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            refresh_debounce: Duration::from_millis(100),
            reload_delay: Duration::from_secs(1),
        }
    }
}

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored by the backend; carries the message shown to the user
    Saved { message: String },
    /// Not sent because no session or derived definition exists
    NothingToSave,
    /// Not sent because the definition failed validation
    Invalid(ValidationStatus),
    /// Not sent because a save for this workflow is already in flight
    Busy,
    /// Sent but rejected, or the request could not be completed
    Failed { reason: String },
}

/// Edits workflow definitions and keeps their rendering, preview and validation in sync.
///
/// Sessions live in the injected [`SessionStore`]; every mutation recomputes the
/// derived definition before returning.
pub struct WorkflowEditor {
    sessions: Arc<dyn SessionStore>,
    surface: Arc<dyn RenderSurface>,
    host: Arc<dyn ModalHost>,
    client: Arc<dyn PersistenceClient>,
    refreshes: Debouncer<(WorkflowId, usize)>,
    settings: EditorSettings,
}

impl std::fmt::Debug for WorkflowEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowEditor")
            .field("sessions", &self.sessions.ids())
            .field("client", &self.client)
            .field("settings", &self.settings)
            .finish()
    }
}

impl WorkflowEditor {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        surface: Arc<dyn RenderSurface>,
        host: Arc<dyn ModalHost>,
        client: Arc<dyn PersistenceClient>,
        settings: EditorSettings,
    ) -> Self {
        Self {
            sessions,
            surface,
            host,
            client,
            refreshes: Debouncer::new(settings.refresh_debounce),
            settings,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Copy of a session's state
    pub fn session(&self, id: &WorkflowId) -> Option<EditSession> {
        self.sessions.snapshot(id)
    }

    /// Number of action-field refreshes still waiting for their quiet period
    pub fn pending_refreshes(&self) -> usize {
        self.refreshes.pending()
    }

    /// Opens a session seeded from a stored definition.
    ///
    /// Missing or malformed fields of `initial_definition` open as empty.
    pub fn open_session(&self, id: &WorkflowId, initial_definition: &Value) {
        self.open_session_with_details(id, initial_definition, WorkflowDetails::default());
    }

    /// Opens a session seeded from a stored definition and the workflow's form fields
    pub fn open_session_with_details(
        &self,
        id: &WorkflowId,
        initial_definition: &Value,
        details: WorkflowDetails,
    ) {
        let definition = WorkflowDefinition::from_seed(initial_definition);
        info!(
            "Opening workflow {} with {} trigger(s) and {} step(s)",
            id,
            definition.triggers.len(),
            definition.steps.len()
        );

        self.refreshes.cancel_where(|(workflow, _)| workflow == id);
        self.sessions
            .open(id.clone(), EditSession::new(definition, details));
        self.render_steps(id);
        self.recompute_derived(id);
    }

    /// Discards a session without saving
    pub fn close_session(&self, id: &WorkflowId) -> bool {
        let cancelled = self.refreshes.cancel_where(|(workflow, _)| workflow == id);
        if cancelled > 0 {
            debug!("Cancelled {} pending refresh(es) for {}", cancelled, id);
        }
        let closed = self.sessions.close(id);
        if closed {
            info!("Closed workflow {} without saving", id);
        }
        closed
    }

    /// Replaces the selected triggers
    pub fn set_triggers<I, S>(&self, id: &WorkflowId, triggers: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let triggers: Vec<String> = triggers.into_iter().map(Into::into).collect();
        let applied = self.sessions.update(id, &mut |session| {
            session.definition.set_triggers(triggers.iter().cloned());
        });
        if applied {
            self.recompute_derived(id);
        }
        applied
    }

    /// Replaces name, description and active flag
    pub fn update_details(&self, id: &WorkflowId, details: WorkflowDetails) -> bool {
        self.sessions.update(id, &mut |session| {
            session.details = details.clone();
        })
    }

    /// Appends an empty step
    pub fn add_step(&self, id: &WorkflowId) -> bool {
        let applied = self.sessions.update(id, &mut |session| {
            session.definition.steps.push(Step::default());
        });
        if !applied {
            return false;
        }
        self.render_steps(id);
        self.recompute_derived(id);
        true
    }

    /// Removes the step at `index`; later steps move up one position.
    /// An index out of range leaves the session unchanged.
    pub fn remove_step(&self, id: &WorkflowId, index: usize) -> bool {
        let mut removed = false;
        self.sessions.update(id, &mut |session| {
            if index < session.definition.steps.len() {
                session.definition.steps.remove(index);
                removed = true;
            }
        });
        if !removed {
            debug!("No step {} to remove in workflow {}", index, id);
            return false;
        }

        // Positions shift, so pending refreshes point at the wrong steps.
        self.refreshes.cancel_where(|(workflow, _)| workflow == id);
        self.render_steps(id);
        self.recompute_derived(id);
        true
    }

    /// Sets one field of a step.
    ///
    /// The step list is not redrawn, except that an `action` change schedules a
    /// refresh of that step's action-specific fields.
    pub fn update_step_field(
        &self,
        id: &WorkflowId,
        index: usize,
        field: StepField,
        value: &str,
    ) -> bool {
        let mut applied = false;
        self.sessions.update(id, &mut |session| {
            if let Some(step) = session.definition.steps.get_mut(index) {
                step.set_field(field, value);
                if field == StepField::Action {
                    clear_unlisted_fields(step);
                }
                applied = true;
            }
        });
        if !applied {
            return false;
        }

        self.sync_step_controls(id, index);
        self.recompute_derived(id);
        if field == StepField::Action {
            self.refresh_action_fields(id, index);
        }
        true
    }

    /// Like [`update_step_field`](Self::update_step_field) with the field given by name
    pub fn update_step_field_named(
        &self,
        id: &WorkflowId,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<bool, Error> {
        let field: StepField = field.parse()?;
        Ok(self.update_step_field(id, index, field, value))
    }

    /// Sets a step's conditions from comma separated text
    pub fn update_step_conditions(&self, id: &WorkflowId, index: usize, raw: &str) -> bool {
        let conditions = parse_conditions(raw);
        let mut applied = false;
        self.sessions.update(id, &mut |session| {
            if let Some(step) = session.definition.steps.get_mut(index) {
                step.conditions = conditions.clone();
                applied = true;
            }
        });
        if applied {
            self.sync_step_controls(id, index);
            self.recompute_derived(id);
        }
        applied
    }

    /// Schedules a redraw of one step's action-specific fields after the debounce
    /// period. A newer request for the same step replaces this one.
    pub fn refresh_action_fields(&self, id: &WorkflowId, index: usize) {
        let sessions = Arc::clone(&self.sessions);
        let surface = Arc::clone(&self.surface);
        let workflow = id.clone();
        self.refreshes.schedule((id.clone(), index), move || {
            draw_action_fields(sessions.as_ref(), surface.as_ref(), &workflow, index);
        });
    }

    /// Rebuilds the derived definition, pushes it to the preview and the hidden
    /// field, and refreshes the validation status.
    pub fn recompute_derived(&self, id: &WorkflowId) -> Option<DerivedDefinition> {
        let mut derived = None;
        self.sessions.update(id, &mut |session| {
            let current = session.definition.derive();
            session.current = Some(current.clone());
            derived = Some(current);
        });
        let derived = derived?;

        self.surface.set_preview(id, &derived.to_pretty_json());
        self.surface.set_hidden_value(id, &derived.to_compact_json());
        self.surface
            .show_validation(id, &validate_definition(&derived));
        Some(derived)
    }

    /// Checks the current derived definition and shows the result
    pub fn validate(&self, id: &WorkflowId) -> bool {
        self.validation_status(id)
            .map(|status| status.is_valid())
            .unwrap_or(false)
    }

    /// Status of the current derived definition, or `None` without one
    pub fn validation_status(&self, id: &WorkflowId) -> Option<ValidationStatus> {
        let current = self.sessions.snapshot(id)?.current?;
        let status = validate_definition(&current);
        self.surface.show_validation(id, &status);
        Some(status)
    }

    /// Sends the current definition to the backend.
    ///
    /// Nothing is sent when there is no derived definition or it fails
    /// validation. On success the dialog closes, the session is discarded and
    /// the host reloads after the reload delay. On failure the session is kept
    /// as is so the user can retry. The save control is released on every path.
    pub async fn save(&self, id: &WorkflowId) -> SaveOutcome {
        let Some(session) = self.sessions.snapshot(id) else {
            self.host.alert(NO_DATA_TO_SAVE_MESSAGE);
            return SaveOutcome::NothingToSave;
        };
        let Some(definition) = session.current.clone() else {
            self.host.alert(NO_DATA_TO_SAVE_MESSAGE);
            return SaveOutcome::NothingToSave;
        };

        let status = validate_definition(&definition);
        self.surface.show_validation(id, &status);
        if !status.is_valid() {
            warn!("Refusing to save workflow {}: {}", id, status);
            self.host.alert(FIX_VALIDATION_MESSAGE);
            return SaveOutcome::Invalid(status);
        }

        let mut acquired = false;
        self.sessions.update(id, &mut |session| {
            if !session.saving {
                session.saving = true;
                acquired = true;
            }
        });
        if !acquired {
            debug!("Save already in flight for workflow {}", id);
            return SaveOutcome::Busy;
        }
        self.surface.set_save_busy(id, true);

        let request = SaveRequest {
            name: session.details.name.clone(),
            description: session.details.description.clone(),
            definition,
            is_active: session.details.is_active,
        };
        info!("Saving workflow {} ({} step(s))", id, request.definition.steps.len());

        let outcome = match self.client.save_workflow(id, &request).await {
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| SAVE_SUCCESS_MESSAGE.to_string());
                self.host.notify(Notification::success(message.clone()));
                self.host.close(id);
                SaveOutcome::Saved { message }
            }
            Err(e) => {
                let reason = failure_reason(&e);
                error!("Save workflow {} error: {}", id, e);
                self.host.notify(Notification::error(format!(
                    "{}: {}",
                    SAVE_FAILURE_PREFIX, reason
                )));
                SaveOutcome::Failed { reason }
            }
        };

        self.sessions.update(id, &mut |session| session.saving = false);
        self.surface.set_save_busy(id, false);

        if matches!(outcome, SaveOutcome::Saved { .. }) {
            tokio::time::sleep(self.settings.reload_delay).await;
            self.close_session(id);
            self.host.reload();
        }
        outcome
    }

    fn sync_step_controls(&self, id: &WorkflowId, index: usize) {
        if let Some(session) = self.sessions.snapshot(id) {
            if let Some(step) = session.definition.steps.get(index) {
                self.surface.update_step(id, index, &step_view(index, step));
            }
        }
    }

    fn render_steps(&self, id: &WorkflowId) {
        if let Some(session) = self.sessions.snapshot(id) {
            self.surface
                .render_steps(id, &step_views(&session.definition.steps));
        }
    }
}

/// Redraws one step's action fields from the session's current state
fn draw_action_fields(
    sessions: &dyn SessionStore,
    surface: &dyn RenderSurface,
    id: &WorkflowId,
    index: usize,
) {
    let Some(session) = sessions.snapshot(id) else {
        return;
    };
    if let Some(step) = session.definition.steps.get(index) {
        debug!("Refreshing action fields of step {} in workflow {}", index, id);
        surface.render_action_fields(id, index, &action_field_views(step));
    }
}

/// Drops action-specific values the step's action has no control for
fn clear_unlisted_fields(step: &mut Step) {
    let listed: Vec<StepField> = fields_for_action(step.action_kind())
        .iter()
        .map(|descriptor| descriptor.field)
        .collect();
    if !listed.contains(&StepField::Assignee) {
        step.assignee.clear();
    }
    if !listed.contains(&StepField::DueDays) {
        step.due_days = None;
    }
    if !listed.contains(&StepField::NewStatus) {
        step.new_status.clear();
    }
}

/// Text shown to the user for a failed save
fn failure_reason(err: &Error) -> String {
    let reason = match err {
        Error::RequestFailed(message) => message.clone(),
        Error::HttpError(e) => e.to_string(),
        other => other.to_string(),
    };
    if reason.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        reason
    }
}
