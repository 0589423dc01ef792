//! Alert configuration and the prompt flow state machine.
//!
//! [`AlertFlowController`] drives one prompt cycle:
//! `Idle → Presenting → {Updating, Deferred, Skipped}`. Only a
//! [`Decision::PromptRequired`] moves it out of `Idle`; everything else
//! resolves with no user-visible effect. Skip and defer are recorded only on
//! confirmed user action, so a presentation failure leaves state untouched.

use crate::catalog::CatalogEntry;
use crate::engine::Decision;
use crate::error::{LookoutError, Result};
use crate::state::{AlertKind, CheckState, PreferenceStore};
use crate::version::VersionIdentifier;
use std::fmt;

/// Display settings for the update alert.
///
/// Built once by the embedder and consumed for display only; the core never
/// mutates it. Each field is independently overridable — changing one leaves
/// the others' defaults intact. `{app}` and `{version}` placeholders in the
/// title and message resolve at presentation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertConfiguration {
    /// Alert title.
    pub title: String,
    /// Alert body text.
    pub message: String,
    /// Label of the update action.
    pub update_button: String,
    /// Label of the defer action.
    pub next_time_button: String,
    /// Label of the skip action.
    pub skip_button: String,
    /// Display hint for the alert's accent color. `None` means the platform
    /// default.
    pub tint_color: Option<String>,
    /// Name of the host app, substituted for `{app}`.
    pub app_name: String,
    /// Language override handed to the external localization collaborator.
    /// `None` means automatic locale selection.
    pub forced_locale: Option<String>,
}

impl AlertConfiguration {
    /// Default alert title.
    pub const DEFAULT_TITLE: &'static str = "Update Available";
    /// Default alert body.
    pub const DEFAULT_MESSAGE: &'static str =
        "A new version of {app} is available. Please update to version {version} now.";
    /// Default update button label.
    pub const DEFAULT_UPDATE_BUTTON: &'static str = "Update";
    /// Default defer button label.
    pub const DEFAULT_NEXT_TIME_BUTTON: &'static str = "Next time";
    /// Default skip button label.
    pub const DEFAULT_SKIP_BUTTON: &'static str = "Skip this version";

    /// Configuration with default strings for the given app name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    /// The title with placeholders resolved.
    pub fn resolved_title(&self, version: &VersionIdentifier) -> String {
        self.resolve(&self.title, version)
    }

    /// The message with placeholders resolved.
    pub fn resolved_message(&self, version: &VersionIdentifier) -> String {
        self.resolve(&self.message, version)
    }

    fn resolve(&self, text: &str, version: &VersionIdentifier) -> String {
        text.replace("{app}", &self.app_name)
            .replace("{version}", &version.to_string())
    }
}

impl Default for AlertConfiguration {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_owned(),
            message: Self::DEFAULT_MESSAGE.to_owned(),
            update_button: Self::DEFAULT_UPDATE_BUTTON.to_owned(),
            next_time_button: Self::DEFAULT_NEXT_TIME_BUTTON.to_owned(),
            skip_button: Self::DEFAULT_SKIP_BUTTON.to_owned(),
            tint_color: None,
            app_name: String::new(),
            forced_locale: None,
        }
    }
}

/// A confirmed user action on the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    /// Update now.
    Update,
    /// Remind on the next eligible evaluation.
    NextTime,
    /// Never offer this version again.
    Skip,
}

impl fmt::Display for UserChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::NextTime => write!(f, "next time"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// The choices an alert of the given kind offers.
///
/// [`AlertKind::None`] offers nothing; the controller resolves silently
/// without calling the presenter.
pub fn offered_choices(kind: AlertKind) -> &'static [UserChoice] {
    match kind {
        AlertKind::Force => &[UserChoice::Update],
        AlertKind::Option => &[UserChoice::Update, UserChoice::NextTime],
        AlertKind::Skip => &[UserChoice::Update, UserChoice::NextTime, UserChoice::Skip],
        AlertKind::None => &[],
    }
}

/// Display collaborator.
///
/// Presents the alert and blocks until the user picks one of the offered
/// choices, or fails when the host UI cannot present.
pub trait AlertPresenter {
    /// Show the alert and return the user's choice.
    ///
    /// `choices` is the set the active alert kind offers; returning a choice
    /// outside it is a contract violation and aborts the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Presentation`] when the host UI is
    /// unavailable or the pending display was cancelled before a user action
    /// was recorded.
    fn present(
        &self,
        config: &AlertConfiguration,
        entry: &CatalogEntry,
        choices: &[UserChoice],
    ) -> Result<UserChoice>;
}

/// Current state of the prompt flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No prompt in flight.
    Idle,
    /// The alert is on screen, waiting for a user action.
    Presenting,
    /// Terminal: the user chose to update.
    Updating,
    /// Terminal: the user deferred until next time.
    Deferred,
    /// Terminal: the user skipped this version.
    Skipped,
}

/// What the caller should do after a flow cycle resolves.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// The decision did not require a prompt; nothing was shown.
    NotPresented(Decision),
    /// Alert kind `None`: an update is available but no alert is shown.
    SilentlyAvailable(CatalogEntry),
    /// The user chose Update: navigate to the entry's download destination.
    NavigateToDownload(CatalogEntry),
    /// The user deferred; offer the same version again next cycle.
    Deferred,
    /// The user skipped; this version will not be offered again.
    Skipped,
}

/// Drives one prompt cycle from a [`Decision`] to a [`FlowOutcome`].
///
/// Single-flow and non-reentrant: one controller handles one cycle, and at
/// most one may be `Presenting` per session. Overlapping cycles are the
/// caller's to serialize.
pub struct AlertFlowController<'a> {
    config: AlertConfiguration,
    store: &'a dyn PreferenceStore,
    state: FlowState,
}

impl<'a> AlertFlowController<'a> {
    /// Controller persisting the user's choice through the given store.
    pub fn new(config: AlertConfiguration, store: &'a dyn PreferenceStore) -> Self {
        Self {
            config,
            store,
            state: FlowState::Idle,
        }
    }

    /// The controller's current flow state.
    pub fn flow_state(&self) -> FlowState {
        self.state
    }

    /// Run the flow for one decision.
    ///
    /// Only [`Decision::PromptRequired`] presents anything; every other
    /// decision resolves immediately with the controller still `Idle`. On a
    /// presentation failure the controller returns to `Idle` with no state
    /// mutation — skip is recorded only on a confirmed user action.
    ///
    /// # Errors
    ///
    /// [`LookoutError::Presentation`] when the display collaborator fails,
    /// returns a choice the alert kind does not offer, or the controller has
    /// already resolved a cycle. [`LookoutError::Store`] when persisting a
    /// skip fails; the skip is then not recorded.
    pub fn run(
        &mut self,
        decision: Decision,
        check_state: &mut CheckState,
        presenter: &dyn AlertPresenter,
    ) -> Result<FlowOutcome> {
        if self.state != FlowState::Idle {
            return Err(LookoutError::Presentation(
                "alert flow already resolved; one controller drives one cycle".to_owned(),
            ));
        }

        let entry = match decision {
            Decision::PromptRequired(entry) => entry,
            other => return Ok(FlowOutcome::NotPresented(other)),
        };

        let kind = check_state.alert_kind;
        if kind == AlertKind::None {
            tracing::debug!("alert kind none: {} available, not presenting", entry.version);
            return Ok(FlowOutcome::SilentlyAvailable(entry));
        }

        let choices = offered_choices(kind);
        self.state = FlowState::Presenting;
        tracing::debug!("presenting {kind} alert for version {}", entry.version);

        let choice = match presenter.present(&self.config, &entry, choices) {
            Ok(choice) => choice,
            Err(e) => {
                self.state = FlowState::Idle;
                return Err(e);
            }
        };

        if !choices.contains(&choice) {
            self.state = FlowState::Idle;
            return Err(LookoutError::Presentation(format!(
                "presenter returned \"{choice}\", which a {kind} alert does not offer"
            )));
        }

        match choice {
            UserChoice::Update => {
                self.state = FlowState::Updating;
                tracing::info!("user chose update to {}", entry.version);
                Ok(FlowOutcome::NavigateToDownload(entry))
            }
            UserChoice::NextTime => {
                // Nothing to persist beyond the timestamp the engine already
                // recorded; the same version is offered again next cycle.
                self.state = FlowState::Deferred;
                tracing::info!("user deferred update to {}", entry.version);
                Ok(FlowOutcome::Deferred)
            }
            UserChoice::Skip => {
                let mut updated = check_state.clone();
                updated.record_skip(entry.version.clone());
                if let Err(e) = self.store.save(&updated) {
                    self.state = FlowState::Idle;
                    return Err(e);
                }
                *check_state = updated;
                self.state = FlowState::Skipped;
                tracing::info!("user skipped version {}", entry.version);
                Ok(FlowOutcome::Skipped)
            }
        }
    }
}
