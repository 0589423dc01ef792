//! Update decision orchestration.
//!
//! [`UpdateDecisionEngine::evaluate`] combines the compatibility gate, the
//! version comparison, and the persisted skip state into a single
//! [`Decision`]. The ordering of the checks is deliberate: an OS-incompatible
//! release must never be offered even if newer, and the skip check runs last
//! so a release newer than the skipped one prompts again.

use crate::catalog::CatalogEntry;
use crate::eligibility::{is_compatible, is_newer};
use crate::error::Result;
use crate::state::{CheckState, PreferenceStore};
use crate::version::VersionIdentifier;

/// Outcome of one evaluation cycle.
///
/// Produced fresh on every evaluation; never cached beyond the call that
/// created it.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// The catalog version is not newer than the installed version.
    NoUpdateAvailable,
    /// A newer, compatible release is available and the user has not skipped
    /// it; the alert flow should run.
    PromptRequired(CatalogEntry),
    /// The user already skipped exactly this release.
    AlreadySkipped,
    /// The device OS does not meet the release's minimum requirement. A
    /// terminal decision, not an error.
    IncompatibleOs,
}

/// Decides whether and how an available release should be surfaced.
pub struct UpdateDecisionEngine<'a> {
    store: &'a dyn PreferenceStore,
}

impl<'a> UpdateDecisionEngine<'a> {
    /// Engine persisting through the given store.
    pub fn new(store: &'a dyn PreferenceStore) -> Self {
        Self { store }
    }

    /// Evaluate one cycle.
    ///
    /// Checks run in order: OS compatibility, then newness, then skip state.
    /// Every evaluation stamps `last_checked_at` and saves the state through
    /// the store — an explicit collaborator call, not an implicit mutation.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Store`](crate::LookoutError::Store) when the
    /// save fails; the cycle is aborted and no decision is produced.
    pub fn evaluate(
        &self,
        installed: &VersionIdentifier,
        catalog: CatalogEntry,
        device_os: &VersionIdentifier,
        state: &mut CheckState,
    ) -> Result<Decision> {
        let decision = if !is_compatible(device_os, &catalog.minimum_os_version) {
            tracing::debug!(
                "device OS {device_os} below minimum {} for {}",
                catalog.minimum_os_version,
                catalog.version
            );
            Decision::IncompatibleOs
        } else if !is_newer(installed, &catalog.version) {
            tracing::debug!("installed {installed} is current (catalog {})", catalog.version);
            Decision::NoUpdateAvailable
        } else if state.skipped_version.as_ref() == Some(&catalog.version) {
            tracing::debug!("user skipped {}", catalog.version);
            Decision::AlreadySkipped
        } else {
            tracing::info!("update available: {installed} -> {}", catalog.version);
            Decision::PromptRequired(catalog)
        };

        state.mark_checked();
        self.store.save(state)?;

        Ok(decision)
    }
}
