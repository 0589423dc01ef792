//! Lookout: app-update prompt decision core.
//!
//! Determines whether a newer version of the host application is published
//! in a remote catalog, decides — from stored user preferences and device
//! compatibility — whether the user should be prompted, and tracks the
//! user's response (update now, next time, skip this version) across
//! launches.
//!
//! # Architecture
//!
//! The core is a chain of small, separately testable pieces:
//! - **version**: dotted numeric version identifiers with total ordering
//! - **eligibility**: OS compatibility and strict-newness gates
//! - **catalog**: catalog metadata and the default HTTP lookup source
//! - **state**: persisted check state behind the `PreferenceStore` trait
//! - **engine**: evaluation of one cycle into a `Decision`
//! - **alert**: the prompt flow state machine and its display collaborator
//!
//! Boundaries (fetch, persistence, display) are traits; everything inside
//! them is total and synchronous. A typical cycle:
//!
//! ```no_run
//! use lookout::{
//!     AlertConfiguration, AlertFlowController, CatalogSource, HttpCatalogSource,
//!     JsonFileStore, PreferenceStore, UpdateDecisionEngine, VersionIdentifier,
//! };
//!
//! # fn run(presenter: &dyn lookout::AlertPresenter) -> lookout::Result<()> {
//! let store = JsonFileStore::new()?;
//! let mut state = store.load()?;
//!
//! let source = HttpCatalogSource::new("https://catalog.example/lookup?id=100");
//! let entry = source.fetch()?;
//!
//! let installed = VersionIdentifier::parse("2.0")?;
//! let device_os = VersionIdentifier::parse("14.1")?;
//!
//! let engine = UpdateDecisionEngine::new(&store);
//! let decision = engine.evaluate(&installed, entry, &device_os, &mut state)?;
//!
//! let mut flow = AlertFlowController::new(AlertConfiguration::new("Example"), &store);
//! let outcome = flow.run(decision, &mut state, presenter)?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod alert;
pub mod catalog;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod state;
pub mod version;

pub use alert::{
    AlertConfiguration, AlertFlowController, AlertPresenter, FlowOutcome, FlowState, UserChoice,
    offered_choices,
};
pub use catalog::{CatalogEntry, CatalogSource, HttpCatalogSource};
pub use engine::{Decision, UpdateDecisionEngine};
pub use error::{LookoutError, Result};
pub use state::{
    AlertKind, CheckFrequency, CheckState, JsonFileStore, MemoryStore, PreferenceStore,
};
pub use version::{UpdateSeverity, VersionIdentifier};
