//! Create-workspace wizard core.
//!
//! [`session::WizardSession`] owns the draft and catalogs and is driven by
//! [`events::WizardEvent`]s through the pure [`reducer::reduce`] function.
//! [`controller::WizardController`] runs a session against real collaborators.

pub mod catalog;
pub mod controller;
pub mod derive;
pub mod events;
pub mod payload;
pub mod reducer;
pub mod session;
pub mod steps;
pub mod store;

// Re-export commonly used items
pub use catalog::{CatalogCache, ImageFetchOutcome};
pub use controller::WizardController;
pub use events::{Effect, EventRejected, WizardEvent};
pub use payload::assemble;
pub use reducer::{reduce, Reduction};
pub use session::{SubmitBlocked, WizardSession};
pub use store::{validate, DraftStore, Field, ValidationReport};
