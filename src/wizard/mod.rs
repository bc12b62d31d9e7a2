//! Multi-step wizard engine
//!
//! The reusable core behind the project-creation and discovery flows:
//! an ordered step definition, a single aggregate form state, pure per-step
//! validation, derived collections with natural-key dedup, and a dispatcher
//! that hands finished runs to the external collaborators.

pub mod collections;
pub mod definition;
pub mod dispatcher;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod validator;

pub use collections::CollectionSpec;
pub use definition::{FieldRule, ScoredField, StepSpec, WizardDefinition};
pub use dispatcher::{ActionDispatcher, SubmissionResult};
pub use sequencer::StepSequencer;
pub use session::{StepOutcome, WizardError, WizardPhase, WizardSession};
pub use state::FormState;
pub use validator::{is_valid_email, validate, Violation};
