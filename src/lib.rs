// nacplan - NAC deployment planning assistant
// Guided multi-step wizards over a YAML project workspace

pub mod ai;
pub mod cli;
pub mod export;
pub mod forms;
pub mod models;
pub mod store;
pub mod ui;
pub mod wizard;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{DiscoveryRecord, ProjectRecord, ProjectSummary};
pub use wizard::{FormState, Violation, WizardDefinition, WizardSession};
