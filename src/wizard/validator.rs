//! Step validator - pure checks deciding whether forward navigation is allowed
//!
//! `validate` is a pure function of the step and the current form state.
//! It never touches the network and never mutates anything; violations are
//! recomputed on every navigation attempt and never persisted.

use crate::wizard::definition::{FieldRule, WizardDefinition};
use crate::wizard::state::FormState;
use regex::Regex;
use serde::{Deserialize, Serialize};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// A single reason a step refused forward navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Form path the violation refers to, when field-specific
    pub field: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(path.into()),
            message: message.into(),
        }
    }

    pub fn step(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Loose email shape check used by the Email rule and collection prompts
pub fn is_valid_email(value: &str) -> bool {
    Regex::new(EMAIL_PATTERN)
        .map(|re| re.is_match(value.trim()))
        .unwrap_or(false)
}

/// Validate one step (1-based) of a definition against the form state.
/// Steps outside the definition and steps with no declared requirements
/// validate successfully.
pub fn validate(def: &WizardDefinition, step: usize, state: &FormState) -> Vec<Violation> {
    let Some(spec) = def.step(step) else {
        return Vec::new();
    };

    let mut violations = Vec::new();

    for rule in &spec.rules {
        match rule {
            FieldRule::Required { path, label } => {
                if !state.is_populated(path) {
                    violations.push(Violation::field(*path, format!("{} is required", label)));
                }
            }
            FieldRule::PositiveNumber { path, label } => {
                match state.get_u64(path) {
                    Some(n) if n > 0 => {}
                    _ => violations.push(Violation::field(
                        *path,
                        format!("{} must be greater than zero", label),
                    )),
                }
            }
            FieldRule::Email { path, label } => {
                if let Some(value) = state.get_str(path) {
                    if !value.trim().is_empty() && !is_valid_email(value) {
                        violations.push(Violation::field(
                            *path,
                            format!("{} does not look like an email address", label),
                        ));
                    }
                }
            }
            FieldRule::OneOf { path, label, allowed } => {
                if let Some(value) = state.get_str(path) {
                    if !value.trim().is_empty() && !allowed.contains(&value) {
                        violations.push(Violation::field(
                            *path,
                            format!("{} must be one of: {}", label, allowed.join(", ")),
                        ));
                    }
                }
            }
        }
    }

    if let Some(check) = spec.check {
        violations.extend(check(state));
    }

    violations
}
