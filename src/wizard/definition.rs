//! Wizard definitions - ordered step specs plus the scored-field table
//!
//! A definition is immutable for the lifetime of a wizard run. Steps carry
//! declarative field rules consumed by the validator; steps with no rules
//! and no cross-field check are optional and always allow progression.

use crate::wizard::state::FormState;
use crate::wizard::validator::Violation;

/// Declarative rule applied to a single form field
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Field must be populated (non-blank string, non-zero number, non-empty list)
    Required { path: &'static str, label: &'static str },
    /// Field must be a number greater than zero
    PositiveNumber { path: &'static str, label: &'static str },
    /// Field must look like an email address when populated
    Email { path: &'static str, label: &'static str },
    /// Field must be one of a fixed set of values when populated
    OneOf {
        path: &'static str,
        label: &'static str,
        allowed: &'static [&'static str],
    },
}

impl FieldRule {
    /// Path the rule applies to
    pub fn path(&self) -> &'static str {
        match self {
            FieldRule::Required { path, .. }
            | FieldRule::PositiveNumber { path, .. }
            | FieldRule::Email { path, .. }
            | FieldRule::OneOf { path, .. } => path,
        }
    }
}

/// Cross-field check run after a step's field rules
pub type StepCheck = fn(&FormState) -> Vec<Violation>;

/// One step of a wizard
#[derive(Debug, Clone)]
pub struct StepSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub rules: Vec<FieldRule>,
    pub check: Option<StepCheck>,
}

impl StepSpec {
    pub fn new(id: &'static str, title: &'static str, description: &'static str) -> Self {
        Self {
            id,
            title,
            description,
            rules: Vec::new(),
            check: None,
        }
    }

    pub fn with_rules(mut self, rules: Vec<FieldRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_check(mut self, check: StepCheck) -> Self {
        self.check = Some(check);
        self
    }

    /// Optional steps declare nothing and always validate
    pub fn is_optional(&self) -> bool {
        self.rules.is_empty() && self.check.is_none()
    }
}

/// Weighted field counted by the completion score
#[derive(Debug, Clone, Copy)]
pub struct ScoredField {
    pub path: &'static str,
    pub weight: u32,
}

/// Immutable ordered step sequence for one wizard
#[derive(Debug, Clone)]
pub struct WizardDefinition {
    name: &'static str,
    steps: Vec<StepSpec>,
    scored: Vec<ScoredField>,
}

impl WizardDefinition {
    pub fn new(name: &'static str, steps: Vec<StepSpec>, scored: Vec<ScoredField>) -> Self {
        Self { name, steps, scored }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step spec by 1-based position
    pub fn step(&self, position: usize) -> Option<&StepSpec> {
        if position == 0 {
            return None;
        }
        self.steps.get(position - 1)
    }

    pub fn step_by_id(&self, id: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Completion score: weighted populated required fields over the total,
    /// as a 0-100 percentage. Purely presentational.
    pub fn completion_score(&self, state: &FormState) -> u8 {
        let total: u32 = self.scored.iter().map(|f| f.weight).sum();
        if total == 0 {
            return 0;
        }
        let populated: u32 = self
            .scored
            .iter()
            .filter(|f| state.is_populated(f.path))
            .map(|f| f.weight)
            .sum();
        ((populated as f64 / total as f64) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scored_def() -> WizardDefinition {
        WizardDefinition::new(
            "score-test",
            vec![StepSpec::new("only", "Only", "")],
            vec![
                ScoredField { path: "a", weight: 1 },
                ScoredField { path: "b", weight: 1 },
                ScoredField { path: "c", weight: 1 },
                ScoredField { path: "d", weight: 1 },
            ],
        )
    }

    #[test]
    fn test_completion_score_half_populated() {
        let def = scored_def();
        let mut state = FormState::new();
        state.set("a", json!("filled"));
        state.set("b", json!(7));

        assert_eq!(def.completion_score(&state), 50);
    }

    #[test]
    fn test_completion_score_empty_and_full() {
        let def = scored_def();
        let mut state = FormState::new();
        assert_eq!(def.completion_score(&state), 0);

        for path in ["a", "b", "c", "d"] {
            state.set(path, json!("x"));
        }
        assert_eq!(def.completion_score(&state), 100);
    }

    #[test]
    fn test_completion_score_respects_weights() {
        let def = WizardDefinition::new(
            "weighted",
            vec![StepSpec::new("only", "Only", "")],
            vec![
                ScoredField { path: "heavy", weight: 3 },
                ScoredField { path: "light", weight: 1 },
            ],
        );
        let mut state = FormState::new();
        state.set("heavy", json!("x"));

        assert_eq!(def.completion_score(&state), 75);
    }

    #[test]
    fn test_step_lookup_is_one_based() {
        let def = WizardDefinition::new(
            "lookup",
            vec![
                StepSpec::new("first", "First", ""),
                StepSpec::new("second", "Second", ""),
            ],
            vec![],
        );

        assert!(def.step(0).is_none());
        assert_eq!(def.step(1).map(|s| s.id), Some("first"));
        assert_eq!(def.step(2).map(|s| s.id), Some("second"));
        assert!(def.step(3).is_none());
    }

    #[test]
    fn test_optional_step_detection() {
        let bare = StepSpec::new("bare", "Bare", "");
        assert!(bare.is_optional());

        let ruled = StepSpec::new("ruled", "Ruled", "").with_rules(vec![FieldRule::Required {
            path: "name",
            label: "Name",
        }]);
        assert!(!ruled.is_optional());
    }
}
