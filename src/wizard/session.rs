//! WizardSession - one wizard run owning its form state and cursor
//!
//! Lifecycle: `Editing(step=k) --advance(valid)--> Editing(k+1)`;
//! an invalid advance stays on `k` with violations attached; submitting
//! from the final step moves to `Submitted`, which is terminal. The
//! session is the only owner of its FormState; it is dropped on cancel.

use crate::wizard::definition::{StepSpec, WizardDefinition};
use crate::wizard::sequencer::StepSequencer;
use crate::wizard::state::FormState;
use crate::wizard::validator::{validate, Violation};
use thiserror::Error;

/// Engine-level wizard errors (distinct from per-step violations)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("step {step} is out of range (wizard has {total} steps)")]
    StepOutOfRange { step: usize, total: usize },
    #[error("submission is only available from the final step")]
    NotAtFinalStep,
    #[error("this wizard run was already submitted")]
    AlreadySubmitted,
}

/// Where a wizard run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    Submitted,
}

/// Outcome of a navigation attempt
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Cursor moved; carries the new step
    Moved(usize),
    /// Validation blocked the move; cursor unchanged
    Rejected(Vec<Violation>),
    /// Already on the final step; nothing to advance to
    AtTerminal,
}

/// A single in-progress wizard run
#[derive(Debug)]
pub struct WizardSession {
    definition: WizardDefinition,
    state: FormState,
    sequencer: StepSequencer,
    phase: WizardPhase,
}

impl WizardSession {
    pub fn new(definition: WizardDefinition, defaults: FormState) -> Self {
        let sequencer = StepSequencer::new(definition.len());
        Self {
            definition,
            state: defaults,
            sequencer,
            phase: WizardPhase::Editing,
        }
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn form(&self) -> &FormState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn current_step(&self) -> usize {
        self.sequencer.current()
    }

    pub fn total_steps(&self) -> usize {
        self.sequencer.total()
    }

    /// Spec of the step the cursor is on
    pub fn current_spec(&self) -> Option<&StepSpec> {
        self.definition.step(self.sequencer.current())
    }

    pub fn is_first(&self) -> bool {
        self.sequencer.is_first()
    }

    pub fn is_terminal(&self) -> bool {
        self.sequencer.is_terminal()
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// Violations for the step the cursor is on
    pub fn validate_current(&self) -> Vec<Violation> {
        validate(&self.definition, self.sequencer.current(), &self.state)
    }

    /// Gated forward navigation: moves only when the current step validates
    pub fn advance(&mut self) -> StepOutcome {
        let violations = self.validate_current();
        if !violations.is_empty() {
            return StepOutcome::Rejected(violations);
        }
        if self.sequencer.advance() {
            StepOutcome::Moved(self.sequencer.current())
        } else {
            StepOutcome::AtTerminal
        }
    }

    /// Unconditional backward navigation; prior steps are not re-validated.
    /// Returns the new step, or None when already on the first step.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.sequencer.retreat() {
            Some(self.sequencer.current())
        } else {
            None
        }
    }

    /// Jump to an arbitrary step. Backward jumps are unconditional; forward
    /// jumps validate every step crossed so a jump cannot bypass a gate an
    /// advance sequence would enforce.
    pub fn jump_to(&mut self, step: usize) -> Result<StepOutcome, WizardError> {
        if !self.sequencer.in_range(step) {
            return Err(WizardError::StepOutOfRange {
                step,
                total: self.sequencer.total(),
            });
        }

        let current = self.sequencer.current();
        if step > current {
            for gate in current..step {
                let violations = validate(&self.definition, gate, &self.state);
                if !violations.is_empty() {
                    return Ok(StepOutcome::Rejected(violations));
                }
            }
        }

        self.sequencer.jump_to(step);
        Ok(StepOutcome::Moved(step))
    }

    /// Completion score of the current form state (0-100)
    pub fn completion_score(&self) -> u8 {
        self.definition.completion_score(&self.state)
    }

    /// Guard checked by the dispatcher before submitting
    pub fn ensure_submittable(&self) -> Result<(), WizardError> {
        if self.phase == WizardPhase::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if !self.is_terminal() {
            return Err(WizardError::NotAtFinalStep);
        }
        Ok(())
    }

    /// Called by the dispatcher after a successful submission
    pub(crate) fn mark_submitted(&mut self) {
        self.phase = WizardPhase::Submitted;
    }
}
