//! Step sequencer - the bounded 1-based cursor over a wizard's steps
//!
//! The sequencer only moves the cursor; validation gates live in
//! `WizardSession`, which consults the validator before calling `advance`.

/// Cursor over an ordered step sequence, always within `[1, total]`
#[derive(Debug, Clone)]
pub struct StepSequencer {
    current: usize,
    total: usize,
}

impl StepSequencer {
    /// A sequencer always has at least one step
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    /// Terminal state: the submission step
    pub fn is_terminal(&self) -> bool {
        self.current == self.total
    }

    /// Move forward one step; false when already terminal
    pub fn advance(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move back one step; false when already on the first step
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Whether a step index is addressable
    pub fn in_range(&self, step: usize) -> bool {
        (1..=self.total).contains(&step)
    }

    /// Jump directly to a step; false when out of range
    pub fn jump_to(&mut self, step: usize) -> bool {
        if !self.in_range(step) {
            return false;
        }
        self.current = step;
        true
    }
}
