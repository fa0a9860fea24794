//! Keyboard addressing of nodes ("hint mode")
//!
//! Every node is labelled with its position in the node sequence. Typing
//! digits narrows the labels to those starting with the typed prefix, so
//! `1` keeps 1, 10..19, 100.. and so on. As soon as a single label is left
//! it is selected without further confirmation.
//!
//! The addressor only deals in sequence positions; mapping a resolved
//! position back to a node handle is up to the caller.

use tracing::debug;

/// What the caller should do after feeding input to the addressor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// Hint mode is off; nothing to show
    Inactive,
    /// Show labels on `candidates`; `best` is the label equal to the typed
    /// number, which Enter would select
    Showing {
        candidates: Vec<usize>,
        best: Option<usize>,
    },
    /// Select the node at this position; hint mode has been left
    Resolved(usize),
    /// The typed prefix matched nothing; hint mode has been left
    Aborted,
}

/// Digit buffer and candidate set of hint mode
#[derive(Debug, Clone, Default)]
pub struct SelectionAddressor {
    active: bool,
    buffer: String,
    candidates: Vec<usize>,
    best: Option<usize>,
}

impl SelectionAddressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Digits typed so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    pub fn best_candidate(&self) -> Option<usize> {
        self.best
    }

    /// Does the label `index` start with `prefix`?
    pub fn matches(prefix: &str, index: usize) -> bool {
        index.to_string().starts_with(prefix)
    }

    /// Turn hint mode on with every node labelled, or off if it was on
    pub fn toggle(&mut self, node_count: usize) -> HintOutcome {
        if self.active {
            self.reset();
            debug!("Hint mode off");
            return HintOutcome::Inactive;
        }

        self.active = true;
        self.buffer.clear();
        debug!("Hint mode on with {} labels", node_count);
        self.recompute(node_count, false)
    }

    /// Append a digit and narrow the candidates. Ignored outside hint mode
    /// and for values above 9.
    pub fn type_digit(&mut self, digit: u8, node_count: usize) -> HintOutcome {
        if !self.active || digit > 9 {
            return self.current();
        }

        self.buffer.push(char::from(b'0' + digit));
        self.recompute(node_count, true)
    }

    /// Drop the last digit and widen the candidates again.
    ///
    /// Unlike [`type_digit`](Self::type_digit) this never selects on its
    /// own, even when a single candidate is left.
    pub fn backspace(&mut self, node_count: usize) -> HintOutcome {
        if !self.active && self.buffer.is_empty() {
            return HintOutcome::Inactive;
        }

        self.active = true;
        self.buffer.pop();
        self.recompute(node_count, false)
    }

    /// Select the best candidate, if there is one
    pub fn confirm(&mut self) -> HintOutcome {
        match (self.active, self.best) {
            (true, Some(index)) => {
                self.reset();
                debug!("Hint mode confirmed label {}", index);
                HintOutcome::Resolved(index)
            }
            _ => self.current(),
        }
    }

    /// Relabel after the node sequence changed length
    pub fn refresh(&mut self, node_count: usize) -> HintOutcome {
        if !self.active {
            return HintOutcome::Inactive;
        }
        self.recompute(node_count, false)
    }

    /// Leave hint mode and forget the typed digits
    pub fn reset(&mut self) {
        self.active = false;
        self.buffer.clear();
        self.candidates.clear();
        self.best = None;
    }

    fn current(&self) -> HintOutcome {
        if self.active {
            HintOutcome::Showing {
                candidates: self.candidates.clone(),
                best: self.best,
            }
        } else {
            HintOutcome::Inactive
        }
    }

    fn recompute(&mut self, node_count: usize, resolve_unique: bool) -> HintOutcome {
        if self.buffer.is_empty() {
            self.candidates = (0..node_count).collect();
            self.best = (node_count > 0).then_some(0);
        } else {
            let prefix = self.buffer.as_str();
            self.candidates = (0..node_count)
                .filter(|&index| Self::matches(prefix, index))
                .collect();
            self.best = self
                .candidates
                .iter()
                .copied()
                .find(|index| index.to_string() == prefix);
        }

        match self.candidates.as_slice() {
            [] => {
                debug!("Hint prefix {:?} matches nothing", self.buffer);
                self.reset();
                HintOutcome::Aborted
            }
            [only] if resolve_unique => {
                let index = *only;
                self.reset();
                debug!("Hint mode resolved label {}", index);
                HintOutcome::Resolved(index)
            }
            _ => self.current(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showing(candidates: &[usize], best: Option<usize>) -> HintOutcome {
        HintOutcome::Showing {
            candidates: candidates.to_vec(),
            best,
        }
    }

    #[test]
    fn test_toggle_shows_everything() {
        let mut hint = SelectionAddressor::new();
        assert_eq!(hint.toggle(3), showing(&[0, 1, 2], Some(0)));
        assert!(hint.is_active());

        assert_eq!(hint.toggle(3), HintOutcome::Inactive);
        assert!(!hint.is_active());
        assert!(hint.candidates().is_empty());
    }

    #[test]
    fn test_prefix_narrowing() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(13);

        assert_eq!(hint.type_digit(1, 13), showing(&[1, 10, 11, 12], Some(1)));
        assert_eq!(hint.buffer(), "1");
        assert_eq!(hint.type_digit(0, 13), HintOutcome::Resolved(10));
        assert!(!hint.is_active());
        assert_eq!(hint.buffer(), "");
    }

    #[test]
    fn test_unique_digit_resolves_immediately() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(13);
        assert_eq!(hint.type_digit(7, 13), HintOutcome::Resolved(7));
    }

    #[test]
    fn test_no_match_aborts() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(5);
        assert_eq!(hint.type_digit(9, 5), HintOutcome::Aborted);
        assert!(!hint.is_active());
        assert_eq!(hint.buffer(), "");
    }

    #[test]
    fn test_digits_ignored_outside_hint_mode() {
        let mut hint = SelectionAddressor::new();
        assert_eq!(hint.type_digit(1, 13), HintOutcome::Inactive);
        assert_eq!(hint.buffer(), "");
    }

    #[test]
    fn test_backspace_widens_without_resolving() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(25);
        hint.type_digit(2, 25);
        assert_eq!(hint.candidates(), &[2, 20, 21, 22, 23, 24]);

        assert_eq!(hint.backspace(25), showing(&(0..25).collect::<Vec<_>>(), Some(0)));
        assert_eq!(hint.buffer(), "");
    }

    #[test]
    fn test_refresh_keeps_single_candidate_pending() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(13);
        hint.type_digit(1, 13);

        // the node list shrank to 2 nodes while "1" was typed
        assert_eq!(hint.refresh(2), showing(&[1], Some(1)));
        assert!(hint.is_active());
        assert_eq!(hint.confirm(), HintOutcome::Resolved(1));
    }

    #[test]
    fn test_backspace_outside_hint_mode_is_noop() {
        let mut hint = SelectionAddressor::new();
        assert_eq!(hint.backspace(10), HintOutcome::Inactive);
        assert!(!hint.is_active());
    }

    #[test]
    fn test_confirm_selects_exact_match() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(13);
        hint.type_digit(1, 13);
        assert_eq!(hint.confirm(), HintOutcome::Resolved(1));
        assert!(!hint.is_active());
    }

    #[test]
    fn test_confirm_with_empty_buffer_picks_root() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(4);
        assert_eq!(hint.confirm(), HintOutcome::Resolved(0));
    }

    #[test]
    fn test_confirm_outside_hint_mode_is_noop() {
        let mut hint = SelectionAddressor::new();
        assert_eq!(hint.confirm(), HintOutcome::Inactive);
    }

    #[test]
    fn test_leading_zero_prefix() {
        let mut hint = SelectionAddressor::new();
        hint.toggle(13);
        assert_eq!(hint.type_digit(0, 13), HintOutcome::Resolved(0));
    }
}
