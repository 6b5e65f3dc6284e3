//! Run-level mutation gate.
//!
//! `dry_run` and `force` are independent inputs. The gate is resolved once,
//! before the first mutation, so an operator either opts into the whole
//! batch or into nothing.

use crate::error::ReconcileResult;
use crate::traits::Confirm;

/// What the run may do with its pending mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Perform mutations.
    Proceed,
    /// Report intended outcomes without calling mutating collaborators.
    Simulate,
    /// The operator declined; no mutation may happen.
    Declined,
}

/// Resolve the gate for `pending_destructive` destructive actions.
///
/// The confirmation prompt is only shown when destructive work is pending
/// and neither `dry_run` nor `force` is set.
pub fn resolve_gate(
    dry_run: bool,
    force: bool,
    pending_destructive: usize,
    prompt: &str,
    confirm: &dyn Confirm,
) -> ReconcileResult<GateDecision> {
    if dry_run {
        return Ok(GateDecision::Simulate);
    }
    if pending_destructive == 0 || force {
        return Ok(GateDecision::Proceed);
    }
    if confirm.confirm(prompt)? {
        Ok(GateDecision::Proceed)
    } else {
        Ok(GateDecision::Declined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReconcileError;
    use std::cell::Cell;

    struct FixedAnswer {
        answer: Option<bool>,
        asked: Cell<usize>,
    }

    impl FixedAnswer {
        fn new(answer: Option<bool>) -> Self {
            Self {
                answer,
                asked: Cell::new(0),
            }
        }
    }

    impl Confirm for FixedAnswer {
        fn confirm(&self, _prompt: &str) -> ReconcileResult<bool> {
            self.asked.set(self.asked.get() + 1);
            self.answer.ok_or(ReconcileError::ConfirmationUnavailable)
        }
    }

    #[test]
    fn test_dry_run_simulates_without_asking() {
        let confirm = FixedAnswer::new(Some(false));
        let decision = resolve_gate(true, false, 3, "Delete?", &confirm).unwrap();
        assert_eq!(decision, GateDecision::Simulate);
        assert_eq!(confirm.asked.get(), 0);
    }

    #[test]
    fn test_force_proceeds_without_asking() {
        let confirm = FixedAnswer::new(Some(false));
        let decision = resolve_gate(false, true, 3, "Delete?", &confirm).unwrap();
        assert_eq!(decision, GateDecision::Proceed);
        assert_eq!(confirm.asked.get(), 0);
    }

    #[test]
    fn test_nothing_pending_proceeds_without_asking() {
        let confirm = FixedAnswer::new(None);
        let decision = resolve_gate(false, false, 0, "Delete?", &confirm).unwrap();
        assert_eq!(decision, GateDecision::Proceed);
        assert_eq!(confirm.asked.get(), 0);
    }

    #[test]
    fn test_operator_answer_decides() {
        let yes = FixedAnswer::new(Some(true));
        assert_eq!(
            resolve_gate(false, false, 2, "Delete?", &yes).unwrap(),
            GateDecision::Proceed
        );
        let no = FixedAnswer::new(Some(false));
        assert_eq!(
            resolve_gate(false, false, 2, "Delete?", &no).unwrap(),
            GateDecision::Declined
        );
        assert_eq!(yes.asked.get(), 1);
        assert_eq!(no.asked.get(), 1);
    }

    #[test]
    fn test_unavailable_confirmation_is_an_error() {
        let nobody = FixedAnswer::new(None);
        let err = resolve_gate(false, false, 1, "Delete?", &nobody).unwrap_err();
        assert!(matches!(err, ReconcileError::ConfirmationUnavailable));
    }
}
