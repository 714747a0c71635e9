//! Checkout state machine.
//!
//! ```text
//!  Selection ──select_method──▶ Detail ──confirm_detail──▶ Proof ──submission_succeeded──▶ Complete
//!      ▲                          │  ▲                       │                               │
//!      └──────────back────────────┘  └─────────back──────────┘                               │
//!      ▲                                                                                     │
//!      └────────────────────────────────────────reset────────────────────────────────────────┘
//! ```
//!
//! Transitions are synchronous and deterministic. A transition that is not
//! defined for the current step returns a [`WorkflowError`] and leaves the
//! state unchanged. The selected method is stored inside the `Detail` and
//! `Proof` variants, so those steps cannot exist without one.

use crate::error::{WorkflowError, WorkflowResult};
use crate::form::{InFlight, UploadForm};
use crate::models::{PaymentMethod, TransactionSummary, WorkflowStep};

/// Current step together with the data it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Selection,
    Detail(PaymentMethod),
    Proof(PaymentMethod),
    Complete(TransactionSummary),
}

impl Stage {
    pub fn step(&self) -> WorkflowStep {
        match self {
            Stage::Selection => WorkflowStep::Selection,
            Stage::Detail(_) => WorkflowStep::Detail,
            Stage::Proof(_) => WorkflowStep::Proof,
            Stage::Complete(_) => WorkflowStep::Complete,
        }
    }
}

/// Owns the step, the selected method and the completion summary.
#[derive(Debug, Default)]
pub struct Workflow {
    stage: Stage,
    in_flight: InFlight,
}

impl Workflow {
    /// Fresh workflow on the selection step.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn step(&self) -> WorkflowStep {
        self.stage.step()
    }

    /// Selected method; `Some` exactly on the detail and proof steps.
    pub fn selected_method(&self) -> Option<PaymentMethod> {
        match self.stage {
            Stage::Detail(method) | Stage::Proof(method) => Some(method),
            Stage::Selection | Stage::Complete(_) => None,
        }
    }

    /// Completion record; `Some` only on the complete step.
    pub fn summary(&self) -> Option<&TransactionSummary> {
        match &self.stage {
            Stage::Complete(summary) => Some(summary),
            _ => None,
        }
    }

    /// Handle to the submission flag shared with upload forms.
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_set()
    }

    /// Selection → Detail.
    pub fn select_method(&mut self, method: PaymentMethod) -> WorkflowResult<()> {
        match self.stage {
            Stage::Selection => {
                log::info!("💳 Payment method selected: {}", method);
                self.stage = Stage::Detail(method);
                Ok(())
            }
            _ => Err(self.rejected("select a payment method")),
        }
    }

    /// Detail → Proof.
    pub fn confirm_detail(&mut self) -> WorkflowResult<()> {
        match self.stage {
            Stage::Detail(method) => {
                log::debug!("Payment instructions confirmed for {}", method);
                self.stage = Stage::Proof(method);
                Ok(())
            }
            _ => Err(self.rejected("confirm payment details")),
        }
    }

    /// Detail → Selection (clears the method), Proof → Detail (keeps it).
    pub fn back(&mut self) -> WorkflowResult<()> {
        const ACTION: &str = "go back";
        self.ensure_idle(ACTION)?;
        match self.stage {
            Stage::Detail(_) => {
                self.stage = Stage::Selection;
                Ok(())
            }
            Stage::Proof(method) => {
                self.stage = Stage::Detail(method);
                Ok(())
            }
            _ => Err(self.rejected(ACTION)),
        }
    }

    /// Proof → Complete, recording `summary`.
    pub fn submission_succeeded(&mut self, summary: TransactionSummary) -> WorkflowResult<()> {
        match self.stage {
            Stage::Proof(_) => {
                log::info!("🎉 Transaction complete: {}", summary.product_name);
                self.stage = Stage::Complete(summary);
                Ok(())
            }
            _ => Err(self.rejected("complete a submission")),
        }
    }

    /// Complete → Selection, discarding method and summary.
    pub fn reset(&mut self) -> WorkflowResult<()> {
        const ACTION: &str = "start a new transaction";
        self.ensure_idle(ACTION)?;
        match self.stage {
            Stage::Complete(_) => {
                self.stage = Stage::Selection;
                Ok(())
            }
            _ => Err(self.rejected(ACTION)),
        }
    }

    /// Empty upload form for the proof step, bound to the selected method.
    pub fn upload_form<F>(&self) -> WorkflowResult<UploadForm<F>> {
        match self.stage {
            Stage::Proof(method) => Ok(UploadForm::new(method, self.in_flight.clone())),
            _ => Err(self.rejected("open the upload form")),
        }
    }

    fn ensure_idle(&self, action: &'static str) -> WorkflowResult<()> {
        if self.in_flight.is_set() {
            return Err(WorkflowError::SubmissionPending { action });
        }
        Ok(())
    }

    fn rejected(&self, action: &'static str) -> WorkflowError {
        log::debug!("Rejected transition '{}' from {}", action, self.step());
        WorkflowError::InvalidTransition {
            action,
            step: self.step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;

    #[derive(Debug, Clone, Copy)]
    enum Action {
        Select(PaymentMethod),
        Confirm,
        Back,
        Succeed,
        Reset,
    }

    const ACTIONS: [Action; 6] = [
        Action::Select(PaymentMethod::Dana),
        Action::Select(PaymentMethod::Qris),
        Action::Confirm,
        Action::Back,
        Action::Succeed,
        Action::Reset,
    ];

    fn apply(workflow: &mut Workflow, action: Action) -> WorkflowResult<()> {
        match action {
            Action::Select(m) => workflow.select_method(m),
            Action::Confirm => workflow.confirm_detail(),
            Action::Back => workflow.back(),
            Action::Succeed => workflow.submission_succeeded(TransactionSummary::now("X")),
            Action::Reset => workflow.reset(),
        }
    }

    fn at_proof(method: PaymentMethod) -> Workflow {
        let mut workflow = Workflow::new();
        workflow.select_method(method).unwrap();
        workflow.confirm_detail().unwrap();
        workflow
    }

    #[test]
    fn test_initial_state() {
        let workflow = Workflow::new();
        assert_eq!(workflow.step(), WorkflowStep::Selection);
        assert_eq!(workflow.selected_method(), None);
        assert!(workflow.summary().is_none());
        assert!(!workflow.is_submitting());
    }

    #[test]
    fn test_method_present_on_detail_and_proof_for_all_sequences() {
        // Every action sequence of length 5 over the alphabet above.
        let total = ACTIONS.len().pow(5);
        for mut code in 0..total {
            let mut workflow = Workflow::new();
            for _ in 0..5 {
                let action = ACTIONS[code % ACTIONS.len()];
                code /= ACTIONS.len();

                let before = workflow.stage().clone();
                if apply(&mut workflow, action).is_err() {
                    assert_eq!(workflow.stage(), &before, "rejected {:?} mutated state", action);
                }

                let needs_method = matches!(workflow.step(), WorkflowStep::Detail | WorkflowStep::Proof);
                assert_eq!(workflow.selected_method().is_some(), needs_method);
                assert_eq!(workflow.summary().is_some(), workflow.step() == WorkflowStep::Complete);
            }
        }
    }

    #[test]
    fn test_back_from_detail_clears_method() {
        let mut workflow = Workflow::new();
        workflow.select_method(PaymentMethod::Qris).unwrap();
        workflow.back().unwrap();
        assert_eq!(workflow.step(), WorkflowStep::Selection);
        assert_eq!(workflow.selected_method(), None);
    }

    #[test]
    fn test_back_from_proof_keeps_method() {
        let mut workflow = at_proof(PaymentMethod::Qris);
        workflow.back().unwrap();
        assert_eq!(workflow.step(), WorkflowStep::Detail);
        assert_eq!(workflow.selected_method(), Some(PaymentMethod::Qris));
    }

    #[test]
    fn test_back_rejected_on_selection_and_complete() {
        let mut workflow = Workflow::new();
        assert_eq!(
            workflow.back(),
            Err(WorkflowError::InvalidTransition { action: "go back", step: WorkflowStep::Selection })
        );

        let mut workflow = at_proof(PaymentMethod::Dana);
        workflow.submission_succeeded(TransactionSummary::now("A")).unwrap();
        assert!(workflow.back().is_err());
        assert_eq!(workflow.step(), WorkflowStep::Complete);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut workflow = at_proof(PaymentMethod::Dana);
        workflow.submission_succeeded(TransactionSummary::now("SCRIPT BUG")).unwrap();
        assert_eq!(workflow.summary().map(|s| s.product_name.as_str()), Some("SCRIPT BUG"));

        workflow.reset().unwrap();
        assert_eq!(workflow.step(), WorkflowStep::Selection);
        assert_eq!(workflow.selected_method(), None);
        assert!(workflow.summary().is_none());
    }

    #[test]
    fn test_select_only_from_selection() {
        let mut workflow = Workflow::new();
        workflow.select_method(PaymentMethod::Dana).unwrap();
        assert!(workflow.select_method(PaymentMethod::Qris).is_err());
        assert_eq!(workflow.selected_method(), Some(PaymentMethod::Dana));
    }

    #[test]
    fn test_upload_form_only_on_proof() {
        let mut workflow = Workflow::new();
        assert!(workflow.upload_form::<()>().is_err());
        workflow.select_method(PaymentMethod::Qris).unwrap();
        assert!(workflow.upload_form::<()>().is_err());
        workflow.confirm_detail().unwrap();

        let form = workflow.upload_form::<()>().unwrap();
        assert_eq!(form.method(), PaymentMethod::Qris);
    }

    #[test]
    fn test_navigation_blocked_while_submitting() {
        let mut workflow = at_proof(PaymentMethod::Dana);
        let mut form = workflow.upload_form::<()>().unwrap();
        form.set_field(FormField::ProductName, "SCRIPT BUG");
        form.set_field(FormField::Amount, "20000");
        form.attach(());

        let pending = form.prepare().unwrap();
        assert!(workflow.is_submitting());
        assert_eq!(workflow.back(), Err(WorkflowError::SubmissionPending { action: "go back" }));
        assert_eq!(workflow.step(), WorkflowStep::Proof);

        drop(pending);
        workflow.back().unwrap();
        assert_eq!(workflow.step(), WorkflowStep::Detail);
    }
}
