//! Intake wizard: Category → Guidelines → Details → Submitted
//!
//! `advance` is the only way forward and checks the gate of the step being
//! left, whatever the caller is (UI, API, batch import). `back` never
//! clears a field, so a citizen can revisit and edit earlier steps.

use grievance_types::{
    Category, DraftField, GrievanceDraft, GrievanceError, GrievanceResult, GrievanceSubmission,
    WizardStep,
};

/// Outcome of a successful [`GrievanceWizard::advance`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next editing step
    Moved(WizardStep),
    /// Left the details step; the payload is ready to be filed
    Submitted(GrievanceSubmission),
}

/// Drives one draft through the intake steps
#[derive(Clone, Debug, Default)]
pub struct GrievanceWizard {
    step: WizardStep,
    draft: GrievanceDraft,
}

impl GrievanceWizard {
    /// Start a fresh draft at the category step
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &GrievanceDraft {
        &self.draft
    }

    /// Guidelines for the selected category, if one is selected
    pub fn guidelines(&self) -> Option<&'static [&'static str]> {
        self.draft.category.map(|c| c.guidelines())
    }

    /// Fields the current step's gate is still waiting for
    pub fn missing_fields(&self) -> Vec<DraftField> {
        self.draft.missing_for_step(self.step)
    }

    pub fn is_submittable(&self) -> bool {
        self.draft.is_submittable()
    }

    // ── Step 1: Category ─────────────────────────────────────────────

    pub fn select_category(&mut self, category: Category) -> GrievanceResult<()> {
        self.require_step(WizardStep::Category, "select a category")?;
        self.draft.category = Some(category);
        tracing::debug!(category = %category, "Category selected");
        Ok(())
    }

    // ── Step 2: Guidelines ───────────────────────────────────────────

    pub fn acknowledge_guidelines(&mut self, acknowledged: bool) -> GrievanceResult<()> {
        self.require_step(WizardStep::Guidelines, "acknowledge guidelines")?;
        self.draft.guidelines_acknowledged = acknowledged;
        Ok(())
    }

    // ── Step 3: Details ──────────────────────────────────────────────

    pub fn set_subject(&mut self, subject: impl Into<String>) -> GrievanceResult<()> {
        self.require_step(WizardStep::Details, "edit the subject")?;
        self.draft.subject = subject.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> GrievanceResult<()> {
        self.require_step(WizardStep::Details, "edit the description")?;
        self.draft.description = description.into();
        Ok(())
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> GrievanceResult<()> {
        self.require_step(WizardStep::Details, "edit the location")?;
        self.draft.location = location.into();
        Ok(())
    }

    /// Attach a reference to a photo or document. Optional; blanks and
    /// duplicates are dropped when the draft is submitted.
    pub fn attach_evidence(&mut self, reference: impl Into<String>) -> GrievanceResult<()> {
        self.require_step(WizardStep::Details, "attach evidence")?;
        self.draft.evidence.push(reference.into());
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Move forward if the current step's gate holds.
    ///
    /// From `Details` this finalises the draft and returns the submission;
    /// it succeeds at most once per wizard.
    pub fn advance(&mut self) -> GrievanceResult<Advance> {
        let next = self.step.next().ok_or(GrievanceError::InvalidStep {
            operation: "advance",
            step: self.step,
        })?;

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(GrievanceError::PreconditionNotMet {
                step: self.step,
                missing,
            });
        }

        if next == WizardStep::Submitted {
            // Earlier gates all held on the way here.
            let submission = self
                .draft
                .submission()
                .ok_or_else(|| GrievanceError::PreconditionNotMet {
                    step: self.step,
                    missing: self.draft.missing_fields(),
                })?;
            self.step = next;
            tracing::debug!(category = %submission.category(), "Draft submitted");
            return Ok(Advance::Submitted(submission));
        }

        tracing::debug!(from = %self.step, to = %next, "Wizard advanced");
        self.step = next;
        Ok(Advance::Moved(next))
    }

    /// Move to the previous step. Not allowed from `Category` or once submitted.
    pub fn back(&mut self) -> GrievanceResult<WizardStep> {
        let previous = self.step.previous().ok_or(GrievanceError::InvalidStep {
            operation: "go back",
            step: self.step,
        })?;
        tracing::debug!(from = %self.step, to = %previous, "Wizard went back");
        self.step = previous;
        Ok(previous)
    }

    fn require_step(&self, step: WizardStep, operation: &'static str) -> GrievanceResult<()> {
        if self.step != step {
            return Err(GrievanceError::InvalidStep {
                operation,
                step: self.step,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grievance_types::ErrorKind;

    fn wizard_at_details() -> GrievanceWizard {
        let mut wizard = GrievanceWizard::new();
        wizard.select_category(Category::WaterSupply).unwrap();
        wizard.advance().unwrap();
        wizard.acknowledge_guidelines(true).unwrap();
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_evidence_only_during_details() {
        let mut wizard = GrievanceWizard::new();
        let err = wizard.attach_evidence("leak.jpg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert!(wizard.draft().evidence.is_empty());

        let mut wizard = wizard_at_details();
        wizard.attach_evidence("leak.jpg").unwrap();
        wizard.attach_evidence("leak.jpg").unwrap();
        wizard.set_subject("Leak").unwrap();
        wizard.set_description("Pipe burst").unwrap();
        wizard.set_location("Elm St").unwrap();

        match wizard.advance().unwrap() {
            Advance::Submitted(submission) => assert_eq!(submission.evidence(), ["leak.jpg"]),
            other => panic!("expected submission, got {:?}", other),
        }
    }

    #[test]
    fn test_new_wizard_starts_at_category() {
        let wizard = GrievanceWizard::new();
        assert_eq!(wizard.step(), WizardStep::Category);
        assert!(wizard.guidelines().is_none());
        assert_eq!(wizard.missing_fields(), vec![DraftField::Category]);
    }

    #[test]
    fn test_advance_requires_category() {
        let mut wizard = GrievanceWizard::new();
        let err = wizard.advance().unwrap_err();
        assert_eq!(
            err,
            GrievanceError::PreconditionNotMet {
                step: WizardStep::Category,
                missing: vec![DraftField::Category],
            }
        );
        assert_eq!(wizard.step(), WizardStep::Category);

        wizard.select_category(Category::Electricity).unwrap();
        assert_eq!(
            wizard.advance().unwrap(),
            Advance::Moved(WizardStep::Guidelines)
        );
        assert_eq!(wizard.guidelines().map(|g| g.len()), Some(4));
    }

    #[test]
    fn test_advance_requires_acknowledgement() {
        let mut wizard = GrievanceWizard::new();
        wizard.select_category(Category::Sanitation).unwrap();
        wizard.advance().unwrap();

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.missing_fields(), &[DraftField::GuidelinesAcknowledged]);

        wizard.acknowledge_guidelines(true).unwrap();
        wizard.acknowledge_guidelines(false).unwrap();
        assert!(wizard.advance().is_err());

        wizard.acknowledge_guidelines(true).unwrap();
        assert_eq!(wizard.advance().unwrap(), Advance::Moved(WizardStep::Details));
    }

    #[test]
    fn test_water_supply_scenario() {
        let mut wizard = wizard_at_details();
        wizard.set_subject("Leak").unwrap();
        wizard.set_description("Pipe burst on Elm St").unwrap();
        wizard.set_location("Elm St").unwrap();

        let submission = match wizard.advance().unwrap() {
            Advance::Submitted(s) => s,
            other => panic!("expected submission, got {:?}", other),
        };
        assert_eq!(submission.category(), Category::WaterSupply);
        assert_eq!(submission.description(), "Pipe burst on Elm St");
        assert_eq!(wizard.step(), WizardStep::Submitted);
    }

    #[test]
    fn test_missing_description_is_named() {
        let mut wizard = wizard_at_details();
        wizard.set_subject("Leak").unwrap();
        wizard.set_location("Elm St").unwrap();

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PreconditionNotMet);
        assert_eq!(err.missing_fields(), &[DraftField::Description]);
        assert_eq!(wizard.step(), WizardStep::Details);
    }

    #[test]
    fn test_submit_succeeds_only_once() {
        let mut wizard = wizard_at_details();
        wizard.set_subject("Streetlight").unwrap();
        wizard.set_description("Out for three nights").unwrap();
        wizard.set_location("5th Ave").unwrap();
        wizard.advance().unwrap();

        let err = wizard.advance().unwrap_err();
        assert!(matches!(
            err,
            GrievanceError::InvalidStep {
                step: WizardStep::Submitted,
                ..
            }
        ));
        assert!(wizard.back().is_err());
        assert!(wizard.set_subject("edited").is_err());
    }

    #[test]
    fn test_back_from_category_fails() {
        let mut wizard = GrievanceWizard::new();
        let err = wizard.back().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
        assert_eq!(wizard.step(), WizardStep::Category);
    }

    #[test]
    fn test_back_keeps_fields() {
        let mut wizard = wizard_at_details();
        wizard.set_subject("Pothole").unwrap();

        assert_eq!(wizard.back().unwrap(), WizardStep::Guidelines);
        assert_eq!(wizard.back().unwrap(), WizardStep::Category);

        let draft = wizard.draft();
        assert_eq!(draft.category, Some(Category::WaterSupply));
        assert!(draft.guidelines_acknowledged);
        assert_eq!(draft.subject, "Pothole");

        // Change the category and walk forward again without re-acknowledging
        wizard.select_category(Category::RoadsInfrastructure).unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.advance().unwrap(), Advance::Moved(WizardStep::Details));
        assert_eq!(wizard.draft().subject, "Pothole");
    }

    #[test]
    fn test_operations_outside_their_step() {
        let mut wizard = GrievanceWizard::new();
        assert!(wizard.acknowledge_guidelines(true).is_err());
        assert!(wizard.set_location("Elm St").is_err());

        let mut wizard = wizard_at_details();
        let err = wizard.select_category(Category::Other).unwrap_err();
        assert_eq!(
            err,
            GrievanceError::InvalidStep {
                operation: "select a category",
                step: WizardStep::Details,
            }
        );
        assert_eq!(wizard.draft().category, Some(Category::WaterSupply));
    }
}
