//! Grievance drafts: the intake form a citizen fills in step by step
//!
//! A draft is owned by the wizard until it is finalised into a
//! [`GrievanceSubmission`]. The submission is what the persistence
//! collaborator turns into a stored [`crate::Grievance`].

use crate::Category;
use serde::{Deserialize, Serialize};

// ── Wizard Step ──────────────────────────────────────────────────────

/// Position of a draft in the intake wizard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum WizardStep {
    /// Choosing a category
    #[default]
    Category,
    /// Reading and accepting the filing guidelines
    Guidelines,
    /// Entering subject, description and location
    Details,
    /// Finalised; no further edits
    Submitted,
}

impl WizardStep {
    /// The step `advance` moves to
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Category => Some(Self::Guidelines),
            Self::Guidelines => Some(Self::Details),
            Self::Details => Some(Self::Submitted),
            Self::Submitted => None,
        }
    }

    /// The step `back` moves to
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Guidelines => Some(Self::Category),
            Self::Details => Some(Self::Guidelines),
            Self::Category | Self::Submitted => None,
        }
    }

    /// 1-based position for "Step n of 3" displays; `None` once submitted
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            Self::Category => Some(1),
            Self::Guidelines => Some(2),
            Self::Details => Some(3),
            Self::Submitted => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        *self == Self::Submitted
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Category => "category",
            Self::Guidelines => "guidelines",
            Self::Details => "details",
            Self::Submitted => "submitted",
        };
        f.write_str(name)
    }
}

// ── Draft Fields ─────────────────────────────────────────────────────

/// A draft field that a wizard gate can report as missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DraftField {
    Category,
    GuidelinesAcknowledged,
    Subject,
    Description,
    Location,
}

impl DraftField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::GuidelinesAcknowledged => "guidelinesAcknowledged",
            Self::Subject => "subject",
            Self::Description => "description",
            Self::Location => "location",
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ── Draft ────────────────────────────────────────────────────────────

/// An in-progress grievance
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrievanceDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub guidelines_acknowledged: bool,
    pub subject: String,
    pub description: String,
    pub location: String,
    /// Optional references (URLs, upload ids) to photos or documents
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<String>,
}

impl GrievanceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields the gate leaving `step` still needs, in field order
    pub fn missing_for_step(&self, step: WizardStep) -> Vec<DraftField> {
        let mut missing = Vec::new();
        match step {
            WizardStep::Category => {
                if self.category.is_none() {
                    missing.push(DraftField::Category);
                }
            }
            WizardStep::Guidelines => {
                if !self.guidelines_acknowledged {
                    missing.push(DraftField::GuidelinesAcknowledged);
                }
            }
            WizardStep::Details => {
                for (field, value) in [
                    (DraftField::Subject, &self.subject),
                    (DraftField::Description, &self.description),
                    (DraftField::Location, &self.location),
                ] {
                    if is_blank(value) {
                        missing.push(field);
                    }
                }
            }
            WizardStep::Submitted => {}
        }
        missing
    }

    /// Every field that keeps this draft from being submittable
    pub fn missing_fields(&self) -> Vec<DraftField> {
        [
            WizardStep::Category,
            WizardStep::Guidelines,
            WizardStep::Details,
        ]
        .into_iter()
        .flat_map(|step| self.missing_for_step(step))
        .collect()
    }

    /// Category set, guidelines acknowledged, and all text fields non-blank
    pub fn is_submittable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The creation payload, if the draft is submittable
    pub fn submission(&self) -> Option<GrievanceSubmission> {
        if !self.is_submittable() {
            return None;
        }
        Some(GrievanceSubmission {
            category: self.category?,
            subject: self.subject.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            evidence: clean_references(&self.evidence),
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trimmed, non-blank references with duplicates removed, first one wins
pub fn clean_references(references: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for reference in references {
        let reference = reference.trim();
        if !reference.is_empty() && !cleaned.iter().any(|r| r == reference) {
            cleaned.push(reference.to_string());
        }
    }
    cleaned
}

// ── Submission ───────────────────────────────────────────────────────

/// A finalised draft, ready to become a stored grievance.
///
/// Only [`GrievanceDraft::submission`] builds one, so every submission has
/// passed all wizard gates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GrievanceSubmission {
    pub(crate) category: Category,
    pub(crate) subject: String,
    pub(crate) description: String,
    pub(crate) location: String,
    pub(crate) evidence: Vec<String>,
}

impl GrievanceSubmission {
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Evidence references attached by the citizen
    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> GrievanceDraft {
        GrievanceDraft {
            category: Some(Category::WaterSupply),
            guidelines_acknowledged: true,
            subject: "Leak".into(),
            description: "Pipe burst on Elm St".into(),
            location: "Elm St".into(),
            evidence: Vec::new(),
        }
    }

    #[test]
    fn test_empty_draft_misses_everything() {
        let draft = GrievanceDraft::new();
        assert_eq!(
            draft.missing_fields(),
            vec![
                DraftField::Category,
                DraftField::GuidelinesAcknowledged,
                DraftField::Subject,
                DraftField::Description,
                DraftField::Location,
            ]
        );
        assert!(!draft.is_submittable());
        assert!(draft.submission().is_none());
    }

    #[test]
    fn test_complete_draft_is_submittable() {
        let draft = complete_draft();
        assert!(draft.is_submittable());

        let submission = draft.submission().unwrap();
        assert_eq!(submission.category(), Category::WaterSupply);
        assert_eq!(submission.subject(), "Leak");
        assert_eq!(submission.location(), "Elm St");
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut draft = complete_draft();
        draft.location = "   ".into();
        assert_eq!(
            draft.missing_for_step(WizardStep::Details),
            vec![DraftField::Location]
        );
    }

    #[test]
    fn test_submission_trims_text() {
        let mut draft = complete_draft();
        draft.subject = "  Leak \n".into();
        assert_eq!(draft.submission().unwrap().subject(), "Leak");
    }

    #[test]
    fn test_evidence_is_optional_and_cleaned() {
        let draft = complete_draft();
        assert!(draft.submission().unwrap().evidence().is_empty());

        let mut draft = complete_draft();
        draft.evidence = vec![
            " https://photos.example/leak-1.jpg ".into(),
            "   ".into(),
            "https://photos.example/leak-1.jpg".into(),
            "upload:42".into(),
        ];
        assert!(draft.is_submittable());
        assert_eq!(
            draft.submission().unwrap().evidence(),
            ["https://photos.example/leak-1.jpg", "upload:42"]
        );
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(WizardStep::Category.next(), Some(WizardStep::Guidelines));
        assert_eq!(WizardStep::Details.next(), Some(WizardStep::Submitted));
        assert_eq!(WizardStep::Submitted.next(), None);

        assert_eq!(WizardStep::Category.previous(), None);
        assert_eq!(WizardStep::Details.previous(), Some(WizardStep::Guidelines));
        assert_eq!(WizardStep::Submitted.previous(), None);

        assert_eq!(WizardStep::Guidelines.ordinal(), Some(2));
        assert_eq!(WizardStep::Submitted.ordinal(), None);
    }
}
