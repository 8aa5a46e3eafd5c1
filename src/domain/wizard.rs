//! Multi-step membership application wizard.
//!
//! The wizard walks an applicant through four steps (personal details,
//! organization, motivation, review), validating each step before it lets the
//! applicant move on. Submission hands a validated draft to the
//! [`ApplicationReviewBoard`], which assigns the identifier and records the
//! audit entry.

use chrono::NaiveDate;

use super::errors::{DomainError, DomainResult};
use super::models::ApplicationRecord;
use super::review::{ApplicationDraft, ApplicationReviewBoard};

/// Number of steps in the wizard; the last one is the review step.
pub const TOTAL_STEPS: u8 = 4;

/// Focus areas an applicant can tag their organization with.
pub const FOCUS_AREA_OPTIONS: [&str; 6] = [
    "Education",
    "Gender",
    "Environment",
    "Advocacy",
    "Digital",
    "Economic",
];

/// Identifies a single input of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Phone,
    Country,
    Age,
    OrgName,
    OrgType,
    Position,
    OrgWebsite,
    FocusAreas,
    Motivation,
    Experience,
    Contribution,
}

impl FieldId {
    pub const ALL: [FieldId; 14] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Country,
        FieldId::Age,
        FieldId::OrgName,
        FieldId::OrgType,
        FieldId::Position,
        FieldId::OrgWebsite,
        FieldId::FocusAreas,
        FieldId::Motivation,
        FieldId::Experience,
        FieldId::Contribution,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldId::FirstName => "First Name",
            FieldId::LastName => "Last Name",
            FieldId::Email => "Email",
            FieldId::Phone => "Phone",
            FieldId::Country => "Country",
            FieldId::Age => "Age",
            FieldId::OrgName => "Organization",
            FieldId::OrgType => "Organization Type",
            FieldId::Position => "Position",
            FieldId::OrgWebsite => "Website",
            FieldId::FocusAreas => "Focus Areas",
            FieldId::Motivation => "Motivation",
            FieldId::Experience => "Experience",
            FieldId::Contribution => "Contribution",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, FieldId::OrgWebsite)
    }
}

/// Inputs shown on `step`, in display order. Steps outside `1..=TOTAL_STEPS`
/// and the review step have none.
pub fn step_fields(step: u8) -> &'static [FieldId] {
    match step {
        1 => &[
            FieldId::FirstName,
            FieldId::LastName,
            FieldId::Email,
            FieldId::Phone,
            FieldId::Country,
            FieldId::Age,
        ],
        2 => &[
            FieldId::OrgName,
            FieldId::OrgType,
            FieldId::Position,
            FieldId::OrgWebsite,
            FieldId::FocusAreas,
        ],
        3 => &[FieldId::Motivation, FieldId::Experience, FieldId::Contribution],
        _ => &[],
    }
}

pub fn step_title(step: u8) -> &'static str {
    match step {
        1 => "Personal Information",
        2 => "Organization Details",
        3 => "Motivation & Experience",
        4 => "Review & Submit",
        _ => "",
    }
}

/// Raw values collected by the wizard, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub age: String,
    pub org_name: String,
    pub org_type: String,
    pub position: String,
    pub org_website: String,
    pub focus_areas: Vec<String>,
    pub motivation: String,
    pub experience: String,
    pub contribution: String,
    pub agree_terms: bool,
}

impl ApplicationForm {
    /// Text value of `field`; focus areas are joined with `", "`.
    pub fn value(&self, field: FieldId) -> String {
        match self.text(field) {
            Some(text) => text.clone(),
            None => self.focus_areas.join(", "),
        }
    }

    /// Mutable text buffer for `field`, or `None` for the focus-area selection.
    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        let text = match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::Country => &mut self.country,
            FieldId::Age => &mut self.age,
            FieldId::OrgName => &mut self.org_name,
            FieldId::OrgType => &mut self.org_type,
            FieldId::Position => &mut self.position,
            FieldId::OrgWebsite => &mut self.org_website,
            FieldId::Motivation => &mut self.motivation,
            FieldId::Experience => &mut self.experience,
            FieldId::Contribution => &mut self.contribution,
            FieldId::FocusAreas => return None,
        };
        Some(text)
    }

    fn text(&self, field: FieldId) -> Option<&String> {
        let text = match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::Country => &self.country,
            FieldId::Age => &self.age,
            FieldId::OrgName => &self.org_name,
            FieldId::OrgType => &self.org_type,
            FieldId::Position => &self.position,
            FieldId::OrgWebsite => &self.org_website,
            FieldId::Motivation => &self.motivation,
            FieldId::Experience => &self.experience,
            FieldId::Contribution => &self.contribution,
            FieldId::FocusAreas => return None,
        };
        Some(text)
    }

    /// Selects `area` if it is not selected yet, otherwise deselects it.
    pub fn toggle_focus_area(&mut self, area: &str) {
        if let Some(pos) = self.focus_areas.iter().position(|a| a == area) {
            self.focus_areas.remove(pos);
        } else {
            self.focus_areas.push(area.to_string());
        }
    }

    pub fn has_focus_area(&self, area: &str) -> bool {
        self.focus_areas.iter().any(|a| a == area)
    }

    fn parsed_age(&self) -> Option<u32> {
        self.age.trim().parse().ok()
    }

    fn to_draft(&self) -> DomainResult<ApplicationDraft> {
        let age = self.parsed_age().ok_or(DomainError::ValidationFailed {
            step: 1,
            fields: vec![FieldId::Age],
        })?;

        Ok(ApplicationDraft {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            country: self.country.trim().to_string(),
            age,
            org_name: self.org_name.trim().to_string(),
            org_type: self.org_type.trim().to_string(),
            position: self.position.trim().to_string(),
            org_website: self.org_website.trim().to_string(),
            focus_areas: self.focus_areas.clone(),
            motivation: self.motivation.trim().to_string(),
            experience: self.experience.trim().to_string(),
            contribution: self.contribution.trim().to_string(),
            agree_terms: self.agree_terms,
        })
    }
}

/// Read-only projection of the form shown on the review step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub rows: Vec<(&'static str, String)>,
}

impl ReviewSummary {
    pub fn from_form(form: &ApplicationForm) -> Self {
        let rows = FieldId::ALL
            .iter()
            .map(|field| {
                let value = form.value(*field);
                let value = if *field == FieldId::OrgWebsite && value.trim().is_empty() {
                    "N/A".to_string()
                } else {
                    value
                };
                (field.label(), value)
            })
            .collect();
        Self { rows }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Step machine over an [`ApplicationForm`].
///
/// # Examples
///
/// ```
/// use yan_portal::domain::ApplicationWizard;
///
/// let mut wizard = ApplicationWizard::new();
/// assert_eq!(wizard.current_step(), 1);
/// assert!(wizard.advance().is_err()); // nothing filled in yet
/// assert!(!wizard.retreat());
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationWizard {
    current_step: u8,
    form: ApplicationForm,
}

impl Default for ApplicationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationWizard {
    pub fn new() -> Self {
        Self {
            current_step: 1,
            form: ApplicationForm::default(),
        }
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn total_steps(&self) -> u8 {
        TOTAL_STEPS
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step == TOTAL_STEPS
    }

    pub fn form(&self) -> &ApplicationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ApplicationForm {
        &mut self.form
    }

    /// Checks the inputs of `step`, returning every offending field on failure.
    pub fn validate_step(&self, step: u8) -> DomainResult<()> {
        let mut invalid = Vec::new();

        for field in step_fields(step) {
            match field {
                FieldId::FocusAreas => {
                    if self.form.focus_areas.is_empty() {
                        invalid.push(*field);
                    }
                }
                FieldId::Age => {
                    if self.form.parsed_age().is_none() {
                        invalid.push(*field);
                    }
                }
                _ => {
                    let blank = self.form.value(*field).trim().is_empty();
                    if field.is_required() && blank {
                        invalid.push(*field);
                    }
                }
            }
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            tracing::debug!(step, ?invalid, "wizard step failed validation");
            Err(DomainError::ValidationFailed { step, fields: invalid })
        }
    }

    /// Validates the current step and moves forward one step. Returns the
    /// review summary once the final step is reached.
    pub fn advance(&mut self) -> DomainResult<Option<ReviewSummary>> {
        self.validate_step(self.current_step)?;

        if self.current_step < TOTAL_STEPS {
            self.current_step += 1;
            if self.is_final_step() {
                return Ok(Some(self.review_summary()));
            }
        }
        Ok(None)
    }

    /// Moves back one step. Returns `false` when already on the first step.
    pub fn retreat(&mut self) -> bool {
        if self.current_step > 1 {
            self.current_step -= 1;
            true
        } else {
            false
        }
    }

    pub fn review_summary(&self) -> ReviewSummary {
        ReviewSummary::from_form(&self.form)
    }

    /// Submits the collected application through `board` and resets the
    /// wizard. Nothing is recorded unless the wizard is on the review step,
    /// the terms are accepted, and every step validates.
    pub fn submit(
        &mut self,
        board: &mut ApplicationReviewBoard<'_>,
        actor: Option<&str>,
        today: NaiveDate,
    ) -> DomainResult<ApplicationRecord> {
        if !self.is_final_step() {
            return Err(DomainError::NotOnFinalStep { step: self.current_step });
        }
        if !self.form.agree_terms {
            return Err(DomainError::TermsNotAccepted);
        }
        for step in 1..TOTAL_STEPS {
            self.validate_step(step)?;
        }

        let draft = self.form.to_draft()?;
        let record = board.register(draft, today, actor).clone();
        self.reset();
        Ok(record)
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
        self.form = ApplicationForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationStatus, AuditAction, PlatformData};

    fn filled_form() -> ApplicationForm {
        ApplicationForm {
            first_name: "Alice".to_string(),
            last_name: "Kim".to_string(),
            email: "a@x.com".to_string(),
            phone: "+250788000000".to_string(),
            country: "Rwanda".to_string(),
            age: "24".to_string(),
            org_name: "Youth Hub".to_string(),
            org_type: "NGO".to_string(),
            position: "Coordinator".to_string(),
            org_website: String::new(),
            focus_areas: vec!["Education".to_string(), "Digital".to_string()],
            motivation: "Grow the network".to_string(),
            experience: "Two years of programs".to_string(),
            contribution: "Training".to_string(),
            agree_terms: true,
        }
    }

    fn wizard_on_review_step() -> ApplicationWizard {
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();
        for _ in 1..TOTAL_STEPS {
            wizard.advance().unwrap();
        }
        wizard
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_new_wizard_starts_on_first_step() {
        let wizard = ApplicationWizard::new();
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.total_steps(), 4);
        assert!(!wizard.is_final_step());
    }

    #[test]
    fn test_advance_blocked_by_empty_required_fields() {
        let mut wizard = ApplicationWizard::new();
        wizard.form_mut().first_name = "Alice".to_string();

        let err = wizard.advance().unwrap_err();
        match err {
            DomainError::ValidationFailed { step, fields } => {
                assert_eq!(step, 1);
                assert!(fields.contains(&FieldId::LastName));
                assert!(!fields.contains(&FieldId::FirstName));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();
        wizard.form_mut().email = "   ".to_string();
        assert!(matches!(
            wizard.validate_step(1),
            Err(DomainError::ValidationFailed { fields, .. }) if fields == vec![FieldId::Email]
        ));
    }

    #[test]
    fn test_age_must_be_whole_number() {
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();
        wizard.form_mut().age = "twenty".to_string();
        assert!(wizard.validate_step(1).is_err());
    }

    #[test]
    fn test_step_two_requires_focus_area() {
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();
        wizard.form_mut().focus_areas.clear();
        wizard.advance().unwrap();

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.to_string(), "Please select at least one focus area");
        assert_eq!(wizard.current_step(), 2);
    }

    #[test]
    fn test_website_is_optional() {
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();
        assert!(wizard.validate_step(2).is_ok());
    }

    #[test]
    fn test_advance_never_passes_last_step() {
        let mut wizard = wizard_on_review_step();
        assert!(wizard.is_final_step());
        assert_eq!(wizard.advance().unwrap(), None);
        assert_eq!(wizard.current_step(), TOTAL_STEPS);
    }

    #[test]
    fn test_retreat_never_goes_below_first_step() {
        let mut wizard = wizard_on_review_step();
        assert!(wizard.retreat());
        assert!(wizard.retreat());
        assert!(wizard.retreat());
        assert!(!wizard.retreat());
        assert_eq!(wizard.current_step(), 1);
    }

    #[test]
    fn test_reaching_review_step_returns_summary() {
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();
        assert_eq!(wizard.advance().unwrap(), None);
        assert_eq!(wizard.advance().unwrap(), None);

        let summary = wizard.advance().unwrap().expect("summary on final step");
        assert_eq!(summary.get("First Name"), Some("Alice"));
        assert_eq!(summary.get("Focus Areas"), Some("Education, Digital"));
        assert_eq!(summary.get("Website"), Some("N/A"));
        assert_eq!(summary.rows.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_toggle_focus_area() {
        let mut form = ApplicationForm::default();
        form.toggle_focus_area("Gender");
        assert!(form.has_focus_area("Gender"));
        form.toggle_focus_area("Gender");
        assert!(!form.has_focus_area("Gender"));
    }

    #[test]
    fn test_submit_appends_pending_record_and_resets() {
        let mut data = PlatformData::default();
        let mut wizard = wizard_on_review_step();

        let record = {
            let mut board = ApplicationReviewBoard::new(&mut data);
            wizard.submit(&mut board, None, today()).unwrap()
        };

        assert_eq!(record.id, "APP001");
        assert_eq!(record.status, ApplicationStatus::Pending);
        assert_eq!(record.submitted_date, today());
        assert_eq!(record.age, 24);
        assert_eq!(data.applications.len(), 1);
        assert_eq!(
            data.audit_log.front().unwrap().action,
            AuditAction::ApplicationSubmitted
        );
        assert_eq!(wizard.current_step(), 1);
        assert_eq!(wizard.form(), &ApplicationForm::default());
    }

    #[test]
    fn test_submit_without_terms_changes_nothing() {
        let mut data = PlatformData::default();
        let mut wizard = wizard_on_review_step();
        wizard.form_mut().agree_terms = false;

        let mut board = ApplicationReviewBoard::new(&mut data);
        let err = wizard.submit(&mut board, None, today()).unwrap_err();

        assert_eq!(err, DomainError::TermsNotAccepted);
        assert!(data.applications.is_empty());
        assert!(data.audit_log.is_empty());
        assert_eq!(wizard.current_step(), TOTAL_STEPS);
    }

    #[test]
    fn test_submit_requires_final_step() {
        let mut data = PlatformData::default();
        let mut wizard = ApplicationWizard::new();
        *wizard.form_mut() = filled_form();

        let mut board = ApplicationReviewBoard::new(&mut data);
        assert_eq!(
            wizard.submit(&mut board, None, today()),
            Err(DomainError::NotOnFinalStep { step: 1 })
        );
        assert!(data.applications.is_empty());
    }

    #[test]
    fn test_submit_revalidates_edited_fields() {
        let mut data = PlatformData::default();
        let mut wizard = wizard_on_review_step();
        wizard.form_mut().motivation.clear();

        let mut board = ApplicationReviewBoard::new(&mut data);
        let err = wizard.submit(&mut board, None, today()).unwrap_err();
        assert!(matches!(err, DomainError::ValidationFailed { step: 3, .. }));
        assert!(data.applications.is_empty());
    }
}
