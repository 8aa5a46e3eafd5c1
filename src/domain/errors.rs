use super::access::Page;
use super::wizard::FieldId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{}", validation_message(.fields))]
    ValidationFailed { step: u8, fields: Vec<FieldId> },
    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("Applications can only be submitted from the review step (currently on step {step})")]
    NotOnFinalStep { step: u8 },
    #[error("Application {0} not found")]
    ApplicationNotFound(String),
    #[error("Unknown application status: {0}")]
    UnknownStatus(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Access denied to {0}. Please log in with appropriate permissions.")]
    AccessDenied(Page),
    #[error("Please fill in all fields")]
    IncompleteEvent(Vec<&'static str>),
}

fn validation_message(fields: &[FieldId]) -> &'static str {
    if fields == [FieldId::FocusAreas] {
        "Please select at least one focus area"
    } else {
        "Please fill in all required fields"
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_aggregate() {
        let err = DomainError::ValidationFailed {
            step: 1,
            fields: vec![FieldId::FirstName, FieldId::Email],
        };
        assert_eq!(err.to_string(), "Please fill in all required fields");
    }

    #[test]
    fn test_focus_area_only_message() {
        let err = DomainError::ValidationFailed {
            step: 2,
            fields: vec![FieldId::FocusAreas],
        };
        assert_eq!(err.to_string(), "Please select at least one focus area");
    }

    #[test]
    fn test_not_found_names_id() {
        let err = DomainError::ApplicationNotFound("APP404".to_string());
        assert_eq!(err.to_string(), "Application APP404 not found");
    }
}
