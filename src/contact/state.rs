use std::time::Instant;

/// The remote checks a submission goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStep {
    Captcha,
    Email,
    Phone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating(ValidationStep),
    Sending,
    Success { since: Instant },
    Error(String),
}

impl SubmissionState {
    /// A submission is in flight; the submit control stays disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Validating(_) | SubmissionState::Sending)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Error(message) => Some(message),
            _ => None,
        }
    }
}
