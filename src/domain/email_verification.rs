/// Verification status reported by the email verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Valid,
    Invalid,
    AcceptAll,
    Webmail,
    Disposable,
    #[serde(other)]
    Unknown,
}

/// Deliverability verdict reported alongside the status.
///
/// Values we do not know are kept verbatim so they can be echoed back.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub enum Deliverability {
    Deliverable,
    Undeliverable,
    Risky,
    Unknown,
    Other(String),
}

impl From<String> for Deliverability {
    fn from(s: String) -> Self {
        match s.as_str() {
            "deliverable" => Deliverability::Deliverable,
            "undeliverable" => Deliverability::Undeliverable,
            "risky" => Deliverability::Risky,
            "unknown" => Deliverability::Unknown,
            _ => Deliverability::Other(s),
        }
    }
}

impl From<Deliverability> for String {
    fn from(d: Deliverability) -> Self {
        match d {
            Deliverability::Deliverable => "deliverable".into(),
            Deliverability::Undeliverable => "undeliverable".into(),
            Deliverability::Risky => "risky".into(),
            Deliverability::Unknown => "unknown".into(),
            Deliverability::Other(s) => s,
        }
    }
}

/// The fields of a provider verification we base the decision on.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct EmailVerification {
    pub status: Option<EmailStatus>,
    pub result: Option<Deliverability>,
    /// Passed through untouched; the provider decides its scale.
    pub score: Option<serde_json::Value>,
    pub disposable: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailVerdict {
    Accepted,
    /// Nothing conclusive either way; let it through.
    AcceptedUncertain,
    Undeliverable,
    Invalid,
    Disposable,
}

impl EmailVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, EmailVerdict::Accepted | EmailVerdict::AcceptedUncertain)
    }
}

impl EmailVerification {
    /// First matching rule wins: a `valid` status decides on the result,
    /// an `invalid` status rejects, then disposable addresses are refused.
    pub fn verdict(&self) -> EmailVerdict {
        match (self.status, self.result.as_ref()) {
            (
                Some(EmailStatus::Valid),
                Some(Deliverability::Deliverable | Deliverability::Unknown | Deliverability::Risky),
            ) => EmailVerdict::Accepted,
            (Some(EmailStatus::Valid), Some(Deliverability::Undeliverable)) => {
                EmailVerdict::Undeliverable
            }
            (Some(EmailStatus::Invalid), _) => EmailVerdict::Invalid,
            _ if self.disposable.unwrap_or(false) => EmailVerdict::Disposable,
            _ => EmailVerdict::AcceptedUncertain,
        }
    }
}
