/// A phone validation as reported by the provider.
///
/// The provider either answers with a verdict or with an `error`, which is
/// usually an object but may be any JSON value.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PhoneVerification {
    pub valid: Option<bool>,
    pub format: Option<PhoneFormat>,
    pub country: Option<PhoneCountry>,
    #[serde(rename = "type")]
    pub phone_type: Option<String>,
    pub carrier: Option<String>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PhoneFormat {
    pub international: Option<String>,
    pub local: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PhoneCountry {
    pub code: Option<String>,
    pub name: Option<String>,
    pub prefix: Option<String>,
}

/// What we know about a number the provider accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPhone {
    pub country: Option<String>,
    pub country_name: Option<String>,
    pub phone_type: Option<String>,
    pub carrier: Option<String>,
    pub international_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneVerdict {
    Valid(ValidPhone),
    Invalid,
    /// The provider reported an error, with its detail text if it sent one.
    ProviderError(Option<String>),
}

impl PhoneVerification {
    pub fn verdict(self) -> PhoneVerdict {
        if let Some(error) = self.error.filter(is_truthy) {
            let details = match error.get("details") {
                Some(serde_json::Value::String(details)) if !details.trim().is_empty() => {
                    Some(details.clone())
                }
                _ => None,
            };
            return PhoneVerdict::ProviderError(details);
        }
        if self.valid != Some(true) {
            return PhoneVerdict::Invalid;
        }
        let country = self.country.unwrap_or_default();
        PhoneVerdict::Valid(ValidPhone {
            country: country.code,
            country_name: country.name,
            phone_type: self.phone_type,
            carrier: self.carrier,
            international_format: self.format.and_then(|f| f.international),
        })
    }
}

/// `null`, `false`, `0` and `""` do not count as an error being present.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
