const MIN_DIGITS: usize = 8;

/// A phone number in international format, e.g. `+14152007986`.
///
/// The raw input is kept as typed so the provider sees the leading `+`;
/// only the digit count is checked here.
#[derive(Debug, Clone)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(s: String) -> Result<PhoneNumber, String> {
        let digits = digits_of(&s);
        if digits.len() < MIN_DIGITS {
            Err(format!(
                "Phone number must have at least {} digits, found {}",
                MIN_DIGITS,
                digits.len()
            ))
        } else {
            Ok(Self(s))
        }
    }

    pub fn digits(&self) -> String {
        digits_of(&self.0)
    }
}

/// Strip everything that is not an ASCII digit.
pub fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
