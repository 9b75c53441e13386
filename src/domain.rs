pub mod contact_email;
pub mod email_verification;
pub mod phone_number;
pub mod phone_verification;

pub use contact_email::ContactEmail;
pub use email_verification::{Deliverability, EmailStatus, EmailVerdict, EmailVerification};
pub use phone_number::PhoneNumber;
pub use phone_verification::{PhoneVerdict, PhoneVerification, ValidPhone};

/// A CAPTCHA response token handed out by the widget on the page.
#[derive(Debug)]
pub struct CaptchaToken(String);

impl CaptchaToken {
    pub fn parse(s: String) -> Result<CaptchaToken, String> {
        if s.trim().is_empty() {
            Err("A captcha token is required".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for CaptchaToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
