//! Client side of the contact form.
//!
//! A [`ContactSession`] owns the form, runs the CAPTCHA, email and phone
//! gates against the validation API in order, and only then hands the
//! message to the delivery provider.

mod api_client;
mod form;
mod session;
mod state;

pub use api_client::{GateOutcome, ValidationApiClient};
pub use form::{ContactForm, FieldErrors, FormField};
pub use session::{ContactSession, SubmitError};
pub use state::{SubmissionState, ValidationStep};
