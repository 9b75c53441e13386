use super::api_client::{GateOutcome, ValidationApiClient};
use super::form::{ContactForm, FieldErrors, FormField};
use super::state::{SubmissionState, ValidationStep};
use crate::configuration::Settings;
use crate::providers::{EmailDeliveryClient, ProviderError, TemplateParams};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

const CAPTCHA_FAILED: &str = "Captcha verification failed";
const EMAIL_UNREACHABLE: &str = "Unable to validate email. Please try again.";
const PHONE_UNREACHABLE: &str = "Unable to validate phone number. Please try again.";
const DELIVERY_FAILED: &str = "Failed to send message. Please try again.";

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("Please fill in the required fields")]
    InvalidFields(FieldErrors),
    #[error("{message}")]
    Rejected {
        step: ValidationStep,
        message: String,
    },
    #[error("{0}")]
    Delivery(String),
}

/// One contact form on one page, from mount until the user leaves.
pub struct ContactSession {
    form: ContactForm,
    captcha_token: Option<String>,
    field_errors: FieldErrors,
    state: Arc<watch::Sender<SubmissionState>>,
    api: ValidationApiClient,
    delivery: EmailDeliveryClient,
    success_reset_delay: Duration,
}

impl ContactSession {
    pub fn new(
        api: ValidationApiClient,
        delivery: EmailDeliveryClient,
        default_country_code: String,
        success_reset_delay: Duration,
    ) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            form: ContactForm::with_country_code(default_country_code),
            captcha_token: None,
            field_errors: FieldErrors::default(),
            state: Arc::new(state),
            api,
            delivery,
            success_reset_delay,
        }
    }

    pub fn build(configuration: &Settings) -> Result<Self, reqwest::Error> {
        let api = ValidationApiClient::new(
            configuration.contact_form.api_base_url.clone(),
            configuration.contact_form.timeout(),
        )?;
        let delivery = EmailDeliveryClient::new(
            configuration.email_delivery.base_url.clone(),
            configuration.email_delivery.service_id.clone(),
            configuration.email_delivery.template_id.clone(),
            configuration.email_delivery.public_key.clone(),
            configuration.email_delivery.timeout(),
        )?;
        Ok(Self::new(
            api,
            delivery,
            configuration.contact_form.default_country_code.clone(),
            configuration.contact_form.success_reset_delay(),
        ))
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Current state. A success older than the reset delay reads as idle,
    /// even before the scheduled reset has been published.
    pub fn state(&self) -> SubmissionState {
        let expired = matches!(
            *self.state.borrow(),
            SubmissionState::Success { since } if since.elapsed() >= self.success_reset_delay
        );
        if expired {
            self.state.send_replace(SubmissionState::Idle);
        }
        self.state.borrow().clone()
    }

    /// Follow state changes, e.g. to drive a spinner.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn can_submit(&self) -> bool {
        !self.state().is_busy()
    }

    /// A keystroke. Clears the field's inline error and leaves the error state.
    pub fn edit(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value.into());
        self.field_errors.clear_field(field);
        if matches!(self.state(), SubmissionState::Error(_)) {
            self.set_state(SubmissionState::Idle);
        }
    }

    pub fn select_country_code(&mut self, country_code: impl Into<String>) {
        self.form.country_code = country_code.into();
    }

    /// Called by the CAPTCHA widget; `None` when the token expires.
    pub fn set_captcha_token(&mut self, token: Option<String>) {
        self.captcha_token = token;
        self.field_errors.clear_field(FormField::Captcha);
    }

    /// Run the local checks, the remote gates in order, then deliver.
    ///
    /// Taking `&mut self` keeps a second submission from starting while
    /// one is in flight.
    #[tracing::instrument(name = "Submitting the contact form", skip(self))]
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        self.field_errors.clear();
        if let Err(errors) = self.form.validate(self.captcha_token.as_deref()) {
            self.field_errors = errors.clone();
            self.set_state(SubmissionState::Idle);
            return Err(SubmitError::InvalidFields(errors));
        }
        // The widget's tokens are single-use
        let token = self.captcha_token.take().unwrap_or_default();

        self.set_state(SubmissionState::Validating(ValidationStep::Captcha));
        let verified = self.api.verify_captcha(&token).await;
        match verified {
            Ok(true) => {}
            Ok(false) => return Err(self.reject(ValidationStep::Captcha, CAPTCHA_FAILED.into())),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Captcha check could not be completed");
                return Err(self.reject(ValidationStep::Captcha, CAPTCHA_FAILED.into()));
            }
        }

        self.set_state(SubmissionState::Validating(ValidationStep::Email));
        let outcome = self.api.validate_email(self.form.email.trim()).await;
        self.pass_gate(ValidationStep::Email, outcome, EMAIL_UNREACHABLE)?;

        self.set_state(SubmissionState::Validating(ValidationStep::Phone));
        let phone = self.form.phone();
        let outcome = self.api.validate_phone(&phone).await;
        self.pass_gate(ValidationStep::Phone, outcome, PHONE_UNREACHABLE)?;

        self.set_state(SubmissionState::Sending);
        let email = self.form.email.trim();
        let params = TemplateParams {
            user_name: self.form.name.trim(),
            user_email: email,
            company: self.form.company.trim(),
            phone: &phone,
            message: &self.form.message,
            reply_to: email,
        };
        if let Err(e) = self.delivery.send(&params).await {
            tracing::error!(error.cause_chain = ?e, "Contact message delivery failed");
            let message = match e {
                ProviderError::Status { body, .. } if !body.trim().is_empty() => body,
                _ => DELIVERY_FAILED.to_string(),
            };
            self.set_state(SubmissionState::Error(message.clone()));
            return Err(SubmitError::Delivery(message));
        }

        tracing::info!("Contact message delivered");
        self.form.clear();
        let since = Instant::now();
        self.set_state(SubmissionState::Success { since });
        self.schedule_reset(since);
        Ok(())
    }

    /// Publish the move back to idle once the success has been shown long
    /// enough. A newer state in the meantime is left alone.
    fn schedule_reset(&self, since: Instant) {
        let state = Arc::clone(&self.state);
        let delay = self.success_reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|current| {
                let still_shown =
                    matches!(current, SubmissionState::Success { since: shown } if *shown == since);
                if still_shown {
                    *current = SubmissionState::Idle;
                }
                still_shown
            });
        });
    }

    fn pass_gate(
        &mut self,
        step: ValidationStep,
        outcome: Result<GateOutcome, reqwest::Error>,
        unreachable_message: &str,
    ) -> Result<(), SubmitError> {
        match outcome {
            Ok(GateOutcome::Accepted) => Ok(()),
            Ok(GateOutcome::Rejected(message)) => Err(self.reject(step, message)),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, ?step, "Validation API unreachable");
                Err(self.reject(step, unreachable_message.to_string()))
            }
        }
    }

    fn reject(&mut self, step: ValidationStep, message: String) -> SubmitError {
        tracing::info!(?step, %message, "Contact form rejected");
        let field = match step {
            ValidationStep::Captcha => FormField::Captcha,
            ValidationStep::Email => FormField::Email,
            ValidationStep::Phone => FormField::Mobile,
        };
        self.field_errors.set(field, message.clone());
        self.set_state(SubmissionState::Error(message.clone()));
        SubmitError::Rejected { step, message }
    }

    fn set_state(&self, state: SubmissionState) {
        tracing::debug!(?state, "Contact form state changed");
        self.state.send_replace(state);
    }
}
