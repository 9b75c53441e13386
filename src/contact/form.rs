use crate::domain::phone_number::digits_of;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Email,
    Mobile,
    Company,
    Message,
    Captcha,
}

/// Inline messages keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub mobile: String,
    pub company: String,
    pub message: String,
}

impl ContactForm {
    pub fn with_country_code(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Mobile => self.mobile = value,
            FormField::Company => self.company = value,
            FormField::Message => self.message = value,
            // The token comes from the widget, not from a text input
            FormField::Captcha => {}
        }
    }

    /// Required fields and the CAPTCHA token, checked without any network call.
    pub fn validate(&self, captcha_token: Option<&str>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.set(FormField::Name, "Name is required");
        }
        if self.email.trim().is_empty() {
            errors.set(FormField::Email, "Email is required");
        }
        if self.mobile.trim().is_empty() {
            errors.set(FormField::Mobile, "Phone number is required");
        }
        if self.message.trim().is_empty() {
            errors.set(FormField::Message, "Message is required");
        }
        if captcha_token.map_or(true, |t| t.trim().is_empty()) {
            errors.set(FormField::Captcha, "Please complete the captcha");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Selected country code followed by the digits typed in the mobile field.
    pub fn phone(&self) -> String {
        format!("{}{}", self.country_code.trim(), digits_of(&self.mobile))
    }

    /// Empty every text field, keeping the selected country code.
    pub fn clear(&mut self) {
        *self = Self::with_country_code(std::mem::take(&mut self.country_code));
    }
}
