//! Contact form validation.

use bharat_core::{Email, EmailError};
use serde::Deserialize;

use crate::api::ContactSubmission;

/// Shown whenever a message is accepted, delivered or not.
pub const CONTACT_THANKS: &str = "Thank you! We will get back to you soon.";

/// Contact form data as entered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

/// Why a contact form was rejected. The message is shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("Please fill all required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail(#[source] EmailError),
}

/// What happened to an accepted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The backend stored the message.
    Delivered,
    /// The backend was unreachable or refused; the shopper was thanked anyway.
    AcceptedOffline,
}

impl ContactForm {
    /// Check required fields, then the email address.
    ///
    /// # Errors
    ///
    /// Returns [`ContactError::MissingFields`] if name, email or message is
    /// blank, and [`ContactError::InvalidEmail`] for a malformed address.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }
        let email = Email::parse(email).map_err(ContactError::InvalidEmail)?;

        Ok(ContactSubmission {
            name: name.to_string(),
            email,
            message: message.to_string(),
            phone: non_blank(self.phone.as_deref()),
            category: non_blank(self.category.as_deref()),
            subject: non_blank(self.subject.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
