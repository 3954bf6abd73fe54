//! Contact form - local validation and single-in-flight submission tracking
//!
//! The transport itself lives outside this crate. A [`ContactSubmitter`]
//! starts a request and the caller reports the result back through
//! [`ContactForm::resolve`] once it arrives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Form fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

/// Field-level validation errors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{:?}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// A contact request as sent over the wire
///
/// Missing fields deserialize as empty so they surface as field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Check that every field is filled in and the email looks like an address
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required");
        }
        if self.email.trim().is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if !is_plausible_email(&self.email) {
            errors.insert(Field::Email, "Invalid email address");
        }
        if self.message.trim().is_empty() {
            errors.insert(Field::Message, "Message is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A contact message accepted by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: Uuid,
    #[serde(flatten)]
    pub message: ContactMessage,
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    pub fn new(message: ContactMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
            created_at: Utc::now(),
        }
    }
}

/// Syntactic plausibility check: `local@domain.tld`, no whitespace
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Starts delivery of a contact message
pub trait ContactSubmitter {
    fn submit(&mut self, message: ContactMessage);
}

/// Result reported by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,
    Sent,
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A submission is already in flight")]
    InFlight,
    #[error("Invalid form: {0}")]
    Invalid(FieldErrors),
}

/// Contact form state for one form instance
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub errors: FieldErrors,
    status: SubmitStatus,
    /// Seconds the current failure notice has been shown
    notice_age: f32,
}

impl ContactForm {
    /// How long a transport failure stays on screen
    pub const FAILURE_NOTICE_SECS: f32 = 6.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmitStatus::Pending
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            "Encrypting..."
        } else {
            "Transmit Data"
        }
    }

    fn to_message(&self) -> ContactMessage {
        ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.clone(),
        }
    }

    /// Validate and hand the message to `submitter`.
    ///
    /// Nothing is sent while a previous submission is pending or when
    /// validation fails.
    pub fn transmit<S: ContactSubmitter + ?Sized>(
        &mut self,
        submitter: &mut S,
    ) -> Result<(), SubmitError> {
        if self.is_pending() {
            debug!("Contact submission ignored, one already in flight");
            return Err(SubmitError::InFlight);
        }

        let message = self.to_message();
        if let Err(errors) = message.validate() {
            self.errors = errors.clone();
            return Err(SubmitError::Invalid(errors));
        }

        self.errors.clear();
        self.status = SubmitStatus::Pending;
        info!(email = %message.email, "Transmitting contact message");
        submitter.submit(message);
        Ok(())
    }

    /// Apply the transport's result to the pending submission
    pub fn resolve(&mut self, outcome: SubmitOutcome) {
        if !self.is_pending() {
            warn!(?outcome, "Contact result arrived with nothing pending");
            return;
        }

        match outcome {
            SubmitOutcome::Sent => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.status = SubmitStatus::Sent;
            }
            SubmitOutcome::Failed(reason) => {
                warn!(%reason, "Contact submission failed");
                self.status = SubmitStatus::Failed(reason);
                self.notice_age = 0.0;
            }
        }
    }

    /// A field was edited; any failure notice is dismissed
    pub fn edited(&mut self) {
        if matches!(self.status, SubmitStatus::Failed(_)) {
            self.status = SubmitStatus::Idle;
        }
    }

    /// Advance the failure notice clock, dismissing it once it has been
    /// shown for `FAILURE_NOTICE_SECS`
    pub fn tick(&mut self, dt_secs: f32) {
        if !matches!(self.status, SubmitStatus::Failed(_)) {
            return;
        }
        self.notice_age += dt_secs;
        if self.notice_age >= Self::FAILURE_NOTICE_SECS {
            debug!("Contact failure notice expired");
            self.status = SubmitStatus::Idle;
        }
    }
}
