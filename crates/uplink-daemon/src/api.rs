//! REST API handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use uplink_core::{content_for, ContactMessage, Field, FieldErrors, Section, StoredMessage};

use crate::config::ContactConfig;
use crate::state::AppState;

/// API error response
#[derive(Serialize)]
struct ApiError {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl ApiError {
    fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            fields: None,
        }
    }

    fn invalid(fields: FieldErrors) -> Self {
        Self {
            error: "Invalid contact message".to_string(),
            fields: Some(fields),
        }
    }
}

/// Daemon liveness and message count
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "messages": state.store.len().await,
    }))
}

/// Catalogue entry for one section
#[derive(Serialize)]
struct SectionInfo {
    id: Section,
    label: &'static str,
    heading: &'static str,
}

/// List the menu sections in display order
pub async fn list_sections() -> impl IntoResponse {
    let sections: Vec<SectionInfo> = Section::ALL
        .iter()
        .map(|&id| SectionInfo {
            id,
            label: id.default_label(),
            heading: content_for(Some(id)).map(|pane| pane.heading()).unwrap_or_default(),
        })
        .collect();
    Json(sections)
}

/// List received contact messages, oldest first
pub async fn list_messages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list().await)
}

fn check_len(errors: &mut FieldErrors, field: Field, value: &str, max_len: usize) {
    if errors.get(field).is_none() && value.chars().count() > max_len {
        let label = match field {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        };
        errors.insert(
            field,
            format!("{} is too long (max {} characters)", label, max_len),
        );
    }
}

/// Trim the single-line fields and apply the server-side limits
fn check_message(
    mut message: ContactMessage,
    limits: &ContactConfig,
) -> Result<ContactMessage, FieldErrors> {
    message.name = message.name.trim().to_string();
    message.email = message.email.trim().to_string();

    let mut errors = match message.validate() {
        Ok(()) => FieldErrors::default(),
        Err(errors) => errors,
    };
    check_len(&mut errors, Field::Name, &message.name, limits.max_name_len);
    check_len(&mut errors, Field::Email, &message.email, limits.max_email_len);
    check_len(&mut errors, Field::Message, &message.message, limits.max_message_len);

    if errors.is_empty() {
        Ok(message)
    } else {
        Err(errors)
    }
}

/// Accept a contact message
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> impl IntoResponse {
    let Json(message) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected contact payload");
            return (rejection.status(), Json(ApiError::new(rejection.body_text()))).into_response();
        }
    };

    let message = match check_message(message, &state.config.contact) {
        Ok(message) => message,
        Err(fields) => {
            debug!(%fields, "Contact message failed validation");
            return (StatusCode::BAD_REQUEST, Json(ApiError::invalid(fields))).into_response();
        }
    };

    match state.store.append(StoredMessage::new(message)).await {
        Ok(stored) => {
            info!(id = %stored.id, email = %stored.message.email, "Contact message received");
            (StatusCode::CREATED, Json(stored)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to store contact message");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Failed to store message")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(message: &str) -> ContactMessage {
        ContactMessage {
            name: "  Trinity ".to_string(),
            email: " trinity@zion.net".to_string(),
            message: message.to_string(),
        }
    }

    fn limits(max_message_len: usize) -> ContactConfig {
        ContactConfig {
            max_message_len,
            ..ContactConfig::default()
        }
    }

    #[test]
    fn test_check_message_trims_single_line_fields() {
        let checked = check_message(message("Follow the white rabbit"), &limits(100)).unwrap();
        assert_eq!(checked.name, "Trinity");
        assert_eq!(checked.email, "trinity@zion.net");
    }

    #[test]
    fn test_check_message_enforces_length() {
        let errors = check_message(message(&"x".repeat(11)), &limits(10)).unwrap_err();
        assert_eq!(
            errors.get(Field::Message),
            Some("Message is too long (max 10 characters)")
        );
        assert!(check_message(message(&"x".repeat(10)), &limits(10)).is_ok());
    }

    #[test]
    fn test_check_message_limits_name_and_email() {
        let config = ContactConfig {
            max_name_len: 7,
            max_email_len: 12,
            ..ContactConfig::default()
        };

        // Limits apply after trimming
        assert!(check_message(message("Hi"), &config).is_err());
        let mut fits = message("Hi");
        fits.email = "trin@zion.io".to_string();
        assert!(check_message(fits, &config).is_ok());

        let mut long = message("Hi");
        long.name = "Trinity of Zion".to_string();
        long.email = "trinity@zion.net.example".to_string();
        let errors = check_message(long, &config).unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Name is too long (max 7 characters)"));
        assert_eq!(
            errors.get(Field::Email),
            Some("Email is too long (max 12 characters)")
        );
        assert!(errors.get(Field::Message).is_none());
    }

    #[test]
    fn test_check_message_keeps_required_error() {
        let errors = check_message(message("   "), &limits(1)).unwrap_err();
        assert_eq!(errors.get(Field::Message), Some("Message is required"));
    }
}
