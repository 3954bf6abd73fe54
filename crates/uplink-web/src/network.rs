//! Network client for the contact endpoint

use bevy::prelude::*;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use uplink_core::{ContactMessage, ContactSubmitter, SubmitOutcome};
use uplink_scene::ContactFormState;

pub struct NetworkPlugin;

/// Where the contact endpoint lives
#[derive(Resource, Clone, Default)]
pub struct DaemonConfig {
    /// Base URL without a trailing slash, e.g. `https://uplink.example`
    pub http_url: String,
}

impl DaemonConfig {
    /// `?daemon=` when given, otherwise the page's own origin
    #[cfg(target_arch = "wasm32")]
    pub fn from_browser() -> Self {
        if let Some(daemon_param) = browser_query_param("daemon") {
            tracing::info!("Using daemon from URL parameter: {}", daemon_param);
            return Self::from_daemon_address(&daemon_param);
        }

        let Some(location) = web_sys::window().map(|window| window.location()) else {
            return Self::default();
        };
        let host = location.host().unwrap_or_else(|_| "localhost:8080".to_string());
        let is_https = location.protocol().unwrap_or_default() == "https:";

        Self {
            http_url: format!("{}://{}", if is_https { "https" } else { "http" }, host),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_browser() -> Self {
        Self::default()
    }

    /// Accepts `host:port` or a full `http(s)://` URL
    pub fn from_daemon_address(addr: &str) -> Self {
        let addr = addr.trim_end_matches('/');
        let http_url = if addr.starts_with("https://") || addr.starts_with("http://") {
            addr.to_string()
        } else {
            format!("http://{}", addr)
        };

        Self { http_url }
    }

    pub fn contact_url(&self) -> String {
        format!("{}/api/contact", self.http_url)
    }
}

/// Value of `param` in a `?a=b&c=d` search string; empty values count as absent
fn parse_query_param(search: &str, param: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == param && !value.is_empty())
        .map(|(_, value)| value.replace("%3A", ":").replace("%2F", "/"))
}

/// Read a query parameter from the page URL
#[cfg(target_arch = "wasm32")]
pub fn browser_query_param(param: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let value = parse_query_param(&search, param)?;
    // Decode anything the %3A/%2F shortcut left encoded
    Some(
        js_sys::decode_uri_component(&value)
            .ok()
            .and_then(|decoded| decoded.as_string())
            .unwrap_or(value),
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn browser_query_param(_param: &str) -> Option<String> {
    None
}

/// Contact results delivered by async requests, drained every frame
#[derive(Resource, Default, Clone)]
pub struct PendingContactResults(pub Arc<Mutex<Vec<SubmitOutcome>>>);

/// Error body returned by the daemon
#[derive(Debug, Deserialize)]
struct ErrorJson {
    error: String,
}

/// Map an HTTP response to a submission outcome
fn outcome_for(status: u16, body: &str) -> SubmitOutcome {
    if (200..300).contains(&status) {
        return SubmitOutcome::Sent;
    }
    let reason = serde_json::from_str::<ErrorJson>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("Server responded with status {}", status));
    SubmitOutcome::Failed(reason)
}

/// Submits contact messages to the daemon over HTTP
pub struct HttpSubmitter {
    url: String,
    pending: Arc<Mutex<Vec<SubmitOutcome>>>,
}

impl HttpSubmitter {
    pub fn new(config: &DaemonConfig, pending: &PendingContactResults) -> Self {
        Self {
            url: config.contact_url(),
            pending: pending.0.clone(),
        }
    }
}

impl ContactSubmitter for HttpSubmitter {
    #[cfg(target_arch = "wasm32")]
    fn submit(&mut self, message: ContactMessage) {
        use wasm_bindgen_futures::spawn_local;

        let url = self.url.clone();
        let pending = self.pending.clone();

        spawn_local(async move {
            let outcome = match gloo_net::http::Request::post(&url).json(&message) {
                Ok(request) => match request.send().await {
                    Ok(response) => {
                        let status = response.status();
                        let body = response.text().await.unwrap_or_default();
                        outcome_for(status, &body)
                    }
                    Err(e) => {
                        tracing::error!("Failed to send contact message: {:?}", e);
                        SubmitOutcome::Failed("Uplink unreachable".to_string())
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to encode contact message: {:?}", e);
                    SubmitOutcome::Failed("Could not encode message".to_string())
                }
            };

            if let Ok(mut results) = pending.lock() {
                results.push(outcome);
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn submit(&mut self, message: ContactMessage) {
        tracing::warn!(url = %self.url, email = %message.email, "No browser transport available");
        if let Ok(mut results) = self.pending.lock() {
            results.push(SubmitOutcome::Failed("Uplink unreachable".to_string()));
        }
    }
}

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        let daemon_config = DaemonConfig::from_browser();

        app.insert_resource(daemon_config)
            .init_resource::<PendingContactResults>()
            .add_systems(Update, process_contact_results);
    }
}

/// Apply finished submissions to the form
fn process_contact_results(pending: Res<PendingContactResults>, mut form: ResMut<ContactFormState>) {
    if let Ok(mut results) = pending.0.lock() {
        for outcome in results.drain(..) {
            form.0.resolve(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uplink_core::{ContactForm, SubmitStatus};

    #[test]
    fn test_parse_query_param() {
        assert_eq!(
            parse_query_param("?theme=terminal_grid&daemon=10.0.0.2%3A8080", "daemon"),
            Some("10.0.0.2:8080".to_string())
        );
        assert_eq!(parse_query_param("?theme=", "theme"), None);
        assert_eq!(parse_query_param("", "theme"), None);
    }

    #[test]
    fn test_from_daemon_address() {
        assert_eq!(
            DaemonConfig::from_daemon_address("192.168.1.100:8080").contact_url(),
            "http://192.168.1.100:8080/api/contact"
        );
        assert_eq!(
            DaemonConfig::from_daemon_address("https://uplink.example/").http_url,
            "https://uplink.example"
        );
    }

    #[test]
    fn test_outcome_for_status() {
        assert_eq!(outcome_for(201, "{}"), SubmitOutcome::Sent);
        assert_eq!(
            outcome_for(400, r#"{"error":"Invalid contact message","fields":{}}"#),
            SubmitOutcome::Failed("Invalid contact message".to_string())
        );
        assert_eq!(
            outcome_for(502, "bad gateway"),
            SubmitOutcome::Failed("Server responded with status 502".to_string())
        );
    }

    #[test]
    fn test_native_submit_resolves_failed() {
        let pending = PendingContactResults::default();
        let mut submitter = HttpSubmitter::new(&DaemonConfig::from_daemon_address("localhost:8080"), &pending);
        let mut form = ContactForm::new();
        form.name = "Neo".to_string();
        form.email = "neo@zion.net".to_string();
        form.message = "Wake up".to_string();

        assert!(form.transmit(&mut submitter).is_ok());
        assert!(form.is_pending());

        let mut app = App::new();
        app.insert_resource(pending.clone())
            .insert_resource(ContactFormState(form))
            .add_systems(Update, process_contact_results);
        app.update();

        let form = &app.world().resource::<ContactFormState>().0;
        assert!(matches!(form.status(), SubmitStatus::Failed(_)));
        assert_eq!(form.name, "Neo");
    }
}
