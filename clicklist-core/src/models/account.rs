//! Account types: authenticate request and response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::store::StoreInformation;

// ============================================================================
// Authenticate Request
// ============================================================================

/// Body of the authenticate call.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticateRequest {
    /// Account credentials.
    pub account: Credentials,
    /// Post-login location; always empty for API logins.
    pub location: String,
}

impl AuthenticateRequest {
    /// Builds the request for an email/password pair. `rememberMe` is always set.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: Credentials {
                email: email.into(),
                password: password.into(),
                remember_me: true,
            },
            location: String::new(),
        }
    }
}

/// Email/password pair.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Keep the session alive across browser restarts.
    pub remember_me: bool,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

// ============================================================================
// Authenticate Response
// ============================================================================

/// Response from the authenticate call.
///
/// A failed login is still HTTP 200; `has_errors` is the only signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    /// Set by the server when the credentials were rejected.
    #[serde(default)]
    pub has_errors: bool,
    /// Store the account shops at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreEnvelope>,
    /// Signed-in user's profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
    /// Fields not modelled above (error lists, flags, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthenticateResponse {
    /// The store information, if the response carried one.
    pub fn store_information(&self) -> Option<&StoreInformation> {
        self.store.as_ref()?.store_information.as_ref()
    }

    /// Collects the server's error messages into one line.
    ///
    /// Understands `errors: ["..."]`, `errors: [{"message": "..."}]` and a
    /// top-level `message`/`errorMessage` string.
    pub fn error_message(&self) -> Option<String> {
        let mut messages: Vec<String> = Vec::new();

        if let Some(Value::Array(errors)) = self.extra.get("errors") {
            for error in errors {
                match error {
                    Value::String(s) => messages.push(s.clone()),
                    Value::Object(obj) => {
                        if let Some(msg) = obj.get("message").and_then(Value::as_str) {
                            messages.push(msg.to_string());
                        }
                    }
                    _ => {}
                }
            }
        }

        for key in ["message", "errorMessage"] {
            if let Some(msg) = self.extra.get(key).and_then(Value::as_str) {
                messages.push(msg.to_string());
            }
        }

        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}

/// Wrapper around the store record (`store.storeInformation`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEnvelope {
    /// Store identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_information: Option<StoreInformation>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Signed-in user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account email.
    #[serde(default)]
    pub email_address: String,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Tests
// ============================================================================
