//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::entity::account::PublicAccountView;
use crate::domain::validation::RegistrationRequest;

// ============================================================================
// Register
// ============================================================================

/// Register request
///
/// Fields are kept as raw JSON so presence and type are judged by the
/// validator. Unknown keys are ignored.
#[derive(Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "present")]
    pub fullname: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub password: Option<Value>,
}

/// A key that appears in the body is `Some`, even when its value is `null`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(req: RegisterRequest) -> Self {
        Self {
            fullname: req.fullname,
            username: req.username,
            password: req.password,
        }
    }
}

/// Account response
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub fullname: Option<String>,
}

impl From<PublicAccountView> for AccountResponse {
    fn from(view: PublicAccountView) -> Self {
        Self {
            id: view.id.to_string(),
            username: view.username,
            fullname: view.fullname,
        }
    }
}
