//! Wire types exchanged with the automation backend.
use serde::{Deserialize, Serialize};

/// Body of `POST /tasks`.
///
/// `trigger_args` and `action_params` are positional: the backend maps them
/// onto its parameter schema by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub trigger: String,
    pub trigger_args: Vec<String>,
    pub action_name: String,
    pub action_params: Vec<String>,
    pub params: TaskParams,
    pub user_id: u64,
}

/// Task-level extras that are not part of the trigger's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParams {
    pub oauth_token: Option<String>,
    pub service: String,
}

/// A stored task as returned by `GET /tasks/{id}` and `GET /tasks/user/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u64,
    pub trigger: String,
    #[serde(default)]
    pub trigger_args: Option<Vec<String>>,
    pub action_name: String,
    #[serde(default)]
    pub action_params: Option<Vec<String>>,
    pub user_id: u64,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub requires_oauth: bool,
    #[serde(default)]
    pub oauth_token: Option<String>,
    #[serde(default)]
    pub event_hash: Option<String>,
}

/// Success body of most mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Error body of a rejected request. Validation failures carry a list
/// instead of a string, so the detail is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiDetail {
    #[serde(default)]
    pub detail: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiDetail {
    pub(crate) fn into_text(self) -> Option<String> {
        match self.detail {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => self.message,
            other => Some(other.to_string()),
        }
    }
}

/// A billing plan. Only the free plan is metered.
///
/// Accounts created before plans existed carry `null`, which reads as free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Plan {
    #[default]
    Free,
    Paid(String),
}

impl Plan {
    pub fn is_metered(&self) -> bool {
        matches!(self, Plan::Free)
    }

    pub fn name(&self) -> &str {
        match self {
            Plan::Free => "free",
            Plan::Paid(name) => name,
        }
    }
}

impl From<String> for Plan {
    fn from(value: String) -> Self {
        if value == "free" {
            Plan::Free
        } else {
            Plan::Paid(value)
        }
    }
}

impl From<Option<String>> for Plan {
    fn from(value: Option<String>) -> Self {
        value.map(Plan::from).unwrap_or_default()
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        plan.name().to_string()
    }
}

/// The signed-in user, as returned by `GET /users/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub token: Option<UserTokens>,
}

/// OAuth credentials the backend holds for the user's connected services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTokens {
    #[serde(default)]
    pub github_token: Option<GithubToken>,
    #[serde(default)]
    pub google_token: Option<GoogleToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubToken {
    #[serde(default)]
    pub hashed_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleToken {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Body of `PATCH /users/{id}`: the fields of the profile form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
}

impl UserUpdate {
    pub fn apply_to(&self, profile: &mut UserProfile) {
        profile.first_name = self.first_name.clone();
        profile.last_name = self.last_name.clone();
        profile.email = self.email.clone();
        profile.phone_number = self.phone_number.clone();
    }
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}
