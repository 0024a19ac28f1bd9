use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::TaskBackend;
use super::types::{
    ApiDetail, ApiMessage, GithubToken, GoogleToken, LoginResponse, RegisterRequest, TaskPayload,
    TaskRecord, UserProfile, UserUpdate,
};
use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::flow::{ParamScope, ParamSpec};
use crate::session::Session;

/// Client for the automation backend over HTTP.
///
/// Every request carries the session's bearer token when one is set.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
    session: Arc<Session>,
}

impl HttpBackend {
    pub fn new(config: BackendConfig, session: Arc<Session>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            config,
            client,
            session,
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn map_http_error(error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Unreachable(format!("Request timeout: {}", error))
        } else if error.is_connect() {
            ApiError::Unreachable(format!("Connection error: {}", error))
        } else {
            ApiError::Unreachable(error.to_string())
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(Self::map_http_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = Self::read_body(response).await;
        let detail = serde_json::from_str::<ApiDetail>(&body)
            .ok()
            .and_then(ApiDetail::into_text)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        warn!(status = status.as_u16(), %detail, "backend rejected request");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    /// The response body as text. An unreadable body counts as empty.
    async fn read_body(response: Response) -> String {
        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read response body");
                String::new()
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");
        self.fetch(self.client.get(&url)).await
    }

    /// `POST /auth/login`. Stores the returned bearer token in the session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.config.endpoint("auth/login");
        let form = [
            ("username", email),
            ("password", password),
            ("grant_type", "password"),
        ];
        let response: LoginResponse = self.fetch(self.client.post(&url).form(&form)).await?;
        self.session.set_token(response.access_token.clone());
        debug!("logged in");
        Ok(response)
    }

    /// `POST /auth/register`
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let url = self.config.endpoint("auth/register");
        self.send(self.client.post(&url).json(request)).await?;
        Ok(())
    }

    /// Forgets the bearer token and the cached profile.
    pub fn logout(&self) {
        self.session.clear_token();
    }

    /// `GET /users/me`. Caches the profile in the session.
    ///
    /// A rejected token is cleared from the session, the same way an expired
    /// login is dropped.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        if !self.session.is_authenticated() {
            return Err(ApiError::NotAuthenticated);
        }
        match self.get::<UserProfile>("users/me").await {
            Ok(profile) => {
                self.session.set_profile(profile.clone());
                Ok(profile)
            }
            Err(ApiError::Rejected { status, detail }) => {
                self.session.clear_token();
                Err(ApiError::Rejected { status, detail })
            }
            Err(e) => Err(e),
        }
    }

    /// `PATCH /users/{id}`. Refreshes the cached profile when it is the signed-in user.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, user_id: u64, update: &UserUpdate) -> Result<(), ApiError> {
        let url = self.config.endpoint(&format!("users/{}", user_id));
        self.send(self.client.patch(&url).json(update)).await?;

        if let Some(mut profile) = self.session.profile().filter(|p| p.id == user_id) {
            update.apply_to(&mut profile);
            self.session.set_profile(profile);
        }
        Ok(())
    }

    /// `GET /users`
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.get("users").await
    }

    /// `DELETE /users/{id}`. Deleting the signed-in user signs out.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: u64) -> Result<(), ApiError> {
        let url = self.config.endpoint(&format!("users/{}", user_id));
        self.send(self.client.delete(&url)).await?;

        if self.session.profile().is_some_and(|p| p.id == user_id) {
            debug!("deleted the signed-in user");
            self.session.clear_token();
        }
        Ok(())
    }

    /// `GET /auth/github/token/{id}`
    #[instrument(skip(self))]
    pub async fn github_token(&self, user_id: u64) -> Result<GithubToken, ApiError> {
        self.get(&format!("auth/github/token/{}", user_id)).await
    }

    /// `GET /auth/google/token/{id}`
    #[instrument(skip(self))]
    pub async fn google_token(&self, user_id: u64) -> Result<GoogleToken, ApiError> {
        self.get(&format!("auth/google/token/{}", user_id)).await
    }
}

#[async_trait]
impl TaskBackend for HttpBackend {
    #[instrument(skip(self, payload), fields(trigger = %payload.trigger, action = %payload.action_name))]
    async fn create_task(&self, payload: &TaskPayload) -> Result<ApiMessage, ApiError> {
        let url = self.config.endpoint("tasks");
        debug!(%url, "creating task");
        self.fetch(self.client.post(&url).json(payload)).await
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, task_id: u64) -> Result<ApiMessage, ApiError> {
        let url = self.config.endpoint(&format!("tasks/{}", task_id));
        let body = Self::read_body(self.send(self.client.delete(&url)).await?).await;
        // The backend may answer a deletion with an empty body.
        Ok(serde_json::from_str::<ApiMessage>(&body).unwrap_or_else(|_| ApiMessage {
            message: "Task deleted successfully".to_string(),
        }))
    }

    #[instrument(skip(self))]
    async fn get_task(&self, task_id: u64) -> Result<TaskRecord, ApiError> {
        self.get(&format!("tasks/{}", task_id)).await
    }

    #[instrument(skip(self))]
    async fn user_tasks(&self, user_id: u64) -> Result<Vec<TaskRecord>, ApiError> {
        self.get(&format!("tasks/user/{}", user_id)).await
    }

    #[instrument(skip(self))]
    async fn params_schema(
        &self,
        scope: ParamScope,
        identifier: &str,
    ) -> Result<Vec<ParamSpec>, ApiError> {
        self.get(&format!("tasks/params/{}/{}", scope.as_str(), identifier))
            .await
    }

    async fn services(&self) -> Result<Vec<String>, ApiError> {
        self.get("tasks/services").await
    }

    async fn services_with(&self, scope: ParamScope) -> Result<Vec<String>, ApiError> {
        self.get(&format!("tasks/services/{}", scope.plural())).await
    }

    async fn events(&self, service: &str) -> Result<Vec<String>, ApiError> {
        self.get(&format!("tasks/events/{}", service)).await
    }

    async fn reactions(&self, service: &str) -> Result<Vec<String>, ApiError> {
        self.get(&format!("tasks/reactions/{}", service)).await
    }
}
