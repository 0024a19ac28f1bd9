//! Access to the automation backend.
//!
//! [`TaskBackend`] is the seam the editor and the submitter talk through;
//! [`HttpBackend`] is its HTTP implementation.

pub mod client;
pub mod types;

pub use client::HttpBackend;
pub use types::*;

use crate::error::ApiError;
use crate::flow::{ParamScope, ParamSpec};
use async_trait::async_trait;
use itertools::Itertools;

/// Services whose reactions are offered alongside any service's own reactions.
pub const SHARED_REACTION_SERVICES: &[&str] = &["common", "reddit", "crypto"];

/// The task and catalog endpoints of the backend.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// `POST /tasks`
    async fn create_task(&self, payload: &TaskPayload) -> Result<ApiMessage, ApiError>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, task_id: u64) -> Result<ApiMessage, ApiError>;

    /// `GET /tasks/{id}`
    async fn get_task(&self, task_id: u64) -> Result<TaskRecord, ApiError>;

    /// `GET /tasks/user/{user_id}`
    async fn user_tasks(&self, user_id: u64) -> Result<Vec<TaskRecord>, ApiError>;

    /// `GET /tasks/params/{event|reaction}/{identifier}`
    async fn params_schema(
        &self,
        scope: ParamScope,
        identifier: &str,
    ) -> Result<Vec<ParamSpec>, ApiError>;

    /// `GET /tasks/services`
    async fn services(&self) -> Result<Vec<String>, ApiError>;

    /// `GET /tasks/services/{events|reactions}`
    async fn services_with(&self, scope: ParamScope) -> Result<Vec<String>, ApiError>;

    /// `GET /tasks/events/{service}`
    async fn events(&self, service: &str) -> Result<Vec<String>, ApiError>;

    /// `GET /tasks/reactions/{service}`
    async fn reactions(&self, service: &str) -> Result<Vec<String>, ApiError>;

    /// Every reaction a task triggered by `service` can use: the service's own
    /// reactions followed by the shared ones, without duplicates.
    async fn reaction_catalog(&self, service: &str) -> Result<Vec<String>, ApiError> {
        let mut all = self.reactions(service).await?;
        for shared in SHARED_REACTION_SERVICES {
            if *shared != service {
                all.extend(self.reactions(shared).await?);
            }
        }
        Ok(all.into_iter().unique().collect())
    }
}
