//! Typed API client scoped to one platform instance.
//!
//! `GitlabClient` owns the HTTP connection pool, the API root URL and the
//! authentication token, and funnels every call through the retrying executor
//! and the validation layer. The endpoint helpers cover exactly the calls a
//! merge-request orchestrator drives; anything else can go through
//! [`GitlabClient::call_object`] / [`GitlabClient::call_collection`] directly.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::types::{Approvals, MergeRequest, MrIid, Pipeline, ProjectId, User};

use super::error::ApiError;
use super::executor::{send_with_retry, ExecutorConfig};
use super::request::ApiRequest;
use super::validate::{expect_collection, expect_object, into_json};

/// A client for one platform instance, authenticated with a private token.
#[derive(Clone)]
pub struct GitlabClient {
    http: reqwest::Client,

    /// API root, e.g. `https://gitlab.example.com/api/v4`.
    base_url: String,

    token: String,

    config: ExecutorConfig,
}

impl GitlabClient {
    /// Creates a client with the default executor configuration.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        GitlabClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
            config: ExecutorConfig::DEFAULT,
        }
    }

    /// Overrides the executor configuration (retry budget, backoff, timeout).
    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes a request and returns the decoded JSON body.
    ///
    /// Status validation has run; shape validation has not.
    pub async fn call(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        debug!(
            method = request.method().as_str(),
            path = request.path(),
            "api call"
        );
        let response =
            send_with_retry(&self.http, &self.base_url, &self.token, &self.config, request).await?;
        into_json(response).await
    }

    /// Executes a request whose endpoint returns a single object.
    pub async fn call_object<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, ApiError> {
        let map = expect_object(self.call(request).await?)?;
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Executes a request whose endpoint returns a collection.
    pub async fn call_collection<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        let items = expect_collection(self.call(request).await?)?;
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ApiError::from))
            .collect()
    }

    // ─── Queries ──────────────────────────────────────────────────────────────

    /// Fetches the user the token authenticates as.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.call_object(&ApiRequest::get("/user")).await
    }

    /// Fetches a single merge request.
    pub async fn merge_request(
        &self,
        project: ProjectId,
        iid: MrIid,
    ) -> Result<MergeRequest, ApiError> {
        let path = format!("/projects/{}/merge_requests/{}", project, iid.0);
        self.call_object(&ApiRequest::get(path)).await
    }

    /// Lists the open merge requests of a project.
    pub async fn open_merge_requests(
        &self,
        project: ProjectId,
    ) -> Result<Vec<MergeRequest>, ApiError> {
        let path = format!("/projects/{}/merge_requests", project);
        let request = ApiRequest::get(path).with_param("state", "opened");
        self.call_collection(&request).await
    }

    /// Lists the pipelines that ran against a merge request's head.
    pub async fn head_pipelines(
        &self,
        project: ProjectId,
        iid: MrIid,
    ) -> Result<Vec<Pipeline>, ApiError> {
        let path = format!("/projects/{}/merge_requests/{}/pipelines", project, iid.0);
        self.call_collection(&ApiRequest::get(path)).await
    }

    /// Fetches the approval state of a merge request.
    pub async fn approvals(&self, project: ProjectId, iid: MrIid) -> Result<Approvals, ApiError> {
        let path = format!("/projects/{}/merge_requests/{}/approvals", project, iid.0);
        self.call_object(&ApiRequest::get(path)).await
    }

    // ─── Mutations ────────────────────────────────────────────────────────────

    /// Accepts (merges) a merge request.
    ///
    /// The expected head SHA is passed so the server rejects the merge if the
    /// branch moved after the orchestrator evaluated it.
    pub async fn accept_merge_request(
        &self,
        project: ProjectId,
        iid: MrIid,
        expected_sha: &str,
        remove_source_branch: bool,
    ) -> Result<MergeRequest, ApiError> {
        let path = format!("/projects/{}/merge_requests/{}/merge", project, iid.0);
        let request = ApiRequest::put(path)
            .with_param("sha", expected_sha)
            .with_param("should_remove_source_branch", remove_source_branch);
        self.call_object(&request).await
    }

    /// Asks the server to rebase a merge request onto its target branch.
    ///
    /// The server answers with a progress marker, not the rebased MR; callers
    /// poll [`GitlabClient::merge_request`] to observe the result.
    pub async fn rebase_merge_request(
        &self,
        project: ProjectId,
        iid: MrIid,
    ) -> Result<(), ApiError> {
        let path = format!("/projects/{}/merge_requests/{}/rebase", project, iid.0);
        expect_object(self.call(&ApiRequest::put(path)).await?)?;
        Ok(())
    }

    /// Posts a comment on a merge request.
    pub async fn post_comment(
        &self,
        project: ProjectId,
        iid: MrIid,
        body: &str,
    ) -> Result<(), ApiError> {
        let path = format!("/projects/{}/merge_requests/{}/notes", project, iid.0);
        let request = ApiRequest::post(path).with_param("body", body);
        expect_object(self.call(&request).await?)?;
        Ok(())
    }
}

impl std::fmt::Debug for GitlabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitlabClient")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
