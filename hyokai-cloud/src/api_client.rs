//! HTTP implementation of the remote account store.
//!
//! Handles JWT authentication, single-flight token refresh on 401, and
//! the per-category upsert endpoints. Uses reqwest with JSON
//! serialization.

use crate::config::CloudConfig;
use crate::error::{CloudError, CloudResult};
use crate::remote::RemoteStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hyokai_types::{HistoryEntry, Preferences, RepoCacheEntry, SavedContext, SimpleHistoryEntry};
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// State shared across client clones.
struct AuthState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user_id: Option<String>,
    /// Monotonically increasing counter bumped on every successful
    /// refresh. Used to detect when a concurrent refresh has already
    /// updated tokens.
    refresh_generation: u64,
}

/// Auth token pair returned to callers for persistence.
#[derive(Clone, Debug)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub email: String,
}

/// JSON API client for the Hyokai account store.
#[derive(Clone)]
pub struct HttpRemoteStore {
    client: Client,
    config: CloudConfig,
    auth: Arc<RwLock<AuthState>>,
    /// Serializes refresh operations to prevent rotation race conditions.
    /// Without this, concurrent 401s all read the same old refresh token;
    /// the server rotates on the first call, and subsequent calls fail.
    refresh_lock: Arc<tokio::sync::Mutex<()>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: String,
}

#[derive(Deserialize)]
struct AccountRecord {
    migrated_at: Option<DateTime<Utc>>,
}

impl HttpRemoteStore {
    pub fn new(config: CloudConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            config,
            auth: Arc::new(RwLock::new(AuthState {
                access_token: None,
                refresh_token: None,
                user_id: None,
                refresh_generation: 0,
            })),
            refresh_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Sets auth tokens directly (for restoring a saved session).
    pub async fn set_tokens(&self, access_token: String, refresh_token: String, user_id: String) {
        let mut auth = self.auth.write().await;
        auth.access_token = Some(access_token);
        auth.refresh_token = Some(refresh_token);
        auth.user_id = Some(user_id);
    }

    pub async fn is_authenticated(&self) -> bool {
        self.auth.read().await.access_token.is_some()
    }

    pub async fn user_id(&self) -> Option<String> {
        self.auth.read().await.user_id.clone()
    }

    pub async fn logout(&self) {
        let mut auth = self.auth.write().await;
        auth.access_token = None;
        auth.refresh_token = None;
        auth.user_id = None;
    }

    // ── Auth ──

    pub async fn authenticate(&self, email: &str, password: &str) -> CloudResult<AuthTokens> {
        let url = format!("{}/api/auth/login", self.config.api_base_url);
        let resp: TokenResponse = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| CloudError::AuthFailed(e.to_string()))?
            .json()
            .await?;

        let tokens = AuthTokens {
            access_token: resp.access_token.clone(),
            refresh_token: resp.refresh_token.clone(),
            user_id: resp.user.id.clone(),
            email: resp.user.email,
        };

        self.set_tokens(resp.access_token, resp.refresh_token, resp.user.id)
            .await;
        Ok(tokens)
    }

    pub async fn refresh_access_token(&self) -> CloudResult<String> {
        // Capture the generation before acquiring the lock so we can
        // detect if a concurrent refresh already completed.
        let pre_gen = self.auth.read().await.refresh_generation;

        // Serialize all refresh operations — only one HTTP refresh at a time.
        let _guard = self.refresh_lock.lock().await;

        // Double-check: if the generation advanced while we waited,
        // a concurrent refresh already succeeded. Use its token.
        {
            let auth = self.auth.read().await;
            if auth.refresh_generation > pre_gen {
                return auth.access_token.clone().ok_or(CloudError::AuthRequired);
            }
        }

        let refresh_token = {
            let auth = self.auth.read().await;
            auth.refresh_token.clone().ok_or(CloudError::AuthRequired)?
        };

        let url = format!("{}/api/auth/refresh", self.config.api_base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CloudError::AuthFailed(format!(
                "refresh rejected: {}",
                resp.status()
            )));
        }

        let resp: TokenResponse = resp.json().await?;
        let mut auth = self.auth.write().await;
        auth.access_token = Some(resp.access_token.clone());
        auth.refresh_token = Some(resp.refresh_token);
        auth.user_id = Some(resp.user.id);
        auth.refresh_generation += 1;
        debug!("access token refreshed (generation {})", auth.refresh_generation);

        Ok(resp.access_token)
    }

    // ── Request plumbing ──

    async fn bearer(&self) -> CloudResult<String> {
        self.auth
            .read()
            .await
            .access_token
            .clone()
            .ok_or(CloudError::AuthRequired)
    }

    /// Sends an authenticated request, refreshing the access token and
    /// retrying once if the server answers 401.
    async fn send_authed<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> CloudResult<reqwest::Response> {
        let url = format!("{}{path}", self.config.api_base_url);

        let token = self.bearer().await?;
        let mut req = self.client.request(method.clone(), &url).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            let token = self.refresh_access_token().await?;
            let mut retry = self.client.request(method, &url).bearer_auth(token);
            if let Some(body) = body {
                retry = retry.json(body);
            }
            return Self::check(retry.send().await?).await;
        }

        Self::check(resp).await
    }

    async fn check(resp: reqwest::Response) -> CloudResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let code = status.as_u16();
        let message = resp.text().await.unwrap_or_default();
        Err(match code {
            401 => CloudError::AuthRequired,
            404 => CloudError::NotFound(message),
            _ => CloudError::Status { code, message },
        })
    }

    async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> CloudResult<()> {
        self.send_authed(Method::PUT, path, Some(body)).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn upsert_preferences(&self, prefs: &Preferences) -> CloudResult<()> {
        self.put("/api/user/preferences", prefs).await
    }

    async fn upsert_saved_contexts(&self, contexts: &[SavedContext]) -> CloudResult<()> {
        self.put("/api/user/contexts", contexts).await
    }

    async fn upsert_history(&self, entries: &[HistoryEntry]) -> CloudResult<()> {
        self.put("/api/user/history", entries).await
    }

    async fn upsert_simple_history(&self, entries: &[SimpleHistoryEntry]) -> CloudResult<()> {
        self.put("/api/user/simple-history", entries).await
    }

    async fn upsert_credential(&self, token: &str) -> CloudResult<()> {
        self.put("/api/user/credential", &serde_json::json!({ "token": token }))
            .await
    }

    async fn upsert_repo_cache(&self, repos: &[RepoCacheEntry]) -> CloudResult<()> {
        self.put("/api/user/repos", repos).await
    }

    async fn migrated_at(&self) -> CloudResult<Option<DateTime<Utc>>> {
        let resp = self
            .send_authed::<()>(Method::GET, "/api/user/account", None)
            .await?;
        let record: AccountRecord = resp.json().await?;
        Ok(record.migrated_at)
    }

    async fn mark_migrated(&self) -> CloudResult<DateTime<Utc>> {
        let resp = self
            .send_authed::<()>(Method::POST, "/api/user/account/migrated", None)
            .await?;
        let record: AccountRecord = resp.json().await?;
        record
            .migrated_at
            .ok_or_else(|| CloudError::Api("account record missing migrated_at".to_string()))
    }
}
