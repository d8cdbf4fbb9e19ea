//! JSON-over-HTTP client for the notification API.
//!
//! One-shot user actions (send, mark read, template CRUD) are never retried
//! here; the only automatic retry in the client is the poll loop.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use domain::models::{
    Category, CreateTemplateRequest, Notification, NotificationPreference, NotificationQuery,
    NotificationStats, NotificationTemplate, SendNotificationRequest, SendTemplateRequest,
    UpdatePreferenceRequest, UpdateTemplateRequest,
};

use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::metrics::RequestTimer;
use crate::parse::{self, Parsed};
use crate::session::Session;

/// Client for the notification endpoints.
pub struct NotificationApi {
    client: Client,
    base_url: String,
    session: Arc<Session>,
}

#[derive(Debug, Serialize)]
struct MarkAllReadBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Category>,
}

impl NotificationApi {
    /// Create a new API client bound to a session.
    ///
    /// # Errors
    /// Returns an error if the base URL is not an absolute HTTP(S) URL or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig, session: Arc<Session>) -> Result<Self, ClientError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// List notifications for the signed-in user.
    pub async fn list(&self, query: &NotificationQuery) -> Result<Vec<Notification>, ClientError> {
        let builder = self.request(Method::GET, "/notifications").query(query);
        let raw = self.execute_value("list_notifications", builder).await?;
        match parse::parse_notification_list(raw) {
            Parsed::Ok(list) => Ok(list),
            Parsed::Malformed(raw) => Err(self.malformed("/notifications", raw)),
        }
    }

    /// Mark a single notification as read. Returns the updated record.
    pub async fn mark_read(&self, id: i64) -> Result<Notification, ClientError> {
        let path = format!("/notifications/{}/read", id);
        let builder = self.request(Method::PATCH, &path);
        self.execute_json("mark_read", builder).await
    }

    /// Mark every notification (optionally restricted to a category) as read.
    pub async fn mark_all_read(&self, category: Option<Category>) -> Result<(), ClientError> {
        let builder = self
            .request(Method::PATCH, "/notifications/mark-all-read")
            .json(&MarkAllReadBody { category });
        self.execute_unit("mark_all_read", builder).await
    }

    /// Aggregate delivery/read counts.
    pub async fn stats(&self) -> Result<NotificationStats, ClientError> {
        let builder = self.request(Method::GET, "/notifications/stats");
        self.execute_json("stats", builder).await
    }

    /// Send a custom notification.
    pub async fn send(
        &self,
        request: &SendNotificationRequest,
    ) -> Result<Notification, ClientError> {
        request.validate()?;
        let builder = self
            .request(Method::POST, "/notifications/send")
            .json(request);
        self.execute_json("send", builder).await
    }

    /// Send a notification rendered from a named template.
    pub async fn send_template(
        &self,
        request: &SendTemplateRequest,
    ) -> Result<Notification, ClientError> {
        request.validate()?;
        let builder = self
            .request(Method::POST, "/notifications/send-template")
            .json(request);
        self.execute_json("send_template", builder).await
    }

    /// All preference records for the signed-in user.
    pub async fn preferences(&self) -> Result<Vec<NotificationPreference>, ClientError> {
        let builder = self.request(Method::GET, "/notifications/preferences");
        let raw = self.execute_value("preferences", builder).await?;
        match parse::parse_preference_list(raw) {
            Parsed::Ok(list) => Ok(list),
            Parsed::Malformed(raw) => Err(self.malformed("/notifications/preferences", raw)),
        }
    }

    /// Upsert the preference record for a category.
    pub async fn update_preference(
        &self,
        request: &UpdatePreferenceRequest,
    ) -> Result<NotificationPreference, ClientError> {
        request.validate()?;
        let builder = self
            .request(Method::PUT, "/notifications/preferences")
            .json(request);
        self.execute_json("update_preference", builder).await
    }

    /// List all notification templates.
    pub async fn list_templates(&self) -> Result<Vec<NotificationTemplate>, ClientError> {
        let builder = self.request(Method::GET, "/notifications/templates");
        let raw = self.execute_value("list_templates", builder).await?;
        match parse::parse_template_list(raw) {
            Parsed::Ok(list) => Ok(list),
            Parsed::Malformed(raw) => Err(self.malformed("/notifications/templates", raw)),
        }
    }

    /// Create a template.
    pub async fn create_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> Result<NotificationTemplate, ClientError> {
        request.validate()?;
        let builder = self
            .request(Method::POST, "/notifications/templates")
            .json(request);
        self.execute_json("create_template", builder).await
    }

    /// Update a template.
    pub async fn update_template(
        &self,
        id: i64,
        request: &UpdateTemplateRequest,
    ) -> Result<NotificationTemplate, ClientError> {
        request.validate()?;
        let path = format!("/notifications/templates/{}", id);
        let builder = self.request(Method::PUT, &path).json(request);
        self.execute_json("update_template", builder).await
    }

    /// Delete a template (hard delete).
    pub async fn delete_template(&self, id: i64) -> Result<(), ClientError> {
        let path = format!("/notifications/templates/{}", id);
        let builder = self.request(Method::DELETE, &path);
        self.execute_unit("delete_template", builder).await
    }

    /// Server-side category registry (`{ key: label }`).
    pub async fn category_labels(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let builder = self.request(Method::GET, "/notifications/categories");
        self.execute_json("category_labels", builder).await
    }

    /// Server-side channel registry (`{ key: label }`).
    pub async fn channel_labels(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let builder = self.request(Method::GET, "/notifications/channels");
        self.execute_json("channel_labels", builder).await
    }

    /// Server-side priority registry (`{ key: label }`).
    pub async fn priority_labels(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let builder = self.request(Method::GET, "/notifications/priorities");
        self.execute_json("priority_labels", builder).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header("X-Request-Id", request_id.to_string());

        if let Some(token) = self.session.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn malformed(&self, endpoint: &'static str, raw: Value) -> ClientError {
        warn!(endpoint = endpoint, "Response did not match any known envelope");
        ClientError::Malformed { endpoint, raw }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let value = self.execute_value(operation, builder).await?;
        serde_json::from_value(value.clone()).map_err(|_| ClientError::Malformed {
            endpoint: operation,
            raw: value,
        })
    }

    async fn execute_unit(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<(), ClientError> {
        let timer = RequestTimer::new(operation);
        let result = builder.send().await;
        match result {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    timer.record(true);
                    debug!(operation = operation, status = status.as_u16(), "API call ok");
                    Ok(())
                } else {
                    timer.record(false);
                    Err(Self::api_error(status.as_u16(), response).await)
                }
            }
            Err(e) => {
                timer.record(false);
                Err(ClientError::Http(e))
            }
        }
    }

    async fn execute_value(
        &self,
        operation: &'static str,
        builder: RequestBuilder,
    ) -> Result<Value, ClientError> {
        let timer = RequestTimer::new(operation);
        let result = builder.send().await;
        match result {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    timer.record(false);
                    return Err(Self::api_error(status.as_u16(), response).await);
                }
                match response.json::<Value>().await {
                    Ok(value) => {
                        timer.record(true);
                        debug!(operation = operation, status = status.as_u16(), "API call ok");
                        Ok(value)
                    }
                    Err(e) => {
                        timer.record(false);
                        Err(ClientError::Http(e))
                    }
                }
            }
            Err(e) => {
                timer.record(false);
                Err(ClientError::Http(e))
            }
        }
    }

    /// Build an [`ClientError::Api`] from a non-2xx response, preferring the
    /// server's own message when the body carries one.
    async fn api_error(status: u16, response: reqwest::Response) -> ClientError {
        let fallback = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("request failed")
            .to_string();

        let message = match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| body.get("error").and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or(fallback),
            Err(_) => fallback,
        };

        warn!(status = status, message = %message, "API call failed");
        ClientError::Api { status, message }
    }
}
