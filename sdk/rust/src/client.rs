//! Client for the Strange Errors Server.
//!
//! The server answers with deliberately wrong status codes, so no status is
//! treated as an error here: every call returns the raw status alongside the
//! decoded body and leaves interpretation to the caller.

use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

/// Default distinguished verb routed to the escalator.
pub const GOAT_METHOD: &str = "GOAT";

/// Default health-check path, shared by the GET check and the escalator.
pub const HEALTH_CHECK_PATH: &str = "/api/health-check";

/// Errors raised before a response could be obtained.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid HTTP method token: {0}")]
    InvalidMethod(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A status code and body as returned by the server.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    /// Parsed JSON, or `Value::String` holding the raw text for plain-text replies.
    pub body: Value,
}

impl Reply {
    /// Convenience accessor for a top-level string field of a JSON body.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.body.get(name).and_then(Value::as_str)
    }
}

#[derive(Debug, Serialize)]
struct NewArticle<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct NewUser<'a> {
    name: &'a str,
    email: &'a str,
}

/// Client for the Strange Errors Server API.
#[derive(Debug, Clone)]
pub struct ServerClient {
    client: Client,
    base_url: String,
    goat_method: String,
    health_check_path: String,
}

impl ServerClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            goat_method: GOAT_METHOD.to_string(),
            health_check_path: HEALTH_CHECK_PATH.to_string(),
        }
    }

    /// Use a different distinguished verb for [`ServerClient::goat`].
    pub fn with_goat_method(mut self, method: &str) -> Self {
        self.goat_method = method.to_string();
        self
    }

    /// Use a different health-check path for [`ServerClient::goat`] and
    /// [`ServerClient::health_check`].
    pub fn with_health_check_path(mut self, path: &str) -> Self {
        self.health_check_path = path.to_string();
        self
    }

    /// Invoke the escalator on the health-check route.
    pub async fn goat(&self) -> Result<Reply, ClientError> {
        self.request(&self.goat_method, &self.health_check_path, None)
            .await
    }

    /// Regular GET health check.
    pub async fn health_check(&self) -> Result<Reply, ClientError> {
        self.request("GET", &self.health_check_path, None).await
    }

    pub async fn list_articles(&self) -> Result<Reply, ClientError> {
        self.request("GET", "/api/articles", None).await
    }

    pub async fn create_article(&self, title: &str, content: &str) -> Result<Reply, ClientError> {
        let body = serde_json::to_value(NewArticle { title, content }).unwrap_or(Value::Null);
        self.request("POST", "/api/article", Some(body)).await
    }

    /// The id is sent as given; the server decides whether it is numeric.
    pub async fn delete_article(&self, id: &str) -> Result<Reply, ClientError> {
        self.request("DELETE", &format!("/api/article/{}", id), None).await
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<Reply, ClientError> {
        let body = serde_json::to_value(NewUser { name, email }).unwrap_or(Value::Null);
        self.request("POST", "/api/user", Some(body)).await
    }

    pub async fn list_users(&self) -> Result<Reply, ClientError> {
        self.request("GET", "/api/users", None).await
    }

    /// Send an arbitrary request. Non-standard method tokens are allowed.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Reply, ClientError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| ClientError::InvalidMethod(method.to_string()))?;

        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        };

        Ok(Reply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ServerClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_invalid_method_rejected_before_sending() {
        let client = ServerClient::new("http://127.0.0.1:9").with_goat_method("BAD VERB");
        match client.goat().await {
            Err(ClientError::InvalidMethod(m)) => assert_eq!(m, "BAD VERB"),
            other => panic!("expected InvalidMethod, got {:?}", other),
        }
    }

    #[test]
    fn test_health_check_path_override() {
        let client = ServerClient::new("http://localhost:3000");
        assert_eq!(client.health_check_path, HEALTH_CHECK_PATH);

        let client = client.with_health_check_path("/ping");
        assert_eq!(client.health_check_path, "/ping");
    }

    #[test]
    fn test_reply_field_lookup() {
        let reply = Reply {
            status: 777,
            body: serde_json::json!({"status": "OK", "count": 2}),
        };
        assert_eq!(reply.field("status"), Some("OK"));
        assert_eq!(reply.field("count"), None);
        assert_eq!(reply.field("missing"), None);
    }
}
