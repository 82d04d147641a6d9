//! HTTP client for the conversation server
//!
//! Two read-only endpoints:
//! - `GET /conversations` lists conversation summaries
//! - `GET /conversation/{id}` returns one conversation's messages

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ViewerConfig;
use crate::types::{Conversation, ConversationId, Message};
use crate::{Error, Result};

/// HTTP client for the conversation server
#[derive(Debug, Clone)]
pub struct ConversationClient {
    base_url: Url,
    client: Client,
}

impl ConversationClient {
    /// Create a client with the default request timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, ViewerConfig::default().request_timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.request_timeout())
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request and decode a JSON body
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // ========================================================================
    // Conversation API
    // ========================================================================

    /// List all conversations
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        let url = self.endpoint(&["conversations"])?;
        self.get(url).await
    }

    /// Get the messages of one conversation, in display order
    pub async fn conversation_messages(&self, id: &ConversationId) -> Result<Vec<Message>> {
        let url = self.endpoint(&["conversation", id.as_str()])?;
        self.get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ConversationClient::new("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ConversationClient::new("mailto:someone@example.com"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = ConversationClient::new("http://example.com/api/").unwrap();
        let url = client.endpoint(&["conversation", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/conversation/a%20b%2Fc");

        let client = ConversationClient::new("http://example.com:5000").unwrap();
        let url = client.endpoint(&["conversations"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com:5000/conversations");
    }

    #[tokio::test]
    async fn test_list_conversations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conversations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "c1", "title": "Trip Plan", "update_time": 1700000000.0, "message_count": 4},
                {"id": 2, "title": "Recipe", "update_time": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ConversationClient::new(&server.uri()).unwrap();
        let conversations = client.list_conversations().await.unwrap();

        assert_eq!(conversations.len(), 2);
        assert_eq!(conversations[0].id.as_str(), "c1");
        assert_eq!(conversations[0].message_count, Some(4));
        assert_eq!(conversations[1].id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_conversation_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conversation/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "m1", "role": "user", "text": "Plan a trip"},
                {"id": "m2", "role": "assistant", "text": "**Sure**"}
            ])))
            .mount(&server)
            .await;

        let client = ConversationClient::new(&server.uri()).unwrap();
        let messages = client
            .conversation_messages(&ConversationId::from("c1"))
            .await
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].text, "**Sure**");
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conversation/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"error": "Conversation not found"})),
            )
            .mount(&server)
            .await;

        let client = ConversationClient::new(&server.uri()).unwrap();
        let result = client
            .conversation_messages(&ConversationId::from("missing"))
            .await;

        match result {
            Err(Error::Status { status, body }) => {
                assert_eq!(status.as_u16(), 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/conversations"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = ConversationClient::new(&server.uri()).unwrap();
        let result = client.list_conversations().await;

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Bind and drop a listener to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let uri = format!("http://127.0.0.1:{}", port);

        let client = ConversationClient::with_timeout(&uri, Duration::from_secs(2)).unwrap();
        let result = client.list_conversations().await;

        assert!(matches!(result, Err(Error::Http(_))));
    }
}
