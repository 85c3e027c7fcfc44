//! Client for the remote advisory functions: chat completion and image analysis.
//! Both endpoints are black boxes; this only shapes requests and reads replies.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const CHAT_FUNCTION: &str = "crop-chat";
pub const ANALYZE_FUNCTION: &str = "analyze-crop";

/// Who sent a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A chat turn as sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Content,
}

/// Plain text, or a list of text and image parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeReply {
    analysis: String,
}

/// Thin wrapper around an HTTP client bound to the functions base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create from the functions base URL, e.g. `https://host/functions/v1`.
    pub fn from_url(url: &str, api_key: Option<String>) -> Result<Self, ClientError> {
        let mut base = Url::parse(url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn function_url(&self, name: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(name)?)
    }

    /// Send the whole conversation and return the assistant's reply text.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, ClientError> {
        let res: ChatReply = self
            .invoke(CHAT_FUNCTION, &ChatRequest { messages })
            .await?;
        Ok(res.reply)
    }

    /// Submit an image data URI and return the raw analysis text.
    pub async fn analyze_image(&self, data_uri: &str) -> Result<String, ClientError> {
        let res: AnalyzeReply = self
            .invoke(ANALYZE_FUNCTION, &AnalyzeRequest { image: data_uri })
            .await?;
        Ok(res.analysis)
    }

    async fn invoke<B, R>(&self, function: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.function_url(function)?;
        tracing::debug!(%url, "invoking function");
        let mut req = self.http.post(url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key).header("apikey", key.as_str());
        }
        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(function, %status, "function call failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res.json::<R>().await?)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid endpoint URL: {0}")]
    ParseUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn function_url_keeps_base_path() {
        let c = ApiClient::from_url("https://example.test/functions/v1", None).unwrap();
        assert_eq!(
            c.function_url(CHAT_FUNCTION).unwrap().as_str(),
            "https://example.test/functions/v1/crop-chat"
        );
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(matches!(
            ApiClient::from_url("not a url", None),
            Err(ClientError::ParseUrl(_))
        ));
    }

    #[test]
    fn empty_api_key_is_dropped() {
        let c = ApiClient::from_url("http://localhost:54321", Some(String::new())).unwrap();
        assert!(c.api_key.is_none());
    }

    #[test]
    fn message_wire_format() {
        let messages = vec![
            ChatMessage {
                role: Role::User,
                content: Content::Text("hello".into()),
            },
            ChatMessage {
                role: Role::Assistant,
                content: Content::Parts(vec![
                    ContentPart::text("look"),
                    ContentPart::image("data:image/png;base64,AAAA"),
                ]),
            },
        ];
        let body = serde_json::to_value(ChatRequest {
            messages: &messages,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "messages": [
                    { "role": "user", "content": "hello" },
                    { "role": "assistant", "content": [
                        { "type": "text", "text": "look" },
                        { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                    ]}
                ]
            })
        );
    }

    #[test]
    fn analyze_request_shape() {
        let body = serde_json::to_value(AnalyzeRequest { image: "data:x" }).unwrap();
        assert_eq!(body, json!({ "image": "data:x" }));
    }

    #[tokio::test]
    async fn analyze_image_reads_analysis() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/analyze-crop")
            .match_body(mockito::Matcher::Json(json!({ "image": "data:image/png;base64,AAAA" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"analysis":"Leaf blight, early stage"}"#)
            .create_async()
            .await;
        let c = ApiClient::from_url(&server.url(), None).unwrap();
        let analysis = c.analyze_image("data:image/png;base64,AAAA").await.unwrap();
        assert_eq!(analysis, "Leaf blight, early stage");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_key_is_sent_in_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/crop-chat")
            .match_header("apikey", "anon")
            .match_header("authorization", "Bearer anon")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"reply":"ok"}"#)
            .create_async()
            .await;
        let c = ApiClient::from_url(&server.url(), Some("anon".into())).unwrap();
        assert_eq!(c.chat(&[]).await.unwrap(), "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_keeps_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/analyze-crop")
            .with_status(502)
            .with_body("upstream down")
            .create_async()
            .await;
        let c = ApiClient::from_url(&server.url(), None).unwrap();
        match c.analyze_image("data:x").await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
