//! Conversation with the farming assistant.
//!
//! A turn is only added to the history once the assistant has replied. A failed
//! call leaves the history as it was so the caller can retry with the same input.

use crate::client::{ApiClient, ChatMessage, ClientError, Content, ContentPart, Role};
use crate::segment::{segment, Section};

/// Shown in the history when the user sends only an image.
pub const IMAGE_ONLY_DISPLAY: &str = "Please analyze this image";
/// Sent to the assistant when the user sends only an image.
pub const IMAGE_ONLY_PROMPT: &str = "Please analyze this crop image and provide advice";

/// A message in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Image data URI attached by the user, if any.
    pub image: Option<String>,
}

impl Message {
    /// Assistant replies split into display sections. `None` for user messages.
    pub fn sections(&self) -> Option<Vec<Section>> {
        (self.role == Role::Assistant).then(|| segment(&self.content))
    }

    fn to_wire(&self) -> ChatMessage {
        let content = match &self.image {
            Some(url) => Content::Parts(vec![
                ContentPart::text(self.content.clone()),
                ContentPart::image(url.clone()),
            ]),
            None => Content::Text(self.content.clone()),
        };
        ChatMessage {
            role: self.role,
            content,
        }
    }
}

/// A user turn ready to send: the history entry plus the full request body.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    user: Message,
    request: Vec<ChatMessage>,
}

impl PendingTurn {
    pub fn request(&self) -> &[ChatMessage] {
        &self.request
    }
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Build the next turn without touching the history.
    pub fn prepare(&self, input: &str, image: Option<&str>) -> Result<PendingTurn, ChatError> {
        if input.trim().is_empty() && image.is_none() {
            return Err(ChatError::EmptyMessage);
        }
        // Typed text goes out unchanged; the defaults only replace an empty input.
        let (display, prompt) = if input.is_empty() {
            (IMAGE_ONLY_DISPLAY, IMAGE_ONLY_PROMPT)
        } else {
            (input, input)
        };

        let mut parts = vec![ContentPart::text(prompt)];
        if let Some(url) = image {
            parts.push(ContentPart::image(url));
        }
        let mut request: Vec<ChatMessage> = self.messages.iter().map(Message::to_wire).collect();
        request.push(ChatMessage {
            role: Role::User,
            content: Content::Parts(parts),
        });

        Ok(PendingTurn {
            user: Message {
                role: Role::User,
                content: display.to_string(),
                image: image.map(str::to_string),
            },
            request,
        })
    }

    /// Record a turn and its reply. Returns the assistant message.
    pub fn commit(&mut self, turn: PendingTurn, reply: String) -> &Message {
        self.messages.push(turn.user);
        self.messages.push(Message {
            role: Role::Assistant,
            content: reply,
            image: None,
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Send a message and wait for the reply. Taking `&mut self` keeps one call in flight.
    pub async fn send(
        &mut self,
        client: &ApiClient,
        input: &str,
        image: Option<&str>,
    ) -> Result<&Message, ChatError> {
        let turn = self.prepare(input, image)?;
        tracing::debug!(turns = turn.request.len(), "sending chat");
        let reply = client.chat(turn.request()).await?;
        Ok(self.commit(turn, reply))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("nothing to send: type a question or attach an image")]
    EmptyMessage,
    #[error("chat failed: {0}")]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMG: &str = "data:image/png;base64,AAAA";

    #[test]
    fn empty_input_without_image_is_rejected() {
        let s = ChatSession::new();
        assert!(matches!(s.prepare("   ", None), Err(ChatError::EmptyMessage)));
    }

    #[test]
    fn image_only_uses_default_prompt() {
        let s = ChatSession::new();
        let turn = s.prepare("", Some(IMG)).unwrap();
        assert_eq!(turn.user.content, IMAGE_ONLY_DISPLAY);
        assert_eq!(turn.user.image.as_deref(), Some(IMG));
        assert_eq!(
            turn.request()[0].content,
            Content::Parts(vec![
                ContentPart::text(IMAGE_ONLY_PROMPT),
                ContentPart::image(IMG)
            ])
        );
    }

    #[test]
    fn history_is_sent_before_new_turn() {
        let mut s = ChatSession::new();
        let first = s.prepare("what is wrong", Some(IMG)).unwrap();
        s.commit(first, "🐛 PROBLEM: Blight".to_string());
        let second = s.prepare("how to fix it", None).unwrap();
        let req = second.request();
        assert_eq!(req.len(), 3);
        assert_eq!(
            req[0].content,
            Content::Parts(vec![ContentPart::text("what is wrong"), ContentPart::image(IMG)])
        );
        assert_eq!(req[1].role, Role::Assistant);
        assert_eq!(req[1].content, Content::Text("🐛 PROBLEM: Blight".to_string()));
        assert_eq!(
            req[2].content,
            Content::Parts(vec![ContentPart::text("how to fix it")])
        );
    }

    #[test]
    fn prepare_leaves_history_untouched() {
        let s = ChatSession::new();
        let _turn = s.prepare("hello", None).unwrap();
        assert!(s.messages().is_empty());
    }

    #[test]
    fn commit_appends_both_messages() {
        let mut s = ChatSession::new();
        let turn = s.prepare("hello", None).unwrap();
        let reply = s.commit(turn, "🌱 CROP: Rice".to_string());
        let sections = reply.sections().unwrap();
        assert_eq!(sections[0].title, "Crop Identified");
        assert_eq!(s.messages().len(), 2);
        assert!(s.messages()[0].sections().is_none());
        s.clear();
        assert!(s.messages().is_empty());
    }

    #[test]
    fn typed_text_is_sent_unchanged() {
        let s = ChatSession::new();
        let turn = s.prepare("  neem dose? ", None).unwrap();
        assert_eq!(turn.user.content, "  neem dose? ");
        assert_eq!(
            turn.request()[0].content,
            Content::Parts(vec![ContentPart::text("  neem dose? ")])
        );
    }

    #[tokio::test]
    async fn failed_send_keeps_history() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/crop-chat")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;
        let client = ApiClient::from_url(&server.url(), None).unwrap();

        let mut s = ChatSession::new();
        let err = s.send(&client, "help", None).await.unwrap_err();
        assert!(matches!(
            err,
            ChatError::Client(ClientError::Status { status: 500, ref body }) if body == "boom"
        ));
        assert!(s.messages().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn successful_send_appends_turns() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/crop-chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"reply":"🌱 CROP: Rice"}"#)
            .create_async()
            .await;
        let client = ApiClient::from_url(&server.url(), None).unwrap();

        let mut s = ChatSession::new();
        let reply = s.send(&client, "what crop is this", Some(IMG)).await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.sections().unwrap()[0].body, "Rice");
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.messages()[0].image.as_deref(), Some(IMG));
        mock.assert_async().await;
    }
}
