//! Message variants and the factory that builds them from caller input
//!
//! ## Variants
//!
//! - **TextMessage**: title, body, priority, icon, delay, cache, markdown, tags
//! - **UrlAttachMessage**: adds an attachment URL the server fetches, plus a filename
//! - **LocalAttachMessage**: the attachment is a local file uploaded as the body
//!
//! Callers either build a variant directly with the fluent setters, or pass a
//! string or an [`Options`] bag and let [`MessageFactory`] pick the variant.

pub mod factory;
pub mod variants;

pub use factory::MessageFactory;
pub use variants::{LocalAttachMessage, MessageFields, TextMessage, UrlAttachMessage};

use crate::config::Options;
use crate::errors::AppResult;

/// A message in one of its three variants
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(TextMessage),
    UrlAttach(UrlAttachMessage),
    LocalAttach(LocalAttachMessage),
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Text(_) => "text",
            Message::UrlAttach(_) => "url-attach",
            Message::LocalAttach(_) => "local-attach",
        }
    }

    pub fn text(&self) -> &TextMessage {
        match self {
            Message::Text(m) => m.text(),
            Message::UrlAttach(m) => m.text(),
            Message::LocalAttach(m) => m.text(),
        }
    }

    pub(crate) fn text_mut(&mut self) -> &mut TextMessage {
        match self {
            Message::Text(m) => m.text_mut(),
            Message::UrlAttach(m) => m.text_mut(),
            Message::LocalAttach(m) => m.text_mut(),
        }
    }

    /// The outbound field set, in ntfy header naming.
    ///
    /// Unset fields are skipped. A disabled cache renders as `no`. A local
    /// attachment contributes its filename but never its path.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let text = self.text();
        let mut fields = Vec::new();

        if let Some(title) = &text.title {
            fields.push(("Title", title.clone()));
        }
        if let Some(message) = &text.message {
            fields.push(("Message", message.clone()));
        }
        if let Some(priority) = text.priority {
            fields.push(("Priority", priority.to_string()));
        }
        if let Some(icon) = &text.icon {
            fields.push(("Icon", icon.clone()));
        }
        if let Some(delay) = &text.delay {
            fields.push(("Delay", delay.clone()));
        }
        if let Some(cache) = text.cache {
            let value = if cache { "true" } else { "no" };
            fields.push(("Cache", value.to_string()));
        }
        if let Some(markdown) = text.markdown {
            fields.push(("Markdown", markdown.to_string()));
        }
        if let Some(tags) = &text.tags {
            fields.push(("Tags", tags.join(",")));
        }

        match self {
            Message::Text(_) => {}
            Message::UrlAttach(m) => {
                fields.push(("Attach", m.attach().to_string()));
                fields.push(("Filename", m.filename()));
            }
            Message::LocalAttach(m) => {
                fields.push(("Filename", m.filename()));
            }
        }

        fields
    }

    /// Request body: the file bytes for a local attachment, empty otherwise
    pub fn body(&self) -> AppResult<Vec<u8>> {
        match self {
            Message::LocalAttach(m) => Ok(m.file_data()?.to_vec()),
            _ => Ok(Vec::new()),
        }
    }
}

impl From<TextMessage> for Message {
    fn from(message: TextMessage) -> Self {
        Message::Text(message)
    }
}

impl From<UrlAttachMessage> for Message {
    fn from(message: UrlAttachMessage) -> Self {
        Message::UrlAttach(message)
    }
}

impl From<LocalAttachMessage> for Message {
    fn from(message: LocalAttachMessage) -> Self {
        Message::LocalAttach(message)
    }
}

/// Raw send-time input, before classification
#[derive(Debug, Clone, PartialEq)]
pub enum MessageInput {
    /// An already-built variant, used as-is
    Message(Message),
    /// A bare string; depending on where it appears it may also be a topic,
    /// a click target or an encoded action
    Text(String),
    Options(Options),
}

impl From<&str> for MessageInput {
    fn from(value: &str) -> Self {
        MessageInput::Text(value.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(value: String) -> Self {
        MessageInput::Text(value)
    }
}

impl From<Options> for MessageInput {
    fn from(value: Options) -> Self {
        MessageInput::Options(value)
    }
}

impl From<Message> for MessageInput {
    fn from(value: Message) -> Self {
        MessageInput::Message(value)
    }
}

impl From<TextMessage> for MessageInput {
    fn from(value: TextMessage) -> Self {
        MessageInput::Message(value.into())
    }
}

impl From<UrlAttachMessage> for MessageInput {
    fn from(value: UrlAttachMessage) -> Self {
        MessageInput::Message(value.into())
    }
}

impl From<LocalAttachMessage> for MessageInput {
    fn from(value: LocalAttachMessage) -> Self {
        MessageInput::Message(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Priority;

    #[test]
    fn test_text_fields_order_and_rendering() {
        let message: Message = TextMessage::new("body")
            .with_title("Title")
            .with_priority(Priority::Max)
            .with_cache(false)
            .with_markdown(true)
            .with_tags(["a", "b"])
            .into();

        let fields = message.fields();
        assert_eq!(
            fields,
            vec![
                ("Title", "Title".to_string()),
                ("Message", "body".to_string()),
                ("Priority", "5".to_string()),
                ("Cache", "no".to_string()),
                ("Markdown", "true".to_string()),
                ("Tags", "a,b".to_string()),
            ]
        );
    }

    #[test]
    fn test_url_attach_fields() {
        let message: Message = UrlAttachMessage::new("https://host/path/result.png").into();
        let fields = message.fields();

        assert!(fields.contains(&("Attach", "https://host/path/result.png".to_string())));
        assert!(fields.contains(&("Filename", "result.png".to_string())));
        assert!(message.body().unwrap().is_empty());
    }

    #[test]
    fn test_local_attach_hides_path() {
        let message: Message = LocalAttachMessage::new("/tmp/report.pdf").into();
        let fields = message.fields();

        assert!(fields.iter().all(|(name, _)| *name != "Attach"));
        assert!(fields.contains(&("Filename", "report.pdf".to_string())));
    }
}
