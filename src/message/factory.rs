use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::{
    LocalAttachMessage, Message, MessageFields, MessageInput, TextMessage, UrlAttachMessage,
};
use crate::config::{
    bool_option, cache_option, delay_option, priority_option, string_option, tags_option, Config,
    Options,
};
use crate::errors::{AppError, AppResult};

/// Option names a message can be built from, in canonical case
pub const MESSAGE_FIELDS: &[&str] = &[
    "Title", "Message", "Priority", "Icon", "Delay", "Cache", "Markdown", "Tags", "Attach",
    "Filename",
];

static REMOTE_ATTACH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid attachment URL pattern"));

/// Builds message variants from raw input and fills unset fields from the
/// client configuration
pub struct MessageFactory<'a> {
    defaults: &'a Config,
}

impl<'a> MessageFactory<'a> {
    pub fn new(defaults: &'a Config) -> Self {
        Self { defaults }
    }

    /// Classify, merge defaults and normalize in one step
    pub fn build(&self, input: MessageInput) -> AppResult<Message> {
        let mut message = Self::classify(input)?;
        self.merge(&mut message);
        Self::normalize(&mut message);
        Ok(message)
    }

    /// Pick the variant for `input`.
    ///
    /// Built variants pass through. A string becomes the body of a text
    /// message. An option bag with an `Attach` value becomes a URL attachment
    /// when the value is an absolute http(s) URL and a local attachment
    /// otherwise; without `Attach` it is a text message.
    pub fn classify(input: MessageInput) -> AppResult<Message> {
        let message = match input {
            MessageInput::Message(message) => message,
            MessageInput::Text(body) => Message::Text(TextMessage::new(body)),
            MessageInput::Options(options) => Self::from_options(&options)?,
        };
        debug!(kind = message.kind(), "Classified message input");
        Ok(message)
    }

    fn from_options(options: &Options) -> AppResult<Message> {
        let mut options = options.canonicalize(MESSAGE_FIELDS);
        let attach = options.take("Attach");
        let filename = string_option(&options, "Filename")?;

        let base = TextMessage {
            title: string_option(&options, "Title")?,
            message: string_option(&options, "Message")?,
            priority: priority_option(&options, "Priority")?,
            icon: string_option(&options, "Icon")?,
            delay: delay_option(&options, "Delay")?,
            cache: cache_option(&options, "Cache")?,
            markdown: bool_option(&options, "Markdown")?,
            tags: tags_option(&options, "Tags")?,
        };

        let message = match attach {
            None | Some(Value::Null) => Message::Text(base),
            Some(Value::String(attach)) if REMOTE_ATTACH.is_match(&attach) => {
                let mut message = UrlAttachMessage::new(attach);
                *message.text_mut() = base;
                if let Some(filename) = filename {
                    message = message.with_filename(filename);
                }
                Message::UrlAttach(message)
            }
            Some(Value::String(path)) => {
                let mut message = LocalAttachMessage::new(path);
                *message.text_mut() = base;
                if let Some(filename) = filename {
                    message = message.with_filename(filename);
                }
                Message::LocalAttach(message)
            }
            Some(_) => {
                return Err(AppError::invalid_option(
                    "Attach",
                    "expected a URL or a file path",
                ))
            }
        };
        Ok(message)
    }

    /// Fill every unset field from the configuration
    pub fn merge(&self, message: &mut Message) {
        let defaults = self.defaults;
        let text = message.text_mut();

        text.title.get_or_insert_with(|| defaults.title.clone());
        text.message.get_or_insert_with(|| defaults.message.clone());
        text.priority.get_or_insert(defaults.priority);
        text.icon.get_or_insert_with(|| defaults.icon.clone());
        if text.delay.is_none() {
            text.delay = defaults.delay.clone();
        }
        text.cache.get_or_insert(defaults.cache);
        text.markdown.get_or_insert(defaults.markdown);
        text.tags.get_or_insert_with(|| defaults.tags.clone());
    }

    /// Drop an empty delay; make the cache flag explicit
    pub fn normalize(message: &mut Message) {
        let text = message.text_mut();
        if text.delay.as_deref().is_some_and(str::is_empty) {
            text.delay = None;
        }
        text.cache = Some(text.cache.unwrap_or(false));
    }
}
