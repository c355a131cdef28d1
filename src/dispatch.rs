//! Send-call argument resolution
//!
//! A send call takes an optional leading topic followed by any mixture of a
//! message, a click target and encoded actions. Trailing arguments are told
//! apart by their content, not their position.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::message::MessageInput;

static CLICK_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(geo:|mailto:|\w+://)").expect("valid click pattern"));

static ENCODED_ACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(view|broadcast|http),").expect("valid action pattern"));

/// True for a URI with a scheme, or a `geo:` / `mailto:` target
pub fn is_click_target(value: &str) -> bool {
    CLICK_TARGET.is_match(value)
}

/// True for a string produced by the action encoder
pub fn is_encoded_action(value: &str) -> bool {
    ENCODED_ACTION.is_match(value)
}

/// A fully-resolved send call
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub topic: String,
    pub message: MessageInput,
    pub click: Option<String>,
    pub actions: Vec<String>,
}

impl Dispatch {
    pub fn new(topic: impl Into<String>, message: impl Into<MessageInput>) -> Self {
        Dispatch {
            topic: topic.into(),
            message: message.into(),
            click: None,
            actions: Vec::new(),
        }
    }

    pub fn with_click(mut self, click: impl Into<String>) -> Self {
        self.click = Some(click.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }
}

/// Resolve positional send arguments into a [`Dispatch`].
///
/// - no arguments: [`AppError::MissingMessage`]
/// - one argument: it is the message, sent to `default_topic`
/// - more: the first trailing message candidate is the message and the
///   leading argument is the topic (empty falls back to `default_topic`); if
///   the trailing arguments hold no message, the leading argument is the
///   message and `default_topic` is used
///
/// An empty trailing string is not a message candidate. Only the first click
/// target is kept. Actions keep their order.
pub fn dispatch(args: Vec<MessageInput>, default_topic: Option<&str>) -> AppResult<Dispatch> {
    let mut args = args.into_iter();
    let leading = args.next().ok_or(AppError::MissingMessage)?;

    let mut message = None;
    let mut click = None;
    let mut actions = Vec::new();

    for arg in args {
        match arg {
            MessageInput::Text(text) if is_click_target(&text) => {
                click.get_or_insert(text);
            }
            MessageInput::Text(text) if is_encoded_action(&text) => actions.push(text),
            MessageInput::Text(text) if text.is_empty() => {}
            candidate => {
                message.get_or_insert(candidate);
            }
        }
    }

    let (topic, message) = match message {
        Some(message) => {
            let topic = match leading {
                MessageInput::Text(topic) if !topic.is_empty() => Some(topic),
                MessageInput::Text(_) => default_topic.map(str::to_string),
                _ => {
                    return Err(AppError::invalid_argument(
                        "topic",
                        "a topic string must precede the message",
                    ))
                }
            };
            (topic, message)
        }
        None => (default_topic.map(str::to_string), leading),
    };

    let topic = topic
        .filter(|t| !t.is_empty())
        .ok_or(AppError::MissingTopic)?;

    debug!(
        topic = %topic,
        has_click = click.is_some(),
        actions = actions.len(),
        "Resolved send arguments"
    );

    Ok(Dispatch {
        topic,
        message,
        click,
        actions,
    })
}
