use once_cell::sync::OnceCell;
use std::fs;

use crate::config::Priority;
use crate::errors::{AppError, AppResult};

/// Fields shared by every message variant
///
/// A field left as `None` is filled from the client's resolved configuration
/// when the message is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMessage {
    pub title: Option<String>,
    pub message: Option<String>,
    pub priority: Option<Priority>,
    pub icon: Option<String>,
    pub delay: Option<String>,
    pub cache: Option<bool>,
    pub markdown: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl TextMessage {
    pub fn new(message: impl Into<String>) -> Self {
        TextMessage {
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Fluent setters available on every message variant
pub trait MessageFields: Sized {
    fn text(&self) -> &TextMessage;

    fn text_mut(&mut self) -> &mut TextMessage;

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.text_mut().message = Some(message.into());
        self
    }

    fn with_title(mut self, title: impl Into<String>) -> Self {
        self.text_mut().title = Some(title.into());
        self
    }

    fn with_priority(mut self, priority: Priority) -> Self {
        self.text_mut().priority = Some(priority);
        self
    }

    fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.text_mut().icon = Some(icon.into());
        self
    }

    /// Delivery delay in any form ntfy accepts (`30m`, `tomorrow, 10am`, a unix timestamp)
    fn with_delay(mut self, delay: impl Into<String>) -> Self {
        self.text_mut().delay = Some(delay.into());
        self
    }

    fn with_cache(mut self, cache: bool) -> Self {
        self.text_mut().cache = Some(cache);
        self
    }

    fn with_markdown(mut self, markdown: bool) -> Self {
        self.text_mut().markdown = Some(markdown);
        self
    }

    fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_mut().tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

impl MessageFields for TextMessage {
    fn text(&self) -> &TextMessage {
        self
    }

    fn text_mut(&mut self) -> &mut TextMessage {
        self
    }
}

/// A message whose attachment the server fetches from a URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlAttachMessage {
    pub base: TextMessage,
    attach: String,
    filename: Option<String>,
}

impl UrlAttachMessage {
    pub fn new(attach: impl Into<String>) -> Self {
        UrlAttachMessage {
            attach: attach.into(),
            ..Default::default()
        }
    }

    pub fn attach(&self) -> &str {
        &self.attach
    }

    /// The explicit filename, or the last path segment of the attachment
    pub fn filename(&self) -> String {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => base_name(&self.attach).to_string(),
        }
    }

    pub fn with_attach(mut self, attach: impl Into<String>) -> Self {
        self.attach = attach.into();
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

impl MessageFields for UrlAttachMessage {
    fn text(&self) -> &TextMessage {
        &self.base
    }

    fn text_mut(&mut self) -> &mut TextMessage {
        &mut self.base
    }
}

/// A message that uploads a local file as the request body
///
/// The path is never sent to the server. File bytes are read on first access
/// and kept for the lifetime of the message.
#[derive(Debug, Clone, Default)]
pub struct LocalAttachMessage {
    inner: UrlAttachMessage,
    data: OnceCell<Vec<u8>>,
}

impl LocalAttachMessage {
    pub fn new(path: impl Into<String>) -> Self {
        LocalAttachMessage {
            inner: UrlAttachMessage::new(path),
            data: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &str {
        self.inner.attach()
    }

    pub fn filename(&self) -> String {
        self.inner.filename()
    }

    pub fn with_attach(self, path: impl Into<String>) -> Self {
        LocalAttachMessage {
            inner: self.inner.with_attach(path),
            data: OnceCell::new(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.inner = self.inner.with_filename(filename);
        self
    }

    /// Raw bytes of the attached file
    pub fn file_data(&self) -> AppResult<&[u8]> {
        let path = self.path();
        self.data
            .get_or_try_init(|| {
                fs::read(path).map_err(|e| AppError::io_with_source(path, "read attachment", e))
            })
            .map(Vec::as_slice)
    }
}

impl PartialEq for LocalAttachMessage {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl MessageFields for LocalAttachMessage {
    fn text(&self) -> &TextMessage {
        &self.inner.base
    }

    fn text_mut(&mut self) -> &mut TextMessage {
        &mut self.inner.base
    }
}

/// Last path segment, ignoring trailing separators
fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}
