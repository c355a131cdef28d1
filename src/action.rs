//! Action button encoding
//!
//! ntfy accepts action buttons in a compact, comma-separated form:
//!
//! ```text
//! view, Open portal, https://example.com, clear=true
//! http, Reply, https://ntfy.sh/topic, method=PUT, headers.Message=reply, clear=true
//! broadcast, Take picture, io.heckel.ntfy.USER_ACTION, extras.cmd=pic, clear=true
//! ```
//!
//! Several encoded actions are joined with `;` into the `Actions` header.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::config::Options;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    View,
    Broadcast,
    Http,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::View => "view",
            ActionKind::Broadcast => "broadcast",
            ActionKind::Http => "http",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "view" => Ok(ActionKind::View),
            "broadcast" => Ok(ActionKind::Broadcast),
            "http" => Ok(ActionKind::Http),
            other => Err(AppError::UnsupportedActionKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// What follows the label: a plain target, or a structured payload
#[derive(Debug, Clone, PartialEq)]
pub enum ActionTarget {
    Target(String),
    /// `Url, Method, Headers, Body` for http; `Intent, Extras` for broadcast
    Payload(Options),
}

impl From<&str> for ActionTarget {
    fn from(value: &str) -> Self {
        ActionTarget::Target(value.to_string())
    }
}

impl From<String> for ActionTarget {
    fn from(value: String) -> Self {
        ActionTarget::Target(value)
    }
}

impl From<Options> for ActionTarget {
    fn from(value: Options) -> Self {
        ActionTarget::Payload(value)
    }
}

/// Encode one action.
///
/// A plain target gives `kind,label,target,clear=<bool>` for any kind. A
/// payload is only understood for `http` and `broadcast`; its nested values
/// are flattened into `key=value` tokens between the target and `clear`.
pub fn make_action(
    kind: &str,
    label: &str,
    target: impl Into<ActionTarget>,
    clear: bool,
) -> AppResult<String> {
    let mut tokens = vec![kind.to_string(), label.to_string()];

    match target.into() {
        ActionTarget::Target(target) => tokens.push(target),
        ActionTarget::Payload(options) => {
            let (target, payload) = split_payload(kind, &options)?;
            tokens.push(target);
            flatten_payload(&Value::Object(payload), None, &mut tokens);
        }
    }

    tokens.push(format!("clear={clear}"));
    Ok(tokens.join(","))
}

// (option name, payload key)
const HTTP_PAYLOAD: &[(&str, &str)] = &[
    ("Method", "method"),
    ("Headers", "headers"),
    ("Body", "body"),
];
const BROADCAST_PAYLOAD: &[(&str, &str)] = &[("Extras", "extras")];

fn split_payload(kind: &str, options: &Options) -> AppResult<(String, Map<String, Value>)> {
    let (target_key, payload_keys) = match kind {
        "http" => ("Url", HTTP_PAYLOAD),
        "broadcast" => ("Intent", BROADCAST_PAYLOAD),
        other => {
            return Err(AppError::UnsupportedActionKind {
                kind: other.to_string(),
            })
        }
    };

    // A missing target leaves its slot empty.
    let target = match options.get(target_key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => scalar_to_string(value),
    };

    let mut payload = Map::new();
    for (key, name) in payload_keys {
        if let Some(value) = options.get(key) {
            payload.insert((*name).to_string(), value.clone());
        }
    }
    Ok((target, payload))
}

fn flatten_payload(value: &Value, prefix: Option<&str>, tokens: &mut Vec<String>) {
    let join = |key: &str| match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    };

    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_entry(value, &join(key), tokens);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_entry(value, &join(&index.to_string()), tokens);
            }
        }
        _ => {}
    }
}

fn flatten_entry(value: &Value, key: &str, tokens: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Object(_) | Value::Array(_) => flatten_payload(value, Some(key), tokens),
        scalar => tokens.push(format!("{key}={}", scalar_to_string(scalar))),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Typed description of an action button
///
/// # Example
///
/// ```rust
/// use ntfy_publish::action::Action;
///
/// let encoded = Action::http("Reply", "https://ntfy.sh/test")
///     .header("Message", "reply")
///     .encode()
///     .unwrap();
/// assert_eq!(encoded, "http,Reply,https://ntfy.sh/test,headers.Message=reply,clear=true");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    kind: ActionKind,
    label: String,
    target: String,
    method: Option<String>,
    headers: Map<String, Value>,
    body: Option<String>,
    extras: Map<String, Value>,
    clear: bool,
}

impl Action {
    fn new(kind: ActionKind, label: impl Into<String>, target: impl Into<String>) -> Self {
        Action {
            kind,
            label: label.into(),
            target: target.into(),
            method: None,
            headers: Map::new(),
            body: None,
            extras: Map::new(),
            clear: true,
        }
    }

    pub fn view(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(ActionKind::View, label, url)
    }

    pub fn http(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(ActionKind::Http, label, url)
    }

    pub fn broadcast(label: impl Into<String>, intent: impl Into<String>) -> Self {
        Self::new(ActionKind::Broadcast, label, intent)
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn extra(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(name.into(), Value::String(value.into()));
        self
    }

    pub fn clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn encode(&self) -> AppResult<String> {
        let kind = self.kind.as_str();
        match self.kind {
            ActionKind::View => make_action(kind, &self.label, self.target.as_str(), self.clear),
            ActionKind::Http => {
                let mut payload = Options::new().with("Url", self.target.as_str());
                if let Some(method) = &self.method {
                    payload.insert("Method", method.as_str());
                }
                if !self.headers.is_empty() {
                    payload.insert("Headers", Value::Object(self.headers.clone()));
                }
                if let Some(body) = &self.body {
                    payload.insert("Body", body.as_str());
                }
                make_action(kind, &self.label, payload, self.clear)
            }
            ActionKind::Broadcast => {
                let mut payload = Options::new().with("Intent", self.target.as_str());
                if !self.extras.is_empty() {
                    payload.insert("Extras", Value::Object(self.extras.clone()));
                }
                make_action(kind, &self.label, payload, self.clear)
            }
        }
    }
}
