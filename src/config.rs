//! Client configuration
//!
//! Options arrive as a loose key/value bag. A key is looked up by its exact
//! name first, then by its lowercase form, so `Topic` and `topic` both work.
//! [`ClientArgs`] covers the constructor shapes (defaults, url, options,
//! url + token, url + options, url + user + password, url + token + options,
//! url + user + password + options) and [`Config::resolve`] turns the merged
//! options into a typed [`Config`].

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;

/// Public ntfy endpoint used when no URL is configured
pub const DEFAULT_SERVER_URL: &str = "https://ntfy.sh";

/// Every option name the resolver recognizes, in canonical case
pub const OPTION_NAMES: &[&str] = &[
    "Url", "User", "Password", "Token", "Topic", "Title", "Message", "Tags", "Icon", "Delay",
    "Cache", "Click", "Actions", "Priority", "Markdown",
];

/// Notification priority on ntfy's 1..=5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Priority {
    Min = 1,
    Low = 2,
    #[default]
    Default = 3,
    High = 4,
    Max = 5,
}

impl Priority {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = AppError;

    fn try_from(value: u8) -> AppResult<Self> {
        match value {
            1 => Ok(Self::Min),
            2 => Ok(Self::Low),
            3 => Ok(Self::Default),
            4 => Ok(Self::High),
            5 => Ok(Self::Max),
            other => Err(AppError::invalid_option(
                "Priority",
                format!("must be between 1 and 5, got: {other}"),
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Loosely-shaped option bag supplied by callers
///
/// Keys keep their insertion order. Lookups try the exact name first and then
/// its fully-lowercased form, so `{"Title": ..}` and `{"title": ..}` are both
/// honored while `{"TITLE": ..}` is not.
///
/// # Example
///
/// ```rust
/// use ntfy_publish::config::Options;
///
/// let options = Options::new().with("topic", "alerts").with("Priority", 4);
/// assert_eq!(options.get("Topic").and_then(|v| v.as_str()), Some("alerts"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up `name` by exact case, then by its lowercased form
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .get(name)
            .or_else(|| self.0.get(name.to_lowercase().as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrite the bag so that only `names` remain, keyed in canonical case.
    ///
    /// This is the single normalization step applied at every boundary where a
    /// caller hands over an option bag; downstream code reads canonical keys.
    pub fn canonicalize(&self, names: &[&str]) -> Options {
        let mut canonical = Map::new();
        for name in names {
            if let Some(value) = self.get(name) {
                canonical.insert((*name).to_string(), value.clone());
            }
        }
        Options(canonical)
    }

    /// Parse an option bag from TOML text
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        Self::try_from(serde_json::to_value(table)?)
    }

    /// Load an option bag from a TOML file on disk
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
        Self::from_toml_str(&content)
    }

    pub(crate) fn take(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Options(map)
    }
}

impl TryFrom<Value> for Options {
    type Error = AppError;

    fn try_from(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(Options(map)),
            other => Err(AppError::invalid_argument(
                "options",
                format!("expected an object, got: {other}"),
            )),
        }
    }
}

/// Fully-resolved client configuration
///
/// Every field is populated after [`Config::resolve`]; optional fields are
/// `None` only when neither the caller nor the defaults provide a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub topic: Option<String>,
    pub title: String,
    pub message: String,
    pub tags: Vec<String>,
    pub icon: String,
    pub delay: Option<String>,
    pub cache: bool,
    pub click: Option<String>,
    pub actions: Vec<String>,
    pub priority: Priority,
    pub markdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_SERVER_URL.to_string(),
            user: None,
            password: None,
            token: None,
            topic: None,
            title: String::new(),
            message: String::new(),
            tags: Vec::new(),
            icon: String::new(),
            delay: None,
            cache: true,
            click: None,
            actions: Vec::new(),
            priority: Priority::Default,
            markdown: false,
        }
    }
}

impl Config {
    /// Resolve an option bag against the built-in defaults.
    ///
    /// Unknown keys are ignored. A recognized key holding `null` counts as
    /// absent and keeps the default.
    pub fn resolve(options: &Options) -> AppResult<Self> {
        let options = options.canonicalize(OPTION_NAMES);
        let defaults = Config::default();

        Ok(Config {
            url: string_option(&options, "Url")?.unwrap_or(defaults.url),
            user: string_option(&options, "User")?,
            password: string_option(&options, "Password")?,
            token: string_option(&options, "Token")?,
            topic: string_option(&options, "Topic")?,
            title: string_option(&options, "Title")?.unwrap_or(defaults.title),
            message: string_option(&options, "Message")?.unwrap_or(defaults.message),
            tags: tags_option(&options, "Tags")?.unwrap_or(defaults.tags),
            icon: string_option(&options, "Icon")?.unwrap_or(defaults.icon),
            delay: delay_option(&options, "Delay")?,
            cache: cache_option(&options, "Cache")?.unwrap_or(defaults.cache),
            click: string_option(&options, "Click")?,
            actions: tags_option(&options, "Actions")?.unwrap_or(defaults.actions),
            priority: priority_option(&options, "Priority")?.unwrap_or(defaults.priority),
            markdown: bool_option(&options, "Markdown")?.unwrap_or(defaults.markdown),
        })
    }
}

/// One positional constructor argument
#[derive(Debug, Clone, PartialEq)]
pub enum CtorArg {
    Str(String),
    Options(Options),
}

impl From<&str> for CtorArg {
    fn from(value: &str) -> Self {
        CtorArg::Str(value.to_string())
    }
}

impl From<String> for CtorArg {
    fn from(value: String) -> Self {
        CtorArg::Str(value)
    }
}

impl From<Options> for CtorArg {
    fn from(value: Options) -> Self {
        CtorArg::Options(value)
    }
}

/// The supported construction shapes of a client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientArgs {
    /// No arguments: every option takes its default
    Defaults,
    Url(String),
    Options(Options),
    UrlToken { url: String, token: String },
    UrlOptions { url: String, options: Options },
    UrlCredentials { url: String, user: String, password: String },
    UrlTokenOptions { url: String, token: String, options: Options },
    /// Explicit full form
    Full {
        url: String,
        user: String,
        password: String,
        options: Options,
    },
}

impl ClientArgs {
    /// Pick a construction shape from positional arguments by arity and type
    pub fn from_positional(args: Vec<CtorArg>) -> AppResult<Self> {
        let count = args.len();
        let mut args = args.into_iter();
        let mut next = || args.next();

        match count {
            0 => Ok(ClientArgs::Defaults),
            1 => match next() {
                Some(CtorArg::Str(url)) => Ok(ClientArgs::Url(url)),
                Some(CtorArg::Options(options)) => Ok(ClientArgs::Options(options)),
                None => Err(AppError::arity("NtfyClient::new", count)),
            },
            2 => match (next(), next()) {
                (Some(CtorArg::Str(url)), Some(CtorArg::Str(token))) => {
                    Ok(ClientArgs::UrlToken { url, token })
                }
                (Some(CtorArg::Str(url)), Some(CtorArg::Options(options))) => {
                    Ok(ClientArgs::UrlOptions { url, options })
                }
                _ => Err(url_first()),
            },
            3 => match (next(), next(), next()) {
                (Some(CtorArg::Str(url)), Some(CtorArg::Str(user)), Some(CtorArg::Str(password))) => {
                    Ok(ClientArgs::UrlCredentials { url, user, password })
                }
                (
                    Some(CtorArg::Str(url)),
                    Some(CtorArg::Str(token)),
                    Some(CtorArg::Options(options)),
                ) => Ok(ClientArgs::UrlTokenOptions { url, token, options }),
                (Some(CtorArg::Str(_)), Some(CtorArg::Options(_)), _) => Err(
                    AppError::invalid_argument("user", "expected a user name or token string"),
                ),
                _ => Err(url_first()),
            },
            4 => match (next(), next(), next(), next()) {
                (
                    Some(CtorArg::Str(url)),
                    Some(CtorArg::Str(user)),
                    Some(CtorArg::Str(password)),
                    Some(CtorArg::Options(options)),
                ) => Ok(ClientArgs::Full {
                    url,
                    user,
                    password,
                    options,
                }),
                _ => Err(AppError::invalid_argument(
                    "arguments",
                    "expected url, user, password and an options object",
                )),
            },
            _ => Err(AppError::arity("NtfyClient::new", count)),
        }
    }

    /// Resolve this shape into a fully-populated [`Config`]
    pub fn resolve(self) -> AppResult<Config> {
        let config = match self {
            ClientArgs::Defaults => Config::default(),
            ClientArgs::Url(url) => Config {
                url,
                ..Config::default()
            },
            ClientArgs::Options(options) => Config::resolve(&options)?,
            ClientArgs::UrlToken { url, token } => Config {
                url,
                token: Some(token),
                ..Config::default()
            },
            ClientArgs::UrlOptions { url, options } => Config {
                url,
                ..Config::resolve(&options)?
            },
            ClientArgs::UrlCredentials {
                url,
                user,
                password,
            } => Config {
                url,
                user: Some(user),
                password: Some(password),
                ..Config::default()
            },
            ClientArgs::UrlTokenOptions {
                url,
                token,
                options,
            } => Config {
                url,
                token: Some(token),
                ..Config::resolve(&options)?
            },
            ClientArgs::Full {
                url,
                user,
                password,
                options,
            } => Config {
                url,
                user: Some(user),
                password: Some(password),
                ..Config::resolve(&options)?
            },
        };
        Ok(config)
    }
}

impl Default for ClientArgs {
    fn default() -> Self {
        ClientArgs::Defaults
    }
}

impl From<Options> for ClientArgs {
    fn from(options: Options) -> Self {
        ClientArgs::Options(options)
    }
}

impl From<&str> for ClientArgs {
    fn from(url: &str) -> Self {
        ClientArgs::Url(url.to_string())
    }
}

fn url_first() -> AppError {
    AppError::invalid_argument("url", "the first argument must be a URL string")
}

// Typed readers shared by the config resolver and the message factory.
// `null` is treated as "not supplied" everywhere.

pub(crate) fn string_option(options: &Options, key: &str) -> AppResult<Option<String>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(AppError::invalid_option(key, "expected a string")),
    }
}

pub(crate) fn bool_option(options: &Options, key: &str) -> AppResult<Option<bool>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::Number(n)) => Ok(Some(n.as_f64().is_some_and(|f| f != 0.0))),
        Some(Value::String(s)) => Ok(Some(matches!(
            s.to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ))),
        Some(_) => Err(AppError::invalid_option(key, "expected a boolean")),
    }
}

/// `Cache` accepts booleans and ntfy's literal `"no"`
pub(crate) fn cache_option(options: &Options, key: &str) -> AppResult<Option<bool>> {
    match options.get(key) {
        Some(Value::String(s)) => Ok(Some(!matches!(
            s.to_ascii_lowercase().as_str(),
            "" | "no" | "false" | "0"
        ))),
        _ => bool_option(options, key),
    }
}

/// A numeric zero or `false` reads as an empty delay, which overrides any
/// default and is dropped before sending. Strings are kept verbatim.
pub(crate) fn delay_option(options: &Options, key: &str) -> AppResult<Option<String>> {
    match options.get(key) {
        Some(Value::Bool(false)) => Ok(Some(String::new())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(Some(String::new())),
        Some(Value::Bool(true)) => Err(AppError::invalid_option(key, "expected a delay")),
        _ => string_option(options, key),
    }
}

/// Accepts an array of scalars or a comma-separated string
pub(crate) fn tags_option(options: &Options, key: &str) -> AppResult<Option<Vec<String>>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                _ => Err(AppError::invalid_option(key, "expected a list of strings")),
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(AppError::invalid_option(key, "expected a list of strings")),
    }
}

pub(crate) fn priority_option(options: &Options, key: &str) -> AppResult<Option<Priority>> {
    let raw = match options.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| AppError::invalid_option(key, format!("not a priority: {n}")))?,
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "min" => 1,
            "low" => 2,
            "default" => 3,
            "high" => 4,
            "max" | "urgent" => 5,
            other => other
                .parse::<u8>()
                .map_err(|_| AppError::invalid_option(key, format!("not a priority: {s}")))?,
        },
        Some(_) => return Err(AppError::invalid_option(key, "expected a number")),
    };
    Priority::try_from(raw).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Options {
        Options::try_from(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ClientArgs::Defaults.resolve().unwrap();
        assert_eq!(config.url, "https://ntfy.sh");
        assert_eq!(config.priority, Priority::Default);
        assert!(config.cache);
        assert!(config.tags.is_empty());
        assert!(config.actions.is_empty());
        assert!(config.topic.is_none());
    }

    #[test]
    fn test_exact_and_lowercase_lookup() {
        let config = Config::resolve(&options(json!({
            "Topic": "exact",
            "title": "lower",
            "PRIORITY": 5,
            "unknown": "ignored"
        })))
        .unwrap();

        assert_eq!(config.topic.as_deref(), Some("exact"));
        assert_eq!(config.title, "lower");
        // neither exact nor lowercase, so the default stands
        assert_eq!(config.priority, Priority::Default);
    }

    #[test]
    fn test_exact_case_wins_over_lowercase() {
        let config = Config::resolve(&options(json!({
            "topic": "lower",
            "Topic": "exact"
        })))
        .unwrap();
        assert_eq!(config.topic.as_deref(), Some("exact"));
    }

    #[test]
    fn test_typed_values() {
        let config = Config::resolve(&options(json!({
            "Tags": ["rocket", "house"],
            "Cache": "no",
            "Markdown": true,
            "Priority": "high",
            "Delay": 30
        })))
        .unwrap();

        assert_eq!(config.tags, vec!["rocket", "house"]);
        assert!(!config.cache);
        assert!(config.markdown);
        assert_eq!(config.priority, Priority::High);
        assert_eq!(config.delay.as_deref(), Some("30"));
    }

    #[test]
    fn test_priority_out_of_range() {
        let err = Config::resolve(&options(json!({ "Priority": 9 }))).unwrap_err();
        assert!(matches!(err, AppError::InvalidOption { .. }));
    }

    #[test]
    fn test_positional_shapes() {
        let args = ClientArgs::from_positional(vec![]).unwrap();
        assert_eq!(args, ClientArgs::Defaults);

        let args = ClientArgs::from_positional(vec!["https://example.com".into()]).unwrap();
        assert_eq!(args, ClientArgs::Url("https://example.com".to_string()));

        let args =
            ClientArgs::from_positional(vec!["https://example.com".into(), "tk_abc".into()])
                .unwrap();
        assert!(matches!(args, ClientArgs::UrlToken { .. }));

        let args = ClientArgs::from_positional(vec![
            "https://example.com".into(),
            "alice".into(),
            "secret".into(),
        ])
        .unwrap();
        assert!(matches!(args, ClientArgs::UrlCredentials { .. }));

        let args = ClientArgs::from_positional(vec![
            "https://example.com".into(),
            "tk_abc".into(),
            Options::new().into(),
        ])
        .unwrap();
        assert!(matches!(args, ClientArgs::UrlTokenOptions { .. }));

        let args = ClientArgs::from_positional(vec![
            "https://example.com".into(),
            "alice".into(),
            "secret".into(),
            Options::new().into(),
        ])
        .unwrap();
        assert!(matches!(args, ClientArgs::Full { .. }));
    }

    #[test]
    fn test_positional_arity_error() {
        let args: Vec<CtorArg> = (0..5).map(|i| CtorArg::Str(i.to_string())).collect();
        let err = ClientArgs::from_positional(args).unwrap_err();
        assert!(matches!(err, AppError::ArgumentArity { count: 5, .. }));
    }

    #[test]
    fn test_positional_url_must_come_first() {
        let err =
            ClientArgs::from_positional(vec![Options::new().into(), "tk_abc".into()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument { .. }));
    }

    #[test]
    fn test_url_injected_over_options() {
        let config = ClientArgs::UrlOptions {
            url: "https://push.example.com".to_string(),
            options: options(json!({ "url": "https://ignored.example.com", "topic": "t" })),
        }
        .resolve()
        .unwrap();

        assert_eq!(config.url, "https://push.example.com");
        assert_eq!(config.topic.as_deref(), Some("t"));
    }

    #[test]
    fn test_token_injected_over_options() {
        let config = ClientArgs::UrlTokenOptions {
            url: "https://push.example.com".to_string(),
            token: "tk_new".to_string(),
            options: options(json!({ "Token": "tk_old", "Cache": false })),
        }
        .resolve()
        .unwrap();

        assert_eq!(config.token.as_deref(), Some("tk_new"));
        assert!(!config.cache);
    }

    #[test]
    fn test_from_toml() {
        let options = Options::from_toml_str(
            r#"
            url = "https://push.example.com"
            topic = "builds"
            Tags = ["ci"]
            priority = 4
            "#,
        )
        .unwrap();
        let config = Config::resolve(&options).unwrap();

        assert_eq!(config.url, "https://push.example.com");
        assert_eq!(config.topic.as_deref(), Some("builds"));
        assert_eq!(config.tags, vec!["ci"]);
        assert_eq!(config.priority, Priority::High);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Options::from_toml_file("/nonexistent/ntfy.toml").unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
