//! Ntfy Publish Library
//!
//! A client for publishing push notifications to ntfy topics. Callers pass
//! plain strings, option bags or typed messages; the client resolves them
//! against its configuration, encodes action buttons and issues one `PUT`
//! request per send.

pub mod action;
pub mod auth;
pub mod clients;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod message;

// Re-export commonly used types for convenience
pub use action::{make_action, Action, ActionKind, ActionTarget};
pub use auth::Credential;
pub use clients::{NtfyClient, PublishRequest, ReqwestTransport, Transport};
pub use config::{ClientArgs, Config, CtorArg, Options, Priority};
pub use dispatch::Dispatch;
pub use errors::{AppError, AppResult};
pub use message::{
    LocalAttachMessage, Message, MessageFields, MessageInput, TextMessage, UrlAttachMessage,
};
