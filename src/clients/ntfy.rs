use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use super::traits::{PublishRequest, Transport};
use super::transport::ReqwestTransport;
use crate::action::{make_action, ActionTarget};
use crate::auth::{Credential, AUTHORIZATION_HEADER};
use crate::config::{ClientArgs, Config, CtorArg};
use crate::dispatch::{dispatch, Dispatch};
use crate::errors::{AppError, AppResult};
use crate::message::{MessageFactory, MessageInput};

/// Client for publishing notifications to ntfy topics
///
/// Configuration and credential are resolved once at construction and shared
/// read-only by every send, so one client can serve concurrent sends.
#[derive(Clone)]
pub struct NtfyClient {
    config: Arc<Config>,
    credential: Option<Credential>,
    transport: Arc<dyn Transport>,
}

impl NtfyClient {
    /// Create a client that talks HTTP through `reqwest`
    pub fn new(args: impl Into<ClientArgs>) -> AppResult<Self> {
        Self::with_transport(args, Arc::new(ReqwestTransport::new()?))
    }

    /// Create a client from positional constructor arguments
    pub fn from_positional(args: Vec<CtorArg>) -> AppResult<Self> {
        Self::new(ClientArgs::from_positional(args)?)
    }

    pub fn with_transport(
        args: impl Into<ClientArgs>,
        transport: Arc<dyn Transport>,
    ) -> AppResult<Self> {
        let args: ClientArgs = args.into();
        let config = args.resolve()?;
        let credential = Credential::resolve(&config);
        debug!(url = %config.url, topic = ?config.topic, "Created ntfy client");

        Ok(Self {
            config: Arc::new(config),
            credential,
            transport,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Encode an action button; see [`make_action`]
    pub fn make_action(
        &self,
        kind: &str,
        label: &str,
        target: impl Into<ActionTarget>,
        clear: bool,
    ) -> AppResult<String> {
        make_action(kind, label, target, clear)
    }

    /// Send with positional arguments: an optional leading topic, then the
    /// message, click target and encoded actions in any order
    pub async fn send(&self, args: Vec<MessageInput>) -> AppResult<Value> {
        let dispatch = dispatch(args, self.config.topic.as_deref())?;
        self.publish(dispatch).await
    }

    /// Send one message to the configured default topic
    pub async fn send_message(&self, message: impl Into<MessageInput>) -> AppResult<Value> {
        self.send(vec![message.into()]).await
    }

    pub async fn send_to(
        &self,
        topic: impl Into<String>,
        message: impl Into<MessageInput>,
    ) -> AppResult<Value> {
        let topic = topic.into();
        let topic = if topic.is_empty() {
            self.config.topic.clone().unwrap_or_default()
        } else {
            topic
        };
        self.publish(Dispatch::new(topic, message)).await
    }

    /// Publish an already-resolved send call
    pub async fn publish(&self, dispatch: Dispatch) -> AppResult<Value> {
        let topic = dispatch.topic.clone();
        let request = self.build_request(dispatch)?;
        let response = self.transport.execute(request).await?;

        info!(topic = %topic, "Published notification");
        Ok(response)
    }

    /// Assemble the outbound request without sending it
    pub fn build_request(&self, dispatch: Dispatch) -> AppResult<PublishRequest> {
        if dispatch.topic.is_empty() {
            return Err(AppError::MissingTopic);
        }

        let message = MessageFactory::new(&self.config).build(dispatch.message)?;
        let mut headers = Vec::new();

        if let Some(credential) = &self.credential {
            headers.push((AUTHORIZATION_HEADER.to_string(), credential.header_value()));
        }
        headers.extend(
            message
                .fields()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value)),
        );
        if let Some(click) = dispatch.click {
            headers.push(("Click".to_string(), click));
        }
        if !dispatch.actions.is_empty() {
            headers.push(("Actions".to_string(), dispatch.actions.join(";")));
        }

        Ok(PublishRequest {
            method: Method::PUT,
            url: self.build_url(&dispatch.topic)?,
            headers,
            body: message.body()?,
        })
    }

    fn build_url(&self, topic: &str) -> AppResult<Url> {
        let url = format!("{}/{}", self.config.url.trim_end_matches('/'), topic);
        Url::parse(&url).map_err(|e| AppError::InvalidUrl {
            url,
            source: Some(Box::new(e)),
        })
    }
}

impl std::fmt::Debug for NtfyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NtfyClient")
            .field("url", &self.config.url)
            .field("topic", &self.config.topic)
            .field("auth", &self.credential.as_ref().map(Credential::scheme))
            .finish()
    }
}
