//! Publishing client and its transport seam
//!
//! ## Architecture
//!
//! - **NtfyClient**: resolves configuration and credential once, then turns
//!   each send call into one [`PublishRequest`]
//! - **Transport**: executes a request and decodes the JSON response
//! - **ReqwestTransport**: the default HTTP transport
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ntfy_publish::clients::NtfyClient;
//! use ntfy_publish::config::Options;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ntfy_publish::AppError> {
//! let client = NtfyClient::new(Options::new().with("Topic", "alerts"))?;
//! let response = client.send_message("Backup finished").await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

pub mod ntfy;
pub mod traits;
pub mod transport;

pub use ntfy::NtfyClient;
pub use traits::{PublishRequest, Transport};
pub use transport::ReqwestTransport;
