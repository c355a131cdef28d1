//! Publish one notification with a click target and two action buttons.
//!
//! ```text
//! RUST_LOG=ntfy_publish=debug cargo run --example publish -- my-topic
//! ```

use anyhow::Result;
use ntfy_publish::{NtfyClient, Options, Priority};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let topic = std::env::args().nth(1).unwrap_or_else(|| "test".to_string());

    // Defaults applied to every message this client sends
    let ntfy = NtfyClient::new(Options::new().with("Cache", false))?;

    let message = Options::try_from(json!({
        "Title": "The Title",
        "Message": "The Content",
        "Priority": Priority::High.as_u8(),
        "Tags": ["rocket", "house"],
        "Attach": "https://ntfy.sh/static/img/ntfy.png"
    }))?;

    let response = ntfy
        .send(vec![
            topic.into(),
            message.into(),
            "https://ntfy.sh".into(),
            ntfy.make_action("view", "Docs", "https://docs.ntfy.sh", true)?
                .into(),
            ntfy.make_action(
                "http",
                "Reply",
                Options::try_from(json!({
                    "url": "https://ntfy.sh/test",
                    "headers": { "Message": "reply" }
                }))?,
                true,
            )?
            .into(),
        ])
        .await?;

    println!("{response:#}");
    Ok(())
}
