mod common;

use common::{header_names, recording_client};
use ntfy_publish::{
    AppError, ClientArgs, Credential, CtorArg, MessageFields, MessageInput, NtfyClient, Options,
    Priority, TextMessage, UrlAttachMessage,
};
use serde_json::json;
use std::io::Write;

fn options(value: serde_json::Value) -> Options {
    Options::try_from(value).unwrap()
}

#[tokio::test]
async fn test_full_send_call() {
    let (client, transport) = recording_client(options(json!({ "Cache": false })));

    let reply = client
        .make_action(
            "http",
            "Reply",
            options(json!({ "url": "https://ntfy.sh/test", "headers": { "Message": "reply" } })),
            true,
        )
        .unwrap();
    let search = client
        .make_action("view", "Search", "https://example.com", true)
        .unwrap();

    let response = client
        .send(vec![
            "test".into(),
            options(json!({
                "Title": "The Title",
                "Message": "The Content",
                "Priority": Priority::High.as_u8(),
                "Icon": "https://example.com/logo.png",
                "Delay": 0,
                "Markdown": false,
                "Tags": ["rocket", "house"],
                "Attach": "https://example.com/img/result.png",
                "Filename": ""
            }))
            .into(),
            "https://bing.com".into(),
            search.clone().into(),
            reply.clone().into(),
        ])
        .await
        .unwrap();

    assert_eq!(response["topic"], "test");

    let request = transport.last();
    assert_eq!(request.url.as_str(), "https://ntfy.sh/test");
    assert_eq!(
        header_names(&request),
        vec![
            "Title", "Message", "Priority", "Icon", "Cache", "Markdown", "Tags", "Attach",
            "Filename", "Click", "Actions",
        ]
    );
    assert_eq!(request.header("Priority"), Some("4"));
    assert_eq!(request.header("Cache"), Some("no"));
    assert_eq!(request.header("Tags"), Some("rocket,house"));
    assert_eq!(request.header("Filename"), Some("result.png"));
    assert_eq!(
        request.header("Actions"),
        Some(
            "view,Search,https://example.com,clear=true;\
             http,Reply,https://ntfy.sh/test,headers.Message=reply,clear=true"
        )
    );
}

#[tokio::test]
async fn test_constructor_shapes_resolve_credentials() {
    let (client, _) = recording_client(ClientArgs::UrlCredentials {
        url: "https://push.example.com".to_string(),
        user: "user".to_string(),
        password: "pass".to_string(),
    });
    assert_eq!(
        client.credential(),
        Some(&Credential::Basic("dXNlcjpwYXNz".to_string()))
    );

    let (client, _) = recording_client(ClientArgs::UrlToken {
        url: "https://push.example.com".to_string(),
        token: "not-a-token".to_string(),
    });
    assert!(client.credential().is_none());

    let (client, _) = recording_client(ClientArgs::Full {
        url: "https://push.example.com".to_string(),
        user: "user".to_string(),
        password: "pass".to_string(),
        options: options(json!({ "Token": "tk_ignored", "topic": "t" })),
    });
    assert_eq!(client.credential().map(Credential::scheme), Some("Basic"));
    assert_eq!(client.config().topic.as_deref(), Some("t"));
}

#[test]
fn test_positional_constructor_arity() {
    let args: Vec<CtorArg> = vec![
        "https://a".into(),
        "b".into(),
        "c".into(),
        Options::new().into(),
        Options::new().into(),
    ];
    let err = NtfyClient::from_positional(args).unwrap_err();
    assert!(matches!(err, AppError::ArgumentArity { count: 5, .. }));
}

#[tokio::test]
async fn test_local_attachment_uploads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"file contents")
        .unwrap();

    let (client, transport) = recording_client(options(json!({ "topic": "uploads" })));
    client
        .send_message(options(json!({
            "message": "see attached",
            "attach": path.to_string_lossy()
        })))
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.body, b"file contents");
    assert_eq!(request.header("Filename"), Some("report.txt"));
    assert!(request.header("Attach").is_none());
}

#[tokio::test]
async fn test_missing_local_attachment_sends_nothing() {
    let (client, transport) = recording_client(options(json!({ "topic": "uploads" })));
    let err = client
        .send_message(options(json!({ "attach": "/nonexistent/file.bin" })))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Io { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_url_attachment_filename() {
    let (client, transport) = recording_client(options(json!({ "topic": "t" })));
    client
        .send_message(UrlAttachMessage::new("https://host/path/result.png").with_title("Pic"))
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.header("Filename"), Some("result.png"));
    assert_eq!(request.header("Title"), Some("Pic"));
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_unsupported_action_kind() {
    let (client, _) = recording_client(ClientArgs::Defaults);
    let err = client
        .make_action("view", "Open", options(json!({ "url": "https://x" })), true)
        .unwrap_err();
    assert!(matches!(err, AppError::UnsupportedActionKind { .. }));
}

#[tokio::test]
async fn test_concurrent_sends_are_independent() {
    let (client, transport) = recording_client(options(json!({ "topic": "default" })));

    let sends = (0..8).map(|i| {
        let client = client.clone();
        tokio::spawn(async move {
            let message: MessageInput = TextMessage::new(format!("message {i}")).into();
            client.send(vec![format!("topic-{i}").into(), message]).await
        })
    });

    for handle in sends.collect::<Vec<_>>() {
        handle.await.unwrap().unwrap();
    }

    let mut topics: Vec<String> = transport
        .requests()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    topics.sort();
    assert_eq!(topics.len(), 8);
    assert_eq!(topics[0], "/topic-0");

    for request in transport.requests() {
        let topic = request.url.path().trim_start_matches("/topic-").to_string();
        assert_eq!(request.header("Message"), Some(format!("message {topic}").as_str()));
    }
}

#[tokio::test]
async fn test_leading_message_with_click_uses_default_topic() {
    let (client, transport) = recording_client(options(json!({ "topic": "ops" })));
    client
        .send(vec!["disk full".into(), "https://status.example.com".into()])
        .await
        .unwrap();

    let request = transport.last();
    assert_eq!(request.url.path(), "/ops");
    assert_eq!(request.header("Message"), Some("disk full"));
    assert_eq!(request.header("Click"), Some("https://status.example.com"));
}
