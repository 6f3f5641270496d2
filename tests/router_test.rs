use std::time::Duration;

use log::*;
use spacebot::{fake::FakeServer, *};

#[test]
fn bot_commands() {
    assert!(is_command("/status", "status", None));
    assert!(is_command("/status jetzt bitte", "status", None));
    assert!(is_command("/status@spacebot", "status", Some("spacebot")));
    assert!(is_command("/status@SpaceBot", "status", Some("spacebot")));
    assert!(is_command("/status@spacebot", "status", None));

    assert!(!is_command("/status@otherbot", "status", Some("spacebot")));
    assert!(!is_command("/statusquo", "status", None));
    assert!(!is_command("status", "status", None));
    assert!(!is_command("what is the /status", "status", None));
    assert!(!is_command("", "status", None));
}

#[test]
fn decodes_replies() {
    let body = r#"{"ok":true,"result":[{"update_id":7,"message":{
        "message_id":12,"date":1700000000,"chat":{"id":-100,"type":"supergroup"},
        "from":{"id":1,"is_bot":false,"first_name":"qubyte"},"text":"/status",
        "reply_to_message":{"message_id":11,"date":1699999999,
            "chat":{"id":-100,"type":"supergroup"},"text":"Tür: offen"}}}]}"#;

    let updates = serde_json::from_str::<ApiResponse<Vec<api::Update>>>(body)
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(updates.len(), 1);
    let message = updates[0].message().unwrap();
    assert_eq!(message.text.as_deref(), Some("/status"));
    let replied = message.reply_to_message.as_ref().unwrap();
    assert_eq!(replied.message_id, 11);
    assert_eq!(replied.text.as_deref(), Some("Tür: offen"));
}

#[test]
fn telegram_errors_are_unwrapped() {
    let response: ApiResponse<bool> = ApiResponse::Err("Unauthorized");
    assert_eq!(
        response.into_result().unwrap_err().to_string(),
        "Telegram error: Unauthorized"
    );

    let response: ApiResponse<bool> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
    assert!(matches!(
        response.into_result(),
        Err(ApiError::MissingResult)
    ));
}

async fn ping(e: Event, _: State<()>) -> Result<Action, anyhow::Error> {
    let text = e.update.message()?.text.clone().unwrap_or_default();
    info!("ping: {}", text);
    Ok(Action::ReplyText(format!("pong: {}", text)))
}

async fn recv(chat: &fake::FakeChat) -> Option<String> {
    tokio::time::timeout(Duration::from_secs(5), chat.recv_text())
        .await
        .ok()
        .flatten()
}

async fn assert_silent(chat: &fake::FakeChat) {
    assert!(
        tokio::time::timeout(Duration::from_millis(500), chat.recv_message())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn routes_commands() {
    spacebot::init_logger();
    let fakeserver = FakeServer::new();
    let client = Client::new("token").with_post_handler(fakeserver.clone());

    // Keep the timeout short for testing.
    let mut router = Router::new(client, ())
        .with_poll_timeout_s(1)
        .with_bot_username("spacebot");
    let (shutdown_notifier, shutdown_tx) = router.shutdown();

    router
        .add_route(Route::Command("ping".into()), ping)
        .add_route(Route::Command("boo".into()), ping);

    tokio::spawn(async move {
        info!("Starting router...");
        router.start().await;
    });

    let chat = fakeserver.api.create_chat("qubyte").await;

    chat.send_text("hello").await.unwrap();
    assert_silent(&chat).await;

    chat.send_text("/ping").await.unwrap();
    assert_eq!(recv(&chat).await.unwrap(), "pong: /ping");

    chat.send_text("/ping@otherbot").await.unwrap();
    assert_silent(&chat).await;

    chat.send_text("/ping@spacebot").await.unwrap();
    assert_eq!(recv(&chat).await.unwrap(), "pong: /ping@spacebot");

    chat.send_text("/boo hoo").await.unwrap();
    assert_eq!(recv(&chat).await.unwrap(), "pong: /boo hoo");

    info!("Shutting down...");
    shutdown_tx.send(()).await.unwrap();
    shutdown_notifier.notified().await;
}

#[tokio::test]
async fn multiple_chats() {
    spacebot::init_logger();
    let fakeserver = FakeServer::new();
    let client = Client::new("token").with_post_handler(fakeserver.clone());

    let mut router = Router::new(client, ()).with_poll_timeout_s(1);
    let (shutdown_notifier, shutdown_tx) = router.shutdown();
    router.add_route(Route::Default, ping);

    tokio::spawn(async move {
        router.start().await;
    });

    let chat1 = fakeserver.api.create_chat("qubyte").await;
    let chat2 = fakeserver.api.create_chat("qubyte").await;

    chat1.send_text("ping1").await.unwrap();
    assert_eq!(recv(&chat1).await.unwrap(), "pong: ping1");

    chat2.send_text("ping2").await.unwrap();
    assert_eq!(recv(&chat2).await.unwrap(), "pong: ping2");

    shutdown_tx.send(()).await.unwrap();
    shutdown_notifier.notified().await;
}

#[tokio::test]
async fn done_stops_the_chain() {
    spacebot::init_logger();
    let fakeserver = FakeServer::new();
    let client = Client::new("token").with_post_handler(fakeserver.clone());

    let mut router = Router::new(client, ()).with_poll_timeout_s(1);
    let (shutdown_notifier, shutdown_tx) = router.shutdown();
    router
        .add_route(Route::Default, handlers::log_handler)
        .add_route(
            Route::Command("stop".into()),
            |_: Event, _: State<()>| async move { Ok(Action::Done) },
        )
        .add_route(Route::Default, ping);

    tokio::spawn(async move {
        router.start().await;
    });

    let chat = fakeserver.api.create_chat("qubyte").await;

    chat.send_text("/stop").await.unwrap();
    assert_silent(&chat).await;

    chat.send_text("go").await.unwrap();
    assert_eq!(recv(&chat).await.unwrap(), "pong: go");

    shutdown_tx.send(()).await.unwrap();
    shutdown_notifier.notified().await;
}

#[tokio::test]
async fn replies_keep_the_router_polling() {
    spacebot::init_logger();
    let fakeserver = FakeServer::new();
    let client = Client::new("token").with_post_handler(fakeserver.clone());

    let mut router = Router::new(client, ()).with_poll_timeout_s(1);
    let (shutdown_notifier, shutdown_tx) = router.shutdown();
    router.add_route(Route::Command("ping".into()), ping);

    tokio::spawn(async move {
        router.start().await;
    });

    let chat = fakeserver.api.create_chat("qubyte").await;

    chat.send_text("/ping").await.unwrap();
    let pong = tokio::time::timeout(Duration::from_secs(5), chat.recv_message())
        .await
        .unwrap()
        .unwrap();

    chat.send_reply("nice", &pong).await.unwrap();
    assert_silent(&chat).await;

    chat.send_reply("/ping again", &pong).await.unwrap();
    assert_eq!(recv(&chat).await.unwrap(), "pong: /ping again");

    chat.send_text("/ping").await.unwrap();
    assert_eq!(recv(&chat).await.unwrap(), "pong: /ping");

    shutdown_tx.send(()).await.unwrap();
    shutdown_notifier.notified().await;
}

#[tokio::test]
async fn telegram_errors_are_reported() {
    let fakeserver = FakeServer::new();
    let api = API::new(Client::new("token").with_post_handler(fakeserver));

    // The fake server only knows chats it created.
    let err = api
        .send_message(&api::SendMessageRequest::new(1, "hello"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("chat not found"), "{}", err);
}
