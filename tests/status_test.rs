use std::time::Duration;

use spacebot::{
    bot::{SpaceBot, STATUS_FALLBACK},
    markov::Chain,
    status::{format_status, HttpStatusSource, StatusDocument, StatusError, StatusSource},
};

fn doc(json: &str) -> StatusDocument {
    serde_json::from_str(json).unwrap()
}

const FULL: &str = r#"{
  "api": "0.13",
  "space": "K4CG",
  "state": { "open": false, "lastchange": 1600000000 },
  "sensors": {
    "temperature": [
      { "location": "Werkstatt", "unit": "°C", "value": 15.0 },
      { "location": "Lounge", "unit": "°C", "value": 19.04 },
      { "location": "Lounge", "unit": "°C", "value": 30.0 }
    ],
    "humidity": [ { "location": "Lounge", "unit": "%", "value": 45.6 } ],
    "carbondioxide": [ { "location": "Lounge", "unit": "ppm", "value": 812.4 } ]
  }
}"#;

#[test]
fn formats_door_and_temperature() {
    let doc = doc(
        r#"{"state":{"open":true},"sensors":{"temperature":[{"location":"office","unit":"°C","value":21.3}]}}"#,
    );
    assert_eq!(format_status(&doc, "office"), "Tür: offen, Temperatur: 21.3°C");
}

#[test]
fn formats_all_sensors_in_order() {
    assert_eq!(
        format_status(&doc(FULL), "Lounge"),
        "Tür: geschlossen, Temperatur: 19.0°C, Luftfeuchtigkeit: 46%, CO2: 812ppm"
    );
}

#[test]
fn first_matching_reading_wins() {
    assert!(format_status(&doc(FULL), "Lounge").contains("Temperatur: 19.0°C"));
    assert_eq!(
        format_status(&doc(FULL), "Werkstatt"),
        "Tür: geschlossen, Temperatur: 15.0°C"
    );
}

#[test]
fn unknown_door() {
    assert_eq!(format_status(&doc("{}"), "Lounge"), "Tür: unbekannt");
    assert_eq!(
        format_status(&doc(r#"{"state":{}}"#), "Lounge"),
        "Tür: unbekannt"
    );
    assert!(format_status(
        &doc(r#"{"sensors":{"humidity":[{"location":"Lounge","unit":"%","value":50}]}}"#),
        "Lounge"
    )
    .starts_with("Tür: unbekannt"));
}

#[test]
fn other_locations_are_left_out() {
    assert_eq!(format_status(&doc(FULL), "Keller"), "Tür: geschlossen");
}

#[test]
fn co2_alias() {
    let doc = doc(r#"{"sensors":{"co2":[{"location":"Lounge","unit":"ppm","value":400}]}}"#);
    assert_eq!(format_status(&doc, "Lounge"), "Tür: unbekannt, CO2: 400ppm");
}

/// Mocks the status endpoint and returns the mock, expecting one GET.
async fn mock_status(
    server: &mut mockito::ServerGuard,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", "/status.json")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

fn bot(url: &str) -> SpaceBot {
    let source = HttpStatusSource::new(url, Duration::from_secs(5)).unwrap();
    SpaceBot::new(Chain::default(), source, "Lounge")
}

#[tokio::test]
async fn fetches_and_formats() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_status(&mut server, 200, FULL).await;

    assert_eq!(
        bot(&format!("{}/status.json", server.url())).status_reply().await,
        "Tür: geschlossen, Temperatur: 19.0°C, Luftfeuchtigkeit: 46%, CO2: 812ppm"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_status_gives_fallback() {
    // Nothing listens on port 1.
    let bot = bot("http://127.0.0.1:1/status.json");

    assert!(matches!(bot.status.fetch().await, Err(StatusError::Http(_))));
    assert_eq!(bot.status_reply().await, STATUS_FALLBACK);
}

#[tokio::test]
async fn malformed_status_gives_fallback() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_status(&mut server, 200, "<html>503</html>").await;
    let bot = bot(&format!("{}/status.json", server.url()));

    assert_eq!(bot.status_reply().await, STATUS_FALLBACK);
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_gives_fallback() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_status(&mut server, 500, "{}").await;
    let source =
        HttpStatusSource::new(format!("{}/status.json", server.url()), Duration::from_secs(5))
            .unwrap();

    assert!(matches!(source.fetch().await, Err(StatusError::Http(_))));
    mock.assert_async().await;
}
