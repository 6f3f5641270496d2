use super::{Sensors, StatusDocument};

/// Renders the status line for `location`: door first, then temperature,
/// humidity and CO2. A sensor is left out unless a reading was taken at
/// exactly `location`.
///
/// ```
/// use spacebot::status::{format_status, StatusDocument};
///
/// let doc: StatusDocument = serde_json::from_str(
///     r#"{"state":{"open":true},"sensors":{"temperature":[{"location":"office","unit":"°C","value":21.3}]}}"#,
/// ).unwrap();
/// assert_eq!(format_status(&doc, "office"), "Tür: offen, Temperatur: 21.3°C");
/// ```
pub fn format_status(doc: &StatusDocument, location: &str) -> String {
    let door = match doc.door_open() {
        Some(true) => "offen",
        Some(false) => "geschlossen",
        None => "unbekannt",
    };

    let mut parts = vec![format!("Tür: {}", door)];

    if let Some(sensors) = &doc.sensors {
        if let Some(r) = Sensors::at(&sensors.temperature, location) {
            parts.push(format!("Temperatur: {:.1}{}", r.value, r.unit));
        }
        if let Some(r) = Sensors::at(&sensors.humidity, location) {
            parts.push(format!("Luftfeuchtigkeit: {:.0}{}", r.value, r.unit));
        }
        if let Some(r) = Sensors::at(&sensors.co2, location) {
            parts.push(format!("CO2: {:.0}{}", r.value, r.unit));
        }
    }

    parts.join(", ")
}
