use serde::{Deserialize, Serialize};

/// The parts of a SpaceAPI status document the bot reports on. Every field is
/// optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StatusDocument {
    #[serde(default)]
    pub state: Option<SpaceState>,

    #[serde(default)]
    pub sensors: Option<Sensors>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpaceState {
    /// Whether the door is open. `None` if the space doesn't know.
    #[serde(default)]
    pub open: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Sensors {
    #[serde(default)]
    pub temperature: Vec<SensorReading>,

    #[serde(default)]
    pub humidity: Vec<SensorReading>,

    #[serde(default, rename = "carbondioxide", alias = "co2")]
    pub co2: Vec<SensorReading>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SensorReading {
    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub unit: String,

    pub value: f64,
}

impl StatusDocument {
    pub fn door_open(&self) -> Option<bool> {
        self.state.as_ref().and_then(|s| s.open)
    }
}

impl Sensors {
    /// First reading in `readings` taken at `location`.
    pub fn at<'a>(readings: &'a [SensorReading], location: &str) -> Option<&'a SensorReading> {
        readings.iter().find(|r| r.location == location)
    }
}
