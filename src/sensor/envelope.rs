// Response envelope of the Monnit JSON API: {"Result": ...}
use super::{ResultSet, SensorRecord};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const INVALID_AUTH_TOKEN: &str = "Invalid Authorization Token";
pub const INVALID_SENSOR_ID: &str = "Invalid SensorID";

/// What the API put under `Result`: data, or an error message
/// sent with a 200 status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Records(Vec<SensorRecord>),
    Record(SensorRecord),
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(rename = "Result")]
    pub result: Payload,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Decodes a response body. Known sentinel strings become errors here,
    /// so a returned envelope never carries one.
    pub fn decode(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let envelope: Envelope = serde_json::from_value(value)?;
        envelope.check()
    }

    fn check(self) -> Result<Self> {
        match &self.result {
            Payload::Message(msg) if msg == INVALID_AUTH_TOKEN => {
                Err(Error::Authorization(msg.clone()))
            }
            Payload::Message(msg) if msg == INVALID_SENSOR_ID => Err(Error::NotFound(msg.clone())),
            _ => Ok(self),
        }
    }

    pub fn into_result_set(self) -> Result<ResultSet> {
        match self.result {
            Payload::Records(records) => Ok(ResultSet::new(records)),
            Payload::Record(record) => Ok(ResultSet::new(vec![record])),
            Payload::Message(msg) => Err(Error::UnexpectedResult(msg)),
        }
    }
}
