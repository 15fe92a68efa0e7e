pub mod envelope;

use super::Timestamp;
use chrono::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

// Leading numeric prefix of a reading string, as in "72.5° F"
const LEADING_FLOAT: &str = r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?";
// A whole string that reads as a number, surrounding blanks allowed
const NUMERIC: &str = r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$";

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMERIC).expect("numeric pattern"))
}

/// Sensor identifier as sent by the API, either a JSON number or a string.
///
/// Comparison is loose: `1`, `"1"` and `"1.0"` all name the same sensor.
/// Strings that are not plain decimal numbers compare as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorId {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(x) => x,
        }
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl SensorId {
    /// No id at all: an empty string, `"0"` or zero.
    pub fn is_empty(&self) -> bool {
        match self {
            SensorId::Number(n) => n.as_f64() == Some(0.0),
            SensorId::Text(s) => s.is_empty() || s == "0",
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            SensorId::Number(n) => n
                .as_i64()
                .map(|i| Numeric::Int(i.into()))
                .or_else(|| n.as_u64().map(|u| Numeric::Int(u.into())))
                .or_else(|| n.as_f64().map(Numeric::Float)),
            SensorId::Text(s) if numeric_re().is_match(s) => {
                let s = s.trim();
                match s.parse::<i128>() {
                    Ok(i) => Some(Numeric::Int(i)),
                    Err(_) => s.parse::<f64>().ok().map(Numeric::Float),
                }
            }
            SensorId::Text(_) => None,
        }
    }
}

impl PartialEq for SensorId {
    fn eq(&self, other: &Self) -> bool {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorId::Number(n) => write!(f, "{n}"),
            SensorId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for SensorId {
    fn from(n: i32) -> Self {
        SensorId::Number(n.into())
    }
}

impl From<i64> for SensorId {
    fn from(n: i64) -> Self {
        SensorId::Number(n.into())
    }
}

impl From<u64> for SensorId {
    fn from(n: u64) -> Self {
        SensorId::Number(n.into())
    }
}

impl From<&str> for SensorId {
    fn from(s: &str) -> Self {
        SensorId::Text(s.into())
    }
}

impl From<String> for SensorId {
    fn from(s: String) -> Self {
        SensorId::Text(s)
    }
}

/// One sensor as returned by `SensorList` / `SensorGet`.
/// Only `SensorID` and `CurrentReading` are interpreted; the rest is kept as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    #[serde(rename = "SensorID")]
    pub sensor_id: SensorId,
    #[serde(rename = "CurrentReading", default)]
    pub current_reading: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SensorRecord {
    pub fn new(sensor_id: impl Into<SensorId>, current_reading: impl Into<Value>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            current_reading: current_reading.into(),
            extra: Map::new(),
        }
    }

    /// `CurrentReading` as a float. Strings contribute their leading
    /// numeric part; anything unparseable reads as 0.
    pub fn reading(&self) -> f64 {
        match &self.current_reading {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => leading_float(s),
            Value::Bool(true) => 1.0,
            _ => 0.0,
        }
    }
}

fn leading_float(s: &str) -> f64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(LEADING_FLOAT).expect("reading pattern"));
    match re.find(s) {
        Some(m) => m.as_str().trim().parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    }
}

/// The last set of sensors fetched by a client
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    records: Vec<SensorRecord>,
    fetched_at: Timestamp,
}

impl ResultSet {
    pub fn new(records: Vec<SensorRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }

    pub fn fetched_at(&self) -> Timestamp {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensorRecord> {
        self.records.iter()
    }

    /// First record whose id matches.
    pub fn find(&self, id: &SensorId) -> Option<&SensorRecord> {
        self.records.iter().find(|r| r.sensor_id == *id)
    }
}
