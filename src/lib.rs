pub mod client;
pub mod error;
pub mod sensor;
pub mod statistics;

use chrono::prelude::*;
use dotenvy::dotenv;
use std::env;

pub use client::transport::{HttpTransport, RawResponse, Transport};
pub use client::{ClientConfig, SensorClient, DEFAULT_BASE_URL};
pub use error::{Error, ErrorKind, Result};
pub use sensor::{ResultSet, SensorId, SensorRecord};

pub type Timestamp = DateTime<Utc>;

const AUTH_KEY: &str = "MONNIT_AUTH_KEY";
const BASE_URL: &str = "MONNIT_BASE_URL";

fn get_env(name: &str) -> Option<String> {
    dotenv().ok();
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// API key from the environment or a `.env` file
pub fn get_auth_key() -> Option<String> {
    get_env(AUTH_KEY)
}

pub fn get_base_url() -> Option<String> {
    get_env(BASE_URL)
}
