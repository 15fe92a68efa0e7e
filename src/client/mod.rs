pub mod transport;

use super::error::{Error, Result};
use super::sensor::envelope::Envelope;
use super::sensor::{ResultSet, SensorId};
use super::statistics;
use tracing::{debug, info};
use transport::{HttpTransport, Transport};

pub const DEFAULT_BASE_URL: &str = "https://www.imonnit.com/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            auth_key: None,
        }
    }
}

impl ClientConfig {
    /// Empty keys are ignored, same as passing none.
    pub fn new(auth_key: Option<&str>) -> Self {
        Self {
            auth_key: auth_key.filter(|k| !k.is_empty()).map(String::from),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').into();
        self
    }

    fn key(&self) -> &str {
        self.auth_key.as_deref().unwrap_or("")
    }

    fn sensor_list_url(&self, application_id: Option<&SensorId>) -> String {
        let mut url = format!("{}/SensorList/{}", self.base_url, self.key());
        if let Some(id) = application_id.filter(|id| !id.is_empty()) {
            url.push_str(&format!("?applicationID={id}"));
        }
        url
    }

    fn sensor_get_url(&self, sensor_id: &SensorId) -> String {
        format!(
            "{}/SensorGet/{}?sensorID={}",
            self.base_url,
            self.key(),
            sensor_id
        )
    }

    // Keeps the key out of the logs: only the path segment that carries it
    fn redact(&self, url: &str) -> String {
        for endpoint in ["/SensorList/", "/SensorGet/"] {
            if let Some(pos) = url.find(endpoint) {
                let start = pos + endpoint.len();
                let end = url[start..].find('?').map_or(url.len(), |i| start + i);
                if start == end {
                    break;
                }
                return format!("{}<auth-key>{}", &url[..start], &url[end..]);
            }
        }
        url.into()
    }
}

/// Client for the Monnit sensor API.
///
/// Every read replaces the cached [`ResultSet`] on success and leaves it
/// alone on failure. Not synchronized: share it between threads behind a lock.
#[derive(Debug)]
pub struct SensorClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
    data: Option<ResultSet>,
}

impl SensorClient<HttpTransport> {
    pub fn new(auth_key: Option<&str>) -> Self {
        Self::with_transport(auth_key, HttpTransport::new())
    }
}

impl Default for SensorClient<HttpTransport> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T: Transport> SensorClient<T> {
    pub fn with_transport(auth_key: Option<&str>, transport: T) -> Self {
        Self::with_config(ClientConfig::new(auth_key), transport)
    }

    pub fn with_config(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            data: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_auth_key(&mut self, auth_key: &str) {
        self.config.auth_key = Some(auth_key.into());
    }

    /// Last successfully fetched sensors, `None` before the first read.
    pub fn data(&self) -> Option<&ResultSet> {
        self.data.as_ref()
    }

    /// Fetches every sensor on the account, optionally only those of one
    /// application (sensor type) id.
    pub fn read_all_sensors(&mut self, sensor_type: Option<&SensorId>) -> Result<()> {
        let url = self.config.sensor_list_url(sensor_type);
        let envelope = self.send_request(&url)?;
        self.store(envelope)
    }

    pub fn read_single_sensor(&mut self, sensor_id: &SensorId) -> Result<()> {
        if sensor_id.is_empty() {
            return Err(Error::InvalidArgument("no sensor ID was passed".into()));
        }
        let url = self.config.sensor_get_url(sensor_id);
        let envelope = self.send_request(&url)?;
        self.store(envelope)
    }

    /// Average reading of the cached sensors, or of those matching `ids`.
    pub fn average_temps(&self, ids: Option<&[SensorId]>) -> Result<f64> {
        let data = self.data.as_ref().ok_or(Error::EmptyState)?;
        statistics::average(data, ids)
    }

    pub fn summary(&self, ids: Option<&[SensorId]>) -> Result<statistics::Summary> {
        let data = self.data.as_ref().ok_or(Error::EmptyState)?;
        statistics::summary(data, ids)
    }

    fn store(&mut self, envelope: Envelope) -> Result<()> {
        let result_set = envelope.into_result_set()?;
        info!("Fetched {} sensor(s)", result_set.len());
        self.data = Some(result_set);
        Ok(())
    }

    fn send_request(&self, url: &str) -> Result<Envelope> {
        if url.is_empty() {
            return Err(Error::InvalidArgument("null or invalid request URL".into()));
        }
        debug!("GET {}", self.config.redact(url));
        let response = self.transport.get(url)?;
        if response.status != 200 {
            return Err(Error::HttpStatus(response.status));
        }
        debug!("Received {} bytes", response.body.len());
        Envelope::decode(&response.body)
    }
}
