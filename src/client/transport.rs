use crate::error::Result;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;

/// Status line and body of a finished HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs one blocking GET. Failures at this level are transport
/// failures; any status code is a valid response.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RawResponse>;
}

/// reqwest backed transport. A new client is built for every request
/// and redirects are not followed.
#[derive(Debug, Default, Clone)]
pub struct HttpTransport;

impl HttpTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse> {
        let client = Client::builder().redirect(Policy::none()).build()?;
        let response = client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<RawResponse> {
        (**self).get(url)
    }
}
