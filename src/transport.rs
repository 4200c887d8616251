use crate::config::GatewayConfig;

/// A single blocking request/response exchange with the simulator.
///
/// Implementations receive the query string only (`key=identifier[...]`);
/// joining it with the datalink endpoint is their concern.
pub trait Transport: Send + Sync {
    fn fetch(&self, query: &str) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("could not build HTTP client: {0}")]
    Client(String),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("simulator answered with HTTP status {0}")]
    Status(u16),
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// HTTP transport backed by a blocking `reqwest` client with a fixed timeout.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, query: &str) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}{}", self.base_url, query);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}
