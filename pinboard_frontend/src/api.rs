use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::models::ImageRecord;

#[derive(Clone)]
pub struct ApiClient {
    endpoint: String,
    client: Client,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `GET <endpoint>`; any non-2xx status or malformed body is an error.
    pub fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()?
            .error_for_status()?;
        let body = response.bytes()?;
        Ok(parse_catalog(&body)?)
    }

    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

pub fn parse_catalog(body: &[u8]) -> serde_json::Result<Vec<ImageRecord>> {
    serde_json::from_slice(body)
}
