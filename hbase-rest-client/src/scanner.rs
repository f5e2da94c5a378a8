//! Server-side scanner handle.

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use hbase_rest_common::CellSet;

use crate::client::parse_json;
use crate::error::{Error, Result};

/// An open scanner on the gateway, addressed by the URL the gateway
/// returned when it was created.
///
/// Call [`Scanner::close`] when done. A scanner dropped while still open
/// schedules its own deletion on the current tokio runtime.
#[derive(Debug)]
pub struct Scanner {
    http_client: Client,
    location: String,
    closed: bool,
}

impl Scanner {
    pub(crate) fn new(http_client: Client, location: String) -> Self {
        Self {
            http_client,
            location,
            closed: false,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Fetch the next batch of cells, still base64-encoded.
    ///
    /// An exhausted scanner answers 204 and yields an empty set.
    pub async fn fetch(&self) -> Result<CellSet> {
        tracing::debug!(method = "GET", url = %self.location, "Gateway request");

        let response = self
            .http_client
            .get(&self.location)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Communication(e.to_string()))?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(CellSet::default()),
            status if status.is_success() => parse_json(response).await,
            status => Err(Error::UnexpectedStatus(status)),
        }
    }

    /// Delete the scanner on the gateway and return the response status.
    ///
    /// If the returned future is dropped before the DELETE completes, the
    /// scanner still counts as open and `Drop` retries the deletion.
    pub async fn close(mut self) -> Result<StatusCode> {
        tracing::debug!(method = "DELETE", url = %self.location, "Gateway request");

        let sent = self
            .http_client
            .delete(&self.location)
            .header(ACCEPT, "application/json")
            .send()
            .await;
        self.closed = true;

        let response = sent.map_err(|e| Error::Communication(e.to_string()))?;
        Ok(response.status())
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let location = std::mem::take(&mut self.location);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!("Scanner {} dropped without close, deleting", location);
                let http_client = self.http_client.clone();
                handle.spawn(async move {
                    if let Err(e) = http_client.delete(&location).send().await {
                        tracing::warn!("Failed to delete scanner {}: {}", location, e);
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    "Scanner {} dropped outside a runtime, left open on the gateway",
                    location
                );
            }
        }
    }
}
