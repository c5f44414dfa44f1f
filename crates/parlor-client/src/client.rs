//! The transport client: one blocking HTTP round trip per operation.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::envelope;
use crate::types::{Credential, Message};

/// Wire format, pinned: GET with URL query parameters, credential
/// carried as query parameters, JSON response bodies.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A transport operation failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure or non-2xx transport status.
    #[error("network failure: {0}")]
    Network(String),
    /// The server answered with a well-formed error envelope.
    #[error("server rejected request: {0}")]
    Rejected(String),
    /// A success body that does not decode into the expected shape.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Operations the chat service exposes.
///
/// The poller and the foreground loop are written against this trait;
/// tests substitute [`crate::fakes::FakeTransport`].
pub trait ChatTransport: Send {
    /// True iff the server accepts the stored credential.
    fn check_credential(&self) -> bool;

    fn list_rooms(&self) -> Result<Vec<String>, TransportError>;

    /// Fetch messages beyond `since` (the count already consumed).
    fn fetch_messages(&self, room: &str, since: usize) -> Result<Vec<Message>, TransportError>;

    fn send_message(&self, room: &str, text: &str) -> Result<(), TransportError>;

    fn create_room(&self, name: &str) -> Result<(), TransportError>;

    fn create_user(&self, username: &str, password: &str) -> Result<(), TransportError>;
}

/// The real client. Holds no state beyond the credential; every
/// operation is a single synchronous call with no retries.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: String,
    credential: Credential,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Result<Self, TransportError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| TransportError::Network(format!("building HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            credential,
        })
    }

    /// One round trip. Validates the transport status and the error
    /// envelope, returns the raw body on success.
    fn request(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, TransportError> {
        let url = endpoint_url(&self.base_url, endpoint);
        let mut query = self.credential.params();
        query.extend_from_slice(params);

        debug!(endpoint, "transport request");
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Network(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|err| TransportError::Network(err.to_string()))?;
        if let Some(reason) = envelope::rejection(&body) {
            return Err(TransportError::Rejected(reason));
        }
        Ok(body)
    }
}

fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

impl ChatTransport for HttpTransport {
    fn check_credential(&self) -> bool {
        self.request("api-manage", &[("action", "verify_user")]).is_ok()
    }

    fn list_rooms(&self) -> Result<Vec<String>, TransportError> {
        let body = self.request("api-manage", &[("action", "list_rooms")])?;
        Ok(serde_json::from_str(&body)?)
    }

    fn fetch_messages(&self, room: &str, since: usize) -> Result<Vec<Message>, TransportError> {
        let since = since.to_string();
        let body = self.request("get_messages", &[("room", room), ("since", &since)])?;
        let records: Vec<Value> = serde_json::from_str(&body)?;
        Ok(records.iter().map(Message::from_record).collect())
    }

    fn send_message(&self, room: &str, text: &str) -> Result<(), TransportError> {
        self.request("api-send", &[("room", room), ("message", text)])?;
        Ok(())
    }

    fn create_room(&self, name: &str) -> Result<(), TransportError> {
        self.request("api-manage", &[("action", "create_room"), ("room", name)])?;
        Ok(())
    }

    fn create_user(&self, username: &str, password: &str) -> Result<(), TransportError> {
        self.request(
            "api-manage",
            &[
                ("action", "new_user"),
                ("username", username),
                ("password", password),
            ],
        )?;
        Ok(())
    }
}
