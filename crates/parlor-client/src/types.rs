//! Domain types shared by the transport and the rest of the client.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// A single chat message as returned by the server.
///
/// `timestamp` is the server-assigned ordering key and `id` is opaque;
/// both are carried as text and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: String,
    pub content: String,
    pub timestamp: String,
    pub id: String,
}

/// A record failed to decode into a [`Message`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record is missing field `{0}`")]
    MissingField(&'static str),
}

impl Message {
    /// Decode one server record, falling back to a sentinel message on
    /// malformed input so one bad record never aborts the batch.
    pub fn from_record(record: &Value) -> Self {
        Self::parse_record(record).unwrap_or_else(|err| {
            tracing::debug!(%err, "unparsable message record");
            Self::unreadable()
        })
    }

    /// Strict decode. Records arrive either as JSON objects or as
    /// JSON-encoded strings containing an object; field names vary by
    /// server deployment (`timestamp`/`created`, `message_id`/`id`).
    pub fn parse_record(record: &Value) -> Result<Self, DecodeError> {
        // Double-encoded variant: the array element is a string
        // holding the actual object.
        let inner;
        let obj = match record {
            Value::String(text) => {
                inner = serde_json::from_str::<Value>(text)
                    .ok()
                    .ok_or(DecodeError::NotAnObject)?;
                inner.as_object().ok_or(DecodeError::NotAnObject)?
            }
            other => other.as_object().ok_or(DecodeError::NotAnObject)?,
        };

        let field = |names: &[&'static str]| {
            names
                .iter()
                .find_map(|name| obj.get(*name))
                .and_then(Value::as_str)
                .map(str::to_owned)
        };

        Ok(Self {
            author: field(&["author"]).ok_or(DecodeError::MissingField("author"))?,
            content: field(&["content"]).ok_or(DecodeError::MissingField("content"))?,
            timestamp: field(&["timestamp", "created"])
                .ok_or(DecodeError::MissingField("timestamp"))?,
            id: field(&["message_id", "id"]).ok_or(DecodeError::MissingField("message_id"))?,
        })
    }

    /// The sentinel produced for a malformed record.
    pub fn unreadable() -> Self {
        Self {
            author: String::new(),
            content: "error loading message".to_owned(),
            timestamp: String::new(),
            id: String::new(),
        }
    }

    /// Display form appended to the terminal stream.
    pub fn render_line(&self) -> String {
        format!("{}: {}", self.author, self.content)
    }
}

/// Server credential, passed unchanged with every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Token(String),
    Login { username: String, password: String },
}

impl Credential {
    /// Query parameters carrying this credential.
    pub(crate) fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Token(token) => vec![("token", token.as_str())],
            Self::Login { username, password } => {
                vec![("username", username.as_str()), ("password", password.as_str())]
            }
        }
    }
}

// Manual Debug: credentials must not end up in trace files.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(_) => f.write_str("Credential::Token(..)"),
            Self::Login { username, .. } => f
                .debug_struct("Credential::Login")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}
