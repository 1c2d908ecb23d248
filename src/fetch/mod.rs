//! UserSource trait and response decoding.
//!
//! Decouples the pipeline from the HTTP client so tests can feed canned
//! user lists, and keeps body decoding a pure function.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::RemoteUser;

pub use http::HttpUserSource;

/// Errors while obtaining the user list.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not complete or returned a non-success status.
    #[error("{0}")]
    Transport(String),

    /// The body is not a JSON array.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// Source of remote user records.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetch the full list of users, in the order the source returns them.
    async fn fetch_users(&self) -> Result<Vec<RemoteUser>, FetchError>;
}

/// Decode a response body into user records.
///
/// The body must be a JSON array. Elements that are objects are read
/// leniently; any other element becomes a record with every field absent.
pub fn decode_users(body: &str) -> Result<Vec<RemoteUser>, FetchError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(FetchError::Decode(format!(
            "expected a JSON array, got {}",
            json_kind(&value)
        )));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => {
                serde_json::from_value(item).map_err(|e| FetchError::Decode(e.to_string()))
            }
            _ => Ok(RemoteUser::default()),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
