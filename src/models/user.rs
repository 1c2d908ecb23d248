//! Records as returned by the users API.
//!
//! The payload is trusted but not validated: any field may be missing,
//! `null`, or of an unexpected type. Decoding never fails on a single field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A user record from the API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RemoteUser {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub username: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_company")]
    pub company: Option<RemoteCompany>,
}

/// The nested `company` object. Only its name is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteCompany {
    pub name: Option<String>,
}

impl RemoteUser {
    /// Name of the user's company, if both the company and its name are present.
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().and_then(|c| c.name.as_deref())
    }
}

/// Render a JSON value as text. `null` is absent, strings are taken as-is,
/// booleans are `True`/`False`, anything else keeps its compact JSON form.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value))
}

fn lenient_company<'de, D>(deserializer: D) -> Result<Option<RemoteCompany>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(RemoteCompany {
            name: map.get("name").and_then(text_of),
        }),
        _ => None,
    })
}
