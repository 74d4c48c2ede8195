//! JSON object request bodies, read field by field.
//!
//! Endpoints decode into a [`JsonObject`] instead of a typed struct so that
//! a missing required field is reported before a mistyped optional one.

use serde_json::{Map, Value};

use crate::api::ApiError;
use crate::request::Request;

pub(crate) struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Anything other than a `{...}` body is rejected here.
    pub(crate) fn from_request(req: &Request) -> Result<Self, ApiError> {
        match req.json::<Value>() {
            Ok(Value::Object(fields)) => Ok(Self(fields)),
            _ => Err(ApiError::Validation("request body must be a JSON object")),
        }
    }

    /// Absent, `null`, or a string with nothing but whitespace.
    pub(crate) fn is_blank(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// The field's value, treating `null` as absent.
    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub(crate) fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}
