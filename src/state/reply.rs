use serde::Serialize;

use crate::errors::KvError;
use crate::state::command::Method;

/// Outcome of a command, serialized as the `/req` response body.
///
/// A field is written only when it carries something for the operation
/// that produced it; absent and empty fields are both left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reply {
    #[serde(skip_serializing_if = "is_blank")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub error: Option<String>,
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

impl Reply {
    /// Empty reply echoing the method name.
    pub fn for_method(method: Method) -> Self {
        Self {
            method: Some(method.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Reply carrying only an error, as used for unknown methods and
    /// transport failures.
    pub fn bare_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn error(mut self, err: KvError) -> Self {
        self.error = Some(err.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        !is_blank(&self.error)
    }
}

impl From<KvError> for Reply {
    fn from(err: KvError) -> Self {
        Reply::bare_error(err.to_string())
    }
}
