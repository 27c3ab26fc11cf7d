use std::fmt;

use serde::Deserialize;

/// Operation named by a request body. Any string that is not one of the
/// four known names, including a missing `method`, lands on `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Method {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "SET")]
    Set,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "EXISTS")]
    Exists,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Method {
    /// Recognized methods, in the order they are advertised to clients.
    pub const KNOWN: [Method; 4] = [Method::Get, Method::Set, Method::Delete, Method::Exists];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Set => "SET",
            Method::Delete => "DELETE",
            Method::Exists => "EXISTS",
            Method::Unknown => "",
        }
    }

    /// Comma-joined list of recognized methods, e.g. `GET,SET,DELETE,EXISTS`.
    pub fn allowed() -> String {
        Self::KNOWN
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `/req` body. Lives for a single request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Command {
    #[serde(default)]
    pub method: Method,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl Command {
    pub fn new(method: Method, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            method,
            key: key.into(),
            value: value.into(),
        }
    }
}
