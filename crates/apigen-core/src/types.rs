//! Strong domain types shared across the pipeline.
//!
//! # Examples
//!
//! ```
//! use apigen_core::HttpMethod;
//!
//! let method: HttpMethod = "HttpGet".parse().unwrap();
//! assert_eq!(method, HttpMethod::Get);
//! assert!(method.is_query());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP verb of a controller action.
///
/// Only the four verbs the generator understands are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `[HttpGet]`
    Get,
    /// `[HttpPost]`
    Post,
    /// `[HttpPut]`
    Put,
    /// `[HttpDelete]`
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case verb.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns the lower-case client method name (`get`, `post`, ...).
    #[must_use]
    pub const fn client_method(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` for read-only verbs that become query bindings.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::Get)
    }

    /// Maps an attribute name such as `HttpPost` to a verb.
    ///
    /// A trailing `Attribute` suffix is accepted, as C# allows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::from_attribute("HttpPut"), Some(HttpMethod::Put));
    /// assert_eq!(
    ///     HttpMethod::from_attribute("HttpDeleteAttribute"),
    ///     Some(HttpMethod::Delete)
    /// );
    /// assert_eq!(HttpMethod::from_attribute("HttpPatch"), None);
    /// assert_eq!(HttpMethod::from_attribute("Route"), None);
    /// ```
    #[must_use]
    pub fn from_attribute(name: &str) -> Option<Self> {
        let name = name.strip_suffix("Attribute").unwrap_or(name);
        match name {
            "HttpGet" => Some(Self::Get),
            "HttpPost" => Some(Self::Post),
            "HttpPut" => Some(Self::Put),
            "HttpDelete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(method) = Self::from_attribute(s) {
            return Ok(method);
        }
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(crate::Error::InvalidArgument(format!(
                "unsupported HTTP method: '{s}'"
            ))),
        }
    }
}
