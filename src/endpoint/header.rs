//! Header items and built-in content types.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::transport::TransportError;

/// Built-in content types for the `Accept` and `Content-Type` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json`
    Json,
    /// `application/xml`
    Xml,
    /// `application/x-www-form-urlencoded`
    UrlEncoded,
}

impl ContentType {
    /// Returns the MIME type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::UrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    pub(crate) const fn header_value(self) -> HeaderValue {
        HeaderValue::from_static(self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the short names `json`, `xml` and `urlencoded`, or the full MIME type.
impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "application/json" => Ok(Self::Json),
            "xml" | "application/xml" => Ok(Self::Xml),
            "urlencoded" | "form" | "application/x-www-form-urlencoded" => Ok(Self::UrlEncoded),
            other => Err(format!(
                "unknown content type '{other}' (expected json, xml or urlencoded)"
            )),
        }
    }
}

/// A header to set on a request.
///
/// Applying an item sets the value for its name, replacing any value set
/// earlier. An item without a value removes the header instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderItem {
    /// Header name
    pub name: String,
    /// Header value, or `None` to remove the header
    pub value: Option<String>,
}

impl HeaderItem {
    /// Creates a header item.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Creates an item that sets `name` to `value`.
    #[must_use]
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Creates an item that removes `name`.
    #[must_use]
    pub fn remove(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates an `Authorization` header for HTTP basic authentication (RFC 7617).
    ///
    /// # Example
    ///
    /// ```
    /// use blocks_transport::endpoint::HeaderItem;
    ///
    /// let item = HeaderItem::basic_authentication("Aladdin", "open sesame");
    /// assert_eq!(item.value.as_deref(), Some("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="));
    /// ```
    #[must_use]
    pub fn basic_authentication(username: &str, password: &str) -> Self {
        let credentials = STANDARD.encode(format!("{username}:{password}"));
        Self::set(http::header::AUTHORIZATION.as_str(), format!("Basic {credentials}"))
    }

    /// Sets (or removes) this header in `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidHeader`] if the name or value is not
    /// legal HTTP.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<(), TransportError> {
        let name = HeaderName::from_bytes(self.name.as_bytes())
            .map_err(|e| self.invalid(e.to_string()))?;

        match &self.value {
            Some(value) => {
                let value =
                    HeaderValue::from_str(value).map_err(|e| self.invalid(e.to_string()))?;
                headers.insert(name, value);
            }
            None => {
                headers.remove(name);
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> TransportError {
        TransportError::InvalidHeader {
            name: self.name.clone(),
            reason,
        }
    }
}

/// Parses `Name: value` or `Name=value`.
impl FromStr for HeaderItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Whichever separator comes first wins, so values may contain the other.
        let split = s.find([':', '=']).ok_or_else(|| {
            format!("invalid header '{s}' (expected 'Name: value' or 'Name=value')")
        })?;
        let name = s[..split].trim();
        let value = &s[split + 1..];

        if name.is_empty() {
            return Err(format!("invalid header '{s}' (empty name)"));
        }

        Ok(Self::set(name, value.trim()))
    }
}
