//! HTTP response handling.

use crate::FetchError;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// A response with no headers, mostly for tests and fake transports.
    pub fn from_parts(status: u16, body: impl Into<Vec<u8>>) -> Result<Self, FetchError> {
        let status = StatusCode::from_u16(status)
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        Ok(Self::new(status, HeaderMap::new(), body))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the body is empty or only whitespace.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = match self.text() {
                Ok(text) if !text.trim().is_empty() => text,
                _ => self
                    .status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            };
            Err(FetchError::HttpError {
                status: self.status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::from_parts(status, body.to_vec()).unwrap()
    }

    // === Status Check Tests ===

    #[test]
    fn test_response_status_classes() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(!make_response(404, b"").is_success());
    }

    #[test]
    fn test_from_parts_rejects_bad_status() {
        assert!(Response::from_parts(42, Vec::new()).is_err());
    }

    // === Body Tests ===

    #[test]
    fn test_response_text() {
        let resp = make_response(200, b"Hello, World!");
        assert_eq!(resp.text().unwrap(), "Hello, World!");
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Data {
            value: i32,
        }

        let resp = make_response(200, br#"{"value": 42}"#);
        let data: Data = resp.json().unwrap();
        assert_eq!(data, Data { value: 42 });

        let resp = make_response(200, b"not json");
        assert!(matches!(
            resp.json::<Data>(),
            Err(FetchError::ParseError(_))
        ));
    }

    #[test]
    fn test_response_is_empty() {
        assert!(make_response(200, b"").is_empty());
        assert!(make_response(200, b" \n").is_empty());
        assert!(!make_response(200, b"null").is_empty());
    }

    // === error_for_status Tests ===

    #[test]
    fn test_response_error_for_status() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());

        let err = make_response(404, b"Not Found").error_for_status().unwrap_err();
        assert!(matches!(
            err,
            FetchError::HttpError { status: 404, ref message } if message == "Not Found"
        ));

        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }
}
