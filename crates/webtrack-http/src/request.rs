//! Request descriptors and buffered responses.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use webtrack_core::Result;
use webtrack_core::error::{InvalidInputError, ProtocolError, TransportError};

/// Which dispatch of a request is being made.
///
/// A request is dispatched at most twice: once as sent by the caller and
/// once more after a successful token refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Original,
    Retry,
}

impl Attempt {
    /// The attempt that follows this one, if any remains.
    pub fn next(self) -> Option<Attempt> {
        match self {
            Attempt::Original => Some(Attempt::Retry),
            Attempt::Retry => None,
        }
    }
}

/// An outbound API call.
///
/// Requests are immutable once built; the gateway re-dispatches the same value
/// with a new bearer token when it retries.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request for a path relative to the API origin.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query parameter.
    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append query parameters from a serializable struct.
    ///
    /// Fields serializing to `null` are skipped, so `Option` filters that are
    /// `None` never reach the wire.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, params: &Q) -> Result<Self> {
        let value = serde_json::to_value(params).map_err(|e| InvalidInputError::Other {
            message: format!("query parameters: {}", e),
        })?;

        match value {
            serde_json::Value::Null => {}
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        serde_json::Value::Null => {}
                        serde_json::Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
            }
            _ => {
                return Err(InvalidInputError::Other {
                    message: "query parameters must serialize to an object".to_string(),
                }
                .into());
            }
        }

        Ok(self)
    }

    /// Attach a JSON body.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Other {
            message: format!("request body: {}", e),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach an extra header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| InvalidInputError::Header {
                name: name.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| InvalidInputError::Header {
            name: name.to_string(),
        })?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true for `401 Unauthorized`.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// The body as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let body: &[u8] = if self.body.is_empty() {
            b"null"
        } else {
            &self.body
        };

        serde_json::from_slice(body).map_err(|e| {
            TransportError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Turn a non-success response into a [`ProtocolError`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.protocol_error().into())
        }
    }

    /// Describe this response as a [`ProtocolError`].
    ///
    /// `detail` and `code` are read from a JSON error body when present. Bodies
    /// without `detail` (e.g. field validation errors) are kept verbatim.
    pub fn protocol_error(&self) -> ProtocolError {
        let status = self.status.as_u16();

        let Ok(serde_json::Value::Object(map)) =
            serde_json::from_slice::<serde_json::Value>(&self.body)
        else {
            return ProtocolError::new(status, None, None);
        };

        let code = map.get("code").and_then(|c| c.as_str()).map(str::to_string);
        let detail = match map.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None if map.is_empty() => None,
            None => Some(serde_json::Value::Object(map.clone()).to_string()),
        };

        ProtocolError::new(status, code, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            Bytes::from(body.to_string()),
        )
    }

    #[test]
    fn attempts_allow_one_retry() {
        assert_eq!(Attempt::Original.next(), Some(Attempt::Retry));
        assert_eq!(Attempt::Retry.next(), None);
    }

    #[derive(Serialize)]
    struct Filters {
        status: Option<&'static str>,
        project: Option<u32>,
        user: Option<u32>,
    }

    #[test]
    fn query_skips_missing_filters() {
        let request = ApiRequest::get("/timesheets/")
            .with_query(&Filters {
                status: Some("PENDING"),
                project: Some(7),
                user: None,
            })
            .unwrap();

        assert_eq!(
            request.query(),
            &[
                ("status".to_string(), "PENDING".to_string()),
                ("project".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn query_rejects_non_object() {
        assert!(ApiRequest::get("/x/").with_query(&[1, 2]).is_err());
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        assert!(ApiRequest::get("/x/").with_header("X-Test", "line\nbreak").is_err());
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let value: serde_json::Value = response(204, "").json().unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn protocol_error_reads_detail_and_code() {
        let err = response(
            401,
            r#"{"detail":"Given token not valid for any token type","code":"token_not_valid"}"#,
        )
        .protocol_error();

        assert_eq!(err.status, 401);
        assert_eq!(err.code.as_deref(), Some("token_not_valid"));
        assert_eq!(
            err.detail.as_deref(),
            Some("Given token not valid for any token type")
        );
    }

    #[test]
    fn protocol_error_keeps_field_errors() {
        let err = response(400, &json!({"end_date": ["This field is required."]}).to_string())
            .protocol_error();
        assert!(err.detail.unwrap().contains("end_date"));
    }

    #[test]
    fn protocol_error_tolerates_plain_text() {
        let err = response(500, "Internal Server Error").protocol_error();
        assert_eq!(err, ProtocolError::new(500, None, None));
    }

    #[test]
    fn error_for_status_passes_success_through() {
        assert!(response(200, "{}").error_for_status().is_ok());
        assert!(response(404, "{}").error_for_status().is_err());
    }
}
