//! Incoming HTTP request type.

use bytes::Bytes;
use http::{Extensions, HeaderMap, HeaderName, HeaderValue, Method, Uri};
use http_body_util::BodyExt;

use crate::error::Error;

/// An incoming HTTP request with its body fully read.
///
/// Decorators may annotate a request before delegating, typically through
/// [`extensions_mut`](Request::extensions_mut), and inner layers read those
/// annotations back out.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    extensions: Extensions,
}

impl Request {
    /// A bodiless request for `uri`. Useful for tests and for callers that
    /// drive a composed handler without a transport.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            extensions: Extensions::new(),
        }
    }

    /// Like [`new`](Request::new), parsing `path` first.
    pub fn try_new(method: Method, path: &str) -> Result<Self, Error> {
        let uri = path.parse::<Uri>().map_err(Error::http)?;
        Ok(Self::new(method, uri))
    }

    /// Appends a header. Returns `self` for chaining.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Collects a hyper request into a [`Request`], reading the whole body.
    pub async fn from_hyper<B>(req: hyper::Request<B>) -> Result<Self, Error>
    where
        B: hyper::body::Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();
        let body = body.collect().await.map_err(Error::body)?.to_bytes();
        Ok(Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            extensions: parts.extensions,
        })
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { &mut self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn extensions(&self) -> &Extensions { &self.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.extensions }

    /// Case-insensitive header lookup. Returns `None` for non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use http::header::CONTENT_TYPE;
    use http_body_util::Full;

    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::try_new(Method::POST, "/users?page=2")
            .unwrap()
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
        assert_eq!(req.path(), "/users");
        assert_eq!(req.uri().query(), Some("page=2"));
    }

    #[test]
    fn try_new_rejects_bad_paths() {
        assert!(Request::try_new(Method::GET, "/a b").is_err());
        assert!(Request::try_new(Method::GET, "").is_err());
    }

    #[tokio::test]
    async fn from_hyper_collects_body_and_parts() {
        let hyper_req = hyper::Request::builder()
            .method(Method::PUT)
            .uri("/items/7")
            .header("x-request-id", "abc")
            .body(Full::new(Bytes::from_static(b"payload")))
            .unwrap();

        let req = Request::from_hyper(hyper_req).await.unwrap();

        assert_eq!(req.method(), Method::PUT);
        assert_eq!(req.path(), "/items/7");
        assert_eq!(req.header("x-request-id"), Some("abc"));
        assert_eq!(req.body(), b"payload");
    }
}
