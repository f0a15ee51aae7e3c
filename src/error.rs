//! Unified error type.

use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by strand's fallible operations.
///
/// Composing a [`Chain`](crate::Chain) never fails, and whatever a decorator
/// or handler does at request time is expressed as a
/// [`Response`](crate::Response). This type surfaces the remaining failures:
/// a request body the hyper adapter cannot read, or an invalid URI or header
/// handed to one of the `try_` constructors.
#[derive(Debug)]
pub struct Error(Kind);

#[derive(Debug)]
enum Kind {
    Body(BoxError),
    Http(http::Error),
}

impl Error {
    pub(crate) fn body(e: impl Into<BoxError>) -> Self {
        Self(Kind::Body(e.into()))
    }

    pub(crate) fn http(e: impl Into<http::Error>) -> Self {
        Self(Kind::Http(e.into()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Kind::Body(e) => write!(f, "body: {e}"),
            Kind::Http(e) => write!(f, "http: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Kind::Body(e) => Some(&**e),
            Kind::Http(e) => Some(e),
        }
    }
}
