//! hyper integration.
//!
//! strand does not bind sockets or accept connections. Whoever owns the
//! connection loop hands each connection a [`ChainService`], and hyper calls
//! it once per request:
//!
//! ```rust,no_run
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! use strand::{ChainService, Request, Response, chain};
//!
//! # async fn run(listener: tokio::net::TcpListener) -> std::io::Result<()> {
//! let service = ChainService::new(chain![].then_fn(|_req: Request| async {
//!     Response::text("hello")
//! }));
//!
//! loop {
//!     let (stream, _) = listener.accept().await?;
//!     let service = service.clone();
//!     tokio::spawn(async move {
//!         let _ = Builder::new(TokioExecutor::new())
//!             .serve_connection(TokioIo::new(stream), service)
//!             .await;
//!     });
//! }
//! # }
//! ```

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use tracing::error;

use crate::handler::BoxedHandler;
use crate::request::Request;
use crate::response::Response;

/// A composed handler exposed as a [`hyper::service::Service`].
///
/// Cloning is one `Arc` increment.
#[derive(Clone)]
pub struct ChainService {
    handler: BoxedHandler,
}

impl ChainService {
    pub fn new(handler: BoxedHandler) -> Self {
        Self { handler }
    }
}

impl<B> hyper::service::Service<hyper::Request<B>> for ChainService
where
    B: hyper::body::Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Infallible>> + Send>>;

    fn call(&self, req: hyper::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        Box::pin(async move { Ok(dispatch(handler, req).await) })
    }
}

/// Reads one request, runs it through the handler, converts the response.
///
/// Never fails: a body that cannot be read is answered with `400` here, and
/// everything else is whatever the handler returned.
async fn dispatch<B>(handler: BoxedHandler, req: hyper::Request<B>) -> http::Response<Full<Bytes>>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let response = match Request::from_hyper(req).await {
        Ok(req) => handler.call(req).await,
        Err(e) => {
            error!("failed to read request: {e}");
            Response::status(StatusCode::BAD_REQUEST)
        }
    };

    response.into_inner()
}
