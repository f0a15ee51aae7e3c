//! Minimal strand example — a middleware chain served over hyper.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/
//!   curl -i -H 'authorization: Bearer demo' http://localhost:3000/
//!
//! strand owns none of the socket handling below. The accept loop is the
//! application's; strand only supplies the composed handler.

use std::time::Instant;

use http::StatusCode;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use strand::{BoxedHandler, ChainService, Request, Response, chain, handler};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    // Shared base for every endpoint; authenticated endpoints derive from it.
    let base = chain![timing, request_id];
    let protected = base.append([strand::Constructor::new(require_bearer)]);
    info!(base = base.len(), protected = protected.len(), "chains built");

    let service = ChainService::new(protected.then_fn(hello));

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    info!("listening on 0.0.0.0:3000");

    loop {
        let (stream, peer) = listener.accept().await?;
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                error!(%peer, "connection error: {e}");
            }
        });
    }
}

async fn hello(req: Request) -> Response {
    let id = req.header("x-request-id").unwrap_or("-");
    Response::text(format!("hello, request {id}\n"))
}

// Logs method, path, status and latency for every request.
fn timing(next: BoxedHandler) -> BoxedHandler {
    handler::from_fn(move |req: Request| {
        let next = next.clone();
        async move {
            let (method, path) = (req.method().clone(), req.path().to_owned());
            let started = Instant::now();
            let res = next.call(req).await;
            info!(%method, %path, status = res.status_code().as_u16(), elapsed = ?started.elapsed(), "request");
            res
        }
    })
}

// Stamps each request with a monotonically increasing id, echoed on the response.
fn request_id(next: BoxedHandler) -> BoxedHandler {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT_ID: AtomicU64 = AtomicU64::new(1);

    handler::from_fn(move |mut req: Request| {
        let next = next.clone();
        async move {
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed).to_string();
            if let Ok(value) = id.parse() {
                req.headers_mut().insert("x-request-id", value);
            }
            let mut res = next.call(req).await;
            if let Ok(value) = id.parse() {
                res.headers_mut().insert("x-request-id", value);
            }
            res
        }
    })
}

// Rejects requests without a bearer token; never reaches `next` for them.
fn require_bearer(next: BoxedHandler) -> BoxedHandler {
    handler::from_fn(move |req: Request| {
        let authorized = req
            .header("authorization")
            .is_some_and(|v| v.starts_with("Bearer "));
        let next = next.clone();
        async move {
            if authorized {
                next.call(req).await
            } else {
                Response::status(StatusCode::UNAUTHORIZED)
            }
        }
    })
}
