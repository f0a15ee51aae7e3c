//! # strand
//!
//! Immutable, ordered middleware chains for HTTP services built on hyper.
//!
//! ## The contract
//!
//! strand composes. Routing, server lifecycle and the middleware themselves
//! belong to the application or to the framework around it.
//!
//! - A [`Chain`] is an ordered list of decorator-constructors, outermost first.
//! - [`Chain::then`] folds the list around a terminal handler. An empty chain
//!   returns the terminal handler untouched.
//! - [`Chain::append`] and [`Chain::extend`] build *new* chains. The chain
//!   they are called on never changes, so a shared base chain is safe to
//!   derive from anywhere.
//! - [`ChainService`] plugs the composed handler into any hyper connection.
//!
//! ## Quick start
//!
//! ```rust
//! use strand::{BoxedHandler, Request, Response, chain, handler};
//!
//! fn tag(tag: &'static str) -> impl Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static {
//!     move |next: BoxedHandler| {
//!         handler::from_fn(move |req: Request| {
//!             let next = next.clone();
//!             async move {
//!                 let mut res = next.call(req).await;
//!                 res.body_mut().splice(0..0, tag.bytes());
//!                 res
//!             }
//!         })
//!     }
//! }
//!
//! async fn app(_req: Request) -> Response {
//!     Response::text("app\n")
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let base = chain![tag("t1\n"), tag("t2\n")];
//! let full = base.extend(&chain![tag("t3\n")]);
//!
//! let req = Request::new(http::Method::GET, http::Uri::from_static("/"));
//! let res = full.then_fn(app).call(req).await;
//! assert_eq!(res.body(), b"t1\nt2\nt3\napp\n");
//! assert_eq!(base.len(), 2);
//! # }
//! ```

mod error;
mod request;
mod response;
mod service;

pub mod handler;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use middleware::{Chain, Constructor};
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use service::ChainService;
