//! Handler trait and type erasure.
//!
//! # What a chain composes
//!
//! A [`Chain`](crate::Chain) wraps handlers inside handlers. Every layer must
//! have the same type, whatever concrete `async fn` or closure sits at the
//! bottom, so handlers travel through the chain as **trait objects**
//! (`dyn ErasedHandler`) behind an `Arc`.
//!
//! The path from user code to a composed handler is:
//!
//! ```text
//! async fn app(req: Request) -> Response { … }       ← user writes this
//!        ↓ chain.then_fn(app)  /  handler::from_fn(app)
//! app.into_boxed_handler()                          ← Handler blanket impl
//!        ↓
//! Arc::new(FromFn(app))                             ← heap-allocated wrapper
//!        ↓  BoxedHandler = Arc<dyn ErasedHandler>
//! decorator(next) -> BoxedHandler                   ← one per chain entry
//!        ↓
//! handler.call(req)  at request time                ← one vtable dispatch per layer
//! ```
//!
//! Decorators hold the `next` handler as a [`BoxedHandler`] and clone the
//! `Arc` into each request future, so a composed handler can serve many
//! requests at once.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Erased types ──────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so the host runtime may move it across threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe dispatch interface behind every [`BoxedHandler`].
///
/// Decorators call it on the handler they wrap:
///
/// ```rust
/// use strand::{BoxedHandler, Request, handler};
///
/// fn passthrough(next: BoxedHandler) -> BoxedHandler {
///     handler::from_fn(move |req: Request| next.call(req))
/// }
/// ```
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
///
/// This is the value a [`Chain`](crate::Chain) composes: the terminal handler,
/// every decorated layer and the finalized result all have this type.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every function usable as a handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` or closure with the signature:
///
/// ```text
/// Fn(Request) -> impl Future<Output = impl IntoResponse>
/// ```
///
/// The trait is **sealed**: the only implementation is the blanket one over
/// functions, so the set of things a chain can terminate in stays closed.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    use std::future::Future;

    use crate::request::Request;
    use crate::response::IntoResponse;

    pub trait Sealed {}

    impl<F, Fut> Sealed for F
    where
        F: Fn(Request) -> Fut,
        Fut: Future<Output: IntoResponse>,
    {
    }
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output: IntoResponse> + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FromFn(self))
    }
}

/// Erases a plain function or closure into a [`BoxedHandler`].
///
/// Decorators use this to build the handler they return; callers use it to
/// prepare a terminal handler for [`Chain::then`](crate::Chain::then).
pub fn from_fn(handler: impl Handler) -> BoxedHandler {
    handler.into_boxed_handler()
}

/// A function lifted into [`ErasedHandler`]. Whatever the function's future
/// yields is turned into a [`Response`] once it completes.
struct FromFn<F>(F);

impl<F, Fut> ErasedHandler for FromFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output: IntoResponse> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let pending = (self.0)(req);
        Box::pin(async move { pending.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode, Uri};

    use super::*;

    #[tokio::test]
    async fn closures_and_async_fns_become_handlers() {
        async fn teapot(_req: Request) -> StatusCode {
            StatusCode::IM_A_TEAPOT
        }

        let status = from_fn(teapot);
        let text = from_fn(|req: Request| async move { format!("path={}", req.path()) });

        let res = status.call(Request::new(Method::GET, Uri::from_static("/"))).await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);

        let res = text.call(Request::new(Method::GET, Uri::from_static("/a/b"))).await;
        assert_eq!(res.body(), b"path=/a/b");
    }

    #[tokio::test]
    async fn boxed_handler_serves_repeated_calls() {
        let h = from_fn(|_req: Request| async { "ok" });
        for _ in 0..3 {
            let res = h.call(Request::new(Method::GET, Uri::from_static("/"))).await;
            assert_eq!(res.body(), b"ok");
        }
    }
}
