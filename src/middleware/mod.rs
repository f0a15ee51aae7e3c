//! Middleware composition.
//!
//! Middleware is the right place for cross-cutting concerns: structured
//! tracing, metrics, request-id injection, authentication-header inspection.
//! strand ships none of these. It only composes the ones you write.
//!
//! A middleware is a [`Constructor`]: a function from the next handler to a
//! new handler wrapping it. A [`Chain`] is an ordered, immutable list of
//! constructors that is folded around a terminal handler at startup:
//!
//! ```text
//! Chain [auth, timing, request_id]  +  app
//!        ↓ chain.then(app)
//! auth(timing(request_id(app)))
//!        ↓ per request
//! auth → timing → request_id → app → request_id → timing → auth
//! ```
//!
//! Build the chain once, derive variants with [`Chain::append`] and
//! [`Chain::extend`], finalize each with [`Chain::then`].

mod chain;

pub use chain::{Chain, Constructor};
