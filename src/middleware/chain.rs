//! Immutable, ordered middleware chains.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::handler::{self, BoxedHandler, Handler};

/// A decorator-constructor: wraps a handler and returns the wrapping handler.
///
/// Any `Fn(BoxedHandler) -> BoxedHandler` qualifies. What the returned handler
/// does is its own business: run code before or after delegating to `next`,
/// or answer without delegating at all.
///
/// ```rust
/// use strand::{BoxedHandler, Constructor, Request, handler};
///
/// let request_id = Constructor::new(|next: BoxedHandler| {
///     handler::from_fn(move |mut req: Request| {
///         req.headers_mut().insert("x-request-id", "42".parse().unwrap());
///         next.call(req)
///     })
/// });
/// ```
#[derive(Clone)]
pub struct Constructor(Arc<dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static>);

impl Constructor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Applies the constructor to `next`, producing the wrapping handler.
    pub fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (self.0)(next)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constructor(..)")
    }
}

/// An immutable, ordered sequence of [`Constructor`]s.
///
/// The first constructor is the outermost layer: it sees each request first
/// and each response last. A chain never changes once built. [`append`] and
/// [`extend`] allocate a fresh sequence and leave their inputs untouched, so
/// one chain can serve as the base for any number of derived chains, from
/// any number of threads.
///
/// ```rust
/// use strand::{BoxedHandler, Chain, Request, Response, chain, handler};
///
/// fn server_header(next: BoxedHandler) -> BoxedHandler {
///     handler::from_fn(move |req: Request| {
///         let next = next.clone();
///         async move {
///             let mut res = next.call(req).await;
///             res.headers_mut().insert("server", "strand".parse().unwrap());
///             res
///         }
///     })
/// }
///
/// async fn app(_req: Request) -> Response {
///     Response::text("hello")
/// }
///
/// let base = chain![server_header];
/// let api = base.append([strand::Constructor::new(server_header)]);
/// let service = api.then_fn(app);
/// # let _ = service;
/// ```
///
/// [`append`]: Chain::append
/// [`extend`]: Chain::extend
#[derive(Clone)]
pub struct Chain {
    constructors: Arc<[Constructor]>,
}

impl Chain {
    /// Creates a chain applying `constructors` in iteration order,
    /// outermost first.
    pub fn new(constructors: impl IntoIterator<Item = Constructor>) -> Self {
        Self { constructors: constructors.into_iter().collect() }
    }

    /// Number of constructors in the chain.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Composes the chain around `terminal` and returns the resulting handler.
    ///
    /// For constructors `[d0, d1, .., dn]` the result is
    /// `d0(d1(..dn(terminal)..))`. An empty chain returns `terminal` itself.
    /// The chain is only read, so this may be called any number of times;
    /// each call builds an independent handler.
    pub fn then(&self, terminal: BoxedHandler) -> BoxedHandler {
        trace!(decorators = self.constructors.len(), "composing middleware chain");
        self.constructors
            .iter()
            .rev()
            .fold(terminal, |next, constructor| constructor.wrap(next))
    }

    /// Like [`then`](Chain::then), for a plain `async fn` or closure.
    pub fn then_fn(&self, terminal: impl Handler) -> BoxedHandler {
        self.then(handler::from_fn(terminal))
    }

    /// Returns a new chain with `more` added after the existing constructors,
    /// i.e. closer to the terminal handler. `self` is unchanged.
    pub fn append(&self, more: impl IntoIterator<Item = Constructor>) -> Self {
        let more = more.into_iter();
        let mut constructors = Vec::with_capacity(self.len() + more.size_hint().0);
        constructors.extend(self.constructors.iter().cloned());
        constructors.extend(more);
        Self { constructors: constructors.into() }
    }

    /// Returns a new chain running `self`'s constructors, then `other`'s.
    /// Neither input is changed.
    pub fn extend(&self, other: &Chain) -> Self {
        self.append(other.constructors.iter().cloned())
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

impl FromIterator<Constructor> for Chain {
    fn from_iter<I: IntoIterator<Item = Constructor>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("len", &self.len()).finish()
    }
}

/// Builds a [`Chain`] from decorator functions or closures, outermost first.
///
/// `chain![a, b, c]` is shorthand for
/// `Chain::new([Constructor::new(a), Constructor::new(b), Constructor::new(c)])`.
#[macro_export]
macro_rules! chain {
    () => {
        $crate::Chain::default()
    };
    ($($constructor:expr),+ $(,)?) => {
        $crate::Chain::new([$($crate::Constructor::new($constructor)),+])
    };
}

#[cfg(test)]
mod tests {
    use http::{Method, Uri};

    use super::*;
    use crate::{Request, Response};

    fn noop() -> Constructor {
        Constructor::new(|next| next)
    }

    async fn app(_req: Request) -> Response {
        Response::text("app")
    }

    #[test]
    fn new_keeps_every_constructor_in_order() {
        let chain = Chain::new([noop(), noop(), noop()]);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
        assert!(Chain::default().is_empty());
    }

    #[test]
    fn append_allocates_new_storage() {
        let chain = Chain::new([noop()]);
        let derived = chain.append([noop()]);

        assert_eq!(chain.len(), 1);
        assert_eq!(derived.len(), 2);
        assert!(!std::ptr::eq(
            chain.constructors.as_ptr(),
            derived.constructors.as_ptr()
        ));
    }

    #[test]
    fn extend_allocates_new_storage_for_both_sides() {
        let left = Chain::new([noop()]);
        let right = Chain::new([noop()]);
        let joined = left.extend(&right);

        assert_eq!(joined.len(), 2);
        assert!(!std::ptr::eq(left.constructors.as_ptr(), joined.constructors.as_ptr()));
        assert!(!std::ptr::eq(right.constructors.as_ptr(), joined.constructors.as_ptr()));
    }

    #[test]
    fn append_nothing_still_copies() {
        let chain = Chain::new([noop(), noop()]);
        let copy = chain.append(std::iter::empty());

        assert_eq!(copy.len(), 2);
        assert!(!std::ptr::eq(chain.constructors.as_ptr(), copy.constructors.as_ptr()));
    }

    #[test]
    fn macro_forms() {
        assert!(chain![].is_empty());
        assert_eq!(chain![|next| next].len(), 1);
        assert_eq!(chain![|next| next, |next| next,].len(), 2);
    }

    #[test]
    fn debug_reports_length() {
        let chain = Chain::new([noop(), noop()]);
        assert_eq!(format!("{chain:?}"), "Chain { len: 2 }");
    }

    #[tokio::test]
    async fn noop_constructors_are_transparent() {
        let handler = Chain::new([noop(), noop()]).then_fn(app);
        let res = handler.call(Request::new(Method::GET, Uri::from_static("/"))).await;
        assert_eq!(res.body(), b"app");
    }
}
