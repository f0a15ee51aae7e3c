use std::convert::Infallible;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Frame};
use hyper::service::Service;
use strand::{BoxedHandler, ChainService, Request, Response, chain, handler};

fn server_header(next: BoxedHandler) -> BoxedHandler {
    handler::from_fn(move |req: Request| {
        let next = next.clone();
        async move {
            let mut res = next.call(req).await;
            res.headers_mut().insert("server", "strand".parse().unwrap());
            res
        }
    })
}

async fn echo(req: Request) -> Response {
    Response::text(format!("{} {} {}", req.method(), req.path(), String::from_utf8_lossy(req.body())))
}

/// A body whose first frame is an I/O error.
struct BrokenBody;

impl Body for BrokenBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(Some(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))))
    }
}

#[tokio::test]
async fn service_runs_the_composed_handler() {
    let svc = ChainService::new(chain![server_header].then_fn(echo));

    let req = hyper::Request::post("/users")
        .body(Full::new(Bytes::from_static(b"alice")))
        .unwrap();
    let res: Result<_, Infallible> = svc.call(req).await;
    let res = res.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["server"], "strand");
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, "POST /users alice");
}

#[tokio::test]
async fn unreadable_body_is_a_bad_request() {
    let svc = ChainService::new(chain![server_header].then_fn(echo));

    let res = svc.call(hyper::Request::new(BrokenBody)).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get("server").is_none());
}

#[tokio::test]
async fn clones_share_the_handler() {
    let svc = ChainService::new(chain![].then_fn(echo));
    let other = svc.clone();

    let a = svc.call(hyper::Request::new(Full::new(Bytes::new()))).await.unwrap();
    let b = other.call(hyper::Request::new(Full::new(Bytes::new()))).await.unwrap();

    assert_eq!(a.into_body().collect().await.unwrap().to_bytes(), "GET / ");
    assert_eq!(b.into_body().collect().await.unwrap().to_bytes(), "GET / ");
}
