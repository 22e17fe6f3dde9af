//! `tower` middleware wrapping any `http` request/response service

use super::HttpLogger;
use http::{Request, Response};
use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

impl<S> Layer<S> for HttpLogger {
    type Service = HttpLoggerService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HttpLoggerService {
            inner,
            http: self.clone(),
        }
    }
}

/// Logs one line per request handled by the wrapped service.
///
/// The status is read from the response the inner service returns, i.e. after
/// the handler has finished setting it. An inner `Err` is logged at `error`
/// level and passed through unchanged. A `SocketAddr` request extension, when
/// the server inserts one, serves as the client-IP fallback.
#[derive(Clone)]
pub struct HttpLoggerService<S> {
    inner: S,
    http: HttpLogger,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HttpLoggerService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: fmt::Display + Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let peer = req.extensions().get::<SocketAddr>().map(|addr| addr.ip());
        let request = self
            .http
            .start_with_peer(req.method(), req.uri(), req.headers(), peer);
        let future = self.inner.call(req);

        Box::pin(async move {
            match future.await {
                Ok(response) => {
                    request.complete(Some(response.status()));
                    Ok(response)
                }
                Err(error) => {
                    request.fail(None, &error);
                    Err(error)
                }
            }
        })
    }
}

impl<S> fmt::Debug for HttpLoggerService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLoggerService")
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
