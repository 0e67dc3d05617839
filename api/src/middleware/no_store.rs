//! Response header middleware for token endpoints.
//!
//! Responses carrying tokens must not be cached by clients or intermediaries
//! (RFC 6749 section 5.1), so every response passing through gets
//! `Cache-Control: no-store` and `Pragma: no-cache`.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

/// Middleware factory adding no-store cache headers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl NoStore {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for NoStore
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = NoStoreService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(NoStoreService {
            service: Rc::new(service),
        }))
    }
}

/// No-store middleware service implementation
pub struct NoStoreService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for NoStoreService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let mut response = service.call(req).await?;
            add_no_store_headers(&mut response);
            Ok(response)
        })
    }
}

fn add_no_store_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
}
