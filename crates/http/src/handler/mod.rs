//! Application handler abstraction.
//!
//! A [`Handler`] receives the parsed [`Request`] together with a
//! [`ResponseWriter`] that owns the write half of the connection. The handler
//! is responsible for driving the writer through its phases; whatever it
//! leaves unwritten is simply not sent, the connection closes when the writer
//! is dropped.

use std::future::Future;

use async_trait::async_trait;

use crate::connection::ResponseWriter;
use crate::protocol::Request;

#[async_trait]
pub trait Handler<W: Send + 'static>: Send + Sync {
    async fn call(&self, writer: ResponseWriter<W>, request: Request);
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<W, F, Fut> Handler<W> for HandlerFn<F>
where
    W: Send + 'static,
    F: Fn(ResponseWriter<W>, Request) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send,
{
    async fn call(&self, writer: ResponseWriter<W>, request: Request) {
        (self.f)(writer, request).await
    }
}

/// Wraps an async function or closure into a [`Handler`].
pub fn make_handler<F, W, Fut>(f: F) -> HandlerFn<F>
where
    W: Send + 'static,
    F: Fn(ResponseWriter<W>, Request) -> Fut + Send + Sync,
    Fut: Future<Output = ()> + Send,
{
    HandlerFn { f }
}
