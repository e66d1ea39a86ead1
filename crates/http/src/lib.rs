//! A small HTTP/1.1 server written directly on top of TCP byte streams
//!
//! This crate reads exactly one request per connection, hands it to an
//! application handler together with a phase-checked response writer, and
//! closes the connection once the handler returns. Request parsing is a
//! resumable state machine that accepts input in fragments of any size.
//!
//! # Example
//!
//! ```no_run
//! use http::StatusCode;
//! use tcp_http::connection::ResponseWriter;
//! use tcp_http::handler::make_handler;
//! use tcp_http::protocol::{Request, default_headers};
//! use tcp_http::server::Server;
//! use tokio::net::tcp::OwnedWriteHalf;
//! use tracing::{Level, info};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let server = Server::serve(8080, make_handler(hello_world)).await.expect("bind server");
//!     info!(addr = %server.local_addr(), "server started");
//!
//!     tokio::signal::ctrl_c().await.expect("listen for ctrl-c");
//!     server.close();
//!     server.closed().await;
//! }
//!
//! async fn hello_world(mut writer: ResponseWriter<OwnedWriteHalf>, request: Request) {
//!     info!(path = request.target(), "request path");
//!
//!     let body = b"Hello World!\r\n";
//!     let _ = writer.write_status_line(StatusCode::OK).await;
//!     let _ = writer.write_headers(&default_headers(body.len())).await;
//!     let _ = writer.write_body(body).await;
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: request, header store and error types
//! - [`codec`]: request decoding and response encoding
//! - [`connection`]: per-connection processing and the response writer
//! - [`handler`]: the application handler trait
//! - [`server`]: the accept loop and its shutdown handle
//!
//! ## Response Writing
//!
//! [`connection::ResponseWriter`] only allows its operations in order: status
//! line, headers, then either a fixed body or chunks followed by the
//! terminating chunk and the trailers. Calls out of order fail with
//! [`protocol::SendError::WrongPhase`] and leave the writer untouched.
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::ParseError`]: Request parsing errors
//! - [`protocol::SendError`]: Response sending errors
//!
//! A request that fails to parse is answered with `400 Bad Request` carrying
//! the error text as body.
//!
//! # Limitations
//!
//! - HTTP/1.1 only, one request per connection
//! - Request bodies are never read
//! - No TLS support
//! - Maximum size of request line plus headers: 8KB

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
