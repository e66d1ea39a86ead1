//! TCP server running one accept loop and one task per connection.

mod tcp_server;

pub use tcp_server::Server;
