use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::connection::HttpConnection;
use crate::handler::Handler;

/// Handle of a running server.
///
/// The accept loop runs in its own task and spawns one task per accepted
/// connection. [`Server::close`] stops accepting and drops the listening
/// socket; connections that were already accepted run to completion.
#[derive(Debug)]
pub struct Server {
    running: Arc<AtomicBool>,
    shutdown: CancellationToken,
    local_addr: SocketAddr,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Binds `0.0.0.0:<port>` and starts accepting connections.
    pub async fn serve<H>(port: u16, handler: H) -> io::Result<Self>
    where
        H: Handler<OwnedWriteHalf> + 'static,
    {
        Self::bind((Ipv4Addr::UNSPECIFIED, port), handler).await
    }

    pub async fn bind<A, H>(addr: A, handler: H) -> io::Result<Self>
    where
        A: ToSocketAddrs,
        H: Handler<OwnedWriteHalf> + 'static,
    {
        let tcp_listener = match TcpListener::bind(addr).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(e);
            }
        };
        let local_addr = tcp_listener.local_addr()?;
        info!(%local_addr, "start listening");

        let running = Arc::new(AtomicBool::new(true));
        let shutdown = CancellationToken::new();
        let accept_task = tokio::spawn(accept_loop(tcp_listener, Arc::new(handler), Arc::clone(&running), shutdown.clone()));

        Ok(Self { running, shutdown, local_addr, accept_task })
    }

    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Stops accepting new connections. Calling it again has no effect.
    pub fn close(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            info!(local_addr = %self.local_addr, "closing server");
            self.shutdown.cancel();
        }
    }

    /// Waits until the accept loop has exited and the listening socket is closed.
    pub async fn closed(self) {
        if let Err(e) = self.accept_task.await {
            error!(cause = %e, "accept loop terminated abnormally");
        }
    }
}

async fn accept_loop<H>(tcp_listener: TcpListener, handler: Arc<H>, running: Arc<AtomicBool>, shutdown: CancellationToken)
where
    H: Handler<OwnedWriteHalf> + 'static,
{
    loop {
        let accepted = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            accepted = tcp_listener.accept() => accepted,
        };

        let (tcp_stream, remote_addr) = match accepted {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) if keep_accepting(&running, &e) => continue,
            Err(_) => break,
        };

        tokio::spawn(handle_connection(tcp_stream, remote_addr, Arc::clone(&handler)));
    }

    debug!("accept loop exited");
}

/// Accept errors are logged and tolerated while the server runs, once closed
/// they end the loop silently.
fn keep_accepting(running: &AtomicBool, e: &io::Error) -> bool {
    if !running.load(Ordering::Acquire) {
        return false;
    }
    warn!(cause = %e, "failed to accept");
    true
}

async fn handle_connection<H>(tcp_stream: TcpStream, remote_addr: SocketAddr, handler: Arc<H>)
where
    H: Handler<OwnedWriteHalf> + 'static,
{
    let (reader, writer) = tcp_stream.into_split();
    let connection = HttpConnection::new(reader, writer);
    match connection.process(handler).await {
        Ok(()) => {
            info!(%remote_addr, "finished process, connection shutdown");
        }
        Err(e) => {
            error!(%remote_addr, cause = %e, "service has error, connection shutdown");
        }
    }
}
