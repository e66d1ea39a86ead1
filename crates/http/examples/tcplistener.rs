//! Prints every line received on port 42069, one connection at a time.

use futures::StreamExt;
use tokio::net::TcpListener;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const ADDR: &str = "0.0.0.0:42069";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let tcp_listener = match TcpListener::bind(ADDR).await {
        Ok(tcp_listener) => tcp_listener,
        Err(e) => {
            error!(cause = %e, "unable to set up listener");
            return;
        }
    };

    loop {
        let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };
        info!(%remote_addr, "connection accepted");

        let mut lines = FramedRead::new(tcp_stream, LinesCodec::new());
        while let Some(line) = lines.next().await {
            match line {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    error!(cause = %e, "error reading line");
                    break;
                }
            }
        }
        info!(%remote_addr, "connection closed");
    }
}
