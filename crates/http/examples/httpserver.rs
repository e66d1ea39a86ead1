use std::error::Error;

use http::StatusCode;
use indoc::indoc;
use sha2::{Digest, Sha256};
use tcp_http::connection::ResponseWriter;
use tcp_http::handler::make_handler;
use tcp_http::protocol::{Headers, Request, default_headers};
use tcp_http::server::Server;
use tokio::net::tcp::OwnedWriteHalf;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

type Writer = ResponseWriter<OwnedWriteHalf>;

const PORT: u16 = 42069;
const MAX_CHUNK_SIZE: usize = 1024;
const VIDEO_PATH: &str = "assets/vim.mp4";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let server = match Server::serve(PORT, make_handler(route)).await {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "error starting server");
            return;
        }
    };
    info!(port = PORT, "server started");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(cause = %e, "unable to listen for shutdown signal");
    }
    server.close();
    server.closed().await;
    info!("server gracefully stopped");
}

async fn route(writer: Writer, request: Request) {
    let target = request.target();
    let result = if target.starts_with("/httpbin") {
        proxy(writer, &request).await
    } else if target.starts_with("/video") {
        video(writer).await
    } else if target == "/yourproblem" {
        html(writer, StatusCode::BAD_REQUEST, BAD_REQUEST_HTML).await
    } else if target == "/myproblem" {
        html(writer, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_HTML).await
    } else {
        html(writer, StatusCode::OK, OK_HTML).await
    };

    if let Err(e) = result {
        error!(path = request.target(), cause = %e, "unable to respond");
    }
}

const BAD_REQUEST_HTML: &str = indoc! {"
    <html>
    <head>
    <title>400 Bad Request</title>
    </head>
    <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
    </body>
    </html>
"};

const INTERNAL_ERROR_HTML: &str = indoc! {"
    <html>
    <head>
    <title>500 Internal Server Error</title>
    </head>
    <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
    </body>
    </html>
"};

const OK_HTML: &str = indoc! {"
    <html>
    <head>
    <title>200 OK</title>
    </head>
    <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
    </body>
    </html>
"};

async fn html(mut writer: Writer, status: StatusCode, body: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut headers = default_headers(body.len());
    headers.overwrite("Content-Type", "text/html")?;

    writer.write_status_line(status).await?;
    writer.write_headers(&headers).await?;
    writer.write_body(body.as_bytes()).await?;
    Ok(())
}

async fn video(mut writer: Writer) -> Result<(), Box<dyn Error + Send + Sync>> {
    let video = tokio::fs::read(VIDEO_PATH).await?;

    let mut headers = default_headers(video.len());
    headers.overwrite("Content-Type", "video/mp4")?;

    writer.write_status_line(StatusCode::OK).await?;
    writer.write_headers(&headers).await?;
    writer.write_body(&video).await?;
    Ok(())
}

/// Streams `https://httpbin.org/<rest>` back as a chunked body, followed by
/// trailers carrying the digest and length of everything relayed.
async fn proxy(mut writer: Writer, request: &Request) -> Result<(), Box<dyn Error + Send + Sync>> {
    let path = request.target().trim_start_matches("/httpbin").trim_start_matches('/');
    let url = format!("https://httpbin.org/{path}");
    info!(%url, "proxy request");

    let mut upstream = match reqwest::get(&url).await {
        Ok(upstream) => upstream,
        Err(e) => {
            error!(%url, cause = %e, "proxy request failed");
            return html(writer, StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_HTML).await;
        }
    };

    let mut headers = default_headers(0);
    headers.remove("Content-Length");
    headers.overwrite("Transfer-Encoding", "chunked")?;
    headers.overwrite("Trailer", "X-Content-SHA256, X-Content-Length")?;

    writer.write_status_line(StatusCode::OK).await?;
    writer.write_headers(&headers).await?;

    let mut hasher = Sha256::new();
    let mut total = 0;
    loop {
        let chunk = match upstream.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                error!(%url, cause = %e, "unable to read upstream body");
                break;
            }
        };

        for piece in chunk.chunks(MAX_CHUNK_SIZE) {
            writer.write_chunked_body(piece).await?;
            hasher.update(piece);
            total += piece.len();
        }
    }

    writer.write_chunked_body_done().await?;

    let mut trailers = Headers::new();
    trailers.overwrite("X-Content-SHA256", &hex::encode(hasher.finalize()))?;
    trailers.overwrite("X-Content-Length", &total.to_string())?;
    writer.write_trailers(&trailers).await?;
    Ok(())
}
