use crate::codec::body::ChunkedEncoder;
use crate::codec::header::HeaderEncoder;
use crate::protocol::{ResponseItem, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;

/// Encodes [`ResponseItem`]s into their HTTP/1.1 wire form.
///
/// The encoder does not check the order of items, that is the job of
/// [`ResponseWriter`](crate::connection::ResponseWriter).
#[derive(Debug)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    chunked_encoder: ChunkedEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { header_encoder: HeaderEncoder, chunked_encoder: ChunkedEncoder::new() }
    }
}

impl<'a> Encoder<ResponseItem<'a>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: ResponseItem<'a>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            ResponseItem::StatusLine(status) => self.header_encoder.encode(status, dst),
            ResponseItem::Headers(headers) | ResponseItem::Trailers(headers) => self.header_encoder.encode(headers, dst),
            ResponseItem::Body(bytes) => {
                dst.extend_from_slice(bytes);
                Ok(())
            }
            ResponseItem::Chunk(payload_item) => self.chunked_encoder.encode(payload_item, dst),
        }
    }
}
