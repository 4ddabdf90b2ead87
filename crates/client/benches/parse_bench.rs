use std::hint::black_box;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use micro_http_client::ClientConfig;
use micro_http_client::codec::{RequestEncoder, ResponseDecoder, parse};
use micro_http_client::connection::HttpConnection;
use micro_http_client::protocol::{ConnectionKey, RequestHead};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_util::codec::{Decoder, Encoder};

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
Server: nginx\r\n\
Date: Mon, 19 Oct 2026 08:00:00 GMT\r\n\
Content-Type: application/json\r\n\
Content-Length: 27\r\n\
Connection: keep-alive\r\n\
Cache-Control: no-cache\r\n\
\r\n\
{\"origin\":\"203.0.113.195\"}\n";

// Mock IO serving a canned response
struct MockIO {
    read_data: &'static [u8],
    read_pos: usize,
}

impl MockIO {
    fn new(read_data: &'static [u8]) -> Self {
        Self { read_data, read_pos: 0 }
    }
}

impl AsyncRead for MockIO {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = std::cmp::min(remaining.len(), buf.remaining());
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        Poll::Ready(Ok(()))
    }
}

struct Sink;

impl AsyncWrite for Sink {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<Result<usize, io::Error>> {
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

fn request() -> RequestHead {
    RequestHead::get(ConnectionKey::with_default_port("httpbin.org", true), "/ip").header("X-Request-Id", "42")
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_response", |b| {
        b.iter(|| black_box(parse(black_box(RESPONSE)).unwrap()));
    });
}

fn bench_response_decoder(c: &mut Criterion) {
    c.bench_function("decode_response", |b| {
        b.iter(|| {
            let mut decoder = ResponseDecoder::new();
            let mut bytes = BytesMut::from(RESPONSE);
            while let Some(message) = decoder.decode(&mut bytes).unwrap() {
                black_box(message);
            }
        });
    });
}

fn bench_request_encoder(c: &mut Criterion) {
    let request = request();

    c.bench_function("encode_request", |b| {
        b.iter(|| {
            let mut encoder = RequestEncoder::new("micro-http-client/bench");
            let mut bytes = BytesMut::new();
            encoder.encode(&request, &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
    let config = ClientConfig::default();
    let request = request();

    c.bench_function("exchange_simple_request", |b| {
        b.to_async(&runtime).iter(|| async {
            let connection = HttpConnection::new(MockIO::new(RESPONSE), Sink, &config.user_agent);
            black_box(connection.exchange(&request, &config).await.unwrap());
        });
    });
}

criterion_group!(benches, bench_parse, bench_response_decoder, bench_request_encoder, bench_http_connection);
criterion_main!(benches);
