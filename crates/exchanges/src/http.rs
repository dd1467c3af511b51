//! Monoio-native HTTP/HTTPS client implementation
//!
//! Single-threaded async HTTP/1.1 over rustls. One connection per request,
//! no pooling, no retries; the REST layer owns status and envelope
//! interpretation, so responses are returned whatever their status code.

use crate::errors::{ExchangeError, Result};
use monoio::io::{AsyncReadRent, AsyncWriteRentExt};
use std::io::{Read, Write};
use monoio::net::TcpStream;
use rustls::{ClientConfig, ClientConnection};
use rustls::pki_types::ServerName;
use std::sync::Arc;
use webpki_roots;

/// Monoio-native HTTPS client
pub struct HttpsClient {
    tls_config: Arc<ClientConfig>,
}

/// HTTP response
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True for 2xx status codes
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// TLS stream wrapper for monoio
struct TlsStream {
    stream: TcpStream,
    tls_conn: ClientConnection,
    write_buf: Vec<u8>,
    tls_read_buf: Vec<u8>,
    handshake_complete: bool,
}

impl HttpsClient {
    /// Create a new HTTPS client with default TLS configuration
    pub fn new() -> Result<Self> {
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let tls_config = ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        Ok(Self {
            tls_config: Arc::new(tls_config),
        })
    }

    /// Make an HTTPS request with custom headers
    ///
    /// Returns the response whatever its status; only transport-level
    /// failures are errors.
    pub async fn request(
        &self,
        method: &str,
        url: &str,
        body: Option<&str>,
        headers: &[(String, String)],
    ) -> Result<HttpResponse> {
        let parsed_url = url::Url::parse(url)?;

        let host = parsed_url.host_str()
            .ok_or_else(|| ExchangeError::InvalidUrl("No host in URL".to_string()))?;

        let port = parsed_url.port().unwrap_or(443);
        let path_and_query = if parsed_url.path().is_empty() {
            "/".to_string()
        } else {
            let mut path_and_query = parsed_url.path().to_string();
            if let Some(query) = parsed_url.query() {
                path_and_query.push('?');
                path_and_query.push_str(query);
            }
            path_and_query
        };

        let tcp_stream = TcpStream::connect(&format!("{host}:{port}"))
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("TCP connect failed: {e}")))?;

        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| ExchangeError::NetworkError(format!("Invalid server name: {e:?}")))?;

        let tls_conn = ClientConnection::new(self.tls_config.clone(), server_name)
            .map_err(|e| ExchangeError::NetworkError(format!("TLS setup failed: {e}")))?;

        let mut tls_stream = TlsStream::new(tcp_stream, tls_conn);

        // Build HTTP/1.1 request
        let content_length = body.map(|b| b.len()).unwrap_or(0);
        let mut request = format!(
            "{method} {path_and_query} HTTP/1.1\r\n\
             Host: {host}\r\n\
             User-Agent: peregrine/0.1\r\n\
             Connection: close\r\n\
             Content-Length: {content_length}\r\n"
        );

        for (key, value) in headers {
            request.push_str(&format!("{key}: {value}\r\n"));
        }

        request.push_str("\r\n");
        if let Some(body) = body {
            request.push_str(body);
        }

        tls_stream.write_all(request.as_bytes()).await
            .map_err(|e| ExchangeError::NetworkError(format!("Write failed: {e}")))?;

        let response_data = tls_stream.read_to_end().await
            .map_err(|e| ExchangeError::NetworkError(format!("Read failed: {e}")))?;

        parse_http_response(&response_data)
    }
}

/// Parse a raw HTTP/1.1 response
fn parse_http_response(data: &[u8]) -> Result<HttpResponse> {
    let response_str = String::from_utf8_lossy(data);

    let header_end = response_str.find("\r\n\r\n")
        .ok_or_else(|| ExchangeError::NetworkError("Invalid HTTP response: no header terminator".to_string()))?;

    let header_part = &response_str[..header_end];
    let body_part = &response_str[header_end + 4..];

    let mut lines = header_part.lines();

    let status_line = lines.next()
        .ok_or_else(|| ExchangeError::NetworkError("Empty response".to_string()))?;

    let status = status_line.split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| ExchangeError::NetworkError("Invalid status line".to_string()))?;

    let mut headers = Vec::new();
    for line in lines {
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let chunked = headers
        .iter()
        .any(|(k, v)| k.eq_ignore_ascii_case("transfer-encoding") && v.to_ascii_lowercase().contains("chunked"));

    let body = if chunked {
        decode_chunked(body_part)
    } else {
        body_part.to_string()
    };

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Reassemble a chunked transfer-encoded body
///
/// Tolerant of truncation: whatever decoded cleanly is returned.
fn decode_chunked(body: &str) -> String {
    let mut decoded = String::with_capacity(body.len());
    let mut rest = body;

    loop {
        let Some((size_line, after_size)) = rest.split_once("\r\n") else {
            break;
        };
        let size_token = size_line.split(';').next().unwrap_or("").trim();
        let Ok(size) = usize::from_str_radix(size_token, 16) else {
            break;
        };
        if size == 0 {
            break;
        }
        if after_size.len() < size {
            decoded.push_str(after_size);
            break;
        }
        decoded.push_str(&after_size[..size]);
        rest = after_size[size..].trim_start_matches("\r\n");
    }

    decoded
}

impl TlsStream {
    fn new(stream: TcpStream, tls_conn: ClientConnection) -> Self {
        Self {
            stream,
            tls_conn,
            write_buf: Vec::with_capacity(8192),
            tls_read_buf: Vec::with_capacity(8192),
            handshake_complete: false,
        }
    }

    /// Complete TLS handshake
    async fn complete_handshake(&mut self) -> Result<()> {
        if self.handshake_complete {
            return Ok(());
        }

        loop {
            // Flush any handshake data the TLS layer wants to send
            while self.tls_conn.wants_write() {
                self.write_buf.clear();
                self.write_buf.reserve(8192);

                let tls_bytes = self.tls_conn.write_tls(&mut self.write_buf)
                    .map_err(|e| ExchangeError::NetworkError(format!("TLS write failed: {e}")))?;

                if tls_bytes > 0 {
                    let (result, _) = self.stream.write_all(self.write_buf.clone()).await;
                    result.map_err(|e| ExchangeError::NetworkError(format!("TCP write failed: {e}")))?;
                }
            }

            if !self.tls_conn.is_handshaking() {
                self.handshake_complete = true;
                break;
            }

            if self.tls_conn.wants_read() {
                let buffer = vec![0u8; 4096];
                let (result, buf) = self.stream.read(buffer).await;
                let bytes_read = result.map_err(|e| ExchangeError::NetworkError(format!("TCP read failed: {e}")))?;

                if bytes_read == 0 {
                    return Err(ExchangeError::NetworkError("Connection closed during handshake".to_string()));
                }

                self.tls_conn.read_tls(&mut std::io::Cursor::new(&buf[..bytes_read]))
                    .map_err(|e| ExchangeError::NetworkError(format!("TLS read failed: {e}")))?;

                self.tls_conn.process_new_packets()
                    .map_err(|e| ExchangeError::NetworkError(format!("TLS process failed: {e}")))?;
            } else if !self.tls_conn.wants_write() {
                return Err(ExchangeError::NetworkError("TLS handshake stalled".to_string()));
            }
        }

        Ok(())
    }

    async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.complete_handshake().await?;

        self.tls_conn.writer().write_all(data)
            .map_err(|e| ExchangeError::NetworkError(format!("TLS application write failed: {e}")))?;

        while self.tls_conn.wants_write() {
            self.write_buf.clear();
            self.write_buf.reserve(8192);

            let tls_bytes = self.tls_conn.write_tls(&mut self.write_buf)
                .map_err(|e| ExchangeError::NetworkError(format!("TLS write failed: {e}")))?;

            if tls_bytes > 0 {
                let (result, _) = self.stream.write_all(self.write_buf.clone()).await;
                result.map_err(|e| ExchangeError::NetworkError(format!("TCP write failed: {e}")))?;
            }
        }

        Ok(())
    }

    async fn read_to_end(&mut self) -> Result<Vec<u8>> {
        self.complete_handshake().await?;

        let mut response_data = Vec::new();
        let mut tcp_buffer = vec![0u8; 4096];

        loop {
            // Drain any already-decrypted data first
            self.tls_read_buf.clear();
            self.tls_read_buf.resize(4096, 0);

            match self.tls_conn.reader().read(&mut self.tls_read_buf) {
                Ok(0) => {}
                Ok(n) => {
                    response_data.extend_from_slice(&self.tls_read_buf[..n]);
                    continue;
                }
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(e) => {
                    return Err(ExchangeError::NetworkError(format!("TLS read failed: {e}")));
                }
            }

            let (result, buf) = self.stream.read(tcp_buffer).await;
            let bytes_read = result.map_err(|e| ExchangeError::NetworkError(format!("TCP read failed: {e}")))?;

            if bytes_read == 0 {
                break; // Connection closed
            }

            let mut cursor = std::io::Cursor::new(&buf[..bytes_read]);
            self.tls_conn.read_tls(&mut cursor)
                .map_err(|e| ExchangeError::NetworkError(format!("TLS read failed: {e}")))?;

            self.tls_conn.process_new_packets()
                .map_err(|e| ExchangeError::NetworkError(format!("TLS process failed: {e}")))?;

            tcp_buffer = vec![0u8; 4096];
        }

        Ok(response_data)
    }
}

impl Default for HttpsClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTPS client")
    }
}
