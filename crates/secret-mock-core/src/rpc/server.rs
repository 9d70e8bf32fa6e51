//! Listening side of the wire protocol

use std::path::Path;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{UnixListener, UnixStream};

use crate::service::{MockService, ServiceResult};

/// Largest request body the server will allocate for. Real protocol
/// traffic is a few hundred bytes; anything past this is a broken client.
const MAX_FRAME_LEN: usize = 4 * 1024 * 1024;

/// Accept connections on `socket_path` until the service signals shutdown
///
/// One task per connection; a connection may carry any number of requests.
/// The socket file is removed on the way out.
pub(crate) async fn serve(service: MockService, socket_path: &Path) -> ServiceResult<()> {
    // A previous run may have left its socket file behind
    if socket_path.exists() {
        std::fs::remove_file(socket_path)?;
    }

    let listener = UnixListener::bind(socket_path)?;
    service
        .logger()
        .info(&format!("listening on {}", socket_path.display()));

    loop {
        tokio::select! {
            _ = service.shutdown_notify().notified() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _)) => {
                        tokio::spawn(handle_connection(service.clone(), stream));
                    }
                    Err(e) => {
                        service.logger().warn(&format!("accept failed: {}", e));
                    }
                }
            }
        }
    }

    let _ = std::fs::remove_file(socket_path);
    service.logger().info("listener stopped");
    Ok(())
}

async fn handle_connection(service: MockService, stream: UnixStream) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    loop {
        let frame = match read_frame(&mut reader).await {
            Ok(Some(frame)) => frame,
            // Clean disconnect
            Ok(None) => break,
            Err(e) => {
                service.logger().warn(&format!("connection dropped: {}", e));
                break;
            }
        };

        let request: Value = match serde_json::from_slice(&frame) {
            Ok(request) => request,
            Err(e) => {
                let response = json!({
                    "jsonrpc": "2.0",
                    "id": Value::Null,
                    "error": { "code": -32700, "message": format!("Parse error: {}", e) },
                });
                if write_frame(&mut write_half, &response).await.is_err() {
                    break;
                }
                continue;
            }
        };

        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let response = match request.get("method").and_then(|m| m.as_str()) {
            Some(method) => {
                let params = request.get("params").cloned().unwrap_or(Value::Null);
                service.logger().debug(&format!("request: method={}", method));
                match service.dispatch(method, params) {
                    Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
                    Err(e) => json!({
                        "jsonrpc": "2.0",
                        "id": id,
                        "error": { "code": e.jsonrpc_code(), "message": e.to_string() },
                    }),
                }
            }
            None => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32600, "message": "Invalid request: missing method" },
            }),
        };

        if let Err(e) = write_frame(&mut write_half, &response).await {
            service.logger().warn(&format!("write failed: {}", e));
            break;
        }
    }
}

/// Read one Content-Length framed message; `None` on clean EOF
async fn read_frame(reader: &mut BufReader<OwnedReadHalf>) -> std::io::Result<Option<Vec<u8>>> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return if content_length.is_none() {
                Ok(None)
            } else {
                Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed mid-frame",
                ))
            };
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            // End of headers
            break;
        }

        if let Some(len_str) = trimmed.strip_prefix("Content-Length:") {
            content_length = Some(len_str.trim().parse().map_err(|_| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid Content-Length")
            })?);
        }
    }

    let length = content_length.ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, "missing Content-Length")
    })?;

    if length > MAX_FRAME_LEN {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Content-Length {} exceeds limit {}", length, MAX_FRAME_LEN),
        ));
    }

    let mut content = vec![0u8; length];
    reader.read_exact(&mut content).await?;
    Ok(Some(content))
}

async fn write_frame(writer: &mut OwnedWriteHalf, message: &Value) -> std::io::Result<()> {
    let content = message.to_string();
    let framed = format!("Content-Length: {}\r\n\r\n{}", content.len(), content);
    writer.write_all(framed.as_bytes()).await?;
    writer.flush().await
}
