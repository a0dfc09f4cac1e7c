use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// The signal that the tunnel is open and everything after it is opaque
/// payload. Bit-exact: no body, no Content-Length.
const ESTABLISHED: &[u8] = b"HTTP/1.1 200 Connection established\r\n\r\n";

pub async fn write_established<W>(client: &mut W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    client.write_all(ESTABLISHED).await?;
    client.flush().await
}

/// Error status line with the failure's descriptive message as the reason
/// phrase, then an immediate end of the response.
pub async fn write_error<W>(client: &mut W, status: StatusCode, reason: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    // The reason phrase must stay a single line.
    let reason: String = reason
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let response = format!(
        "HTTP/1.1 {} {}\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
        status.as_u16(),
        reason.trim()
    );
    client.write_all(response.as_bytes()).await?;
    client.flush().await
}
