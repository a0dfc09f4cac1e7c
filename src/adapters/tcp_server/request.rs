use std::collections::HashMap;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::domain::{RequestHead, Result, TunnelError};

// Same head limits as the stock HTTP server the clients are written against.
const MAX_LINE_BYTES: usize = 65536;
const MAX_HEADER_LINES: usize = 100;

/// Read and parse the request line plus header block off a fresh connection.
///
/// Bytes the client pipelined after the blank line stay in the reader's
/// buffer; the caller forwards them once the tunnel is up.
pub async fn read_request_head<R>(reader: &mut R) -> Result<RequestHead>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_head_line(reader).await?;
    if line.is_empty() {
        return Err(TunnelError::InvalidRequest(
            "connection closed before request line".to_string(),
        ));
    }

    let mut parts = line.splitn(3, ' ');
    let (method, target, version) = match (parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version))
            if !method.is_empty() && !target.is_empty() && !version.is_empty() =>
        {
            (method, target, version)
        }
        _ => {
            return Err(TunnelError::InvalidRequest(format!(
                "malformed request line '{}'",
                line
            )))
        }
    };

    let mut headers = HashMap::new();
    // Count lines, not map entries, so duplicate keys still hit the limit.
    let mut header_lines = 0usize;
    while let Some((key, value)) = parse_header_line(reader).await? {
        header_lines += 1;
        if header_lines > MAX_HEADER_LINES {
            return Err(TunnelError::InvalidRequest("too many headers".to_string()));
        }
        headers.insert(key.to_lowercase(), value);
    }

    Ok(RequestHead::new(method, target, version).with_headers(headers))
}

async fn parse_header_line<R>(reader: &mut R) -> Result<Option<(String, String)>>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_head_line(reader).await?;
    // Blank line (or EOF): end of the header block.
    if line.is_empty() {
        return Ok(None);
    }
    match line.split_once(':') {
        Some((key, value)) => Ok(Some((key.trim().to_string(), value.trim().to_string()))),
        None => Err(TunnelError::InvalidRequest(format!(
            "malformed header line '{}'",
            line
        ))),
    }
}

async fn read_head_line<R>(reader: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let n = reader
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_line(&mut line)
        .await
        .map_err(|err| TunnelError::InvalidRequest(err.to_string()))?;
    if n > MAX_LINE_BYTES {
        return Err(TunnelError::InvalidRequest("request line too long".to_string()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
