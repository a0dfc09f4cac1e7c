use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Bytes read per relay iteration. Shorter reads are forwarded as-is, never
/// coalesced, to keep latency low.
pub const CHUNK_SIZE: usize = 4096;

/// Pump bytes between the client and the target until either side closes or
/// errors. The first direction to finish cancels the other, so a close or
/// error on one socket tears down the whole tunnel; both write sides are
/// shut down before returning.
///
/// Returns the byte counts (client to target, target to client).
pub async fn relay<C, T>(client: &mut C, target: &mut T) -> (u64, u64)
where
    C: AsyncRead + AsyncWrite + Unpin,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let (mut client_read, mut client_write) = tokio::io::split(client);
    let (mut target_read, mut target_write) = tokio::io::split(target);

    let mut to_target = 0u64;
    let mut to_client = 0u64;

    tokio::select! {
        _ = copy_chunks(&mut client_read, &mut target_write, &mut to_target) => {}
        _ = copy_chunks(&mut target_read, &mut client_write, &mut to_client) => {}
    }

    let _ = client_write.shutdown().await;
    let _ = target_write.shutdown().await;

    (to_target, to_client)
}

/// One direction of the relay: read up to a chunk, forward the whole chunk,
/// wait again. Stops on orderly close (zero-length read) or any I/O error.
async fn copy_chunks<R, W>(reader: &mut R, writer: &mut W, copied: &mut u64)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if writer.write_all(&buf[..n]).await.is_err() {
                    break;
                }
                if writer.flush().await.is_err() {
                    break;
                }
                *copied += n as u64;
            }
            Err(_) => break,
        }
    }
}
