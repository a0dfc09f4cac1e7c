use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{read_request_head, relay, response};
use crate::domain::{TunnelError, TunnelService};

/// Accepts client connections and serves each one on its own task. One
/// connection's failure or slow peer never blocks the others.
pub struct TunnelListener {
    service: Arc<TunnelService>,
}

impl TunnelListener {
    pub fn new(service: Arc<TunnelService>) -> Self {
        Self { service }
    }

    pub async fn run(&self, listener: TcpListener) {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let service = self.service.clone();
                    tokio::spawn(async move {
                        handle_client(service, stream, peer).await;
                    });
                }
                Err(err) => {
                    // Transient accept failures (EMFILE, aborted handshakes)
                    // must not take the listener down. Back off briefly so a
                    // persistent failure does not spin the loop hot.
                    warn!(error = %err, "failed to accept connection");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}

/// One CONNECT session end to end: parse the head, dial, confirm, relay,
/// tear down. Both sockets are owned here and closed exactly once, on every
/// exit path, when they drop.
async fn handle_client(service: Arc<TunnelService>, stream: TcpStream, peer: SocketAddr) {
    let mut reader = BufReader::new(stream);

    let head = match read_request_head(&mut reader).await {
        Ok(head) => head,
        Err(err) => {
            reject(reader.into_inner(), peer, &err).await;
            return;
        }
    };

    let (mut target, session_id) = match service.open_tunnel(&head, &peer.to_string()).await {
        Ok(opened) => opened,
        Err(err) => {
            reject(reader.into_inner(), peer, &err).await;
            return;
        }
    };

    // Bytes the client sent ahead of our confirmation belong to the tunnel.
    let pipelined = reader.buffer().to_vec();
    let mut client = reader.into_inner();

    let relayed = async {
        if !pipelined.is_empty() {
            target.write_all(&pipelined).await?;
        }
        response::write_established(&mut client).await
    }
    .await;

    match relayed {
        Ok(()) => {
            let (to_target, to_client) = relay(&mut client, &mut target).await;
            info!(
                session = %session_id,
                target = %head.target,
                to_target,
                to_client,
                "tunnel closed"
            );
        }
        Err(err) => {
            debug!(session = %session_id, target = %head.target, error = %err, "tunnel setup failed");
        }
    }

    if let Err(err) = service.close_tunnel(session_id).await {
        debug!(session = %session_id, error = %err, "failed to record session close");
    }
}

async fn reject(mut client: TcpStream, peer: SocketAddr, err: &TunnelError) {
    warn!(peer = %peer, error = %err, "rejecting connection");
    let _ = response::write_error(&mut client, err.status(), &err.to_string()).await;
    let _ = client.shutdown().await;
}
