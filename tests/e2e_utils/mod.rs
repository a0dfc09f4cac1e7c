#![cfg(test)]
#![allow(dead_code)]

pub mod echo_server;
pub mod tunnel_server;

pub use echo_server::EchoServer;
pub use tunnel_server::TestTunnelServer;

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

/// Read the proxy's response head (status line + headers + blank line).
pub async fn read_response_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut byte = [0u8; 1];

    while !head.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte).await {
            Ok(0) => break,
            Ok(_) => head.push(byte[0]),
            Err(_) => break,
        }
    }

    String::from_utf8_lossy(&head).to_string()
}
