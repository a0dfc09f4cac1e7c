pub mod dialer;
pub mod tcp_server;
pub mod tracking;

pub use dialer::TcpDialer;
pub use tcp_server::TunnelListener;
pub use tracking::SessionTracker;
