mod listener;
mod relay;
mod request;
mod response;

pub use listener::TunnelListener;
pub use relay::{relay, CHUNK_SIZE};
pub use request::read_request_head;
pub use response::{write_error, write_established};
