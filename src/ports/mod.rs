pub mod dialer;
pub mod tracking;

pub use dialer::DialerPort;
pub use tracking::TrackingPort;
