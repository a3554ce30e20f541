//! Scan module - sources of raw scan text

mod netsh;
mod replay;
mod traits;

pub use netsh::NetshScanner;
pub use replay::{ReplaySource, StaticSource};
pub use traits::ScanSource;
