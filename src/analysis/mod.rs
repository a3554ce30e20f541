//! Analysis module - comparison of consecutive snapshots

mod diff;

pub use diff::{diff, DiffResult};
