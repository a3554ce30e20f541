//! Model module - addresses, bands, observations and snapshots

mod address;
mod band;
mod observation;

pub use address::{Bssid, Oui};
pub use band::Band;
pub use observation::{AccessPointObservation, Snapshot};
