//! Persistence layer (JSON snapshot on disk).

pub mod store;

pub use store::{JsonDb, PersistedState};
