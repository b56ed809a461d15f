//! Media probing module

pub mod pool;

pub use pool::{probe_many, validate_concurrency, ProbePool};
