//! Ports (trait boundaries) for external dependencies.
//!
//! The training loop only knows about the [`Observer`] trait; progress bars,
//! log output and report files are adapters living in `pipeline::observers`.

pub mod observer;

pub use observer::Observer;
