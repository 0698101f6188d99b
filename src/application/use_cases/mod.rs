pub mod poll_snapshots;

pub use poll_snapshots::*;
