mod snapshot;

pub use snapshot::SnapshotEcho;
