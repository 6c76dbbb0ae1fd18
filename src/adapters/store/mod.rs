mod memory;

pub use memory::SnapshotStore;
