pub mod kube;
pub mod store;

pub use kube::KubeAdapter;
pub use store::SnapshotStore;
