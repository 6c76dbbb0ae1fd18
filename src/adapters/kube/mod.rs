mod client;

pub use client::KubeAdapter;
