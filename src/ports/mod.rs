pub mod inventory_source;

pub use inventory_source::{InventoryError, InventorySource};
