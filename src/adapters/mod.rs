// Adapters layer: concrete implementations of the domain ports.

pub mod mapillary;
pub mod memory_store;

pub use mapillary::{MapillaryConfig, MapillaryLocationProvider};
pub use memory_store::InMemorySessionStore;
