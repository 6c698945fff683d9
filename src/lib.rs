// Main library file for the travel planner core

// Export one module per component
pub mod catalog;
pub mod graph;
pub mod ranking;
pub mod selector;

// Re-export key types for convenience
pub use catalog::{CatalogError, CatalogStore, Hotel};
pub use graph::{CityGraph, CityKey, DistanceMatrix, Route, RouteError};
pub use ranking::{find_by_name, sort_by_distance, sort_by_price, sort_by_rating};
pub use selector::{select_within_budget, Selection};
