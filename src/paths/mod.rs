pub mod generator;
pub mod price_path;

pub use generator::{generate, generate_path, generate_path_with_rng, PathConfig};
pub use price_path::{PathPoint, PricePath, INITIAL_PRICE};
