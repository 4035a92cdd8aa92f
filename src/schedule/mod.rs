pub mod types;
pub mod pool;
pub mod round;
pub mod generator;

pub use types::{Round, Schedule, Team};
pub use generator::{generate, GeneratorOptions, Termination, MAX_ROUNDS};
