pub mod core;
pub mod systems;

pub use crate::core::*;
pub use systems::*;
