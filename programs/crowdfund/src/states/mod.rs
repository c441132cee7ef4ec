pub mod common;
pub use common::*;

pub mod campaign;
pub use campaign::*;
