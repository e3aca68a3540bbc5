pub mod capture;
pub mod codec;
pub mod model;
pub mod render;

pub use model::*;
