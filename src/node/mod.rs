pub mod kind;
pub mod model;
pub mod raw;

pub use kind::*;
pub use model::*;
pub use raw::*;
