pub mod extract;
pub mod row;

pub use extract::*;
pub use row::*;
