pub mod expression;
pub mod select;

pub use expression::*;
pub use select::*;
