mod aggregation;
mod nutrition;
mod week;

pub use aggregation::*;
pub use nutrition::*;
pub use week::*;
