mod due;
mod fulfillment;
mod ranking;

pub use due::*;
pub use fulfillment::*;
pub use ranking::*;
