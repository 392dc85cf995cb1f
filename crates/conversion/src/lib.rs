mod factor;
mod price;

pub use factor::*;
pub use price::*;
