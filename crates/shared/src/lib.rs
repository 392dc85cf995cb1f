mod catalog;
mod mealplan;
mod recipe;
mod scale;
mod stock;

pub use catalog::*;
pub use mealplan::*;
pub use recipe::*;
pub use scale::*;
pub use stock::*;
