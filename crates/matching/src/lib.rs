mod matcher;
mod reconcile;

pub use matcher::*;
pub use reconcile::*;
