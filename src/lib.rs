pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod snapshot;

pub use config::Config;
pub use error::AppError;
pub use snapshot::HouseholdSnapshot;
