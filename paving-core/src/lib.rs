pub mod calculations;
pub mod db;
pub mod format;
pub mod models;

pub use db::repository::{RateStore, RepositoryError};
pub use models::*;
