mod checker;
mod config;
mod existence_status;
mod http_lookup;
mod lookup;

pub use checker::ExistenceChecker;
pub use config::{ExistenceCheckConfig, ExistenceCheckConfigError, HttpStatusCodeRange};
pub use existence_status::ExistenceStatus;
pub use http_lookup::HttpExistenceLookup;
pub use lookup::{CuitExistenceLookup, LookupError};
