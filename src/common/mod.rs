mod config;
mod error;
mod models;
mod transport;

pub(crate) use self::config::*;
pub use error::*;
pub use models::*;
pub use transport::*;
