mod config;
mod id;
mod models;
mod resource;

pub use self::config::*;
pub use id::*;
pub use models::Record;
pub use resource::*;
