mod config;
mod lookup;
mod models;
mod resource;

pub use self::config::*;
pub use lookup::*;
pub use models::Domain;
pub use resource::*;
