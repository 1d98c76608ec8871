pub mod common;
pub mod config;
pub mod domain;
pub mod provider;
pub mod record;
pub mod schema;
pub mod session;

#[cfg(test)]
mod testing;

pub use crate::config::*;
pub use provider::*;
