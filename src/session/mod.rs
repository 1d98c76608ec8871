mod client;
mod identity;
mod jobs;
mod session;

pub(crate) use client::*;
pub use jobs::JobPolicy;
pub use session::*;
