//! Shared types for the journal catalog bot.

mod journal;
mod query;
mod reply;

pub use journal::*;
pub use query::*;
pub use reply::*;
