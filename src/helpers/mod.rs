//! Helper functions shared by the repository and the CLI
//!
//! Date parsing feeds post ordering; the list helpers back the blog gallery
//! (search, ordering, paging).

mod date;
mod list;

pub use date::*;
pub use list::*;
