//! Response Parser: best-effort structured extraction from free-form model text.
//!
//! None of these parsers fail. Unexpected phrasing degrades to a partial or
//! empty result, which the populators then write (or skip) as-is.

pub mod cover_letter;
pub mod skills;
pub mod summary;

pub use cover_letter::parse_cover_letter;
pub use skills::parse_skills;
pub use summary::parse_summary;
