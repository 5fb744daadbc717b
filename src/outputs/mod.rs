//! Output generation for scraped records.
//!
//! # Submodules
//!
//! - [`message`]: Renders records as chat messages (embeds)
//! - [`json`]: Serializes records to JSON for stdout or a file

pub mod json;
pub mod message;
