//! Helper functions shared by the content pipeline and the generator
//!
//! Escaping, URL and slug handling, and build-date arithmetic. Everything
//! here is a pure function of its arguments.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
