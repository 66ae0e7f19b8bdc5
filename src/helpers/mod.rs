//! Helper functions shared by components, templates and the generator

mod html;
mod url;

pub use html::*;
pub use url::*;
