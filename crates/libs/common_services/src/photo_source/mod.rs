mod client;
mod error;
mod source;

pub use client::*;
pub use error::*;
pub use source::*;
