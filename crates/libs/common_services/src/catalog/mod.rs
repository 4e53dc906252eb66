mod cache;
mod error;
mod scan;
mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_source;

pub use cache::*;
pub use error::*;
pub use scan::*;
pub use service::*;
