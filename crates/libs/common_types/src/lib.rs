#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]
mod photo;
mod population_policy;

pub use photo::*;
pub use population_policy::*;
