#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::module_name_repetitions)]
//! Refreshes the MIT license headers of C, C++ and Python sources.

mod error;
pub use error::*;

mod hash_db;
pub use hash_db::*;

mod header;
pub use header::*;

mod stamper;
pub use stamper::*;
