#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::module_name_repetitions)]
//! Source generator for lcdgfx display controllers.
//!
//! Controllers are described by JSON [`descriptor`]s, the C++ sources are assembled from text
//! templates with `~NAME~` placeholders.

pub mod descriptor;

mod error;
pub use error::*;

pub mod functions;

mod generator;
pub use generator::*;

mod ordered_map;
pub use ordered_map::*;

mod template;
pub use template::*;
