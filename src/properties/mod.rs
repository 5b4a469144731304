//! CSS property definitions.
//!
//! This module provides:
//! - `PropertyDef`, documentation for a CSS property
//! - The catalogue of common properties used for hover docs and completion

mod catalogue;
mod property;

pub use catalogue::{get_property, PROPERTIES};
pub use property::PropertyDef;
