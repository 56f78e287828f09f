//! Median-cut palette extraction.
//!
//! Decode an image into a [`Bitmap`], call [`extract`] (or configure a
//! [`PaletteBuilder`]), and read the [`Swatch`]es off the returned
//! [`Palette`], most populous first.

pub mod bitmap;
pub mod color;
pub mod error;
pub mod output;
pub mod pipeline;

pub use bitmap::Bitmap;
pub use color::Color;
pub use error::{PaletteError, Result};
pub use pipeline::assign::NamedSlots;
pub use pipeline::extract::{extract, Palette, PaletteBuilder, Swatch};
pub use pipeline::filter::{DefaultFilter, Filter};
