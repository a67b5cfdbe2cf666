//! Colors handed to render-target clears.

pub mod color;

pub use color::Color;
