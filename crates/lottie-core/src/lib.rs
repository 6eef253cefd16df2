//! Cropping for Lottie animations.
//!
//! Shrinks the canvas height and moves layer positions up so the top part of
//! the animation stays in frame.
//!
//! ```no_run
//! use lottie_core::{crop_animation, read_animation, write_animation, CropConfig};
//! use std::path::Path;
//!
//! let mut doc = read_animation(Path::new("bear.json"))?;
//! crop_animation(&mut doc, &CropConfig::default())?;
//! write_animation(Path::new("bear_cropped.json"), &doc, false)?;
//! # Ok::<(), lottie_core::CropError>(())
//! ```

pub mod crop;
mod error;
mod fraction;
pub mod io;
pub mod number;

pub use crop::{
    crop_animation, crop_animation_with, crop_height, shift_layers, CropConfig, CropReport,
    HeightChange, MissingHeight, ShiftStats,
};
pub use error::{CropError, FractionError};
pub use fraction::Fraction;
pub use io::{read_animation, write_animation};
