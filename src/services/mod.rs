//! External resource loading
//!
//! This module contains services that touch the filesystem:
//! - Dataset CSV loading
//! - Title image decoding

pub mod dataset;
pub mod title_image;

pub use dataset::{load_dataset, read_dataset};
pub use title_image::{ImageError, TitleImage};
