//! Title image loading
//!
//! The header image is decoded once at startup and downsampled on demand to
//! terminal cells. Each cell shows two vertically stacked pixels using the
//! upper half block glyph, foreground for the top pixel and background for
//! the bottom one.

use image::{imageops::FilterType, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("title image not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to decode title image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// One terminal cell worth of image: `(top, bottom)` RGB pixels
pub type CellPixels = ([u8; 3], [u8; 3]);

/// Decoded title image
#[derive(Debug, Clone)]
pub struct TitleImage {
    pixels: RgbImage,
}

impl TitleImage {
    /// Load and decode an image file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ImageError::NotFound(path.to_path_buf()));
        }

        let decoded = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Loaded title image {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );

        Ok(Self {
            pixels: decoded.to_rgb8(),
        })
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Downsample to fit within `cols` x `rows` cells, keeping the aspect ratio
    ///
    /// Returns one vector per cell row. Empty when either bound is zero.
    pub fn to_cells(&self, cols: u16, rows: u16) -> Vec<Vec<CellPixels>> {
        let (width, height) = self.pixels.dimensions();
        if cols == 0 || rows == 0 || width == 0 || height == 0 {
            return Vec::new();
        }

        let max_w = u32::from(cols);
        let max_h = u32::from(rows) * 2;
        let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
        let target_w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
        // Even pixel height so every cell has a bottom pixel
        let target_h = (((height as f64 * scale).round() as u32).clamp(1, max_h) + 1) & !1;

        let resized = image::imageops::resize(&self.pixels, target_w, target_h, FilterType::Triangle);

        (0..target_h / 2)
            .map(|row| {
                (0..target_w)
                    .map(|x| {
                        let top = resized.get_pixel(x, row * 2).0;
                        let bottom = resized.get_pixel(x, row * 2 + 1).0;
                        (top, bottom)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> TitleImage {
        TitleImage::from_rgb(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn test_cells_fit_bounds() {
        let image = gradient(400, 200);
        let cells = image.to_cells(40, 20);
        assert!(!cells.is_empty());
        assert!(cells.len() <= 20);
        assert!(cells.iter().all(|row| row.len() <= 40));
    }

    #[test]
    fn test_wide_image_is_width_bound() {
        let image = gradient(400, 100);
        let cells = image.to_cells(40, 40);
        assert_eq!(cells[0].len(), 40);
        // 40 px wide -> 10 px tall -> 5 cell rows
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn test_zero_area() {
        let image = gradient(10, 10);
        assert!(image.to_cells(0, 10).is_empty());
        assert!(image.to_cells(10, 0).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TitleImage::load(dir.path().join("titanic.jpg")).unwrap_err();
        assert!(matches!(err, ImageError::NotFound(_)));
    }

    #[test]
    fn test_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titanic.jpg");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            TitleImage::load(&path),
            Err(ImageError::Decode { .. })
        ));
    }

    #[test]
    fn test_load_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("title.png");
        RgbImage::from_pixel(8, 4, Rgb([10, 20, 30])).save(&path).unwrap();

        let image = TitleImage::load(&path).unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        let cells = image.to_cells(8, 2);
        assert_eq!(cells[0][0], ([10, 20, 30], [10, 20, 30]));
    }
}
