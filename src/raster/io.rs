//! Decoding masks and source images, writing exports and previews.

use super::types::{BinaryRaster, RasterError, RawMask};
use image::{ImageError, ImageReader, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Decodes any raster the `image` crate understands into a three-channel mask.
///
/// Grayscale and alpha-bearing inputs are converted to RGB (alpha dropped),
/// so a semantically binary mask stored as L8 loads like an RGB one.
///
/// # Errors
/// - [`RasterError::Io`] when the file is missing or unreadable
/// - [`RasterError::Decode`] when the content is not a decodable raster
pub fn load_mask(path: &Path) -> Result<RawMask, RasterError> {
    let pixels = decode_rgb(path)?;
    log::debug!(
        "Decoded mask {} ({}x{})",
        path.display(),
        pixels.width(),
        pixels.height()
    );
    Ok(RawMask::from_rgb_image(pixels))
}

/// Decodes the source image shown underneath the overlay.
pub fn load_source_image(path: &Path) -> Result<RgbImage, RasterError> {
    decode_rgb(path)
}

fn decode_rgb(path: &Path) -> Result<RgbImage, RasterError> {
    let io_err = |source: std::io::Error| RasterError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    let decoded = reader
        .decode()
        .map_err(|err| image_error(path, err, false))?;
    Ok(decoded.to_rgb8())
}

/// Writes a binary export; the format follows the file extension.
pub fn save_binary(raster: &BinaryRaster, path: &Path) -> Result<(), RasterError> {
    raster
        .as_gray_image()
        .save(path)
        .map_err(|err| image_error(path, err, true))
}

/// Writes an RGB image (used for composited previews).
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<(), RasterError> {
    image
        .save(path)
        .map_err(|err| image_error(path, err, true))
}

/// Ensures the directory exists, creating it (and parents) if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, RasterError> {
    if !directory.exists() {
        log::info!("Creating output directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|source| RasterError::Io {
            path: directory.to_path_buf(),
            source,
        })?;
    }
    Ok(directory.to_path_buf())
}

fn image_error(path: &Path, err: ImageError, encoding: bool) -> RasterError {
    let path = path.to_path_buf();
    match err {
        ImageError::IoError(source) => RasterError::Io { path, source },
        source if encoding => RasterError::Encode { path, source },
        source => RasterError::Decode { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn missing_mask_is_io_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = load_mask(&temp.path().join("absent.png")).unwrap_err();
        assert!(matches!(err, RasterError::Io { .. }));
    }

    #[test]
    fn garbage_file_is_decode_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("mask.png");
        fs::write(&path, b"definitely not a png").unwrap();
        let err = load_mask(&path).unwrap_err();
        assert!(matches!(err, RasterError::Decode { .. }));
    }

    #[test]
    fn grayscale_mask_loads_as_three_channels() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("mask.png");
        let mut gray = GrayImage::new(4, 2);
        gray.put_pixel(1, 1, Luma([255]));
        gray.save(&path).unwrap();

        let mask = load_mask(&path).unwrap();
        assert_eq!(mask.dimensions(), (4, 2));
        assert_eq!(mask.pixel(1, 1), Some([255, 255, 255]));
        assert_eq!(mask.pixel(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn ensure_directory_creates_nested_path() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("save");
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
