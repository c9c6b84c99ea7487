//! Image exporters
//!
//! Converted images are always written as 8-bit TIFF, whatever the input
//! container or the output file's extension.

use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};
use crate::models::PixelBuffer;

/// Export a pixel buffer to an 8-bit TIFF file.
///
/// Buffers decoded with alpha are written as RGBA8, all others as RGB8.
/// The file is encoded next to its destination and renamed into place only
/// once fully written, so a failed export never leaves a partial file behind.
pub fn export_tiff<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let output_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(output_dir)
        .map_err(|e| ConvertError::encode(path, format!("Failed to create TIFF file: {}", e)))?;

    {
        let mut writer = BufWriter::new(temp_file.as_file_mut());
        write_tiff(image, &mut writer).map_err(|message| ConvertError::encode(path, message))?;
        writer
            .flush()
            .map_err(|e| ConvertError::encode(path, format!("Failed to flush TIFF file: {}", e)))?;
    }

    temp_file
        .persist(path)
        .map_err(|e| ConvertError::encode(path, format!("Failed to persist TIFF file: {}", e)))?;

    Ok(())
}

fn write_tiff<W: Write + Seek>(
    image: &PixelBuffer,
    writer: &mut W,
) -> std::result::Result<(), String> {
    use tiff::encoder::{colortype, TiffEncoder};

    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| format!("Failed to create TIFF encoder: {}", e))?;

    if image.has_alpha {
        let data: Vec<u8> = image
            .pixels()
            .iter()
            .flat_map(|p| [p.red, p.green, p.blue, p.alpha])
            .collect();
        encoder
            .write_image::<colortype::RGBA8>(image.width(), image.height(), &data)
            .map_err(|e| format!("Failed to write TIFF image: {}", e))
    } else {
        let data: Vec<u8> = image
            .pixels()
            .iter()
            .flat_map(|p| [p.red, p.green, p.blue])
            .collect();
        encoder
            .write_image::<colortype::RGB8>(image.width(), image.height(), &data)
            .map_err(|e| format!("Failed to write TIFF image: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::decode_image;
    use crate::error::ErrorKind;
    use crate::models::Pixel;
    use std::fs;
    use tempfile::tempdir;

    fn create_test_image(has_alpha: bool) -> PixelBuffer {
        let pixels = vec![
            Pixel::argb(255, 0, 10, 20),
            Pixel::argb(128, 30, 40, 50),
            Pixel::argb(0, 60, 70, 80),
            Pixel::argb(255, 90, 100, 255),
        ];
        let mut image = PixelBuffer::new(2, 2, pixels, has_alpha).unwrap();
        if !has_alpha {
            for p in image.pixels_mut() {
                p.alpha = 255;
            }
        }
        image
    }

    #[test]
    fn test_export_tiff_rgb_success() {
        let image = create_test_image(false);
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_rgb.tif");

        let result = export_tiff(&image, &path);

        assert!(result.is_ok(), "RGB export should succeed: {:?}", result);
        assert!(path.exists(), "TIFF file should exist");
        assert_eq!(decode_image(&path).unwrap(), image);
    }

    #[test]
    fn test_export_tiff_keeps_alpha() {
        let image = create_test_image(true);
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_rgba.tiff");

        export_tiff(&image, &path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert!(decoded.has_alpha);
        assert_eq!(decoded.pixels(), image.pixels());
    }

    #[test]
    fn test_export_tiff_ignores_extension() {
        let image = create_test_image(false);
        let dir = tempdir().unwrap();
        let path = dir.path().join("changed_scan.jpg");

        export_tiff(&image, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let magic = &bytes[..4];
        assert!(
            magic == b"II*\0" || magic == b"MM\0*",
            "expected TIFF header, got {:?}",
            magic
        );
    }

    #[test]
    fn test_export_tiff_invalid_path() {
        let image = create_test_image(false);
        let path = "/nonexistent/directory/test.tiff";

        let err = export_tiff(&image, path).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Encode);
        assert!(err.to_string().contains("Failed to create TIFF file"));
    }

    #[test]
    fn test_export_tiff_leaves_no_temp_files() {
        let image = create_test_image(false);
        let dir = tempdir().unwrap();
        let path = dir.path().join("only.tif");

        export_tiff(&image, &path).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
