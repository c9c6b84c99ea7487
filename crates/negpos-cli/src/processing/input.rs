//! Input file handling and path utilities.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Supported image extensions for batch processing
pub const SUPPORTED_EXTENSIONS: &[&str] = &["tif", "tiff", "jpg", "jpeg", "png", "bmp"];

/// Prefix added to every converted file name
pub const OUTPUT_PREFIX: &str = "changed_";

/// True if the path has one of the supported extensions (case-insensitive)
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Determine output path for a converted input.
///
/// The output keeps the input's file name, extension included, behind
/// [`OUTPUT_PREFIX`]. Inputs found in subdirectories of `input_root` land in
/// the same subdirectories under `output_dir`, so equally named frames from
/// different folders never share an output. The file content is always TIFF.
pub fn determine_output_path(
    input: &Path,
    input_root: &Path,
    output_dir: &Path,
) -> Result<PathBuf, String> {
    let filename = input
        .file_name()
        .ok_or_else(|| format!("Invalid input filename: {}", input.display()))?;

    let mut output_name = OsString::from(OUTPUT_PREFIX);
    output_name.push(filename);

    let mut output = output_dir.to_path_buf();
    if let Some(subdir) = input
        .strip_prefix(input_root)
        .ok()
        .and_then(|relative| relative.parent())
        .filter(|subdir| !subdir.as_os_str().is_empty())
    {
        output.push(subdir);
    }
    output.push(output_name);
    Ok(output)
}

/// Collect supported image files from a directory.
///
/// If `recursive` is true, subdirectories are also scanned. Symlinked
/// directories are not followed. Results are sorted for consistent ordering.
pub fn collect_images(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err(format!("Input directory not found: {}", dir.display()));
    }

    let mut files = Vec::new();
    collect_images_from_dir(dir, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();
        // file_type() does not follow symlinks, so a link back to an
        // ancestor cannot send the walk in circles
        let file_type = entry
            .file_type()
            .map_err(|e| format!("Failed to inspect {}: {}", path.display(), e))?;

        if file_type.is_dir() {
            if recursive {
                collect_images_from_dir(&path, recursive, files)?;
            }
        } else if path.is_file() && is_supported_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_supported_image_case_insensitive() {
        for name in ["a.tif", "a.TIFF", "a.Jpg", "a.jpeg", "a.PNG", "a.bmp"] {
            assert!(is_supported_image(Path::new(name)), "{}", name);
        }
        for name in ["a.gif", "a.dng", "a", "a.tif.txt", ".png"] {
            assert!(!is_supported_image(Path::new(name)), "{}", name);
        }
    }

    #[test]
    fn test_determine_output_path_keeps_name_and_extension() {
        let out = determine_output_path(
            Path::new("scans/IMG_0001.JPG"),
            Path::new("scans"),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("out/changed_IMG_0001.JPG"));
    }

    #[test]
    fn test_determine_output_path_mirrors_subdirectories() {
        let root = Path::new("scans");
        let first = determine_output_path(Path::new("scans/roll 1/frame.tif"), root, Path::new("out"))
            .unwrap();
        let second = determine_output_path(Path::new("scans/roll 2/frame.tif"), root, Path::new("out"))
            .unwrap();

        assert_eq!(first, PathBuf::from("out/roll 1/changed_frame.tif"));
        assert_eq!(second, PathBuf::from("out/roll 2/changed_frame.tif"));
    }

    #[test]
    fn test_determine_output_path_outside_root_is_flat() {
        let out = determine_output_path(
            Path::new("elsewhere/frame.tif"),
            Path::new("scans"),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("out/changed_frame.tif"));
    }

    #[cfg(unix)]
    #[test]
    fn test_determine_output_path_keeps_non_utf8_names() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let name = std::ffi::OsStr::from_bytes(b"frame\xff.tif");
        let input = Path::new("scans").join(name);
        let out = determine_output_path(&input, Path::new("scans"), Path::new("out")).unwrap();

        let file_name = out.file_name().unwrap().to_os_string().into_vec();
        assert_eq!(file_name, b"changed_frame\xff.tif".to_vec());
    }

    #[test]
    fn test_determine_output_path_rejects_bare_root() {
        assert!(determine_output_path(Path::new("/"), Path::new("/"), Path::new("out")).is_err());
    }

    #[test]
    fn test_collect_images_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.tif", "a.PNG", "notes.txt", "c.jpeg", "d.gif"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("e.bmp"), b"x").unwrap();

        let files = collect_images(dir.path(), false).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.tif", "c.jpeg"]);

        let files = collect_images(dir.path(), true).unwrap();
        assert_eq!(files.len(), 4);
        assert!(files.iter().any(|p| p.ends_with("nested/e.bmp")));
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_images_skips_symlinked_dirs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tif"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let files = collect_images(dir.path(), true).unwrap();
        assert_eq!(files, vec![dir.path().join("a.tif")]);
    }

    #[test]
    fn test_collect_images_missing_dir() {
        let dir = tempdir().unwrap();
        let err = collect_images(&dir.path().join("nope"), false).unwrap_err();
        assert!(err.contains("Input directory not found"));
    }

    #[test]
    fn test_collect_images_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(collect_images(dir.path(), false).unwrap().is_empty());
    }
}
