use crate::error::{QvError, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Bytes needed to recognise every supported image header.
const SNIFF_LEN: usize = 32;

/// Recursively copies `src` into `dest` (created if missing). Returns the
/// destination path of every copied file.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| QvError::Io(e.into()))?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(QvError::write(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(QvError::write(&target))?;
            copied.push(target);
        }
    }
    Ok(copied)
}

/// Outcome of staging one note's resources.
#[derive(Debug, Default)]
pub struct StagedResources {
    /// `(old, new)` file names of resources that gained an extension.
    pub renamed: Vec<(String, String)>,
    /// Extension-less files whose type could not be recognised.
    pub unknown: Vec<PathBuf>,
}

/// Copies a note's resource directory into `dest` and gives extension-less
/// images the extension their content calls for.
pub fn stage(src: &Path, dest: &Path) -> Result<StagedResources> {
    let mut staged = StagedResources::default();
    for path in copy_dir(src, dest)? {
        if path.extension().is_some() {
            continue;
        }
        let Some(ext) = sniff_file(&path)? else {
            log::warn!("cannot tell the type of resource {}", path.display());
            staged.unknown.push(path);
            continue;
        };
        let renamed = path.with_extension(ext);
        fs::rename(&path, &renamed).map_err(QvError::write(&renamed))?;
        if let (Some(old), Some(new)) = (path.file_name(), renamed.file_name()) {
            staged.renamed.push((
                old.to_string_lossy().into_owned(),
                new.to_string_lossy().into_owned(),
            ));
        }
    }
    Ok(staged)
}

fn sniff_file(path: &Path) -> Result<Option<&'static str>> {
    let mut head = Vec::with_capacity(SNIFF_LEN);
    fs::File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    Ok(sniff_image_type(&head))
}

/// Image type from the leading bytes of a file, named as a file extension.
pub fn sniff_image_type(head: &[u8]) -> Option<&'static str> {
    let at = |offset: usize, magic: &[u8]| head.get(offset..offset + magic.len()) == Some(magic);

    if at(6, b"JFIF") || at(6, b"Exif") || at(0, b"\xff\xd8\xff\xdb") {
        Some("jpeg")
    } else if at(0, b"\x89PNG\r\n\x1a\n") {
        Some("png")
    } else if at(0, b"GIF87a") || at(0, b"GIF89a") {
        Some("gif")
    } else if at(0, b"MM") || at(0, b"II") {
        Some("tiff")
    } else if at(0, b"\x01\xda") {
        Some("rgb")
    } else if let Some(ext) = sniff_netpbm(head) {
        Some(ext)
    } else if at(0, b"\x59\xa6\x6a\x95") {
        Some("rast")
    } else if at(0, b"#define ") {
        Some("xbm")
    } else if at(0, b"RIFF") && at(8, b"WEBP") {
        Some("webp")
    } else if at(0, b"\x76\x2f\x31\x01") {
        Some("exr")
    } else if at(0, b"BM") {
        Some("bmp")
    } else {
        None
    }
}

/// `P1`..`P6` followed by whitespace.
fn sniff_netpbm(head: &[u8]) -> Option<&'static str> {
    match head {
        [b'P', kind, ws, ..] if b" \t\n\r".contains(ws) => match *kind {
            b'1' | b'4' => Some("pbm"),
            b'2' | b'5' => Some("pgm"),
            b'3' | b'6' => Some("ppm"),
            _ => None,
        },
        _ => None,
    }
}
