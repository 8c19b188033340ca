use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rusttype::Font;

use crate::error::{Error, Result};

/// Bold sans-serif faces commonly installed on desktop systems, tried in
/// order when no font is given explicitly.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Reads and parses a TrueType/OpenType font file.
pub fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = fs::read(path).map_err(|source| Error::FontIo {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(data).ok_or_else(|| Error::FontParse {
        path: path.to_path_buf(),
    })
}

/// Returns the first candidate that loads, with its path.
pub fn discover_font<P: AsRef<Path>>(candidates: &[P]) -> Option<(PathBuf, Font<'static>)> {
    candidates.iter().find_map(|candidate| {
        let path = candidate.as_ref();
        match load_font(path) {
            Ok(font) => Some((path.to_path_buf(), font)),
            Err(err) => {
                debug!("skipping font candidate: {err}");
                None
            }
        }
    })
}

/// Loads the label font.
///
/// An explicit path must load. Without one, system fonts are probed and
/// `Ok(None)` means labels will not be drawn.
pub fn resolve_font(explicit: Option<&Path>) -> Result<Option<Font<'static>>> {
    if let Some(path) = explicit {
        let font = load_font(path)?;
        info!("using font {}", path.display());
        return Ok(Some(font));
    }

    match discover_font(SYSTEM_FONT_CANDIDATES) {
        Some((path, font)) => {
            info!("using system font {}", path.display());
            Ok(Some(font))
        }
        None => {
            warn!("no usable system font found, dial labels will be omitted (use --font)");
            Ok(None)
        }
    }
}
