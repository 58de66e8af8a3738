//! Multi-resolution `.ico` container writing and inspection.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::config::{IconConfig, MAX_ICO_SIZE};
use crate::error::{IconError, Result};
use crate::resample;

/// One image embedded in an icon container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconEntry {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    /// Stored as PNG rather than BMP.
    pub png: bool,
}

/// Encode one entry per configured size, each resampled from `master`.
pub fn encode_icon(master: &RgbaImage, icon: &IconConfig) -> Result<IconDir> {
    let mut dir = IconDir::new(ResourceType::Icon);

    for &size in &icon.sizes {
        if !(1..=MAX_ICO_SIZE).contains(&size) {
            return Err(IconError::Encode(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("icon entry size {size} is outside 1..={MAX_ICO_SIZE}"),
            )));
        }

        let resized = if master.dimensions() == (size, size) {
            master.clone()
        } else {
            resample::resize(master, size, size, icon.filter_type())
        };
        let image = IconImage::from_rgba_data(size, size, resized.into_raw());
        let entry = IconDirEntry::encode(&image).map_err(IconError::Encode)?;
        debug!(size, png = entry.is_png(), "Encoded icon entry");
        dir.add_entry(entry);
    }

    Ok(dir)
}

/// Sibling path the container is written to before being moved into place.
fn temp_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    dest.with_file_name(name)
}

fn write_file(dir: &IconDir, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    dir.write(&mut writer)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Encode `master` and write it to `dest`.
///
/// The container goes to a temporary sibling first and is renamed only after
/// it was fully written, so `dest` is never left half-written.
pub fn write_icon(master: &RgbaImage, icon: &IconConfig, dest: &Path) -> Result<()> {
    let dir = encode_icon(master, icon)?;
    let temp = temp_path(dest);

    let result = write_file(&dir, &temp).and_then(|()| fs::rename(&temp, dest));
    if let Err(source) = result {
        match fs::remove_file(&temp) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                warn!(path = %temp.display(), error = %e, "Failed to remove temporary icon");
            }
            _ => {}
        }
        return Err(IconError::unwritable(dest, source));
    }

    Ok(())
}

/// List the entries of an existing icon container, in file order.
pub fn inspect_icon(path: &Path) -> Result<Vec<IconEntry>> {
    let file = File::open(path).map_err(|e| IconError::unreadable(path, e))?;
    let dir = IconDir::read(BufReader::new(file)).map_err(|source| IconError::InvalidIcon {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(dir
        .entries()
        .iter()
        .map(|entry| IconEntry {
            width: entry.width(),
            height: entry.height(),
            bits_per_pixel: entry.bits_per_pixel(),
            png: entry.is_png(),
        })
        .collect())
}

#[cfg(test)]
#[path = "container_test.rs"]
mod tests;
