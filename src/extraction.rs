//! Archive extraction for downloaded export artifacts

use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Extract a ZIP archive into the target directory.
///
/// The target directory is created if absent. Entries with unsafe paths are
/// skipped; existing files are overwritten.
pub fn extract_zip(archive_path: &Path, target_folder: &Path) -> Result<()> {
    debug!(?archive_path, ?target_folder, "extracting artifact archive");

    std::fs::create_dir_all(target_folder)?;

    let file = std::fs::File::open(archive_path)?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| Error::Extraction {
        archive: archive_path.to_path_buf(),
        reason: format!("failed to read ZIP archive: {}", e),
    })?;

    let mut extracted_count = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| Error::Extraction {
            archive: archive_path.to_path_buf(),
            reason: format!("failed to read ZIP entry: {}", e),
        })?;

        let entry_path = match entry.enclosed_name() {
            Some(path) => target_folder.join(path),
            None => {
                warn!("skipping entry with unsafe path");
                continue;
            }
        };

        if entry.is_dir() {
            std::fs::create_dir_all(&entry_path)?;
        } else {
            if let Some(parent) = entry_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut outfile = std::fs::File::create(&entry_path)?;
            std::io::copy(&mut entry, &mut outfile)?;
            extracted_count += 1;
        }
    }

    info!(
        ?archive_path,
        extracted_count, "artifact extraction successful"
    );

    Ok(())
}
