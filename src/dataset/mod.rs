pub mod export;
pub mod processed;

pub use export::{ExportWriter, EXPORT_HEADER, REFERENCE_HOURS};
pub use processed::{ProcessedCsv, PROCESSED_HEADER};

use std::fs;
use std::path::Path;

use crate::capture::DataError;

/// Write `content` to `path`, creating missing parent directories. Existing files are replaced.
pub(crate) fn write_replacing(path: &Path, content: &str) -> Result<(), DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| DataError::io(path, e))
}
