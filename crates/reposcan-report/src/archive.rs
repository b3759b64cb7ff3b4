//! Deterministic zip packaging of written artifacts.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ReportError;

/// Permissions stored for every member, independent of the host file mode.
const MEMBER_PERMISSIONS: u32 = 0o644;

/// Member options shared by every entry: Deflate, the zip epoch
/// (1980-01-01 00:00:00) as timestamp, fixed permissions.
fn member_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(MEMBER_PERMISSIONS)
}

/// Bundle `members` into a new zip at `archive_path`, in the given order.
///
/// Each member is stored under its file name. Identical member contents
/// always produce a byte-identical archive.
pub fn package_archive(archive_path: &Path, members: &[&Path]) -> Result<(), ReportError> {
    let file = File::create(archive_path).map_err(|e| ReportError::write(archive_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = member_options();

    for member in members {
        let name = member
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ReportError::InvalidOutput {
                path: member.to_path_buf(),
            })?;

        let mut source = File::open(member)
            .map(BufReader::new)
            .map_err(|e| ReportError::archive(archive_path, e))?;
        zip.start_file(name.clone(), options)
            .map_err(|e| ReportError::archive(archive_path, e))?;
        let bytes =
            io::copy(&mut source, &mut zip).map_err(|e| ReportError::archive(archive_path, e))?;

        debug!(member = %name, bytes, "Added archive member");
    }

    let mut writer = zip
        .finish()
        .map_err(|e| ReportError::archive(archive_path, e))?;
    io::Write::flush(&mut writer).map_err(|e| ReportError::write(archive_path, e))?;
    Ok(())
}
