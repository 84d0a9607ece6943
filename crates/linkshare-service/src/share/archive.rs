//! Zip archives of shared directories.

use std::io::{Cursor, Write};

use bytes::Bytes;
use futures::StreamExt;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use linkshare_core::error::{AppError, ErrorKind};
use linkshare_core::result::AppResult;
use linkshare_core::traits::storage::FileSystem;
use linkshare_storage::path;

/// Maximum number of entries in one archive.
const MAX_ENTRIES: usize = 10_000;
/// Maximum total uncompressed size of one archive (1 GB).
const MAX_TOTAL_BYTES: u64 = 1024 * 1024 * 1024;

enum Entry {
    Dir(String),
    File(String, Bytes),
}

/// Pack the directory `dir` of `fs` into a zip archive.
///
/// Entry names are relative to the parent of `dir`, so the archive has a
/// single top-level folder named after the directory.
pub async fn zip_directory(fs: &dyn FileSystem, dir: &str) -> AppResult<Bytes> {
    let dir = path::clean(dir);
    let entries = collect(fs, &dir).await?;
    let count = entries.len();
    let archive = pack(entries)?;
    debug!(path = %dir, entries = count, bytes = archive.len(), "Built directory archive");
    Ok(archive)
}

/// Walk `dir` depth-first and load every file.
async fn collect(fs: &dyn FileSystem, dir: &str) -> AppResult<Vec<Entry>> {
    let base = path::parent(dir);
    let mut entries = Vec::new();
    let mut total_bytes = 0u64;

    let mut pending = vec![dir.to_string()];
    while let Some(current) = pending.pop() {
        entries.push(Entry::Dir(entry_name(&base, &current)));

        let mut children = fs.list(&current).await?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in children {
            if entries.len() >= MAX_ENTRIES {
                return Err(AppError::validation("Directory has too many entries to archive"));
            }
            if child.is_directory {
                pending.push(child.path);
                continue;
            }

            total_bytes += child.size_bytes;
            if total_bytes > MAX_TOTAL_BYTES {
                return Err(AppError::validation("Directory is too large to archive"));
            }

            let mut content = Vec::with_capacity(child.size_bytes as usize);
            let mut stream = fs.read(&child.path).await?;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk
                    .map_err(|e| AppError::from_io(format!("Failed to read {}", child.path), e))?;
                content.extend_from_slice(&chunk);
            }
            entries.push(Entry::File(
                entry_name(&base, &child.path),
                Bytes::from(content),
            ));
        }
    }
    Ok(entries)
}

fn pack(entries: Vec<Entry>) -> AppResult<Bytes> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        match entry {
            Entry::Dir(name) => {
                writer
                    .add_directory(format!("{name}/"), options)
                    .map_err(zip_error)?;
            }
            Entry::File(name, content) => {
                writer.start_file(name, options).map_err(zip_error)?;
                writer
                    .write_all(&content)
                    .map_err(|e| AppError::from_io("Failed to write archive entry", e))?;
            }
        }
    }

    let cursor = writer.finish().map_err(zip_error)?;
    Ok(Bytes::from(cursor.into_inner()))
}

fn entry_name(base: &str, full: &str) -> String {
    full.strip_prefix(base)
        .unwrap_or(full)
        .trim_start_matches('/')
        .to_string()
}

fn zip_error(e: zip::result::ZipError) -> AppError {
    AppError::with_source(ErrorKind::Internal, "Failed to build archive", e)
}
