//! Reading SQL from files, directories, or stdin.

use anyhow::{bail, Context, Result};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wincall_core::FileSource;

/// Name given to SQL read from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// Reads every input as a [`FileSource`].
///
/// With no paths, stdin is read. A directory contributes its `.sql` files
/// (not recursive), sorted by name.
pub fn read_input(paths: &[PathBuf]) -> Result<Vec<FileSource>> {
    if paths.is_empty() {
        return read_from_stdin();
    }

    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            for file in sql_files_in(path)? {
                sources.push(read_file(&file)?);
            }
        } else {
            sources.push(read_file(path)?);
        }
    }
    Ok(sources)
}

fn read_from_stdin() -> Result<Vec<FileSource>> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    Ok(vec![FileSource {
        name: STDIN_NAME.to_string(),
        content,
    }])
}

fn read_file(path: &Path) -> Result<FileSource> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(FileSource {
        name: path.display().to_string(),
        content,
    })
}

fn sql_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    // Symlinks are not followed, so a link cannot pull in files from elsewhere.
    for entry in WalkDir::new(dir).max_depth(1).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        let is_sql = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"));
        if entry.file_type().is_file() && is_sql {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        bail!("No .sql files found in directory: {}", dir.display());
    }
    files.sort();
    Ok(files)
}
