//This file is part of buildsync
//
//buildsync is free software: you can redistribute it and/or modify
//it under the terms of the GNU General Public License as published by
//the Free Software Foundation, either version 3 of the License, or
//(at your option) any later version.
//
//buildsync is distributed in the hope that it will be useful,
//but WITHOUT ANY WARRANTY; without even the implied warranty of
//MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//GNU General Public License for more details.
//
//You should have received a copy of the GNU General Public License
//along with buildsync.  If not, see <http://www.gnu.org/licenses/>.

use crate::errors::Error;
use crate::types::*;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::fs::{create_dir_all, read_to_string, write};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"%%[A-Za-z0-9_-]+%%").unwrap();
    static ref SCHEME_HOST: Regex = Regex::new(r"\w+://[\w.]+/").unwrap();
}

/// Reads the whole file at `path` into a String
///
/// # Errors
///
/// * Errors out if the file doesn't exist or can't be read
pub fn read_file(path: &Path) -> Result<String, Error> {
    read_to_string(path).map_err(|e| Error::File(format!("{}: {}", path.display(), e)))
}

/// Writes `contents` to `path`, creating missing parent directories and
/// replacing whatever was there before
pub fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            create_dir_all(dir).map_err(|e| Error::File(format!("{}: {}", dir.display(), e)))?;
        }
    }

    write(path, contents).map_err(|e| Error::File(format!("{}: {}", path.display(), e)))
}

/// Reads the project version from the `VERSION` file of the layout.
///
/// The version is otherwise taken as-is, only surrounding whitespace (e.g. the
/// trailing newline editors like to add) is dropped.
///
/// # Errors
///
/// * Errors out if the `VERSION` file is missing
/// * Errors out if the `VERSION` file is empty
pub fn read_version(layout: &Layout) -> Result<String, Error> {
    let path = layout.version_file();
    let version = read_file(&path)?.trim().to_string();

    if version.is_empty() {
        return Err(Error::Version(format!("{} is empty", path.display())));
    }

    debug!("Project version: {}", version);

    Ok(version)
}

/// Replaces every `%%TOKEN%%` for the `(TOKEN, value)` pairs in `tokens`, in order
pub fn fill_tokens(text: &str, tokens: &[(&str, &str)]) -> String {
    tokens.iter().fold(text.to_string(), |acc, (token, value)| {
        acc.replace(&format!("%%{}%%", token), value)
    })
}

/// Lists the `%%TOKEN%%` placeholders that are still present in `text`
pub fn leftover_tokens(text: &str) -> Vec<String> {
    let mut leftovers: Vec<String> = PLACEHOLDER
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    leftovers.sort();
    leftovers.dedup();
    leftovers
}

/// Strips the `scheme://host/` part off a repository URL, leaving the
/// `owner/name` that's used as the image tag name
pub fn tag_name(repo_name: &str) -> String {
    SCHEME_HOST.replace_all(repo_name, "").into_owned()
}

/// Full image reference for `version` on the architecture `dpkg_arch`, e.g.
/// `diabloxenon/opencl:0.3.0-arm64`
pub fn image_name(repo_name: &str, version: &str, dpkg_arch: &str) -> String {
    format!("{}:{}-{}", tag_name(repo_name), version, dpkg_arch)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| name == "target" || name.starts_with('.'))
}

/// Walks the tree below `root` and returns every `Cargo.toml` in it, sorted.
/// Build output (`target`) and hidden directories aren't descended into.
///
/// # Errors
///
/// * Errors out if a directory of the tree can't be read
pub fn find_manifests(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut manifests = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

    for entry in walker {
        let entry = entry?;

        if entry.file_type().is_file() && entry.file_name() == "Cargo.toml" {
            debug!("Found manifest {}", entry.path().display());
            manifests.push(entry.into_path());
        }
    }

    Ok(manifests)
}
