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

//! Rewriting the version fields of `Cargo.toml` manifests.

use crate::errors::Error;
use crate::helpers::{read_file, write_file};
use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::path::Path;

/// A semver-shaped version, `MAJOR.MINOR.PATCH` with an optional
/// pre-release/build suffix
const SEMVER: &str = r"\d+\.\d+\.\d+(?:[-+][0-9A-Za-z.+-]*)?";

lazy_static! {
    static ref TABLE_HEADER: Regex = Regex::new(r"^[ \t]*\[\[?[ \t]*([^\]]+?)[ \t]*\]").unwrap();
    static ref STANDALONE: Regex = Regex::new(&format!(
        r#"^(version[ \t]*=[ \t]*)"{}"([ \t]*\r?\n?)$"#,
        SEMVER
    ))
    .unwrap();
    static ref INLINE: Regex = Regex::new(&format!(
        r#"([{{,][ \t]*version[ \t]*=[ \t]*)"{}""#,
        SEMVER
    ))
    .unwrap();
    static ref PATH_KEY: Regex = Regex::new(r"[{,][ \t]*path[ \t]*=").unwrap();
}

/// Tables whose own `version` field is the version of the project
fn is_package_table(table: &str) -> bool {
    table == "package" || table == "workspace.package"
}

/// Sets the version fields of the manifest text `contents` to `version`.
///
/// Two kinds of fields are rewritten, in this order:
///
/// * the standalone `version = "0.1.0"` line of `[package]` or `[workspace.package]`
/// * inline tables of path dependencies like `libfoo = { version = "0.1.0", path = "../libfoo" }`
///
/// Only the quoted version changes. Versions of dependencies without a `path`,
/// version fields of other tables and fields that don't look like `N.N.N`
/// are left as they are.
pub fn bump_manifest(contents: &str, version: &str) -> String {
    let mut table = String::new();
    let mut bumped = String::with_capacity(contents.len());

    for line in contents.split_inclusive('\n') {
        if let Some(caps) = TABLE_HEADER.captures(line) {
            table = caps[1].to_string();
            bumped.push_str(line);
            continue;
        }

        let line = if is_package_table(&table) {
            STANDALONE.replace(line, |caps: &Captures| {
                format!("{}\"{}\"{}", &caps[1], version, &caps[2])
            })
        } else {
            line.into()
        };

        if line.contains('{') && PATH_KEY.is_match(&line) {
            bumped.push_str(&INLINE.replace_all(&line, |caps: &Captures| {
                format!("{}\"{}\"", &caps[1], version)
            }));
        } else {
            bumped.push_str(&line);
        }
    }

    bumped
}

/// Sets the version fields of the manifest at `path` to `version`, see
/// [bump_manifest](crate::manifest::bump_manifest). The file is only written if
/// something changed.
///
/// Returns whether the manifest was changed.
///
/// # Errors
///
/// * Errors out if the manifest can't be read or written
pub fn rewrite_manifest(path: &Path, version: &str) -> Result<bool, Error> {
    let contents = read_file(path)?;
    let bumped = bump_manifest(&contents, version);

    if bumped == contents {
        debug!("{} is already up to date", path.display());
        return Ok(false);
    }

    write_file(path, &bumped)?;
    debug!("Set version of {} to {}", path.display(), version);

    Ok(true)
}
