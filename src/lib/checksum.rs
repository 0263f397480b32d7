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
use log::debug;

/// Source of the sha256 checksums of `rustup-init` binaries
pub trait ChecksumProvider {
    /// Returns the sha256 of `rustup-init` in version `rustup_version` for the
    /// target triple `rust_target`
    fn checksum(&self, rustup_version: &str, rust_target: &str) -> Result<String, Error>;
}

/// Fetches checksums from the rustup archive. Every call is a new request,
/// nothing is cached.
pub struct RustupChecksums {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RustupChecksums {
    /// `base_url` is the archive root, e.g. `https://static.rust-lang.org/rustup/archive`
    pub fn new(base_url: &str) -> RustupChecksums {
        RustupChecksums::with_client(base_url, reqwest::blocking::Client::new())
    }

    /// Like [new](crate::checksum::RustupChecksums::new), but sends its requests through `client`
    pub fn with_client(base_url: &str, client: reqwest::blocking::Client) -> RustupChecksums {
        RustupChecksums {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn url(&self, rustup_version: &str, rust_target: &str) -> String {
        format!(
            "{}/{}/{}/rustup-init.sha256",
            self.base_url, rustup_version, rust_target
        )
    }
}

impl ChecksumProvider for RustupChecksums {
    /// # Errors
    ///
    /// * Errors out if the archive can't be reached
    /// * Errors out if the archive doesn't answer with a success status
    /// * Errors out if the response is empty
    fn checksum(&self, rustup_version: &str, rust_target: &str) -> Result<String, Error> {
        let url = self.url(rustup_version, rust_target);

        debug!("GET: {}", url);

        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(Error::Checksum(format!(
                "{} answered with HTTP {}",
                url,
                response.status()
            )));
        }

        let hash = first_token(&response.text()?)?;

        debug!("Hash of rustup-init for {}: {}", rust_target, hash);

        Ok(hash)
    }
}

/// Returns the first whitespace-delimited token of a `.sha256` file, which
/// is the hash. The file name that usually follows it is dropped.
///
/// # Errors
///
/// * Errors out if `body` contains nothing but whitespace
pub fn first_token(body: &str) -> Result<String, Error> {
    body.split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| Error::Checksum("Got an empty checksum file".to_string()))
}
