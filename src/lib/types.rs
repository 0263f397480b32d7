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
use crate::helpers::{fill_tokens, leftover_tokens, read_file};
use log::warn;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

/// A target platform we build images for
#[derive(Clone, Eq, Ord, PartialOrd, Hash, Debug, PartialEq, Deserialize)]
pub struct Platform {
    /// Short label as used by bashbrew, e.g. `arm64v8`
    pub bashbrew: String,
    /// Architecture name as printed by `dpkg --print-architecture`
    pub dpkg_arch: String,
    /// Rust target triple of the toolchain for this platform
    pub rust_target: String,
    /// Base image the Dockerfile starts `FROM`
    pub base_image: String,
}

impl Platform {
    pub fn new(bashbrew: &str, dpkg_arch: &str, rust_target: &str, base_image: &str) -> Platform {
        Platform {
            bashbrew: bashbrew.to_owned(),
            dpkg_arch: dpkg_arch.to_owned(),
            rust_target: rust_target.to_owned(),
            base_image: base_image.to_owned(),
        }
    }
}

/// Everything that is pinned for a run. Built once and handed to the
/// [Generator](crate::tmplwriter::Generator).
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repo_name: String,
    pub rust_version: String,
    pub rustup_version: String,
    pub rustup_home: String,
    pub cargo_home: String,
    pub path: String,
    /// Base URL of the rustup archive serving `rustup-init.sha256` files
    pub checksum_url: String,
    pub platforms: Vec<Platform>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repo_name: "https://github.com/diabloxenon/opencl".to_string(),
            rust_version: "1.51.0".to_string(),
            rustup_version: "1.23.1".to_string(),
            rustup_home: "/usr/local/rustup".to_string(),
            cargo_home: "/usr/local/cargo".to_string(),
            path: "/usr/local/cargo/bin:$PATH".to_string(),
            checksum_url: "https://static.rust-lang.org/rustup/archive".to_string(),
            platforms: vec![
                Platform::new("amd64", "amd64", "x86_64-unknown-linux-gnu", "ubuntu:20.04"),
                Platform::new(
                    "arm32v7",
                    "armhf",
                    "armv7-unknown-linux-gnueabihf",
                    "arm32v7/ubuntu:20.04",
                ),
                Platform::new(
                    "arm64v8",
                    "arm64",
                    "aarch64-unknown-linux-gnu",
                    "arm64v8/ubuntu:20.04",
                ),
                Platform::new("i386", "i386", "i686-unknown-linux-gnu", "i386/ubuntu:18.04"),
            ],
        }
    }
}

impl Config {
    /// Parses a TOML document. Keys that are missing keep their default value.
    ///
    /// # Errors
    ///
    /// * Errors out if the document isn't valid TOML or a key has the wrong type
    pub fn from_toml(toml_str: &str) -> Result<Config, Error> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads and parses the TOML file at `path`, see [from_toml](crate::types::Config::from_toml)
    pub fn load(path: &Path) -> Result<Config, Error> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Config::from_toml(&contents)
    }
}

/// The Generator struct, which renders all artifacts of the repository at
/// [layout](crate::types::Layout) with the values pinned in [config](crate::types::Config)
pub struct Generator {
    pub config: Config,
    pub layout: Layout,
}

/// Where inputs are read from and outputs are written to, relative to the
/// root of the repository being maintained.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Layout {
    pub root: PathBuf,
}

impl Layout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Layout {
        Layout { root: root.into() }
    }

    pub fn version_file(&self) -> PathBuf {
        self.root.join("VERSION")
    }

    fn templates(&self) -> PathBuf {
        self.root.join("helpers").join("templates")
    }

    pub fn pipeline_template(&self) -> PathBuf {
        self.templates().join("drone.temp")
    }

    pub fn pipeline_output(&self) -> PathBuf {
        self.root.join(".drone.yml")
    }

    pub fn build_template(&self) -> PathBuf {
        self.templates().join("build.temp")
    }

    pub fn build_output(&self) -> PathBuf {
        self.root.join("helpers").join("docker-build.sh")
    }

    pub fn dockerfile_template(&self, platform: &Platform) -> PathBuf {
        self.templates()
            .join("dockerfiles")
            .join(format!("Dockerfile-{}.temp", platform.dpkg_arch))
    }

    pub fn dockerfile_output(&self, platform: &Platform) -> PathBuf {
        self.root
            .join("helpers")
            .join("docker")
            .join(format!("Dockerfile-{}", platform.dpkg_arch))
    }

    pub fn installer_template(&self) -> PathBuf {
        self.templates().join("add_rust_lang.temp")
    }

    pub fn installer_output(&self) -> PathBuf {
        self.root.join("helpers").join("add_rust_lang.sh")
    }
}

/// A piece of text with `%%TOKEN%%` placeholders, or the result of filling them
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Template {
    pub inner: String,
    pub name: String,
}

impl Template {
    /// Reads the template at `path`, naming it after the file
    pub fn load(path: &Path) -> Result<Template, Error> {
        Ok(Template {
            inner: read_file(path)?,
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })
    }

    /// Returns a copy of this template with every `%%TOKEN%%` in `tokens` replaced.
    /// The rendered copy is named `name`.
    pub fn fill(&self, name: &str, tokens: &[(&str, &str)]) -> Template {
        let inner = fill_tokens(&self.inner, tokens);

        let leftovers = leftover_tokens(&inner);
        if !leftovers.is_empty() {
            warn!(
                "{} still contains unknown placeholders after rendering: {}",
                name,
                leftovers.join(", ")
            );
        }

        Template {
            inner,
            name: name.to_owned(),
        }
    }
}
