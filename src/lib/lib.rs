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

//! libbuildsync keeps the generated build artifacts of a multi-architecture
//! docker pipeline in sync with a single `VERSION` file:
//!
//! * the `version` fields of every `Cargo.toml` in the tree
//! * the CI pipeline (`.drone.yml`) and the docker build script
//! * one Dockerfile per target platform
//! * the shell script installing the pinned rust toolchain, including the
//!   checksums of `rustup-init` for every platform
//!
//! Everything is rendered from templates containing `%%TOKEN%%` placeholders.
//!
//! # Usage
//!
//! The following regenerates everything below the current directory:
//!
//! ```no_run
//! use libbuildsync::*;
//!
//! let generator = Generator::new(".");
//! // Fetches the rustup-init checksums from static.rust-lang.org
//! let checksums = RustupChecksums::new(&generator.config.checksum_url);
//!
//! generator.run(&checksums).unwrap();
//! ```

pub mod checksum;
pub mod errors;
pub mod helpers;
pub mod manifest;
pub mod tmplwriter;
pub mod types;

pub use crate::checksum::*;
pub use crate::errors::*;
pub use crate::helpers::*;
pub use crate::manifest::*;
pub use crate::tmplwriter::*;
pub use crate::types::*;
