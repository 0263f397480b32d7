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

use failure::Fail;

/// The Error enum containing all Errors that may occur when running buildsync
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Fail)]
pub enum Error {
    #[fail(display = "Failed to read/write a file! Error: {}", _0)]
    File(String),
    #[fail(display = "Failed to walk the source tree! Error: {}", _0)]
    Walk(String),
    #[fail(display = "Failed to determine the project version! Error: {}", _0)]
    Version(String),
    #[fail(display = "Failed to fetch the rustup checksum! Error: {}", _0)]
    Checksum(String),
    #[fail(display = "Failed to load the configuration! Error: {}", _0)]
    Config(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::File(e.to_string())
    }
}

impl From<walkdir::Error> for Error {
    fn from(e: walkdir::Error) -> Self {
        Error::Walk(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Checksum(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
