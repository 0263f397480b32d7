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

use clap::{App, YamlLoader};
use env_logger::Builder;
use libbuildsync::*;
use std::path::{Path, PathBuf};

use log::{error, warn};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub(crate) enum Action {
    Versions,
    Images,
    All,
}

pub(crate) struct BinOptions {
    pub action: Action,
    pub dir: PathBuf,
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub debug: bool,
}

fn main() {
    let bin_options = help_string();

    set_up_logging(bin_options.debug, bin_options.verbose);

    // We want errors to go through `env_logger` as well, hence no `main() -> Result`
    if let Err(e) = actual_work(&bin_options) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn actual_work(opts: &BinOptions) -> Result<(), Error> {
    let mut generator = Generator::new(&opts.dir);

    if let Some(config_path) = &opts.config {
        generator.set_config(Config::load(config_path)?);
    }

    let checksums = RustupChecksums::new(&generator.config.checksum_url);

    match opts.action {
        Action::Versions => {
            generator.update_versions()?;
        }
        Action::Images => generator.update_all(&checksums)?,
        Action::All => {
            generator.run(&checksums)?;
        }
    }

    Ok(())
}

fn set_up_logging(is_debug: bool, is_verbose: bool) {
    let mut builder = Builder::new();

    if is_debug {
        builder
            .filter_module("libbuildsync", log::LevelFilter::Debug)
            .filter_module("buildsync", log::LevelFilter::Debug)
            // Also show the requests for the rustup checksums
            .filter_module("reqwest", log::LevelFilter::Debug);
    } else if is_verbose {
        builder
            .filter_module("libbuildsync", log::LevelFilter::Info)
            .filter_module("buildsync", log::LevelFilter::Info);
    } else {
        builder
            .filter_module("libbuildsync", log::LevelFilter::Warn)
            .filter_module("buildsync", log::LevelFilter::Warn);
    }

    builder.default_format_timestamp(false).init();

    if is_debug && is_verbose {
        warn!("Specified both --verbose and --debug! Will ignore --verbose.");
    }
}

fn help_string() -> BinOptions {
    let help_yaml =
        YamlLoader::load_from_str(include_str!(concat!(env!("OUT_DIR"), "/cli_gen.yml"))).unwrap();
    let matches = App::from_yaml(&help_yaml[0]).get_matches();

    let action = match matches.value_of("ACTION").unwrap_or_default() {
        "versions" => Action::Versions,
        "images" => Action::Images,
        _ => Action::All,
    };

    let dir = matches
        .value_of("dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(".").to_path_buf());

    let config = matches.value_of("config").map(PathBuf::from);

    let verbose = matches.is_present("verbose");

    let debug = matches.is_present("debug");

    BinOptions {
        action,
        dir,
        config,
        verbose,
        debug,
    }
}
