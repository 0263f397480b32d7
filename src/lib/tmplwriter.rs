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

use crate::checksum::ChecksumProvider;
use crate::errors::Error;
use crate::helpers::*;
use crate::manifest::rewrite_manifest;
use crate::types::*;
use std::path::{Path, PathBuf};

use log::info;

impl Generator {
    /// Initializes a new Generator for the repository at `root` with the default [Config](crate::types::Config)
    pub fn new<P: Into<PathBuf>>(root: P) -> Generator {
        Generator {
            config: Config::default(),
            layout: Layout::new(root),
        }
    }

    /// Sets the [Config](crate::types::Config) of the Generator
    pub fn set_config(&mut self, config: Config) -> &mut Generator {
        self.config = config;
        self
    }

    /// Reads the project version and pushes it into every manifest, the docker
    /// build script and the CI pipeline.
    ///
    /// The version and both templates are read before anything is written, so
    /// a missing `VERSION` file leaves the repository untouched.
    ///
    /// Returns the version that was propagated.
    ///
    /// # Errors
    ///
    /// * Errors out if the `VERSION` file is missing or empty
    /// * Errors out if a template is missing
    /// * Errors out if a manifest or an output file can't be read/written
    pub fn update_versions(&self) -> Result<String, Error> {
        let version = read_version(&self.layout)?;

        info!("Propagating version {}", version);

        let build_script = self.render_build_script(&version)?;
        let pipeline = self.render_pipeline(&version)?;

        let manifests = find_manifests(&self.layout.root)?;
        let mut changed = 0;

        for manifest in &manifests {
            if rewrite_manifest(manifest, &version)? {
                changed += 1;
            }
        }

        info!("Updated {} of {} manifests", changed, manifests.len());

        write_template(&self.layout.build_output(), &build_script)?;
        write_template(&self.layout.pipeline_output(), &pipeline)?;

        Ok(version)
    }

    /// Renders the docker build script for `version`
    pub fn render_build_script(&self, version: &str) -> Result<Template, Error> {
        let tag = tag_name(&self.config.repo_name);

        Ok(Template::load(&self.layout.build_template())?.fill(
            "docker-build.sh",
            &[("TAG-NAME", tag.as_str()), ("TAG-VERSION", version)],
        ))
    }

    /// Renders the CI pipeline, which references one image per platform, e.g.
    /// `%%IMAGE-VERSION-ARM64%%` becomes `diabloxenon/opencl:<version>-arm64`
    pub fn render_pipeline(&self, version: &str) -> Result<Template, Error> {
        let images: Vec<(String, String)> = self
            .config
            .platforms
            .iter()
            .map(|p| {
                (
                    format!("IMAGE-VERSION-{}", p.dpkg_arch.to_uppercase()),
                    image_name(&self.config.repo_name, version, &p.dpkg_arch),
                )
            })
            .collect();

        let tokens: Vec<(&str, &str)> = images
            .iter()
            .map(|(token, image)| (token.as_str(), image.as_str()))
            .collect();

        Ok(Template::load(&self.layout.pipeline_template())?.fill(".drone.yml", &tokens))
    }

    /// Regenerates all Dockerfiles and the rust installer script
    ///
    /// # Errors
    ///
    /// * Errors out if a template is missing
    /// * Errors out if a checksum can't be fetched, see [write_installer](crate::Generator::write_installer)
    pub fn update_all(&self, checksums: &dyn ChecksumProvider) -> Result<(), Error> {
        self.write_dockerfiles()?;
        self.write_installer(checksums)
    }

    /// Does a full run: [update_versions](crate::Generator::update_versions), then
    /// [update_all](crate::Generator::update_all)
    pub fn run(&self, checksums: &dyn ChecksumProvider) -> Result<String, Error> {
        let version = self.update_versions()?;
        self.update_all(checksums)?;
        Ok(version)
    }

    /// Renders the Dockerfile of `platform`
    pub fn render_dockerfile(&self, platform: &Platform) -> Result<Template, Error> {
        let config = &self.config;

        Ok(Template::load(&self.layout.dockerfile_template(platform))?.fill(
            &format!("Dockerfile-{}", platform.dpkg_arch),
            &[
                ("BASE", platform.base_image.as_str()),
                ("REPO", config.repo_name.as_str()),
                ("RUST-VERSION", config.rust_version.as_str()),
                ("RUSTUP-VERSION", config.rustup_version.as_str()),
                ("CARGO-HOME", config.cargo_home.as_str()),
                ("RUSTUP-HOME", config.rustup_home.as_str()),
                ("PATH", config.path.as_str()),
            ],
        ))
    }

    /// Renders the Dockerfiles of all platforms, then writes them
    pub fn write_dockerfiles(&self) -> Result<(), Error> {
        let mut rendered = Vec::with_capacity(self.config.platforms.len());

        for platform in &self.config.platforms {
            rendered.push((self.layout.dockerfile_output(platform), self.render_dockerfile(platform)?));
        }

        for (path, dockerfile) in &rendered {
            write_template(path, dockerfile)?;
        }

        Ok(())
    }

    /// Generates the shell `case` block that picks `rustArch` and `rustupSha256`
    /// based on `dpkg --print-architecture`. Fetches one checksum per platform.
    ///
    /// # Errors
    ///
    /// * Errors out if any checksum can't be fetched
    pub fn arch_match(&self, checksums: &dyn ChecksumProvider) -> Result<String, Error> {
        let mut arch_match = String::from("dpkgArch=\"$(dpkg --print-architecture)\"; \n");
        arch_match.push_str("    case \"${dpkgArch##*-}\" in \n");

        for platform in &self.config.platforms {
            let hash = checksums.checksum(&self.config.rustup_version, &platform.rust_target)?;

            arch_match.push_str(&format!(
                "        {}) rustArch='{}'; rustupSha256='{}' ;; \n",
                platform.dpkg_arch, platform.rust_target, hash
            ));
        }

        arch_match
            .push_str("        *) echo >&2 \"unsupported architecture: ${dpkgArch}\"; exit 1 ;; \n");
        arch_match.push_str("    esac");

        Ok(arch_match)
    }

    /// Renders the script that installs the pinned rust toolchain
    pub fn render_installer(&self, checksums: &dyn ChecksumProvider) -> Result<Template, Error> {
        let config = &self.config;
        let template = Template::load(&self.layout.installer_template())?;
        let arch_match = self.arch_match(checksums)?;

        Ok(template.fill(
            "add_rust_lang.sh",
            &[
                ("RUST-VERSION", config.rust_version.as_str()),
                ("RUSTUP-VERSION", config.rustup_version.as_str()),
                ("RUSTUP-HOME", config.rustup_home.as_str()),
                ("CARGO-HOME", config.cargo_home.as_str()),
                ("PATH", config.path.as_str()),
                ("ARCH-MATCH", arch_match.as_str()),
            ],
        ))
    }

    /// Renders the rust installer script and writes it. Nothing is written
    /// unless every checksum could be fetched.
    pub fn write_installer(&self, checksums: &dyn ChecksumProvider) -> Result<(), Error> {
        let installer = self.render_installer(checksums)?;
        write_template(&self.layout.installer_output(), &installer)
    }
}

fn write_template(path: &Path, template: &Template) -> Result<(), Error> {
    write_file(path, &template.inner)?;
    info!("Wrote {} to {}", template.name, path.display());
    Ok(())
}
