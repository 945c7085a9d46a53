//! Run configuration.
//!
//! Settings are read once from a TOML file (or built from defaults), adjusted
//! by command line overrides and then shared read-only by every file worker.
//!
//! ```toml
//! maintainer = "Technical University of Munich"
//! license = "BSD-3-Clause"
//! project_name = "Utils"
//!
//! [authors]
//! ignore = ["users.noreply.github.com"]
//!
//! [authors.exact]
//! "lukas@krenz.land" = "Technical University of Munich"
//!
//! [authors.domains]
//! "tum.de" = "Technical University of Munich"
//! "intel.com" = "Intel Corporation"
//! ```

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name looked up at the repository root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sanitizer.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Entity always credited first and for the current year.
    pub maintainer: Option<String>,
    /// SPDX license identifier written into every header.
    pub license: String,
    /// Prefix of every include guard macro.
    pub project_name: String,
    pub authors: AuthorTables,
    pub files: FileClasses,
}

/// Address → author mapping tables, consulted in field order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorTables {
    pub exact: BTreeMap<String, String>,
    pub domains: BTreeMap<String, String>,
    pub ignore: Vec<String>,
}

/// Extension and file name lists used to classify files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileClasses {
    pub header_extensions: Vec<String>,
    pub source_extensions: Vec<String>,
    pub python_extensions: Vec<String>,
    pub shell_extensions: Vec<String>,
    pub cmake_extensions: Vec<String>,
    pub cmake_file_names: Vec<String>,
}

impl Default for FileClasses {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            header_extensions: owned(&["h", "hpp", "cuh", "hh"]),
            source_extensions: owned(&["cpp", "cu", "cc", "c"]),
            python_extensions: owned(&["py"]),
            shell_extensions: owned(&["sh"]),
            cmake_extensions: owned(&["cmake"]),
            cmake_file_names: owned(&["CMakeLists.txt"]),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maintainer: None,
            license: String::new(),
            project_name: String::new(),
            authors: AuthorTables::default(),
            files: FileClasses::default(),
        }
    }
}

/// Values given on the command line; each one replaces the file's value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub maintainer: Option<String>,
    pub license: Option<String>,
    pub project_name: Option<String>,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(content).context("Failed to parse configuration")?;
        settings.normalize();
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration file {:?}", path))
    }

    /// Load `explicit` if given, else `DEFAULT_CONFIG_FILE` under `root` if it
    /// exists, else defaults. Overrides are applied afterwards.
    pub fn resolve(explicit: Option<&Path>, root: &Path, overrides: Overrides) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(maintainer) = overrides.maintainer {
            settings.maintainer = Some(maintainer);
        }
        if let Some(license) = overrides.license {
            settings.license = license;
        }
        if let Some(project_name) = overrides.project_name {
            settings.project_name = project_name;
        }
        settings.normalize();
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.license.trim().is_empty() {
            bail!("No license identifier configured (set `license` or pass --license)");
        }
        if self.project_name.trim().is_empty() {
            bail!("No project name configured (set `project_name` or pass --project-name)");
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.license = self.license.trim().to_string();
        self.project_name = self.project_name.trim().to_string();
        self.maintainer = self
            .maintainer
            .take()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let strip_dots = |ext: &mut Vec<String>| {
            for e in ext.iter_mut() {
                *e = e.trim_start_matches('.').to_ascii_lowercase();
            }
        };
        strip_dots(&mut self.files.header_extensions);
        strip_dots(&mut self.files.source_extensions);
        strip_dots(&mut self.files.python_extensions);
        strip_dots(&mut self.files.shell_extensions);
        strip_dots(&mut self.files.cmake_extensions);
    }
}
