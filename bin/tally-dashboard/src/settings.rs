// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tally::SourcesConfig;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub sources: SourcesConfig,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            sources: SourcesConfig::default(),
        }
    }
}
impl Settings {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
    /// Command-line flags win over every other layer.
    pub fn apply_overrides(
        &mut self,
        port: Option<u16>,
        debug: bool,
        data_dir: Option<PathBuf>,
    ) {
        if let Some(port) = port {
            self.port = port;
        }
        self.debug |= debug;
        if let Some(dir) = data_dir {
            self.sources.data_dir = dir;
        }
    }
}

/// Defaults, then the optional TOML file, then `DASHBOARD_*` variables.
/// Nested keys use a double underscore, e.g. `DASHBOARD_SOURCES__DATA_DIR`.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let defaults = Settings::default();
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    Config::builder()
        .set_default("host", defaults.host)?
        .set_default("port", i64::from(defaults.port))?
        .set_default("debug", defaults.debug)?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_8050() {
        let settings = Settings::default();
        assert_eq!(settings.port, 8050);
        assert!(!settings.debug);
        assert_eq!(settings.bind_addr().unwrap().port(), 8050);
    }

    #[test]
    fn cli_overrides_win() {
        let mut settings = Settings::default();
        settings.apply_overrides(Some(9000), true, Some(PathBuf::from("/tmp/data")));
        assert_eq!(settings.port, 9000);
        assert!(settings.debug);
        assert_eq!(settings.sources.data_dir, PathBuf::from("/tmp/data"));
    }
}
