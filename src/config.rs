// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use url::Url;

use crate::api::DEFAULT_API_BASE;
use crate::error::ConfigError;
use crate::player::DEFAULT_PLAYER;

const STORAGE_FILE: &str = "storage.json";
const SESSION_FILE: &str = "session.json";

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    /// Directory holding the persistent store (favorites, theme)
    pub data_dir: PathBuf,
    /// Directory holding the session store (last catalog query)
    pub session_dir: PathBuf,
    pub player: String,
}

impl Settings {
    /// Combine command line overrides with platform defaults.
    ///
    /// Without an explicit data directory, persistent data goes to the
    /// platform data directory and the session to the runtime directory
    /// (or the cache directory where there is none). An explicit data
    /// directory holds both.
    pub fn resolve(
        api_base: Option<String>,
        data_dir: Option<PathBuf>,
        player: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_base = api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Url::parse(&api_base).map_err(|source| ConfigError::InvalidApiBase {
            url: api_base.clone(),
            source,
        })?;

        let (data_dir, session_dir) = match data_dir {
            Some(dir) => {
                let session_dir = dir.join("session");
                (dir, session_dir)
            }
            None => {
                let dirs = directories::ProjectDirs::from("de", "westhoffswelt", "podbrowse")
                    .ok_or(ConfigError::DirectoryNotFound)?;
                let session_dir = dirs
                    .runtime_dir()
                    .unwrap_or_else(|| dirs.cache_dir())
                    .to_path_buf();
                (dirs.data_dir().to_path_buf(), session_dir)
            }
        };

        Ok(Self {
            api_base,
            data_dir,
            session_dir,
            player: player.unwrap_or_else(|| DEFAULT_PLAYER.to_string()),
        })
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    pub fn session_path(&self) -> PathBuf {
        self.session_dir.join(SESSION_FILE)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
