use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration from ~/.config/gtd/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON document holding the to-do forest
    #[serde(default)]
    pub gtdfile: String,
    /// Root directory that memo files are picked from
    #[serde(default)]
    pub memodir: String,
    /// Interactive filter used to pick memos (e.g. `peco`, `fzf`)
    #[serde(default)]
    pub filtercmd: String,
    /// Editor command used for memos and the config file itself
    #[serde(default)]
    pub editor: String,
}

impl Config {
    /// Config written on first run
    pub fn with_home(home: &std::path::Path) -> Self {
        Config {
            gtdfile: home.join("gtd.json").to_string_lossy().into_owned(),
            editor: default_editor(),
            ..Config::default()
        }
    }

    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.gtdfile)
    }
}

fn default_editor() -> String {
    "vi".to_string()
}
