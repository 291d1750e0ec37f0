use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tallgrass_system_bootstrap::Config as WorldConfig;
use tallgrass_system_turns::TurnConfig;
use tallgrass_world::BoardConfig;

/// Tunables loaded from an optional TOML file; missing keys keep defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) board: BoardConfig,
    pub(crate) turns: TurnConfig,
    pub(crate) world: WorldConfig,
}

impl Settings {
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse settings at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid settings toml")
    }
}
