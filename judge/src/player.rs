use std::path::Path;

use anyhow::Context;
use blast_reversi_agents::{Agent, AgentKind};
use serde::{Deserialize, Serialize};

/// The contents of a player config file, e.g.
///
/// ```json
/// { "nick": "greedy", "agent": "greedy" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Short name used in logs and the results table
    pub nick: String,
    pub agent: AgentKind,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config '{}'", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid player config '{}'", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.nick.trim().is_empty() {
            anyhow::bail!("The nick must not be empty");
        }
        Ok(config)
    }
}

pub struct Player {
    pub name: String,
    pub agent: Box<dyn Agent>,
}

impl Player {
    pub fn from_config(config: &PlayerConfig, seed: u64) -> Self {
        Self {
            name: config.nick.clone(),
            agent: config.agent.build(&config.nick, seed),
        }
    }
}
