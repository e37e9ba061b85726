//! TOML configuration for sessions and the runner binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::automaton::pattern::RandomFill;
use crate::automaton::rule::RuleTable;
use crate::automaton::stepping::DEFAULT_TIME_STEP;
use crate::error::Result;
use crate::rulefile;

/// Which cells a totalistic [`RuleSpec`] counts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleRange {
    /// The 8 cells around the center. Ring 2 is ignored.
    #[default]
    Moore1,
    /// All 24 cells around the center.
    Moore2,
}

/// Birth/survive counts used when no rule file is configured.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub birth: Vec<u8>,
    pub survive: Vec<u8>,
    #[serde(default)]
    pub range: RuleRange,
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
            range: RuleRange::Moore1,
        }
    }
}

impl RuleSpec {
    pub fn build(&self) -> RuleTable {
        match self.range {
            RuleRange::Moore1 => RuleTable::life_like(&self.birth, &self.survive),
            RuleRange::Moore2 => RuleTable::outer_totalistic(&self.birth, &self.survive),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Worker threads for stepping (0 means 1).
    pub threads: usize,
    /// Seconds per generation while playing.
    pub time_step: f32,
    /// Number of cell states the painter cycles through.
    pub states: u8,
    /// Rule file that overrides `rule` when set.
    pub rule_file: Option<PathBuf>,
    /// Seed for random patterns. Entropy is used when unset.
    pub seed: Option<u64>,
    pub rule: RuleSpec,
    pub random_fill: RandomFill,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            time_step: DEFAULT_TIME_STEP,
            states: 2,
            rule_file: None,
            seed: None,
            rule: RuleSpec::default(),
            random_fill: RandomFill::default(),
        }
    }
}

impl AutomatonConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Like [`AutomatonConfig::load`], falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), "using default config: {err}");
                Self::default()
            }
        }
    }

    /// The configured rule table: the rule file if one is set, else `rule`.
    pub fn build_rules(&self) -> Result<RuleTable> {
        match &self.rule_file {
            Some(path) => {
                let mut table = RuleTable::new();
                rulefile::load(path, &mut table)?;
                Ok(table)
            }
            None => Ok(self.rule.build()),
        }
    }
}
