use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::probe::ProbeSettings;
use crate::variants::{default_presets, VariantPreset};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Base image URL used when none is given on the command line.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub probe: ProbeConfig,

    /// Replacement preset table. Empty means the built-in table.
    #[serde(default)]
    pub presets: Vec<VariantPreset>,
}

impl Config {
    /// The preset table this configuration selects.
    pub fn active_presets(&self) -> Vec<VariantPreset> {
        if self.presets.is_empty() {
            default_presets()
        } else {
            self.presets.clone()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overall deadline after which the shared token is cancelled (0 = none)
    #[serde(default = "default_deadline")]
    pub deadline_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_connect_timeout() -> u64 {
    5
}
fn default_deadline() -> u64 {
    15
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            deadline_secs: default_deadline(),
            user_agent: None,
        }
    }
}

impl ProbeConfig {
    pub fn settings(&self) -> ProbeSettings {
        let defaults = ProbeSettings::default();
        ProbeSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        (self.deadline_secs > 0).then(|| Duration::from_secs(self.deadline_secs))
    }
}
