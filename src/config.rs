use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::hough::VoteOptions;
use crate::pixel::Foreground;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    pub angle_divisions: usize,
    pub distance_divisions: usize,
    /// How many of the strongest lines to keep.
    pub line_count: usize,
    pub vote_weight: u16,
    pub foreground: Foreground,
    /// Vote on the rayon pool and extract lines afterwards.
    pub parallel: bool,
}

impl Default for HoughConfig {
    fn default() -> Self {
        HoughConfig {
            angle_divisions: 400,
            distance_divisions: 400,
            line_count: 100,
            vote_weight: 10,
            foreground: Foreground::ChannelAnd,
            parallel: false,
        }
    }
}

impl HoughConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: HoughConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.vote_weight == 0 {
            return Err(Error::InvalidConfiguration("vote_weight must be positive".to_string()));
        }
        Ok(())
    }

    pub fn vote_options(&self) -> VoteOptions {
        VoteOptions {
            weight: self.vote_weight,
            foreground: self.foreground,
        }
    }
}
