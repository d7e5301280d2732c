use crate::*;
use std::env::var;
use std::str::FromStr;

pub const DAY: u64 = 24 * 60 * 60;

/// Court parameters
///
/// All durations are in seconds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// How long voting stays open after a case is created
    pub voting_duration: u64,

    /// How long the decryption oracle has to answer a request
    pub decryption_timeout: u64,

    /// Minimum number of voters a case may require, and the minimum number of cast votes
    /// before decryption can be requested
    pub min_voters: usize,

    /// Maximum number of voters a case may require
    pub max_voters: usize,

    /// Cap on certification and authorization batches
    pub max_batch_size: usize,

    pub max_title_len: usize,
    pub max_description_len: usize,

    /// Reputation granted on certification
    pub initial_reputation: u64,

    /// Reputation granted per participation in a revealed case
    pub reputation_reward: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            voting_duration: 3 * DAY,
            decryption_timeout: 7 * DAY,
            min_voters: 3,
            max_voters: 12,
            max_batch_size: 100,
            max_title_len: 200,
            max_description_len: 5000,
            initial_reputation: 100,
            reputation_reward: 5,
        }
    }
}

impl Config {
    /// Read configuration from `CRYPTOJURY_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Config::default();

        env_override("CRYPTOJURY_VOTING_DURATION", &mut config.voting_duration)?;
        env_override(
            "CRYPTOJURY_DECRYPTION_TIMEOUT",
            &mut config.decryption_timeout,
        )?;
        env_override("CRYPTOJURY_MIN_VOTERS", &mut config.min_voters)?;
        env_override("CRYPTOJURY_MAX_VOTERS", &mut config.max_voters)?;
        env_override("CRYPTOJURY_MAX_BATCH_SIZE", &mut config.max_batch_size)?;
        env_override(
            "CRYPTOJURY_INITIAL_REPUTATION",
            &mut config.initial_reputation,
        )?;
        env_override(
            "CRYPTOJURY_REPUTATION_REWARD",
            &mut config.reputation_reward,
        )?;

        config.check()?;
        Ok(config)
    }

    /// Parse a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let config: Config = serde_json::from_slice(bytes)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), Error> {
        if self.min_voters == 0 || self.min_voters > self.max_voters {
            return Err(Error::InvalidConfig(
                "min_voters",
                format!("{} (max_voters is {})", self.min_voters, self.max_voters),
            ));
        }
        if self.voting_duration == 0 {
            return Err(Error::InvalidConfig("voting_duration", "0".to_owned()));
        }
        if self.decryption_timeout == 0 {
            return Err(Error::InvalidConfig("decryption_timeout", "0".to_owned()));
        }
        if self.max_batch_size == 0 {
            return Err(Error::InvalidConfig("max_batch_size", "0".to_owned()));
        }
        Ok(())
    }
}

fn env_override<T: FromStr>(key: &'static str, target: &mut T) -> Result<(), Error> {
    if let Ok(val) = var(key) {
        *target = val
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig(key, val.clone()))?;
    }
    Ok(())
}
