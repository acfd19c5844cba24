//! Server configuration, extracted from `Rocket.toml` or `ROCKET_*` environment variables.

use contagion::{manager::Manager, rules::Rules};
use rocket::serde::Deserialize;

/// Settings applied to every game created by this server.
///
/// Both keys are optional: rules fall back to [`Rules::default`], and games are shuffled from
/// a random seed.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(crate = "rocket::serde", default)]
pub struct ServerConfig {
    /// The rules of every game.
    pub rules: Rules,
    /// If set, every game is shuffled from this seed. Mostly useful for testing.
    pub seed: Option<u64>,
}

impl ServerConfig {
    /// Creates a [`Manager`] for a new game, following this configuration.
    pub fn new_manager(&self) -> Result<Manager, String> {
        match self.seed {
            Some(seed) => Manager::with_seed(self.rules.clone(), seed),
            None => Manager::new(self.rules.clone()),
        }
    }
}
