use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::syntax::DEFAULT_MAX_DEPTH;

pub static HISTORY_ENV: &str = "LISPY_HISTORY";
pub static MAX_DEPTH_ENV: &str = "LISPY_MAX_DEPTH";

static DEFAULT_PROMPT: &str = "lispy> ";
static DEFAULT_HISTORY_FILE: &str = "lispy.history";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub history_file: PathBuf,
    pub max_nesting_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            history_file: DEFAULT_HISTORY_FILE.into(),
            max_nesting_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config::from_vars(|key| env::var(key).ok())
    }

    /// from_vars applies overrides looked up through `var` on top of the defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(path) = var(HISTORY_ENV) {
            config.history_file = path.into();
        }

        if let Some(depth) = var(MAX_DEPTH_ENV) {
            match depth.trim().parse() {
                Ok(depth) => config.max_nesting_depth = depth,
                Err(e) => warn!(value = %depth, error = %e, "ignoring {}", MAX_DEPTH_ENV),
            }
        }

        config
    }
}
