// File: src/config.rs
//! Solver, lexicon and front-end settings.
//!
//! Every value has a default; [`AppConfig::from_env`] overrides them from
//! `DECIPHER_*` environment variables.

use std::path::PathBuf;

/// Minimum plausibility for a candidate to survive generation.
pub const THRESHOLD: f64 = 1e-6;
pub const DEFAULT_DELIMITER: &str = "-";
pub const DEFAULT_ATTEMPT_LOG: &str = "tested.txt";
pub const DEFAULT_MAX_UNKNOWNS: usize = 5;
/// 26^6 fillings is the most a single call may enumerate.
pub const MAX_UNKNOWNS_CEILING: usize = 6;
pub const DEFAULT_SINGLE_LETTERS: [char; 2] = ['a', 'i'];
pub const DEFAULT_NAMES: [&str; 7] = [
    "alex",
    "alexander",
    "sutay",
    "aaron",
    "austin",
    "kenny",
    "huffer",
];

const ENV_PREFIX: &str = "DECIPHER_";
const ENV_THRESHOLD: &str = "THRESHOLD";
const ENV_DELIMITER: &str = "DELIMITER";
const ENV_MAX_UNKNOWNS: &str = "MAX_UNKNOWNS";
const ENV_MAX_BRANCHES: &str = "MAX_BRANCHES";
const ENV_ATTEMPT_LOG: &str = "ATTEMPT_LOG";
const ENV_LEXICON: &str = "LEXICON";
const ENV_NAMES: &str = "NAMES";
const ENV_REPEAT_CONSISTENCY: &str = "REPEAT_CONSISTENCY";
const ENV_INJECTIVE: &str = "INJECTIVE";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation: {0}")]
    Validation(String),

    #[error("env var {key}: {message}")]
    EnvVar { key: String, message: String },

    #[error("env var {key}={value:?}: {message}")]
    Parse {
        key: String,
        value: String,
        message: String,
    },
}

/// Knobs of the backtracking search.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub threshold: f64,
    pub max_unknowns: usize,
    /// Stop after expanding this many search nodes.
    pub max_branches: Option<u64>,
    /// Reject fillings that give one symbol two letters inside a token.
    pub enforce_repeat_consistency: bool,
    /// Reject fillings that map two symbols to the same letter.
    pub enforce_injective: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            max_unknowns: DEFAULT_MAX_UNKNOWNS,
            max_branches: None,
            enforce_repeat_consistency: false,
            enforce_injective: false,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ConfigError::Validation(format!(
                "threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        if self.max_unknowns == 0 || self.max_unknowns > MAX_UNKNOWNS_CEILING {
            return Err(ConfigError::Validation(format!(
                "max_unknowns must be in 1..={MAX_UNKNOWNS_CEILING}, got {}",
                self.max_unknowns
            )));
        }
        Ok(())
    }
}

/// Customisation applied once to the base frequency model.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconConfig {
    /// The only single letters that stay in the model.
    pub allowed_single_letters: Vec<char>,
    /// Extra words accepted with a nonzero count.
    pub names: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            allowed_single_letters: DEFAULT_SINGLE_LETTERS.to_vec(),
            names: DEFAULT_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl LexiconConfig {
    /// Default single letters, no supplementary names.
    pub fn without_names() -> Self {
        Self {
            names: Vec::new(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub delimiter: String,
    pub attempt_log: PathBuf,
    /// Frequency source; the built-in English list when unset.
    pub lexicon_path: Option<PathBuf>,
    pub solver: SolverConfig,
    pub lexicon: LexiconConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            attempt_log: PathBuf::from(DEFAULT_ATTEMPT_LOG),
            lexicon_path: None,
            solver: SolverConfig::default(),
            lexicon: LexiconConfig::default(),
        }
    }
}

impl AppConfig {
    /// Builds the config from `DECIPHER_*` variables, falling back to defaults
    /// for unset ones. A set variable that does not parse is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();

        let threshold = env_parsed::<f64>(ENV_THRESHOLD)?.unwrap_or(default.solver.threshold);
        let max_unknowns =
            env_parsed::<usize>(ENV_MAX_UNKNOWNS)?.unwrap_or(default.solver.max_unknowns);
        let max_branches = env_parsed::<u64>(ENV_MAX_BRANCHES)?.or(default.solver.max_branches);
        let enforce_repeat_consistency = env_parsed::<bool>(ENV_REPEAT_CONSISTENCY)?
            .unwrap_or(default.solver.enforce_repeat_consistency);
        let enforce_injective =
            env_parsed::<bool>(ENV_INJECTIVE)?.unwrap_or(default.solver.enforce_injective);

        let delimiter = env_string(ENV_DELIMITER)?.unwrap_or(default.delimiter);
        let attempt_log = env_string(ENV_ATTEMPT_LOG)?
            .map(PathBuf::from)
            .unwrap_or(default.attempt_log);
        let lexicon_path = env_string(ENV_LEXICON)?.map(PathBuf::from);
        let names = match env_string(ENV_NAMES)? {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_lowercase)
                .collect(),
            None => default.lexicon.names,
        };

        let config = Self {
            delimiter,
            attempt_log,
            lexicon_path,
            solver: SolverConfig {
                threshold,
                max_unknowns,
                max_branches,
                enforce_repeat_consistency,
                enforce_injective,
            },
            lexicon: LexiconConfig {
                names,
                ..default.lexicon
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::Validation("delimiter must not be empty".into()));
        }
        self.solver.validate()
    }
}

fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

fn env_string(suffix: &str) -> Result<Option<String>, ConfigError> {
    let key = env_key(suffix);
    match std::env::var(&key) {
        Ok(s) => Ok(Some(s)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::EnvVar {
            key,
            message: e.to_string(),
        }),
    }
}

fn env_parsed<T>(suffix: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = env_string(suffix)? else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(t) => Ok(Some(t)),
        Err(e) => Err(ConfigError::Parse {
            key: env_key(suffix),
            value,
            message: e.to_string(),
        }),
    }
}
