//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_SEARCH__THRESHOLD=0.3`).
//! Every section is optional; absent keys fall back to the defaults below.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Largest normalised edit distance (edits / query length) at which a field
/// still counts as a match. 0 demands exact substrings, 1 matches anything.
pub const DEFAULT_THRESHOLD: f32 = 0.4;

/// Number of suggestions returned per query.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Raw queries shorter than this many characters return nothing.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// How much a late match position can add to a score. Only affects order.
pub const DEFAULT_LOCATION_WEIGHT: f32 = 0.05;

/// Match offset (in characters) at which the location penalty saturates.
pub const DEFAULT_LOCATION_SPAN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub threshold: f32,
    pub max_results: usize,
    pub min_query_chars: usize,
    pub location_weight: f32,
    pub location_span: usize,
    pub case_sensitive: bool,
    pub ignore_diacritics: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            location_weight: DEFAULT_LOCATION_WEIGHT,
            location_span: DEFAULT_LOCATION_SPAN,
            case_sensitive: false,
            ignore_diacritics: false,
        }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!("search.threshold must be within 0..=1, got {}", self.threshold)));
        }
        if !(0.0..=1.0).contains(&self.location_weight) {
            return Err(Error::InvalidConfig(format!(
                "search.location_weight must be within 0..=1, got {}",
                self.location_weight
            )));
        }
        if self.max_results == 0 {
            return Err(Error::InvalidConfig("search.max_results must be at least 1".into()));
        }
        if self.min_query_chars == 0 {
            return Err(Error::InvalidConfig("search.min_query_chars must be at least 1".into()));
        }
        if self.location_span == 0 {
            return Err(Error::InvalidConfig("search.location_span must be at least 1".into()));
        }
        Ok(())
    }

    /// Edits allowed for a query of `query_chars` characters under `threshold`.
    pub fn max_edits(&self, query_chars: usize) -> usize {
        // The epsilon keeps e.g. 0.4 * 5 from flooring to 1 through f32 rounding.
        (self.threshold * query_chars as f32 + 1e-4).floor() as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub product_route: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { currency_symbol: "₹".to_string(), product_route: "/product".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub catalog_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self { catalog_path: "catalog.json".to_string() }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(Path::new("."), &env_name)
    }

    /// Load `config.toml` and the file for `env_name` from `base`, then `APP_*` vars.
    pub fn load_for_env(base: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment };
        config.search()?;
        config.display()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        Ok(self.figment.extract_inner(key)?)
    }

    pub fn search(&self) -> Result<SearchSettings> {
        let settings: SearchSettings = self.section("search")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn display(&self) -> Result<DisplaySettings> {
        self.section("display")
    }

    pub fn data(&self) -> Result<DataSettings> {
        self.section("data")
    }

    fn section<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.figment.contains(key) {
            self.get(key)
        } else {
            Ok(T::default())
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
