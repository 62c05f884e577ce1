//! `APP_*` overrides. Kept in their own test binary: the variables are
//! process-wide and would leak into the file-based config tests.

use figment::Jail;
use std::path::Path;

use shopsearch_core::config::Config;
use shopsearch_core::error::Error;

#[test]
fn env_vars_override_config_files() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[search]\nthreshold = 0.3\nmax_results = 8\n")?;
        jail.create_file("config.test.toml", "[search]\nmax_results = 6\n")?;
        jail.set_env("APP_SEARCH__MAX_RESULTS", "2");
        jail.set_env("APP_DISPLAY__CURRENCY_SYMBOL", "€");

        let config = Config::load_for_env(Path::new("."), "test").map_err(|e| e.to_string())?;
        let search = config.search().map_err(|e| e.to_string())?;
        assert_eq!(search.max_results, 2);
        assert_eq!(search.threshold, 0.3);
        assert_eq!(config.display().map_err(|e| e.to_string())?.currency_symbol, "€");
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[search]\nthreshold = 0.3\n")?;
        jail.set_env("APP_SEARCH__THRESHOLD", "1.5");

        let err = Config::load_for_env(Path::new("."), "dev").err().ok_or_else(|| "threshold 1.5 accepted".to_string())?;
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
        Ok(())
    });
}
