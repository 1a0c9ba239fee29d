//! Process settings read from the environment
//!
//! | Variable          | Effect                                               |
//! |-------------------|------------------------------------------------------|
//! | `CODEKEEPER_HOME` | base directory for repositories created by `init`    |
//! | `CODEKEEPER_DATE` | fixed commit time, `%Y-%m-%d %H:%M:%S`               |
//! | `CODEKEEPER_LOG`  | tracing filter directive (default `warn`)            |
//! | `NO_PAGER`        | disables the pager for `history`                     |

use crate::artifacts::core::clock::{Clock, FixedClock, SystemClock};
use std::path::PathBuf;

pub const HOME_ENV: &str = "CODEKEEPER_HOME";
pub const DATE_ENV: &str = "CODEKEEPER_DATE";
pub const LOG_ENV: &str = "CODEKEEPER_LOG";
pub const NO_PAGER_ENV: &str = "NO_PAGER";

const DEFAULT_HOME_DIR: &str = ".codekeeper";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub home: PathBuf,
    pub fixed_date: Option<String>,
    pub log_filter: String,
    pub no_pager: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let home = non_empty(HOME_ENV)
            .map(PathBuf::from)
            .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(DEFAULT_HOME_DIR)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR));

        Settings {
            home,
            fixed_date: non_empty(DATE_ENV),
            log_filter: non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            no_pager: lookup(NO_PAGER_ENV).is_some(),
        }
    }

    /// Clock used to stamp commits
    pub fn clock(&self) -> anyhow::Result<Box<dyn Clock>> {
        match &self.fixed_date {
            Some(date) => Ok(Box::new(FixedClock::try_parse(date)?)),
            None => Ok(Box::new(SystemClock)),
        }
    }
}
