use crate::utils::constants::{HEADER_PREFIX, HEADER_TIME_FORMAT, UNKNOWN_USER};
use chrono::{Local, NaiveDateTime};

/// Supplies the creation time and user written into output headers.
pub trait Environment {
    fn now(&self) -> NaiveDateTime;
    fn user(&self) -> String;

    /// `**File created DD.MM.YY HH:MM:SS @user`
    fn header_line(&self) -> String {
        format!(
            "{}{} @{}",
            HEADER_PREFIX,
            self.now().format(HEADER_TIME_FORMAT),
            self.user()
        )
    }
}

/// Local clock and the login name of the invoking user.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn user(&self) -> String {
        ["USER", "USERNAME", "LOGNAME"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }
}

/// Frozen time and user, for reproducible output.
#[derive(Debug, Clone)]
pub struct FixedEnvironment {
    pub timestamp: NaiveDateTime,
    pub user: String,
}

impl FixedEnvironment {
    pub fn new(timestamp: NaiveDateTime, user: impl Into<String>) -> Self {
        Self {
            timestamp,
            user: user.into(),
        }
    }
}

impl Environment for FixedEnvironment {
    fn now(&self) -> NaiveDateTime {
        self.timestamp
    }

    fn user(&self) -> String {
        self.user.clone()
    }
}
