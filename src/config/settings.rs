//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial page size for the paginated table.
    pub page_size: usize,
    /// Page sizes the user can cycle through.
    pub page_size_options: Vec<usize>,
    /// Simulated network latency before a deletion is applied.
    pub delete_delay_ms: u64,
    /// Event loop tick rate.
    pub tick_rate_ms: u64,
    /// Number of rows seeded into the multi-select table.
    pub multi_select_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![5, 10, 20, 50],
            delete_delay_ms: 300,
            tick_rate_ms: 100,
            multi_select_rows: 15,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the page size options are
    /// empty or contain zero, if `page_size` is not one of the options, or if
    /// the tick rate is zero.
    pub fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            return Err(ConfigError::ValidationError(
                "page_size_options cannot be empty".to_string(),
            ));
        }

        if self.page_size_options.contains(&0) {
            return Err(ConfigError::ValidationError(
                "page_size_options cannot contain 0".to_string(),
            ));
        }

        if !self.page_size_options.contains(&self.page_size) {
            return Err(ConfigError::ValidationError(format!(
                "page_size {} must be one of {:?}",
                self.page_size, self.page_size_options
            )));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.delete_delay_ms, 300);
    }

    #[test]
    fn test_page_size_must_be_an_option() {
        let settings = Settings {
            page_size: 15,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn test_zero_page_size_option_rejected() {
        let settings = Settings {
            page_size_options: vec![0, 10],
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_delay_allowed() {
        let settings = Settings {
            delete_delay_ms: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }
}
