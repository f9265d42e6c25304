//! Configuration validation.

use crate::schema::{Config, KNOWN_SITES};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_widget(config, &mut result);
        Self::validate_watcher(config, &mut result);
        Self::validate_credentials(config, &mut result);
        Self::validate_sites(config, &mut result);

        result
    }

    fn validate_widget(config: &Config, result: &mut ValidationResult) {
        if config.widget.tag_limit == 0 {
            result.add_error(ValidationError::new(
                "widget.tag_limit",
                "tag_limit must be greater than 0",
            ));
        }
        if config.widget.identity_limit == 0 {
            result.add_error(ValidationError::new(
                "widget.identity_limit",
                "identity_limit must be greater than 0",
            ));
        }
    }

    fn validate_watcher(config: &Config, result: &mut ValidationResult) {
        if config.watcher.landmark_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "watcher.landmark_timeout_ms",
                "landmark_timeout_ms must be greater than 0",
            ));
        }

        if config.watcher.landmark_timeout_ms > 120_000 {
            result.add_warning(ValidationWarning::new(
                "watcher.landmark_timeout_ms",
                "landmark_timeout_ms is very high (>2 min), inert pages will keep a watcher alive",
            ));
        }
    }

    fn validate_credentials(config: &Config, result: &mut ValidationResult) {
        if !config.credentials.is_configured() {
            result.add_warning(ValidationWarning::new(
                "credentials",
                "API token or workspace not set, widgets will show the settings prompt",
            ));
        }
    }

    fn validate_sites(config: &Config, result: &mut ValidationResult) {
        for site in &config.sites.disabled {
            if !KNOWN_SITES.contains(&site.to_ascii_lowercase().as_str()) {
                result.add_error(ValidationError::new(
                    "sites.disabled",
                    format!("Unknown site '{}', valid values: {:?}", site, KNOWN_SITES),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
