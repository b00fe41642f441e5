//! Semantic checks that TOML parsing cannot express.

use std::fmt;

use crate::schema::Config;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Capacities above this still work but make every listing large.
const LARGE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The service refuses to start.
    Error,
    Warning,
}

/// One finding against a config key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    /// Dotted key, e.g. `server.port`.
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Everything found by [`ConfigValidator::validate`], in check order.
#[derive(Debug, Default)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    fn error(&mut self, key: &'static str, message: impl Into<String>) {
        self.push(Severity::Error, key, message.into());
    }

    fn warn(&mut self, key: &'static str, message: impl Into<String>) {
        self.push(Severity::Warning, key, message.into());
    }

    fn push(&mut self, severity: Severity, key: &'static str, message: String) {
        self.issues.push(Issue {
            severity,
            key,
            message,
        });
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::default();

        if config.server.port == 0 {
            report.error("server.port", "must be between 1 and 65535");
        }
        if config.server.host.trim().is_empty() {
            report.error("server.host", "must not be empty");
        }

        for (key, capacity) in [
            ("queue.history_capacity", config.queue.history_capacity),
            ("queue.cancelled_capacity", config.queue.cancelled_capacity),
        ] {
            match capacity {
                0 => report.error(key, "must be at least 1"),
                n if n > LARGE_CAPACITY => report.warn(
                    key,
                    format!("{n} entries is large; every listing returns all of them"),
                ),
                _ => {}
            }
        }

        check_log_level(&config.logging.level, &mut report);

        report
    }
}

fn check_log_level(level: &str, report: &mut ValidationReport) {
    let level = level.trim();
    if level.is_empty() {
        report.error("logging.level", "must not be empty");
        return;
    }

    // Directives such as "dispatchq=debug,tower_http=info" are left to EnvFilter.
    if level.contains(['=', ',']) {
        return;
    }

    if !LOG_LEVELS.iter().any(|known| known.eq_ignore_ascii_case(level)) {
        report.error(
            "logging.level",
            format!("unknown level '{level}', expected one of {}", LOG_LEVELS.join(", ")),
        );
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
