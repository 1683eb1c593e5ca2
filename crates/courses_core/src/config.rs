//! Service-level configuration.

use serde::{Deserialize, Serialize};

/// Semester used when a listing request does not name one.
pub const DEFAULT_SEMESTER: &str = "20153";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Substituted for an absent or empty semester in course listings.
    pub default_semester: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_semester: DEFAULT_SEMESTER.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolves the semester a listing should use.
    pub fn resolve_semester<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(semester) if !semester.is_empty() => semester,
            _ => self.default_semester.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceConfig, DEFAULT_SEMESTER};

    #[test]
    fn absent_or_empty_semester_falls_back_to_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.resolve_semester(None), DEFAULT_SEMESTER);
        assert_eq!(config.resolve_semester(Some("")), DEFAULT_SEMESTER);
        assert_eq!(config.resolve_semester(Some("20163")), "20163");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: ServiceConfig = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config, ServiceConfig::default());
    }
}
