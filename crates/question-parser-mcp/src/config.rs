use crate::error::AppError;

const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

/// Server configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Largest assignment text `parse_questions` accepts, in bytes.
    pub max_input_bytes: usize,
    /// Drop parsed questions that repeat an earlier one.
    pub deduplicate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            deduplicate: false,
        }
    }
}

impl Config {
    /// Optional:
    /// - `QUESTION_PARSER_MAX_INPUT_BYTES` (default: 65536)
    /// - `QUESTION_PARSER_DEDUPLICATE` (`true`/`false`, default: false)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let max_input_bytes = match lookup("QUESTION_PARSER_MAX_INPUT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "QUESTION_PARSER_MAX_INPUT_BYTES must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => defaults.max_input_bytes,
        };

        let deduplicate = match lookup("QUESTION_PARSER_DEDUPLICATE") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| {
                AppError::Config(format!(
                    "QUESTION_PARSER_DEDUPLICATE must be 'true' or 'false', got '{raw}'"
                ))
            })?,
            None => defaults.deduplicate,
        };

        Ok(Self {
            max_input_bytes,
            deduplicate,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.max_input_bytes, 65536);
        assert!(!config.deduplicate);
    }

    #[test]
    fn test_reads_overrides() {
        let config = load(&[
            ("QUESTION_PARSER_MAX_INPUT_BYTES", "1024"),
            ("QUESTION_PARSER_DEDUPLICATE", "true"),
        ])
        .unwrap();
        assert_eq!(config.max_input_bytes, 1024);
        assert!(config.deduplicate);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            load(&[("QUESTION_PARSER_MAX_INPUT_BYTES", "0")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            load(&[("QUESTION_PARSER_MAX_INPUT_BYTES", "lots")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            load(&[("QUESTION_PARSER_DEDUPLICATE", "yes")]),
            Err(AppError::Config(_))
        ));
    }
}
