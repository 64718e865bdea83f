use crate::core::validate_school_size;
use crate::error::IasError;
use serde::{Deserialize, Serialize};

/// Run parameters for the IAS optimizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IasConfig {
    /// Population size (at least 3)
    pub n_students: usize,
    /// Number of full sweeps over the school
    pub n_iterations: u32,
    /// Seed for the random generator; `None` draws one from the OS
    #[serde(default)]
    pub seed: Option<u64>,
    /// Print per-iteration progress through the history callback
    #[serde(default)]
    pub verbose: bool,
}

impl Default for IasConfig {
    fn default() -> Self {
        Self {
            n_students: 30,
            n_iterations: 100,
            seed: None,
            verbose: false,
        }
    }
}

impl IasConfig {
    pub fn new(n_students: usize, n_iterations: u32) -> Self {
        Self {
            n_students,
            n_iterations,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn validate(&self) -> Result<(), IasError> {
        validate_school_size(self.n_students, self.n_iterations)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, IasError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, IasError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = IasConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn json_round_trip_keeps_seed() {
        let config = IasConfig::new(12, 40).with_seed(99).with_verbose(true);
        let json = config.to_json_string().unwrap();
        assert_eq!(IasConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn json_optional_fields_default() {
        let config = IasConfig::from_json_str(r#"{"n_students": 5, "n_iterations": 3}"#).unwrap();
        assert_eq!(config, IasConfig::new(5, 3));
    }

    #[test]
    fn json_rejects_small_school_and_garbage() {
        assert_eq!(
            IasConfig::from_json_str(r#"{"n_students": 2, "n_iterations": 3}"#),
            Err(IasError::TooFewStudents { got: 2, min: 3 })
        );
        assert!(matches!(
            IasConfig::from_json_str("{not json"),
            Err(IasError::Config(_))
        ));
    }
}
