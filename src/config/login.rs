//! One-time login code configuration

use serde::Deserialize;

use super::error::ValidationError;

const MIN_CODE_LENGTH: usize = 4;
const MAX_CODE_LENGTH: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    /// Characters per emailed code
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

impl LoginConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(ValidationError::InvalidCodeLength);
        }
        Ok(())
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
        }
    }
}

fn default_code_length() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length_bounds() {
        assert!(LoginConfig::default().validate().is_ok());
        assert!(LoginConfig { code_length: 4 }.validate().is_ok());
        assert!(LoginConfig { code_length: 32 }.validate().is_ok());
        assert_eq!(
            LoginConfig { code_length: 3 }.validate(),
            Err(ValidationError::InvalidCodeLength)
        );
        assert!(LoginConfig { code_length: 33 }.validate().is_err());
    }
}
