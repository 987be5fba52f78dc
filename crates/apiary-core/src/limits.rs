//! Input validation limits for observation data

/// Upper bound for any content percentage (100)
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Slack allowed on a summed percentage for float rounding
pub const PERCENTAGE_EPSILON: f64 = 1e-9;

/// Lowest accepted feeding effectiveness rating (1)
pub const MIN_EFFECTIVENESS: u8 = 1;

/// Highest accepted feeding effectiveness rating (10)
pub const MAX_EFFECTIVENESS: u8 = 10;

/// Maximum diseases or pests recorded on one observation (50)
pub const MAX_FINDINGS: usize = 50;

/// Maximum length of a single disease or pest label (128 chars)
pub const MAX_FINDING_LEN: usize = 128;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    PercentageOutOfRange { field: &'static str, value: f64 },
    ContentOverflow { total: f64, max: f64 },
    EffectivenessOutOfRange { value: u8, min: u8, max: u8 },
    TooManyFindings { field: &'static str, count: usize, max: usize },
    FindingTooLong { field: &'static str, len: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PercentageOutOfRange { field, value } => {
                write!(f, "{} must be between 0 and 100, got {}", field, value)
            }
            Self::ContentOverflow { total, max } => {
                write!(f, "Frame content adds up to {}% (max {}%)", total, max)
            }
            Self::EffectivenessOutOfRange { value, min, max } => {
                write!(f, "Effectiveness {} outside {}..={}", value, min, max)
            }
            Self::TooManyFindings { field, count, max } => {
                write!(f, "Too many {}: {} (max {})", field, count, max)
            }
            Self::FindingTooLong { field, len, max } => {
                write!(f, "Entry in {} too long: {} chars (max {})", field, len, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a single content percentage
pub fn validate_percentage(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=MAX_PERCENTAGE).contains(&value) {
        return Err(ValidationError::PercentageOutOfRange { field, value });
    }
    Ok(())
}

/// Validate that a set of content percentages fits in one frame
pub fn validate_content_total(parts: &[f64]) -> Result<(), ValidationError> {
    let total: f64 = parts.iter().sum();
    if total > MAX_PERCENTAGE + PERCENTAGE_EPSILON {
        return Err(ValidationError::ContentOverflow {
            total,
            max: MAX_PERCENTAGE,
        });
    }
    Ok(())
}

/// Validate a feeding effectiveness rating
pub fn validate_effectiveness(value: u8) -> Result<(), ValidationError> {
    if !(MIN_EFFECTIVENESS..=MAX_EFFECTIVENESS).contains(&value) {
        return Err(ValidationError::EffectivenessOutOfRange {
            value,
            min: MIN_EFFECTIVENESS,
            max: MAX_EFFECTIVENESS,
        });
    }
    Ok(())
}

/// Validate a list of disease or pest labels
pub fn validate_findings(field: &'static str, findings: &[String]) -> Result<(), ValidationError> {
    if findings.len() > MAX_FINDINGS {
        return Err(ValidationError::TooManyFindings {
            field,
            count: findings.len(),
            max: MAX_FINDINGS,
        });
    }
    if let Some(long) = findings.iter().find(|f| f.len() > MAX_FINDING_LEN) {
        return Err(ValidationError::FindingTooLong {
            field,
            len: long.len(),
            max: MAX_FINDING_LEN,
        });
    }
    Ok(())
}

/// Count distinct, non-blank findings (case-insensitive)
pub fn distinct_findings(findings: &[String]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for f in findings {
        let norm = f.trim().to_lowercase();
        if !norm.is_empty() && !seen.contains(&norm) {
            seen.push(norm);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("empty", 0.0).is_ok());
        assert!(validate_percentage("empty", 100.0).is_ok());
        assert!(validate_percentage("empty", -1.0).is_err());
        assert!(validate_percentage("empty", 100.5).is_err());
        assert!(validate_percentage("empty", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_content_total() {
        assert!(validate_content_total(&[40.0, 50.0, 10.0]).is_ok());
        assert!(validate_content_total(&[99.4, 0.4, 0.2]).is_ok());
        assert!(validate_content_total(&[100.0, 0.001]).is_err());
        assert_eq!(
            validate_content_total(&[60.0, 50.0]),
            Err(ValidationError::ContentOverflow {
                total: 110.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn test_validate_effectiveness() {
        assert!(validate_effectiveness(1).is_ok());
        assert!(validate_effectiveness(10).is_ok());
        assert!(validate_effectiveness(0).is_err());
        assert!(validate_effectiveness(11).is_err());
    }

    #[test]
    fn test_validate_findings() {
        assert!(validate_findings("diseases", &["varroa".to_string()]).is_ok());
        assert!(validate_findings("diseases", &vec!["x".to_string(); 51]).is_err());
        assert!(validate_findings("pests", &["x".repeat(200)]).is_err());
    }

    #[test]
    fn test_distinct_findings() {
        let findings = vec![
            "Varroa".to_string(),
            " varroa ".to_string(),
            "".to_string(),
            "chalkbrood".to_string(),
        ];
        assert_eq!(distinct_findings(&findings), 2);
        assert_eq!(distinct_findings(&[]), 0);
    }
}
