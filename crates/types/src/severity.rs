//! Severity types for diagnostics and rule-engine impact levels.

/// Diagnostic severity level for display.
///
/// This represents the severity of a diagnostic as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Error - an accessibility defect that must be fixed
    Error,
    /// Warning - a likely defect
    Warning,
    /// Information - a minor issue or suggestion
    Information,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Information => write!(f, "info"),
        }
    }
}

impl Severity {
    /// Map a rule-engine impact classification to a display severity.
    ///
    /// `critical` and `serious` intentionally collapse to the same level;
    /// an absent or unrecognized impact defaults to [`Severity::Warning`].
    #[must_use]
    pub const fn from_impact(impact: Option<Impact>) -> Self {
        match impact {
            Some(Impact::Critical | Impact::Serious) => Self::Error,
            Some(Impact::Minor) => Self::Information,
            Some(Impact::Moderate) | None => Self::Warning,
        }
    }
}

/// The rule engine's severity classification for a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl std::str::FromStr for Impact {
    type Err = UnknownImpact;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Self::Critical),
            "serious" => Ok(Self::Serious),
            "moderate" => Ok(Self::Moderate),
            "minor" => Ok(Self::Minor),
            _ => Err(UnknownImpact),
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::Serious => write!(f, "serious"),
            Self::Moderate => write!(f, "moderate"),
            Self::Minor => write!(f, "minor"),
        }
    }
}

/// Error for an impact string the rule engine convention does not define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownImpact;

impl std::fmt::Display for UnknownImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown impact classification")
    }
}

impl std::error::Error for UnknownImpact {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_to_severity_mapping() {
        assert_eq!(Severity::from_impact(Some(Impact::Critical)), Severity::Error);
        assert_eq!(Severity::from_impact(Some(Impact::Serious)), Severity::Error);
        assert_eq!(Severity::from_impact(Some(Impact::Moderate)), Severity::Warning);
        assert_eq!(
            Severity::from_impact(Some(Impact::Minor)),
            Severity::Information
        );
    }

    #[test]
    fn test_absent_impact_defaults_to_warning() {
        assert_eq!(Severity::from_impact(None), Severity::Warning);
    }

    #[test]
    fn test_impact_from_str() {
        assert_eq!("critical".parse(), Ok(Impact::Critical));
        assert_eq!("serious".parse(), Ok(Impact::Serious));
        assert_eq!("moderate".parse(), Ok(Impact::Moderate));
        assert_eq!("minor".parse(), Ok(Impact::Minor));
        assert_eq!("catastrophic".parse::<Impact>(), Err(UnknownImpact));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warning), "warning");
        assert_eq!(format!("{}", Severity::Information), "info");
    }
}
