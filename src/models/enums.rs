use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(ReportType {
    BloodTest => "blood_test",
    Prescription => "prescription",
    XRay => "x_ray",
    General => "general",
});

str_enum!(ResultStatus {
    Normal => "normal",
    High => "high",
    Low => "low",
    Critical => "critical",
    Abnormal => "abnormal",
    Unknown => "unknown",
});

str_enum!(RiskSeverity {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
    RequiresAttention => "requires_attention",
});

str_enum!(TestKind {
    Lab => "lab",
    Vital => "vital",
});

impl ReportType {
    /// Human-readable category recorded under `insights.report_category`.
    pub fn category_label(&self) -> &'static str {
        match self {
            Self::BloodTest => "Blood Test Analysis",
            Self::Prescription => "Prescription Analysis",
            Self::XRay => "Imaging Analysis",
            Self::General => "General Medical Report",
        }
    }
}

impl ResultStatus {
    /// Anything other than `normal` and `unknown` warrants a closer look.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Self::Normal | Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn report_type_round_trip() {
        for (variant, s) in [
            (ReportType::BloodTest, "blood_test"),
            (ReportType::Prescription, "prescription"),
            (ReportType::XRay, "x_ray"),
            (ReportType::General, "general"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ReportType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn result_status_round_trip() {
        for (variant, s) in [
            (ResultStatus::Normal, "normal"),
            (ResultStatus::High, "high"),
            (ResultStatus::Low, "low"),
            (ResultStatus::Critical, "critical"),
            (ResultStatus::Abnormal, "abnormal"),
            (ResultStatus::Unknown, "unknown"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(ResultStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_matches_as_str() {
        let json = serde_json::to_string(&RiskSeverity::RequiresAttention).unwrap();
        assert_eq!(json, "\"requires_attention\"");
        let json = serde_json::to_string(&ReportType::XRay).unwrap();
        assert_eq!(json, "\"x_ray\"");
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = ReportType::from_str("mri").unwrap_err();
        assert_eq!(err.field, "ReportType");
        assert_eq!(err.value, "mri");
        assert!(ResultStatus::from_str("").is_err());
    }

    #[test]
    fn flagged_statuses() {
        assert!(!ResultStatus::Normal.is_flagged());
        assert!(!ResultStatus::Unknown.is_flagged());
        assert!(ResultStatus::High.is_flagged());
        assert!(ResultStatus::Abnormal.is_flagged());
        assert!(ResultStatus::Critical.is_flagged());
    }
}
