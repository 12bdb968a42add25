use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Listing bucket derived from a product's completion percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionQuality {
    High,
    Medium,
    Low,
}

/// Badge styling for a quality level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Success,
    Warning,
    Destructive,
}

impl CompletionQuality {
    pub const ALL: [CompletionQuality; 3] = [Self::High, Self::Medium, Self::Low];

    /// `> 50` high, `>= 35` medium, otherwise low
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 50.0 {
            Self::High
        } else if percentage >= 35.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Completion",
            Self::Medium => "Medium Completion",
            Self::Low => "Low Completion",
        }
    }

    #[must_use]
    pub const fn badge(self) -> BadgeVariant {
        match self {
            Self::High => BadgeVariant::Success,
            Self::Medium => BadgeVariant::Warning,
            Self::Low => BadgeVariant::Destructive,
        }
    }
}

impl fmt::Display for CompletionQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionQuality {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown completion level '{other}' (expected high|medium|low)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompletionQualityInfo {
    pub level: CompletionQuality,
    pub label: &'static str,
    pub percentage: f64,
}

impl CompletionQualityInfo {
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        let level = CompletionQuality::from_percentage(percentage);
        Self {
            level,
            label: level.label(),
            percentage,
        }
    }
}

/// Headline shown above the missing-fields list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageTier {
    Good,
    NeedsImprovement,
    Critical,
}

impl CoverageTier {
    #[must_use]
    pub const fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::Good
        } else if percentage >= 50 {
            Self::NeedsImprovement
        } else {
            Self::Critical
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good coverage",
            Self::NeedsImprovement => "Needs improvement",
            Self::Critical => "Critical gaps",
        }
    }
}
