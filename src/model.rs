use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a rule, link or scan.
///
/// Variants are declared in ascending order so that `Ord` gives
/// `High > Medium > Safe`, which is what verdict dominance relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Fixed advice shown alongside a verdict of this level.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::High => {
                "This content contains high-risk phishing patterns. Do not interact with any links or provide personal information."
            }
            RiskLevel::Medium => {
                "This content contains some suspicious patterns. Verify the sender before taking any action."
            }
            RiskLevel::Safe => "No significant phishing indicators found. Exercise normal caution.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "safe" => Ok(RiskLevel::Safe),
            other => anyhow::bail!("Unknown risk level: {other}"),
        }
    }
}

/// A keyword trigger loaded from the rule repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRule {
    pub keyword: String,
    pub risk_level: RiskLevel,
    pub confidence_weight: u32,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// A flagged phrase. `text` is the rule keyword, not the casing found in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerousPhrase {
    pub text: String,
    pub reason: String,
}

/// Output of a single analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanVerdict {
    pub risk_level: RiskLevel,
    pub confidence: u32,
    pub techniques: Vec<String>,
    pub reasons: Vec<String>,
    pub dangerous_phrases: Vec<DangerousPhrase>,
    pub recommendation: String,
}

/// Result of inspecting one link. Computed elsewhere; only displayed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnalysis {
    pub display_text: String,
    pub actual_url: String,
    pub risk_level: RiskLevel,
    pub reason: String,
}

/// A persisted scan. Write-once: stores never update a record in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub sender_name: String,
    pub subject: String,
    pub body: String,
    #[serde(flatten)]
    pub verdict: ScanVerdict,
    #[serde(default)]
    pub links: Vec<LinkAnalysis>,
}

impl ScanRecord {
    pub fn risk_level(&self) -> RiskLevel {
        self.verdict.risk_level
    }
}
