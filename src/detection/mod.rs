pub mod engine;
pub mod extract;

pub use engine::analyze;
pub use extract::{extract_sender, extract_subject};

use crate::model::{DetectionRule, ScanRecord};
use chrono::{DateTime, Utc};

pub const MANUAL_SENDER_NAME: &str = "Manual Entry";

/// Analyze pasted text and wrap the verdict in a record ready to store.
pub fn build_manual_scan(text: &str, rules: &[DetectionRule], now: DateTime<Utc>) -> ScanRecord {
    ScanRecord {
        id: format!("manual-{}", now.timestamp_millis()),
        timestamp: now,
        sender: extract_sender(text),
        sender_name: MANUAL_SENDER_NAME.to_string(),
        subject: extract_subject(text),
        body: text.to_string(),
        verdict: analyze(text, rules),
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskLevel;

    #[test]
    fn test_build_manual_scan() {
        let rules = vec![DetectionRule {
            keyword: "wire transfer".to_string(),
            risk_level: RiskLevel::High,
            confidence_weight: 75,
            techniques: vec!["impersonation".to_string()],
            reasons: vec!["Requests an urgent payment".to_string()],
        }];
        let now: DateTime<Utc> = "2024-03-01T12:00:00Z".parse().unwrap();
        let text = "CEO request\nPlease make a wire transfer today. ceo@corp-mail.net";

        let record = build_manual_scan(text, &rules, now);

        assert_eq!(record.id, format!("manual-{}", now.timestamp_millis()));
        assert_eq!(record.timestamp, now);
        assert_eq!(record.subject, "CEO request");
        assert_eq!(record.sender, "ceo@corp-mail.net");
        assert_eq!(record.sender_name, MANUAL_SENDER_NAME);
        assert_eq!(record.body, text);
        assert_eq!(record.risk_level(), RiskLevel::High);
        assert_eq!(record.verdict.confidence, 80);
        assert!(record.links.is_empty());
    }
}
