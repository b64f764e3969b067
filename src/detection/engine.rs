use crate::model::{DangerousPhrase, DetectionRule, RiskLevel, ScanVerdict};

/// Confidence reported when no rule matches.
pub const NO_MATCH_CONFIDENCE: u32 = 85;
pub const MAX_CONFIDENCE: u32 = 99;
/// Added once per matched rule on top of the strongest rule weight.
pub const CORROBORATION_BONUS: u32 = 5;

pub const NO_MATCH_REASON: &str = "No known phishing patterns detected in the content.";
pub const DEFAULT_PHRASE_REASON: &str = "Suspicious pattern detected";

/// Score `text` against `rules`.
///
/// Matching is case-insensitive substring containment, so a keyword also
/// matches inside a longer word. Rules are evaluated in order and every
/// ordered output (techniques, reasons, phrases) follows rule order.
pub fn analyze(text: &str, rules: &[DetectionRule]) -> ScanVerdict {
    let text_lower = text.to_lowercase();
    let matched: Vec<&DetectionRule> = rules
        .iter()
        .filter(|rule| text_lower.contains(&rule.keyword.to_lowercase()))
        .collect();

    log::debug!(
        "Matched {} of {} rules against {} chars of text",
        matched.len(),
        rules.len(),
        text.chars().count()
    );

    if matched.is_empty() {
        return ScanVerdict {
            risk_level: RiskLevel::Safe,
            confidence: NO_MATCH_CONFIDENCE,
            techniques: Vec::new(),
            reasons: vec![NO_MATCH_REASON.to_string()],
            dangerous_phrases: Vec::new(),
            recommendation: RiskLevel::Safe.recommendation().to_string(),
        };
    }

    let risk_level = matched
        .iter()
        .map(|rule| rule.risk_level)
        .max()
        .unwrap_or(RiskLevel::Safe);

    let strongest = matched
        .iter()
        .map(|rule| rule.confidence_weight)
        .max()
        .unwrap_or(0);
    let bonus = CORROBORATION_BONUS.saturating_mul(matched.len() as u32);
    let confidence = strongest.saturating_add(bonus).min(MAX_CONFIDENCE);

    let mut techniques = Vec::new();
    let mut reasons = Vec::new();
    let mut dangerous_phrases = Vec::with_capacity(matched.len());

    for rule in &matched {
        push_unique(&mut techniques, &rule.techniques);
        push_unique(&mut reasons, &rule.reasons);
        // One entry per rule, even when two rules share a keyword.
        dangerous_phrases.push(DangerousPhrase {
            text: rule.keyword.clone(),
            reason: rule
                .reasons
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_PHRASE_REASON.to_string()),
        });
    }

    log::debug!("Verdict: {risk_level} at {confidence}% confidence");

    ScanVerdict {
        risk_level,
        confidence,
        techniques,
        reasons,
        dangerous_phrases,
        recommendation: risk_level.recommendation().to_string(),
    }
}

fn push_unique(target: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
