#![allow(clippy::uninlined_format_args)]

use chrono::Utc;
use phishlens::detection::build_manual_scan;
use phishlens::highlight::reconcile;
use phishlens::rules::{parse_rules, BuiltinRuleRepository, RuleRepository};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing a credential phishing sample against the built-in rules...");

    let email = "Urgent: PayPal account notice\n\
                 Dear customer, we detected unusual activity on your account.\n\
                 Please verify your account within 24 hours by replying to \
                 support@paypa1-secure.com with your login credentials.";

    let rules = BuiltinRuleRepository.load_rules()?;
    let record = build_manual_scan(email, &rules, Utc::now());

    println!();
    println!("Subject:    {}", record.subject);
    println!("Sender:     {}", record.sender);
    println!("Risk:       {}", record.risk_level());
    println!("Confidence: {}%", record.verdict.confidence);
    println!("Techniques: {:?}", record.verdict.techniques);
    println!();

    for span in reconcile(&record.body, &record.verdict.dangerous_phrases) {
        if span.highlighted {
            println!("  >> {:?}  ({})", span.text, span.reason.unwrap_or_default());
        } else {
            println!("     {:?}", span.text);
        }
    }

    // The same sample against a rule set where one keyword sits inside another.
    let overlapping = parse_rules(
        r#"
rules:
  - keyword: "verify your account"
    risk_level: high
    confidence_weight: 80
    techniques: [urgency]
    reasons: ["Requests account verification"]
  - keyword: "your account"
    risk_level: medium
    confidence_weight: 40
    reasons: ["Refers to your account"]
"#,
    )?;
    let record = build_manual_scan(email, &overlapping, Utc::now());
    let spans = reconcile(&record.body, &record.verdict.dangerous_phrases);

    println!();
    println!(
        "Overlapping rules: {} phrases flagged, {} highlighted",
        record.verdict.dangerous_phrases.len(),
        spans.iter().filter(|s| s.highlighted).count()
    );

    Ok(())
}
