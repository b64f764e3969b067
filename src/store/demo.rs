use super::ScanStore;
use crate::detection::analyze;
use crate::model::{DetectionRule, LinkAnalysis, RiskLevel, ScanRecord};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

struct DemoEmail {
    id: &'static str,
    hours_ago: i64,
    sender: &'static str,
    sender_name: &'static str,
    subject: &'static str,
    body: &'static str,
    links: &'static [(&'static str, &'static str, RiskLevel, &'static str)],
}

const DEMO_EMAILS: &[DemoEmail] = &[
    DemoEmail {
        id: "demo-001",
        hours_ago: 2,
        sender: "security@paypa1-support.com",
        sender_name: "PayPal Security",
        subject: "Your account has been suspended",
        body: "Dear Customer,\n\nWe detected unusual activity on your PayPal account. \
               Your account has been suspended until you verify your account.\n\n\
               Click here to confirm your password within 24 hours or your funds \
               will be frozen.\n\nPayPal Security Team",
        links: &[(
            "https://www.paypal.com/verify",
            "http://paypa1-support.com/login.php?id=88412",
            RiskLevel::High,
            "Link text shows paypal.com but points to a look-alike domain",
        )],
    },
    DemoEmail {
        id: "demo-002",
        hours_ago: 5,
        sender: "ceo@northwind-traders.co",
        sender_name: "Daniel Brooks",
        subject: "Quick favour",
        body: "Hi,\n\nI'm stuck in meetings all day. I need you to buy five gift cards \
               for a client immediately. Keep this between us.\n\nSend me the codes \
               by email.\n\nDaniel",
        links: &[],
    },
    DemoEmail {
        id: "demo-003",
        hours_ago: 9,
        sender: "billing@quickinvoice-center.net",
        sender_name: "Accounts Payable",
        subject: "Invoice #44821 overdue",
        body: "Hello,\n\nPlease find the invoice attached for services rendered. \
               Payment is urgent to avoid legal action.\n\nRegards,\nAccounts Payable",
        links: &[(
            "View invoice",
            "https://quickinvoice-center.net/download/44821.zip",
            RiskLevel::Medium,
            "Downloads a compressed archive from an unfamiliar domain",
        )],
    },
    DemoEmail {
        id: "demo-004",
        hours_ago: 26,
        sender: "news@techweekly.io",
        sender_name: "Tech Weekly",
        subject: "This week in tech",
        body: "Here are the top stories from this week: new laptops, a browser update \
               and a look at home networking.\n\nYou are receiving this newsletter \
               because you signed up. To unsubscribe, update your preferences.",
        links: &[(
            "Read more",
            "https://techweekly.io/issues/212",
            RiskLevel::Safe,
            "Link destination matches the sender domain",
        )],
    },
    DemoEmail {
        id: "demo-005",
        hours_ago: 49,
        sender: "maria.lopez@example.org",
        sender_name: "Maria Lopez",
        subject: "Lunch on Thursday?",
        body: "Hey! Are we still on for lunch on Thursday? I found a new place near \
               the office that does great noodles.\n\nMaria",
        links: &[],
    },
    DemoEmail {
        id: "demo-006",
        hours_ago: 73,
        sender: "rewards@prize-center-online.com",
        sender_name: "Rewards Center",
        subject: "Congratulations! You have won",
        body: "Congratulations! You have won a brand new smartphone.\n\n\
               Claim your prize today by entering your login credentials and \
               shipping details.",
        links: &[(
            "Claim prize",
            "http://198.51.100.23/claim",
            RiskLevel::High,
            "Link points to a bare IP address",
        )],
    },
];

/// Sample history analysed with `rules`, timestamped relative to `now`.
pub fn demo_records(rules: &[DetectionRule], now: DateTime<Utc>) -> Vec<ScanRecord> {
    DEMO_EMAILS
        .iter()
        .map(|email| ScanRecord {
            id: email.id.to_string(),
            timestamp: now - Duration::hours(email.hours_ago),
            sender: email.sender.to_string(),
            sender_name: email.sender_name.to_string(),
            subject: email.subject.to_string(),
            body: email.body.to_string(),
            verdict: analyze(email.body, rules),
            links: email
                .links
                .iter()
                .map(|(display_text, actual_url, risk_level, reason)| LinkAnalysis {
                    display_text: display_text.to_string(),
                    actual_url: actual_url.to_string(),
                    risk_level: *risk_level,
                    reason: reason.to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Seed demo history into an empty store. Returns how many records were added.
pub fn seed_if_empty<S: ScanStore + ?Sized>(
    store: &mut S,
    rules: &[DetectionRule],
    now: DateTime<Utc>,
) -> Result<usize> {
    if !store.list()?.is_empty() {
        return Ok(0);
    }

    let records = demo_records(rules, now);
    let count = records.len();
    for record in records {
        store.append(record)?;
    }
    log::info!("Seeded {count} demonstration scans");
    Ok(count)
}
