use chrono::{DateTime, Duration, Utc};
use phishlens::detection::build_manual_scan;
use phishlens::model::{DangerousPhrase, DetectionRule, RiskLevel};
use phishlens::store::seed_if_empty;
use phishlens::{
    analyze, reconcile, summarize, BuiltinRuleRepository, JsonFileScanStore, MemoryScanStore,
    RuleRepository, ScanQuery, ScanStore, Stats,
};
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("phishlens-it-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn now() -> DateTime<Utc> {
    "2024-09-02T09:15:00Z".parse().unwrap()
}

fn urgency_rule() -> DetectionRule {
    DetectionRule {
        keyword: "verify your account".to_string(),
        risk_level: RiskLevel::High,
        confidence_weight: 80,
        techniques: vec!["urgency".to_string()],
        reasons: vec!["Creates false urgency".to_string()],
    }
}

#[test]
fn test_single_rule_example() {
    let verdict = analyze("Please verify your account now", &[urgency_rule()]);

    assert_eq!(verdict.risk_level, RiskLevel::High);
    assert_eq!(verdict.confidence, 85);
    assert_eq!(verdict.techniques, vec!["urgency".to_string()]);
    assert_eq!(
        verdict.dangerous_phrases,
        vec![DangerousPhrase {
            text: "verify your account".to_string(),
            reason: "Creates false urgency".to_string(),
        }]
    );
}

#[test]
fn test_analyze_store_reload_and_highlight() {
    let dir = temp_dir("workflow");
    let path = dir.join("scans.json");
    let _ = std::fs::remove_file(&path);
    let rules = BuiltinRuleRepository.load_rules().unwrap();

    let text = "Security notice from alerts@secure-bank-login.com\n\
                We noticed unusual activity. Verify your account within 24 hours \
                or it will be closed. Click here to continue.";
    let record = build_manual_scan(text, &rules, now());
    assert_eq!(record.risk_level(), RiskLevel::High);
    assert_eq!(record.sender, "alerts@secure-bank-login.com");

    let mut store = JsonFileScanStore::open(&path).unwrap();
    store.append(record.clone()).unwrap();

    let reopened = JsonFileScanStore::open(&path).unwrap();
    let loaded = reopened.get(&record.id).unwrap().unwrap();
    assert_eq!(loaded, record);

    let spans = reconcile(&loaded.body, &loaded.verdict.dangerous_phrases);
    let rebuilt: String = spans.iter().map(|s| s.text).collect();
    assert_eq!(rebuilt, loaded.body);

    let highlighted: Vec<&str> = spans
        .iter()
        .filter(|s| s.highlighted)
        .map(|s| s.text)
        .collect();
    assert_eq!(
        highlighted,
        vec![
            "unusual activity",
            "Verify your account",
            "within 24 hours",
            "Click here"
        ]
    );

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_clear_then_append() {
    let mut store = MemoryScanStore::new();
    let rules = BuiltinRuleRepository.load_rules().unwrap();
    seed_if_empty(&mut store, &rules, now()).unwrap();
    assert!(!store.list().unwrap().is_empty());

    store.clear().unwrap();
    assert!(store.list().unwrap().is_empty());

    let record = build_manual_scan("Hello there", &rules, now());
    store.append(record.clone()).unwrap();
    assert_eq!(store.get(&record.id).unwrap(), Some(record));
}

#[test]
fn test_history_summary_and_filtering() {
    let rules = vec![
        urgency_rule(),
        DetectionRule {
            keyword: "invoice".to_string(),
            risk_level: RiskLevel::Medium,
            confidence_weight: 55,
            techniques: vec!["impersonation".to_string()],
            reasons: vec!["Unexpected invoice".to_string()],
        },
    ];
    let texts = [
        "verify your account please",
        "Verify Your Account today",
        "Your invoice is ready",
        "Team lunch",
        "Weekend plans",
        "Book club notes",
    ];

    let mut store = MemoryScanStore::new();
    for (i, text) in texts.iter().enumerate() {
        let mut record = build_manual_scan(text, &rules, now() + Duration::minutes(i as i64));
        record.id = format!("scan-{i}");
        store.append(record).unwrap();
    }

    let records = store.list().unwrap();
    assert_eq!(records[0].id, "scan-5");
    assert_eq!(
        summarize(&records),
        Stats {
            total: 6,
            high: 2,
            medium: 1,
            safe: 3
        }
    );

    let query = ScanQuery {
        risk_level: Some(RiskLevel::High),
        search: Some("VERIFY".to_string()),
    };
    let ids: Vec<&str> = query.apply(&records).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["scan-1", "scan-0"]);
}
