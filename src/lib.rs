pub mod config;
pub mod detection;
pub mod highlight;
pub mod model;
pub mod report;
pub mod rules;
pub mod statistics;
pub mod store;

pub use config::Config;
pub use detection::{analyze, build_manual_scan};
pub use highlight::{reconcile, Span};
pub use model::{DangerousPhrase, DetectionRule, LinkAnalysis, RiskLevel, ScanRecord, ScanVerdict};
pub use rules::{BuiltinRuleRepository, FileRuleRepository, RuleRepository};
pub use statistics::{summarize, Stats};
pub use store::{JsonFileScanStore, MemoryScanStore, ScanQuery, ScanStore};
