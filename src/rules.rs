use crate::model::DetectionRule;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const BUILTIN_RULES: &str = include_str!("../rules/default.yaml");
const MAX_CONFIDENCE_WEIGHT: u32 = 99;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<DetectionRule>,
}

/// Source of detection rules. Each call returns an independent snapshot.
pub trait RuleRepository {
    fn load_rules(&self) -> Result<Vec<DetectionRule>>;

    fn source(&self) -> String;
}

/// Rule set compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRuleRepository;

impl RuleRepository for BuiltinRuleRepository {
    fn load_rules(&self) -> Result<Vec<DetectionRule>> {
        let rules = parse_rules(BUILTIN_RULES).context("Built-in rule set is invalid")?;
        log::info!("Loaded {} built-in detection rules", rules.len());
        Ok(rules)
    }

    fn source(&self) -> String {
        "built-in".to_string()
    }
}

/// Rules read from a YAML file on every load.
#[derive(Debug, Clone)]
pub struct FileRuleRepository {
    path: PathBuf,
}

impl FileRuleRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleRepository for FileRuleRepository {
    fn load_rules(&self) -> Result<Vec<DetectionRule>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read rule file: {}", self.path.display()))?;
        let rules = parse_rules(&content)
            .with_context(|| format!("Invalid rule file: {}", self.path.display()))?;
        log::info!(
            "Loaded {} detection rules from {}",
            rules.len(),
            self.path.display()
        );
        Ok(rules)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick the file repository when a path is configured, else the built-in set.
pub fn repository_for(rules_path: Option<&str>) -> Box<dyn RuleRepository> {
    match rules_path {
        Some(path) => Box::new(FileRuleRepository::new(path)),
        None => Box::new(BuiltinRuleRepository),
    }
}

pub fn parse_rules(content: &str) -> Result<Vec<DetectionRule>> {
    let file: RuleFile = serde_yaml::from_str(content)?;
    validate_rules(&file.rules)?;
    Ok(file.rules)
}

/// Reject rules the engine cannot score meaningfully.
///
/// An empty keyword would match every text, and weights above 99 break the
/// confidence range. Duplicate keywords are allowed but reported.
pub fn validate_rules(rules: &[DetectionRule]) -> Result<()> {
    let mut seen = HashSet::new();

    for (index, rule) in rules.iter().enumerate() {
        if rule.keyword.trim().is_empty() {
            anyhow::bail!("Rule {} has an empty keyword", index + 1);
        }
        if rule.confidence_weight > MAX_CONFIDENCE_WEIGHT {
            anyhow::bail!(
                "Rule {} ({:?}) has confidence_weight {} above {}",
                index + 1,
                rule.keyword,
                rule.confidence_weight,
                MAX_CONFIDENCE_WEIGHT
            );
        }
        if !seen.insert(rule.keyword.to_lowercase()) {
            log::warn!(
                "Duplicate rule keyword {:?}; each match adds its own highlighted phrase",
                rule.keyword
            );
        }
    }

    Ok(())
}
