//! Plain-text rendering for the command line.

use crate::highlight::reconcile;
use crate::model::{RiskLevel, ScanRecord, ScanVerdict};
use crate::statistics::Stats;

pub fn technique_label(technique: &str) -> &str {
    match technique {
        "urgency" => "Urgency",
        "fear" => "Fear",
        "impersonation" => "Impersonation",
        "greed" => "Greed",
        other => other,
    }
}

fn risk_badge(level: RiskLevel) -> String {
    format!("[{}]", level.as_str().to_uppercase())
}

pub fn render_verdict(verdict: &ScanVerdict) -> String {
    let mut out = String::new();
    out.push_str(&format!("Risk: {}\n", risk_badge(verdict.risk_level)));
    out.push_str(&format!("Confidence: {}%\n", verdict.confidence));
    for reason in &verdict.reasons {
        out.push_str(&format!("  • {reason}\n"));
    }
    if !verdict.techniques.is_empty() {
        let labels: Vec<&str> = verdict
            .techniques
            .iter()
            .map(|t| technique_label(t))
            .collect();
        out.push_str(&format!("Techniques: {}\n", labels.join(", ")));
    }
    out.push_str(&format!("Recommendation: {}\n", verdict.recommendation));
    out
}

/// Body with highlighted spans wrapped in `[[...]]` and numbered footnotes.
pub fn render_highlighted_body(record: &ScanRecord) -> String {
    let spans = reconcile(&record.body, &record.verdict.dangerous_phrases);
    let mut body = String::new();
    let mut notes = Vec::new();

    for span in &spans {
        if span.highlighted {
            notes.push(span.reason.unwrap_or_default());
            body.push_str(&format!("[[{}]]({})", span.text, notes.len()));
        } else {
            body.push_str(span.text);
        }
    }

    let mut out = body;
    if !notes.is_empty() {
        out.push_str("\n\n");
        for (i, note) in notes.iter().enumerate() {
            out.push_str(&format!("  ({}) {}\n", i + 1, note));
        }
    }
    out
}

pub fn render_record(record: &ScanRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}\n",
        record.subject,
        risk_badge(record.risk_level())
    ));
    out.push_str(&format!(
        "From: {} <{}>  at {}\n",
        record.sender_name,
        record.sender,
        record.timestamp.to_rfc3339()
    ));
    out.push_str(&format!("Id: {}\n", record.id));
    out.push('\n');
    out.push_str(&render_highlighted_body(record));
    out.push_str("\n\n");
    out.push_str(&render_verdict(&record.verdict));

    if !record.links.is_empty() {
        out.push_str("Links:\n");
        for link in &record.links {
            out.push_str(&format!(
                "  {} {} -> {}\n",
                risk_badge(link.risk_level),
                link.display_text,
                link.actual_url
            ));
            out.push_str(&format!("      {}\n", link.reason));
        }
    }
    out
}

pub fn render_listing_line(record: &ScanRecord) -> String {
    format!(
        "{:<8} {:>3}%  {}  {}  {}",
        risk_badge(record.risk_level()),
        record.verdict.confidence,
        record.timestamp.format("%Y-%m-%d %H:%M"),
        record.id,
        record.subject
    )
}

pub fn render_stats(stats: &Stats, recent: &[ScanRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total scanned: {}\n", stats.total));
    out.push_str(&format!("High risk:     {}\n", stats.high));
    out.push_str(&format!("Medium risk:   {}\n", stats.medium));
    out.push_str(&format!("Safe:          {}\n", stats.safe));
    out.push_str(&format!("Safe rate:     {}%\n", stats.safe_rate()));

    out.push('\n');
    if recent.is_empty() {
        out.push_str("No scans yet.\n");
    } else {
        out.push_str("Recent scans:\n");
        for record in recent {
            out.push_str(&format!("  {}\n", render_listing_line(record)));
        }
    }
    out
}
