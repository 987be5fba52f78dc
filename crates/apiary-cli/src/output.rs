//! Output formatting utilities

use std::fmt::Write;

use apiary_core::{Assessment, EntityKind, RiskLevel, Score, Status, Summary};
use chrono::NaiveDate;
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// An assessment with its status rendered in the kind's vocabulary
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub kind: EntityKind,
    pub score: Score,
    pub status: String,
    pub risk_level: RiskLevel,
    pub needs_attention: bool,
    pub recommendations: Vec<String>,
    pub next_action_date: NaiveDate,
}

impl<S: Status> From<Assessment<S>> for Report {
    fn from(a: Assessment<S>) -> Self {
        Self {
            kind: a.kind,
            score: a.score,
            status: a.status.to_string(),
            risk_level: a.risk_level,
            needs_attention: a.needs_attention(),
            recommendations: a.recommendations,
            next_action_date: a.next_action_date,
        }
    }
}

/// Serialize as pretty JSON
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Render one report; `None` means the observation was not assessed
pub fn format_report(report: Option<&Report>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => match report {
            Some(r) => report_table(r),
            None => "Not assessed: no answered categories".to_string(),
        },
    }
}

fn report_table(r: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Kind:        {}", r.kind);
    let _ = writeln!(out, "Score:       {}", r.score);
    let flag = if r.needs_attention { "  (!)" } else { "" };
    let _ = writeln!(out, "Status:      {}{}", r.status, flag);
    let _ = writeln!(out, "Risk:        {}", r.risk_level);
    let _ = writeln!(out, "Next action: {}", r.next_action_date);
    if r.recommendations.is_empty() {
        let _ = write!(out, "Recommendations: none");
    } else {
        let _ = write!(out, "Recommendations:");
        for rec in &r.recommendations {
            let _ = write!(out, "\n  - {}", rec);
        }
    }
    out
}

/// Render a batch summary as a table
pub fn summary_table(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Total:           {}", summary.total);
    let _ = writeln!(out, "  Not assessed:    {}", summary.not_assessed);
    let _ = writeln!(out, "  Needs attention: {}", summary.needs_attention);
    for risk in RiskLevel::ALL.iter().rev() {
        let _ = writeln!(out, "  Risk {:<9}   {}", format!("{}:", risk), summary.count(*risk));
    }
    match summary.earliest_next_action {
        Some(date) => {
            let _ = write!(out, "  Earliest action: {}", date);
        }
        None => {
            let _ = write!(out, "  Earliest action: -");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            kind: EntityKind::Inspection,
            score: Score { value: 92, max: 100 },
            status: "orange".to_string(),
            risk_level: RiskLevel::High,
            needs_attention: true,
            recommendations: vec!["Begin treatment".to_string()],
            next_action_date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Table);
    }

    #[test]
    fn test_table_report() {
        let out = format_report(Some(&report()), OutputFormat::Table);
        assert!(out.contains("Score:       92/100"));
        assert!(out.contains("Status:      orange  (!)"));
        assert!(out.contains("Next action: 2024-05-17"));
        assert!(out.ends_with("  - Begin treatment"));
    }

    #[test]
    fn test_json_report() {
        let out = format_report(Some(&report()), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "orange");
        assert_eq!(value["risk_level"], "high");
        assert_eq!(value["score"]["value"], 92);
        assert_eq!(value["next_action_date"], "2024-05-17");

        assert_eq!(format_report(None, OutputFormat::Json), "null");
    }

    #[test]
    fn test_summary_table() {
        let summary = Summary::new();
        let out = summary_table(&summary);
        assert!(out.contains("Total:           0"));
        assert!(out.contains("Risk critical:"));
        assert!(out.ends_with("Earliest action: -"));
    }
}
