//! CLI command implementations

pub mod assess;
pub mod batch;
pub mod completions;
pub mod config;
pub mod rules;

use anyhow::Context;
use clap::ValueEnum;
use serde::de::DeserializeOwned;

use apiary_core::{
    Assessable, EntityKind, FeedingObservation, FrameObservation, HiveObservation,
    InspectionObservation, Summary,
};

use crate::output::Report;

/// Observation kind as accepted on the command line
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Inspection,
    Hive,
    Frame,
    Feeding,
}

impl From<KindArg> for EntityKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Inspection => EntityKind::Inspection,
            KindArg::Hive => EntityKind::Hive,
            KindArg::Frame => EntityKind::Frame,
            KindArg::Feeding => EntityKind::Feeding,
        }
    }
}

/// Parse a JSON observation of `kind`, assess it and record it in `summary`
pub fn evaluate(kind: EntityKind, raw: &str, summary: &mut Summary) -> anyhow::Result<Option<Report>> {
    match kind {
        EntityKind::Inspection => evaluate_as::<InspectionObservation>(raw, summary),
        EntityKind::Hive => evaluate_as::<HiveObservation>(raw, summary),
        EntityKind::Frame => evaluate_as::<FrameObservation>(raw, summary),
        EntityKind::Feeding => evaluate_as::<FeedingObservation>(raw, summary),
    }
}

fn evaluate_as<O>(raw: &str, summary: &mut Summary) -> anyhow::Result<Option<Report>>
where
    O: Assessable + DeserializeOwned,
{
    let observation: O = serde_json::from_str(raw)
        .with_context(|| format!("Invalid {} observation", O::profile().kind))?;
    let assessment = apiary_core::assess(&observation)?;
    summary.record(assessment.as_ref());
    Ok(assessment.map(Report::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_each_kind() {
        let mut summary = Summary::new();
        let inspection = r#"{"queen_present": "yes", "inspected_at": "2024-05-10T14:00:00Z"}"#;
        let report = evaluate(EntityKind::Inspection, inspection, &mut summary)
            .unwrap()
            .unwrap();
        assert_eq!(report.status, "green");

        let feeding = r#"{"fed_at": "2024-05-10T14:00:00Z"}"#;
        assert!(evaluate(EntityKind::Feeding, feeding, &mut summary).unwrap().is_none());

        assert_eq!(summary.total, 2);
        assert_eq!(summary.not_assessed, 1);
    }

    #[test]
    fn test_evaluate_reports_kind_on_parse_error() {
        let mut summary = Summary::new();
        let err = evaluate(EntityKind::Hive, "{}", &mut summary).unwrap_err();
        assert!(err.to_string().contains("Invalid hive observation"));
        assert_eq!(summary.total, 0);
    }
}
