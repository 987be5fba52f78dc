//! Show how a kind of observation is scored and which rules it runs

use clap::Args;
use serde::Serialize;

use super::KindArg;
use crate::output::{to_json, OutputFormat};
use crate::AppContext;
use apiary_core::profile::Scale;
use apiary_core::{
    Assessable, EntityKind, FeedingObservation, FrameObservation, HiveObservation,
    InspectionObservation, Tier,
};

#[derive(Args)]
pub struct RulesArgs {
    /// Kind of observation
    #[arg(value_enum)]
    pub kind: KindArg,
}

#[derive(Debug, Serialize)]
struct CategoryView {
    name: &'static str,
    points: f64,
}

#[derive(Debug, Serialize)]
struct ConditionView {
    name: &'static str,
    tier: Tier,
}

#[derive(Debug, Serialize)]
struct RuleView {
    name: &'static str,
    recommendations: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct ProfileView {
    kind: EntityKind,
    max_score: u8,
    normalized: bool,
    categories: Vec<CategoryView>,
    penalties: Vec<&'static str>,
    overrides: Vec<ConditionView>,
    floors: Vec<ConditionView>,
    rules: Vec<RuleView>,
}

fn describe<O: Assessable>() -> ProfileView {
    let p = O::profile();
    ProfileView {
        kind: p.kind,
        max_score: p.scale.max(),
        normalized: matches!(p.scale, Scale::Normalized { .. }),
        categories: p
            .categories
            .iter()
            .map(|c| CategoryView { name: c.name, points: c.points })
            .collect(),
        penalties: p.penalties.iter().map(|pen| pen.name).collect(),
        overrides: p
            .overrides
            .iter()
            .map(|o| ConditionView { name: o.name, tier: o.forces })
            .collect(),
        floors: p
            .floors
            .iter()
            .map(|f| ConditionView { name: f.name, tier: f.at_least })
            .collect(),
        rules: p
            .rules
            .iter()
            .map(|r| RuleView { name: r.name, recommendations: r.recommendations })
            .collect(),
    }
}

fn describe_kind(kind: EntityKind) -> ProfileView {
    match kind {
        EntityKind::Inspection => describe::<InspectionObservation>(),
        EntityKind::Hive => describe::<HiveObservation>(),
        EntityKind::Frame => describe::<FrameObservation>(),
        EntityKind::Feeding => describe::<FeedingObservation>(),
    }
}

fn render_table(view: &ProfileView) -> String {
    let mut lines = Vec::new();
    let mode = if view.normalized { "normalized" } else { "additive" };
    lines.push(format!("{} ({} score out of {})", view.kind, mode, view.max_score));
    lines.push("Categories:".to_string());
    for c in &view.categories {
        lines.push(format!("  {:<22} {:>5}", c.name, c.points));
    }
    if !view.penalties.is_empty() {
        lines.push(format!("Penalties: {}", view.penalties.join(", ")));
    }
    lines.push("Overrides:".to_string());
    for o in &view.overrides {
        lines.push(format!("  {} -> {:?}", o.name, o.tier));
    }
    if !view.floors.is_empty() {
        lines.push("Floors:".to_string());
        for f in &view.floors {
            lines.push(format!("  {} -> at least {:?}", f.name, f.tier));
        }
    }
    lines.push("Rules (in evaluation order):".to_string());
    for (i, r) in view.rules.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, r.name));
        for rec in r.recommendations {
            lines.push(format!("       - {}", rec));
        }
    }
    lines.join("\n")
}

pub fn run(args: &RulesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let view = describe_kind(args.kind.into());
    match ctx.format {
        OutputFormat::Json => println!("{}", to_json(&view)),
        OutputFormat::Table => println!("{}", render_table(&view)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_view() {
        let view = describe_kind(EntityKind::Inspection);
        assert_eq!(view.max_score, 100);
        assert!(view.normalized);
        let total: f64 = view.categories.iter().map(|c| c.points).sum();
        assert_eq!(total, 100.0);
        assert_eq!(view.rules[0].name, "queen_absent");
    }

    #[test]
    fn test_hive_table() {
        let out = render_table(&describe_kind(EntityKind::Hive));
        assert!(out.starts_with("hive (additive score out of 40)"));
        assert!(out.contains("queen_missing -> Critical"));
        assert!(!out.contains("Floors:"));
    }

    #[test]
    fn test_floors_listed_apart_from_overrides() {
        let out = render_table(&describe_kind(EntityKind::Inspection));
        let overrides = out.find("Overrides:").unwrap();
        let floors = out.find("Floors:\n  findings_present -> at least Concern").unwrap();
        let rules = out.find("Rules (in evaluation order):").unwrap();
        assert!(overrides < floors && floors < rules);
        assert!(!out[overrides..floors].contains("at least"));
    }
}
