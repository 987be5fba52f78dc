//! Entity-kind configuration for the assessment engine
//!
//! A [`Profile`] bundles everything the engine needs to know about one kind
//! of observation: category weights and lookups, flat penalties, override
//! predicates, classification thresholds, recommendation rules and the
//! scheduling cap. The engine itself has no kind-specific logic.

use crate::kind::{EntityKind, Tier};

/// How category points are turned into a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Points are re-normalized over the answered categories only, then
    /// expressed out of `max`
    Normalized { max: u8 },
    /// Points are summed as-is and clamped to `max`
    Additive { max: u8 },
}

impl Scale {
    pub fn max(&self) -> u8 {
        match self {
            Self::Normalized { max } | Self::Additive { max } => *max,
        }
    }
}

/// A weighted scoring category
pub struct Category<O> {
    pub name: &'static str,
    /// Point budget when the category earns full marks
    pub points: f64,
    /// Fraction of the budget earned (0.0-1.0), or `None` when unanswered
    pub earned: fn(&O) -> Option<f64>,
}

/// A flat deduction applied after the category sum
pub struct Penalty<O> {
    pub name: &'static str,
    pub points: fn(&O) -> f64,
}

/// A condition that forces a tier regardless of the score
pub struct Override<O> {
    pub name: &'static str,
    pub applies: fn(&O) -> bool,
    pub forces: Tier,
}

/// A condition that lifts a score-derived tier to at least `at_least`
pub struct Floor<O> {
    pub name: &'static str,
    pub applies: fn(&O) -> bool,
    pub at_least: Tier,
}

/// Score thresholds in percent of the scale maximum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub critical_below: f64,
    pub concern_below: f64,
    pub watch_below: f64,
}

impl Thresholds {
    pub const STANDARD: Thresholds = Thresholds {
        critical_below: 40.0,
        concern_below: 60.0,
        watch_below: 80.0,
    };

    pub fn tier_for(&self, percent: f64) -> Tier {
        if percent < self.critical_below {
            Tier::Critical
        } else if percent < self.concern_below {
            Tier::Concern
        } else if percent < self.watch_below {
            Tier::Watch
        } else {
            Tier::Healthy
        }
    }
}

/// A recommendation rule: when `applies` holds, `recommendations` are
/// appended in order
pub struct Rule<O> {
    pub name: &'static str,
    pub applies: fn(&O, Tier) -> bool,
    pub recommendations: &'static [&'static str],
}

impl<O> Rule<O> {
    /// Evaluate this rule alone
    pub fn evaluate(&self, observation: &O, tier: Tier) -> Option<&'static [&'static str]> {
        (self.applies)(observation, tier).then_some(self.recommendations)
    }
}

/// Complete configuration for one entity kind
pub struct Profile<O: 'static> {
    pub kind: EntityKind,
    pub scale: Scale,
    pub categories: &'static [Category<O>],
    pub penalties: &'static [Penalty<O>],
    pub overrides: &'static [Override<O>],
    pub floors: &'static [Floor<O>],
    pub thresholds: Thresholds,
    pub rules: &'static [Rule<O>],
    /// Upper bound on the scheduling interval in days, if any
    pub interval_cap: fn(&O) -> Option<u32>,
}

impl<O: 'static> Profile<O> {
    /// Find a rule by name
    pub fn rule(&self, name: &str) -> Option<&Rule<O>> {
        self.rules.iter().find(|r| r.name == name)
    }
}

/// `per_item` points for each of `count` items, capped at `cap`
pub fn capped(count: usize, per_item: f64, cap: f64) -> f64 {
    (count as f64 * per_item).min(cap)
}

/// Rule predicate: the observation classified as critical
pub fn tier_is_critical<O>(_: &O, tier: Tier) -> bool {
    tier == Tier::Critical
}

/// Rule predicate: the observation classified as concern
pub fn tier_is_concern<O>(_: &O, tier: Tier) -> bool {
    tier == Tier::Concern
}

/// Scheduling cap for kinds without one
pub fn no_interval_cap<O>(_: &O) -> Option<u32> {
    None
}
