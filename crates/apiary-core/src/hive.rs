//! Hive-level health from the latest inspection
//!
//! Unlike inspections, the hive score is an absolute 40-point sum: every
//! category is always answered, so there is no re-normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Assessable;
use crate::kind::{EntityKind, HiveStatus, Tier};
use crate::limits::{self, ValidationError};
use crate::profile::{
    capped, no_interval_cap, tier_is_concern, tier_is_critical, Category, Floor, Override,
    Penalty, Profile, Rule, Scale, Thresholds,
};

/// Egg laying pattern seen on the frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EggPattern {
    Regular,
    Irregular,
    Spotty,
    #[serde(rename = "none")]
    Absent,
}

impl EggPattern {
    pub const ALL: [EggPattern; 4] = [Self::Regular, Self::Irregular, Self::Spotty, Self::Absent];

    fn points(self) -> f64 {
        match self {
            Self::Regular => 10.0,
            Self::Irregular => 6.0,
            Self::Spotty => 3.0,
            Self::Absent => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColonyStrength {
    Strong,
    Medium,
    Weak,
}

impl ColonyStrength {
    pub const ALL: [ColonyStrength; 3] = [Self::Strong, Self::Medium, Self::Weak];

    fn points(self) -> f64 {
        match self {
            Self::Strong => 8.0,
            Self::Medium => 5.0,
            Self::Weak => 2.0,
        }
    }
}

/// How the capped brood is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroodCoverage {
    Solid,
    Patchy,
    Scattered,
}

impl BroodCoverage {
    pub const ALL: [BroodCoverage; 3] = [Self::Solid, Self::Patchy, Self::Scattered];

    fn points(self) -> f64 {
        match self {
            Self::Solid => 6.0,
            Self::Patchy => 3.0,
            Self::Scattered => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiveStores {
    Abundant,
    Adequate,
    Low,
    Critical,
}

impl HiveStores {
    pub const ALL: [HiveStores; 4] = [Self::Abundant, Self::Adequate, Self::Low, Self::Critical];

    fn points(self) -> f64 {
        match self {
            Self::Abundant => 6.0,
            Self::Adequate => 4.0,
            Self::Low => 2.0,
            Self::Critical => 0.0,
        }
    }
}

/// Hive condition as recorded by its most recent inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiveObservation {
    pub queen_present: bool,
    pub egg_pattern: EggPattern,
    pub colony_strength: ColonyStrength,
    pub brood_pattern: BroodCoverage,
    pub food_stores: HiveStores,
    #[serde(default)]
    pub diseases: Vec<String>,
    #[serde(default)]
    pub pests: Vec<String>,
    pub inspected_at: DateTime<Utc>,
}

impl HiveObservation {
    /// A queenright, strong hive with solid brood and adequate stores
    pub fn new(inspected_at: DateTime<Utc>) -> Self {
        Self {
            queen_present: true,
            egg_pattern: EggPattern::Regular,
            colony_strength: ColonyStrength::Strong,
            brood_pattern: BroodCoverage::Solid,
            food_stores: HiveStores::Adequate,
            diseases: Vec::new(),
            pests: Vec::new(),
            inspected_at,
        }
    }
}

impl Assessable for HiveObservation {
    type Status = HiveStatus;

    fn profile() -> &'static Profile<Self> {
        &PROFILE
    }

    fn observed_at(&self) -> DateTime<Utc> {
        self.inspected_at
    }

    fn validate(&self) -> Result<(), ValidationError> {
        limits::validate_findings("diseases", &self.diseases)?;
        limits::validate_findings("pests", &self.pests)
    }
}

// Category budgets are the maximum points of each lookup table.
pub static PROFILE: Profile<HiveObservation> = Profile {
    kind: EntityKind::Hive,
    scale: Scale::Additive { max: 40 },
    categories: &[
        Category { name: "queen_present", points: 10.0, earned: queen_points },
        Category { name: "egg_pattern", points: 10.0, earned: egg_points },
        Category { name: "colony_strength", points: 8.0, earned: strength_points },
        Category { name: "brood_pattern", points: 6.0, earned: brood_points },
        Category { name: "food_stores", points: 6.0, earned: stores_points },
    ],
    penalties: &[
        Penalty { name: "diseases", points: disease_penalty },
        Penalty { name: "pests", points: pest_penalty },
    ],
    overrides: &[
        Override { name: "queen_missing", applies: queen_missing, forces: Tier::Critical },
        Override { name: "stores_critical", applies: stores_critical, forces: Tier::Critical },
    ],
    floors: &[Floor { name: "findings_present", applies: findings_present, at_least: Tier::Concern }],
    thresholds: Thresholds::STANDARD,
    rules: &[
        Rule {
            name: "queen_missing",
            applies: rule_queen_missing,
            recommendations: &["Introduce new queen or queen cell", "Check for emergency queen cells"],
        },
        Rule {
            name: "eggs_irregular",
            applies: rule_eggs_irregular,
            recommendations: &["Check queen health", "Consider requeening"],
        },
        Rule {
            name: "colony_weak",
            applies: rule_colony_weak,
            recommendations: &["Combine with a stronger colony", "Reduce hive volume"],
        },
        Rule {
            name: "brood_scattered",
            applies: rule_brood_scattered,
            recommendations: &["Check brood for disease"],
        },
        Rule {
            name: "stores_low",
            applies: rule_stores_low,
            recommendations: &["Feed sugar syrup", "Add protein patty"],
        },
        Rule {
            name: "diseases_found",
            applies: rule_diseases_found,
            recommendations: &["Begin treatment", "Consider isolation"],
        },
        Rule {
            name: "pests_found",
            applies: rule_pests_found,
            recommendations: &["Apply pest control"],
        },
        Rule {
            name: "status_critical",
            applies: tier_is_critical,
            recommendations: &["Inspect within 3 days", "Consult expert beekeeper"],
        },
        Rule {
            name: "status_warning",
            applies: tier_is_concern,
            recommendations: &["Re-inspect within 7 days"],
        },
    ],
    interval_cap: no_interval_cap,
};

fn queen_points(o: &HiveObservation) -> Option<f64> {
    Some(if o.queen_present { 1.0 } else { 0.0 })
}

fn egg_points(o: &HiveObservation) -> Option<f64> {
    Some(o.egg_pattern.points() / 10.0)
}

fn strength_points(o: &HiveObservation) -> Option<f64> {
    Some(o.colony_strength.points() / 8.0)
}

fn brood_points(o: &HiveObservation) -> Option<f64> {
    Some(o.brood_pattern.points() / 6.0)
}

fn stores_points(o: &HiveObservation) -> Option<f64> {
    Some(o.food_stores.points() / 6.0)
}

fn disease_penalty(o: &HiveObservation) -> f64 {
    capped(limits::distinct_findings(&o.diseases), 4.0, 8.0)
}

fn pest_penalty(o: &HiveObservation) -> f64 {
    capped(limits::distinct_findings(&o.pests), 2.0, 4.0)
}

fn queen_missing(o: &HiveObservation) -> bool {
    !o.queen_present
}

fn stores_critical(o: &HiveObservation) -> bool {
    o.food_stores == HiveStores::Critical
}

fn findings_present(o: &HiveObservation) -> bool {
    limits::distinct_findings(&o.diseases) > 0 || limits::distinct_findings(&o.pests) > 0
}

fn rule_queen_missing(o: &HiveObservation, _: Tier) -> bool {
    queen_missing(o)
}

fn rule_eggs_irregular(o: &HiveObservation, _: Tier) -> bool {
    o.queen_present && matches!(o.egg_pattern, EggPattern::Spotty | EggPattern::Absent)
}

fn rule_colony_weak(o: &HiveObservation, _: Tier) -> bool {
    o.colony_strength == ColonyStrength::Weak
}

fn rule_brood_scattered(o: &HiveObservation, _: Tier) -> bool {
    o.brood_pattern == BroodCoverage::Scattered
}

fn rule_stores_low(o: &HiveObservation, _: Tier) -> bool {
    matches!(o.food_stores, HiveStores::Low | HiveStores::Critical)
}

fn rule_diseases_found(o: &HiveObservation, _: Tier) -> bool {
    limits::distinct_findings(&o.diseases) > 0
}

fn rule_pests_found(o: &HiveObservation, _: Tier) -> bool {
    limits::distinct_findings(&o.pests) > 0
}
