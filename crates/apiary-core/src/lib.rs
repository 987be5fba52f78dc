//! Apiary Core - Colony health assessment engine
//!
//! This crate turns beekeeping observations (inspections, hive summaries,
//! frame readings, feeding outcomes) into a score, a status, a risk level,
//! recommendations and the date of the next required action. Every
//! assessment is a pure function of its observation.

pub mod assessment;
pub mod engine;
pub mod error;
pub mod feeding;
pub mod frame;
pub mod hive;
pub mod inspection;
pub mod kind;
pub mod lenient;
pub mod limits;
pub mod profile;
pub mod schedule;

pub use assessment::{Assessment, Score, Summary};
pub use engine::{
    assess, classify, compute_score, derive_risk, generate_recommendations, rating, Assessable,
};
pub use error::{Error, Result};
pub use feeding::{BeeResponse, ConsumptionRate, FeedingObservation};
pub use frame::{FrameContent, FrameObservation, FramePattern, FrameType, WaxCondition};
pub use hive::{BroodCoverage, ColonyStrength, EggPattern, HiveObservation, HiveStores};
pub use inspection::{
    BroodPattern, FoodStores, InspectionObservation, InspectionType, PopulationStrength,
    QueenLaying, QueenPresence,
};
pub use kind::{
    EntityKind, FeedingStatus, FrameStatus, HiveStatus, InspectionStatus, RiskLevel, Status, Tier,
};
pub use limits::ValidationError;
pub use profile::{Profile, Rule};
pub use schedule::next_action_date;
