//! Core domain logic for replay phase statistics.
//!
//! This crate contains the fundamental types and logic for:
//! - Time normalization: mapping the recording's internal clock onto real time
//! - Phase partitioning: whole-match, early, mid and late windows
//! - Aggregation: economy, command and selection statistics per phase
//! - Control groups: reconstructing group contents from selection events

mod analysis;
pub mod catalog;
mod command;
pub mod control_group;
mod economy;
pub mod error;
pub mod event;
pub mod event_type;
pub mod game;
pub mod interval;
pub mod record;
pub mod reduce;
mod selection;
pub mod time;
pub mod types;

pub use analysis::{MatchContext, analyze_match, analyze_matches, analyze_player};
pub use catalog::AbilityCatalog;
pub use command::command_stats;
pub use economy::{economy_stats, spending_quotient};
pub use error::AnalysisError;
pub use event::{Event, EventKind, GroupUpdate, PlayerStats};
pub use event_type::EventCategory;
pub use game::{Match, Player};
pub use interval::{Phase, PhaseWindows, Phases, Window};
pub use record::{StatMap, StatValue, StatisticsRecord};
pub use selection::selection_stats;
pub use time::TimeScale;
pub use types::{ControlGroupIndex, PlayerId, Race, ReplayName, UnitId, ValidationError};
