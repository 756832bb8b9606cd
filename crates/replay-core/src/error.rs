//! Analysis errors.

use thiserror::Error;

use crate::types::{PlayerId, Race};

/// Precondition failures that abort the analysis of one match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No stat snapshot exists to anchor the time scale.
    #[error("match {replay} has no stat snapshot events")]
    NoStatSnapshots { replay: String },

    /// The last stat snapshot sits at internal time zero.
    #[error("match {replay} has its last stat snapshot at internal time 0")]
    ZeroInternalClock { replay: String },

    /// The requested player is not a participant.
    #[error("player {player_id} is not part of match {replay}")]
    UnknownPlayer { replay: String, player_id: PlayerId },

    /// The player has no stat snapshots of their own.
    #[error("player {player_id} has no stat snapshot events")]
    MissingPlayerStats { player_id: PlayerId },

    /// The ability catalog has no entry for the player's race.
    #[error("ability catalog has no entry for race {race}")]
    UnknownRace { race: Race },

    /// A control-group event with no tracked group snapshot.
    #[error("no control group snapshot for player {player_id} at second {second}")]
    MissingGroupSnapshot { player_id: PlayerId, second: u32 },
}
