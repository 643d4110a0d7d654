//! Play result assembly.
//!
//! [`assemble`] combines the generated outcome with the penalty verdict (if
//! any) into the [`PlayResult`] handed back to the game loop. The library
//! never changes possession or the score itself; [`DriveStatus`] tells the
//! caller which transition to perform.
//!
//! | Penalty                          | Final state                               |
//! |----------------------------------|-------------------------------------------|
//! | none                             | play stands, ordinary down advance        |
//! | pre-snap                         | forced accept, play never happened        |
//! | negating, accepted               | enforcement only, play wiped out          |
//! | non-negating, accepted           | enforcement on top of the play's yardage  |
//! | declined                         | play stands                               |
//! | post-play after score or turnover| play stands, yardage carried to next snap |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::archetype::PlayArchetype;
use crate::context::Situation;
use crate::outcome::{OutcomeKind, RawPlayOutcome};
use crate::penalty::{
    declined_state, should_accept, EnforcementResult, PenaltyDecision, PenaltyVerdict, Timing,
};

/// What the game loop must do after this play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveStatus {
    /// Same offense, next snap at the final state.
    Continues,
    /// Offense scored a touchdown.
    Touchdown,
    /// Offense was downed in its own end zone.
    Safety,
    /// Defense took the ball (fumble lost or interception).
    Turnover,
    /// Offense failed to convert on 4th down.
    TurnoverOnDowns,
}

impl DriveStatus {
    /// True when the offense keeps the ball.
    #[must_use]
    pub const fn offense_keeps_ball(self) -> bool {
        matches!(self, Self::Continues)
    }
}

impl fmt::Display for DriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Continues => "continues",
            Self::Touchdown => "touchdown",
            Self::Safety => "safety",
            Self::Turnover => "turnover",
            Self::TurnoverOnDowns => "turnover on downs",
        })
    }
}

/// Everything the game loop needs from one resolved play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    /// Archetype actually simulated.
    pub archetype: PlayArchetype,
    /// Outcome as generated.
    pub outcome: RawPlayOutcome,
    /// The generated outcome was wiped out by an accepted foul.
    pub play_negated: bool,
    /// Flag thrown on the play.
    pub penalty: Option<PenaltyVerdict>,
    /// Accept/decline choice for the flag.
    pub decision: Option<PenaltyDecision>,
    /// Enforcement that was applied. For a post-play foul after a score or a
    /// turnover this is the yardage to apply on the ensuing snap.
    pub enforcement: Option<EnforcementResult>,
    /// Line of scrimmage for the next snap (0 or 100 at the goal lines).
    pub final_yard_line: u8,
    /// Down for the next snap.
    pub final_down: u8,
    /// Yards to go for the next snap.
    pub final_distance: u8,
    /// Transition for the game loop.
    pub drive_status: DriveStatus,
}

impl PlayResult {
    fn new(
        archetype: PlayArchetype,
        outcome: RawPlayOutcome,
        state: &EnforcementResult,
        drive_status: DriveStatus,
    ) -> Self {
        Self {
            archetype,
            outcome,
            play_negated: false,
            penalty: None,
            decision: None,
            enforcement: None,
            final_yard_line: state.new_yard_line,
            final_down: state.new_down,
            final_distance: state.new_yards_to_go,
            drive_status,
        }
    }

    /// Referee-style description of the enforcement, if a flag was thrown.
    #[must_use]
    pub fn enforcement_description(&self) -> Option<&str> {
        self.enforcement.as_ref().map(|e| e.description.as_str())
    }
}

impl fmt::Display for PlayResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.archetype, self.outcome)?;
        if self.play_negated {
            f.write_str(" (no play)")?;
        }
        if let Some(description) = self.enforcement_description() {
            write!(f, " [{description}]")?;
        }
        write!(f, " -> {}", self.drive_status)
    }
}

/// Builds the final result of a play.
///
/// # Example
///
/// ```
/// use gridiron_core::archetype::PlayArchetype;
/// use gridiron_core::context::Situation;
/// use gridiron_core::outcome::RawPlayOutcome;
/// use gridiron_core::result::{assemble, DriveStatus};
///
/// let situation = Situation::new(25, 1, 10).unwrap();
/// let result = assemble(PlayArchetype::InsideZone, &situation, RawPlayOutcome::gain(4), None);
/// assert_eq!((result.final_yard_line, result.final_down, result.final_distance), (29, 2, 6));
/// assert_eq!(result.drive_status, DriveStatus::Continues);
/// ```
#[must_use]
pub fn assemble(
    archetype: PlayArchetype,
    situation: &Situation,
    outcome: RawPlayOutcome,
    verdict: Option<PenaltyVerdict>,
) -> PlayResult {
    let Some(verdict) = verdict else {
        let state = declined_state(situation, &outcome);
        return PlayResult::new(archetype, outcome, &state, status_of_play(&outcome, &state));
    };

    let foul = verdict.foul();
    let decision = should_accept(&foul, situation, &outcome);

    let mut result = if verdict.timing == Timing::PostPlay
        && (outcome.is_touchdown() || outcome.is_turnover())
    {
        // The play stands; dead-ball yardage moves to the next snap.
        let state = declined_state(situation, &outcome);
        PlayResult {
            enforcement: Some(decision.accepted.clone()),
            ..PlayResult::new(archetype, outcome, &state, status_of_play(&outcome, &state))
        }
    } else if decision.accept {
        let chosen = &decision.accepted;
        let status = if chosen.turnover_on_downs {
            DriveStatus::TurnoverOnDowns
        } else {
            DriveStatus::Continues
        };
        PlayResult {
            play_negated: foul.rule().replays_down(),
            enforcement: Some(chosen.clone()),
            ..PlayResult::new(archetype, outcome, chosen, status)
        }
    } else {
        let state = decision.chosen();
        PlayResult {
            enforcement: Some(state.clone()),
            ..PlayResult::new(archetype, outcome, state, status_of_play(&outcome, state))
        }
    };

    tracing::debug!(
        kind = %verdict.kind,
        accept = decision.accept,
        negated = result.play_negated,
        status = %result.drive_status,
        "penalty assembled"
    );
    result.penalty = Some(verdict);
    result.decision = Some(decision);
    result
}

/// Status when the play itself stands.
fn status_of_play(outcome: &RawPlayOutcome, state: &EnforcementResult) -> DriveStatus {
    match outcome.kind {
        OutcomeKind::Touchdown => DriveStatus::Touchdown,
        OutcomeKind::Turnover => DriveStatus::Turnover,
        _ if state.new_yard_line == 0 => DriveStatus::Safety,
        _ if state.turnover_on_downs => DriveStatus::TurnoverOnDowns,
        _ => DriveStatus::Continues,
    }
}
