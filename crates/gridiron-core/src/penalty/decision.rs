//! Accept/decline decision.
//!
//! Two independent computations, the accepted state and the declined state,
//! plus one comparison per offending side. The side not charged with the
//! foul picks whichever state is better for it:
//!
//! - the defense accepts an offensive foul when it leaves the offense worse
//!   off than the play standing;
//! - the offense accepts a defensive foul when it leaves the offense better
//!   off.
//!
//! Pre-snap fouls have no decline option. Ties decline.

use serde::{Deserialize, Serialize};

use super::enforcement::{calculate_enforcement, declined_state, EnforcementResult, Foul};
use super::kind::Timing;
use crate::context::{Side, Situation};
use crate::outcome::RawPlayOutcome;

/// Outcome of the accept/decline choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyDecision {
    /// The non-offending side takes the penalty.
    pub accept: bool,
    /// State if the penalty is enforced.
    pub accepted: EnforcementResult,
    /// State if the play stands; `None` when declining is not allowed.
    pub declined: Option<EnforcementResult>,
}

impl PenaltyDecision {
    /// The state the decision selects.
    #[must_use]
    pub fn chosen(&self) -> &EnforcementResult {
        match &self.declined {
            Some(declined) if !self.accept => declined,
            _ => &self.accepted,
        }
    }
}

/// Decides whether the non-offending side accepts `foul`.
///
/// Play-negating fouls are enforced as if the play gained nothing; other
/// fouls are enforced on top of the play's real yardage.
#[must_use]
pub fn should_accept(foul: &Foul, situation: &Situation, outcome: &RawPlayOutcome) -> PenaltyDecision {
    let rule = foul.rule();
    let play_yards = if rule.replays_down() {
        0
    } else {
        outcome.yards_gained
    };
    let accepted = calculate_enforcement(foul, situation, play_yards);

    if rule.timing == Timing::PreSnap {
        return PenaltyDecision {
            accept: true,
            accepted,
            declined: None,
        };
    }

    let declined = declined_state(situation, outcome);
    let accept = match foul.offending {
        Side::Offense => defense_accepts(&accepted, &declined, outcome),
        Side::Defense => offense_accepts(&accepted, &declined, outcome),
    };
    tracing::debug!(
        kind = %foul.kind,
        accept,
        accepted = offense_value(&accepted),
        declined = offense_value(&declined),
        "penalty decision"
    );
    PenaltyDecision {
        accept,
        accepted,
        declined: Some(declined),
    }
}

fn defense_accepts(
    accepted: &EnforcementResult,
    declined: &EnforcementResult,
    outcome: &RawPlayOutcome,
) -> bool {
    if outcome.is_turnover() {
        return false;
    }
    outcome.is_touchdown() || offense_value(accepted) < offense_value(declined)
}

fn offense_accepts(
    accepted: &EnforcementResult,
    declined: &EnforcementResult,
    outcome: &RawPlayOutcome,
) -> bool {
    if outcome.is_touchdown() {
        return false;
    }
    outcome.is_turnover() || offense_value(accepted) > offense_value(declined)
}

/// How good a field state is for the offense.
///
/// Field position, minus two points per yard to go, minus a cost for each
/// down already spent. Losing the ball on downs is the worst state.
fn offense_value(state: &EnforcementResult) -> i32 {
    if state.turnover_on_downs {
        return i32::MIN;
    }
    let down_cost = match state.new_down {
        1 => 0,
        2 => 10,
        3 => 20,
        _ => 45,
    };
    i32::from(state.new_yard_line) - 2 * i32::from(state.new_yards_to_go) - down_cost
}
