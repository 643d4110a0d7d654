//! Penalty enforcement calculator.
//!
//! [`calculate_enforcement`] is a pure function from a foul and the pre-snap
//! situation to the resulting field state. It never fails: out-of-range
//! intermediate values are clamped onto the field.
//!
//! # Algorithm
//!
//! 1. Resolve the enforcement spot (previous spot, spot of foul, end of run,
//!    succeeding spot).
//! 2. Cap the yardage at half the distance from the spot to the relevant
//!    goal, with a floor of one yard.
//! 3. Move the ball against the offending team, clamped to `[1, 99]`. Spot
//!    fouls place the ball at the spot instead.
//! 4. Derive down and distance: replay for pre-snap and play-negating fouls,
//!    a fresh set for automatic first downs, a lost down for loss-of-down
//!    fouls, otherwise measure against the original line to gain.
//! 5. Goal-to-go correction: the line to gain never passes the goal line and
//!    the distance is never below one.
//!
//! # Example
//!
//! ```
//! use gridiron_core::context::Situation;
//! use gridiron_core::penalty::{calculate_enforcement, Foul, PenaltyKind};
//!
//! let situation = Situation::new(25, 1, 10).unwrap();
//! let result = calculate_enforcement(&Foul::new(PenaltyKind::FalseStart), &situation, 0);
//! assert_eq!(result.new_yard_line, 20);
//! assert_eq!((result.new_down, result.new_yards_to_go), (1, 15));
//! assert!(result.replay_down);
//! ```

use serde::{Deserialize, Serialize};

use super::kind::{EnforcementSpot, PenaltyKind, PenaltyRule};
use crate::context::{ordinal, Side, Situation, FIELD_LENGTH, FIRST_DOWN_YARDS};
use crate::outcome::RawPlayOutcome;

/// A called foul, as handed to the enforcement calculator.
///
/// The optional fields override the kind's rule: `spot_of_foul` is required
/// for spot fouls, `automatic_first_down` and `custom_yards` replace the
/// rule's values when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foul {
    /// What was called.
    pub kind: PenaltyKind,
    /// Team charged with the foul.
    pub offending: Side,
    /// Yard line where the foul occurred.
    pub spot_of_foul: Option<u8>,
    /// Overrides the rule's automatic first down.
    pub automatic_first_down: Option<bool>,
    /// Overrides the rule's base yardage.
    pub custom_yards: Option<u8>,
}

impl Foul {
    /// Foul of `kind` charged to the side its rule names (the offense for
    /// [`PenaltyKind::Unknown`]).
    #[must_use]
    pub const fn new(kind: PenaltyKind) -> Self {
        let offending = match kind.rule().side {
            Some(side) => side,
            None => Side::Offense,
        };
        Self {
            kind,
            offending,
            spot_of_foul: None,
            automatic_first_down: None,
            custom_yards: None,
        }
    }

    /// Charges the foul to `side`.
    #[must_use]
    pub const fn against(mut self, side: Side) -> Self {
        self.offending = side;
        self
    }

    /// Records where the foul happened.
    #[must_use]
    pub const fn at_spot(mut self, yard_line: u8) -> Self {
        self.spot_of_foul = Some(yard_line);
        self
    }

    /// Overrides the automatic first down flag.
    #[must_use]
    pub const fn with_automatic_first_down(mut self, automatic_first_down: bool) -> Self {
        self.automatic_first_down = Some(automatic_first_down);
        self
    }

    /// Overrides the base yardage.
    #[must_use]
    pub const fn with_yards(mut self, yards: u8) -> Self {
        self.custom_yards = Some(yards);
        self
    }

    /// Enforcement rule for this foul's kind.
    #[must_use]
    pub const fn rule(&self) -> PenaltyRule {
        self.kind.rule()
    }

    /// True when charged to the offense.
    #[must_use]
    pub const fn is_offensive(&self) -> bool {
        matches!(self.offending, Side::Offense)
    }
}

/// Field state after an enforcement (or after declining one).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnforcementResult {
    /// Line of scrimmage for the next snap.
    pub new_yard_line: u8,
    /// Down for the next snap.
    pub new_down: u8,
    /// Yards to go for the next snap.
    pub new_yards_to_go: u8,
    /// The next snap starts a fresh set of downs.
    pub is_first_down: bool,
    /// Yard line the yardage was measured from.
    pub enforcement_spot: u8,
    /// The penalty yardage was applied.
    pub penalty_accepted: bool,
    /// Yardage actually marked off, after the half-distance cap.
    pub yards_enforced: u8,
    /// The down is replayed.
    pub replay_down: bool,
    /// The offense ran out of downs.
    pub turnover_on_downs: bool,
    /// Referee-style description for display.
    pub description: String,
}

/// Down and distance before the goal-to-go correction.
#[derive(Debug, Clone, Copy)]
struct Series {
    down: u8,
    to_go: i32,
    first_down: bool,
    turnover_on_downs: bool,
}

impl Series {
    const fn fresh() -> Self {
        Self {
            down: 1,
            to_go: FIRST_DOWN_YARDS as i32,
            first_down: true,
            turnover_on_downs: false,
        }
    }

    const fn replay(down: u8, to_go: i32) -> Self {
        Self {
            down,
            to_go,
            first_down: false,
            turnover_on_downs: false,
        }
    }

    /// Next down; past 4th the ball goes over and the down stays at 4.
    const fn next(down: u8, to_go: i32) -> Self {
        if down >= 4 {
            Self {
                down: 4,
                to_go,
                first_down: false,
                turnover_on_downs: true,
            }
        } else {
            Self::replay(down + 1, to_go)
        }
    }
}

/// Computes the field state after enforcing `foul`.
///
/// `play_yards` is the net gain of the play; it is ignored by pre-snap and
/// play-negating fouls. The result is a pure function of the arguments.
#[must_use]
pub fn calculate_enforcement(foul: &Foul, situation: &Situation, play_yards: i32) -> EnforcementResult {
    let rule = foul.rule();
    if foul.kind == PenaltyKind::Unknown {
        tracing::warn!(kind = %foul.kind, "enforcing unknown penalty with the generic rule");
    }
    let offensive = foul.is_offensive();
    let replay = rule.replays_down();
    let play_yards = if replay { 0 } else { play_yards };
    let los = i32::from(situation.yard_line());
    let field = i32::from(FIELD_LENGTH);

    // Step 1: enforcement spot.
    let spot = match rule.enforcement_spot {
        EnforcementSpot::PreviousSpot => los,
        EnforcementSpot::EndOfRun | EnforcementSpot::SucceedingSpot => {
            (los + play_yards).clamp(0, field)
        }
        EnforcementSpot::SpotOfFoul => match foul.spot_of_foul {
            Some(spot) => i32::from(spot).clamp(0, field),
            None => {
                tracing::warn!(kind = %foul.kind, "no spot of foul supplied, using previous spot");
                los
            }
        },
    };

    // Step 2: half the distance to the goal, never less than a yard.
    let base = i32::from(foul.custom_yards.unwrap_or(rule.base_yards));
    let to_goal = if offensive { spot } else { field - spot };
    let actual = base.min(to_goal / 2).max(1);

    // Step 3: new line of scrimmage.
    let placed_at_spot = rule.is_spot_foul && foul.spot_of_foul.is_some();
    let moved = if placed_at_spot {
        spot
    } else if offensive {
        spot - actual
    } else {
        spot + actual
    };
    let new_line = moved.clamp(1, field - 1);

    // Step 4: down and distance.
    let automatic_first_down = foul
        .automatic_first_down
        .unwrap_or(rule.automatic_first_down);
    let down = situation.down();
    let distance = i32::from(situation.distance());
    let line_to_gain = i32::from(situation.line_to_gain());
    let series = if automatic_first_down && (replay || !offensive) {
        Series::fresh()
    } else if replay {
        if offensive {
            Series::replay(down, distance + actual)
        } else if distance - actual <= 0 {
            Series::fresh()
        } else {
            Series::replay(down, distance - actual)
        }
    } else if rule.loss_of_down {
        Series::next(down, line_to_gain - new_line)
    } else if !offensive {
        let total = play_yards + actual;
        if total >= distance {
            Series::fresh()
        } else {
            Series::next(down, distance - total)
        }
    } else if play_yards >= distance {
        Series {
            to_go: i32::from(FIRST_DOWN_YARDS) + actual,
            ..Series::fresh()
        }
    } else {
        Series::next(down, line_to_gain - new_line)
    };

    // Step 5: goal-to-go correction.
    let to_go = series.to_go.max(1).min(field - new_line);

    let result = EnforcementResult {
        new_yard_line: yard(new_line),
        new_down: series.down,
        new_yards_to_go: yard(to_go),
        is_first_down: series.first_down,
        enforcement_spot: yard(spot),
        penalty_accepted: true,
        yards_enforced: yard(actual),
        replay_down: replay,
        turnover_on_downs: series.turnover_on_downs,
        description: String::new(),
    };
    let description = describe(foul, &rule, base, &result);
    EnforcementResult {
        description,
        ..result
    }
}

/// Field state when the penalty is declined and the play stands.
///
/// The yard line is the pre-snap line plus the play's yards, clamped onto
/// the field; the down advances unless the play reached the line to gain.
#[must_use]
pub fn declined_state(situation: &Situation, outcome: &RawPlayOutcome) -> EnforcementResult {
    let field = i32::from(FIELD_LENGTH);
    let los = i32::from(situation.yard_line());
    let new_line = (los + outcome.yards_gained).clamp(0, field);
    let series = if outcome.yards_gained >= i32::from(situation.distance()) {
        Series::fresh()
    } else {
        Series::next(situation.down(), i32::from(situation.line_to_gain()) - new_line)
    };
    let to_go = series.to_go.max(1).min(field - new_line);
    let mut result = EnforcementResult {
        new_yard_line: yard(new_line),
        new_down: series.down,
        new_yards_to_go: yard(to_go),
        is_first_down: series.first_down,
        enforcement_spot: yard(los),
        penalty_accepted: false,
        yards_enforced: 0,
        replay_down: false,
        turnover_on_downs: series.turnover_on_downs,
        description: String::new(),
    };
    result.description = format!("Play stands ({outcome}). {}", next_snap(&result));
    result
}

/// Whole yards on the field as `u8`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn yard(value: i32) -> u8 {
    value.clamp(0, i32::from(FIELD_LENGTH)) as u8
}

fn next_snap(result: &EnforcementResult) -> String {
    if result.turnover_on_downs {
        return format!("Turnover on downs at {}.", result.new_yard_line);
    }
    if result.new_yard_line >= FIELD_LENGTH {
        return "Touchdown.".to_string();
    }
    let to_go = if u16::from(result.new_yard_line) + u16::from(result.new_yards_to_go)
        >= u16::from(FIELD_LENGTH)
    {
        "goal".to_string()
    } else {
        result.new_yards_to_go.to_string()
    };
    let replay = if result.replay_down { ", replay the down" } else { "" };
    format!(
        "{} & {} at {}{replay}.",
        ordinal(result.new_down),
        to_go,
        result.new_yard_line
    )
}

fn describe(foul: &Foul, rule: &PenaltyRule, base: i32, result: &EnforcementResult) -> String {
    let mut text = format!("{}, {}. ", foul.kind.label(), foul.offending);
    if rule.is_spot_foul && foul.spot_of_foul.is_some() {
        text.push_str(&format!(
            "Ball placed at the spot of the foul, the {}. ",
            result.enforcement_spot
        ));
    } else {
        text.push_str(&format!(
            "{} yard{} from {}",
            result.yards_enforced,
            if result.yards_enforced == 1 { "" } else { "s" },
            rule.enforcement_spot
        ));
        if i32::from(result.yards_enforced) < base {
            text.push_str(", half the distance to the goal");
        }
        text.push_str(". ");
    }
    if rule.loss_of_down {
        text.push_str("Loss of down. ");
    }
    if result.is_first_down {
        text.push_str("First down. ");
    }
    text.push_str(&next_snap(result));
    text
}
