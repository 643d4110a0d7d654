//! Situational modifier stage.
//!
//! Deterministic multiplicative adjustments for down, distance and field
//! position. The table is an ordered list of `(predicate, multiplier)` rules.
//! Every rule whose predicate matches scales the yardage, in table order.
//!
//! Only positive gains are scaled: a short-yardage defense squeezes gains, it
//! does not soften a tackle for loss.
//!
//! # Default Table
//!
//! | Order | Rule                              | Multiplier |
//! |-------|-----------------------------------|------------|
//! | 1     | 3rd/4th and 2 or less             | 0.85       |
//! | 2     | 1st and 10 between the 20s        | 1.05       |
//! | 3     | within 4 of the goal, non-power   | 0.70       |
//! | 4     | backed up inside own 20           | 1.10       |

use serde::{Deserialize, Serialize};

use crate::archetype::PlayArchetype;
use crate::context::{PlayContext, FIRST_DOWN_YARDS};
use crate::error::ConfigError;

/// Condition under which a situational rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SituationalPredicate {
    /// 3rd or 4th down with at most `max_distance` to go.
    LateDownShortYardage {
        /// Largest distance that still counts as short.
        max_distance: u8,
    },
    /// 1st and 10 with the line of scrimmage in `min_yard_line..=max_yard_line`.
    FirstAndTenOpenField {
        /// Lowest qualifying yard line.
        min_yard_line: u8,
        /// Highest qualifying yard line.
        max_yard_line: u8,
    },
    /// Within `within` yards of the goal on a non-power archetype.
    NearGoalNonPower {
        /// Yards-to-goal threshold.
        within: u8,
    },
    /// Line of scrimmage inside the offense's own `inside` yard line.
    BackedUp {
        /// Own yard line the offense is inside of.
        inside: u8,
    },
}

impl SituationalPredicate {
    /// True when the predicate holds for this snap.
    #[must_use]
    pub fn matches(&self, ctx: &PlayContext, archetype: PlayArchetype) -> bool {
        let s = ctx.situation();
        match *self {
            Self::LateDownShortYardage { max_distance } => {
                s.down() >= 3 && s.distance() <= max_distance
            }
            Self::FirstAndTenOpenField {
                min_yard_line,
                max_yard_line,
            } => {
                s.down() == 1
                    && s.distance() == FIRST_DOWN_YARDS
                    && (min_yard_line..=max_yard_line).contains(&s.yard_line())
            }
            Self::NearGoalNonPower { within } => {
                s.yards_to_goal() <= within && !archetype.is_power()
            }
            Self::BackedUp { inside } => s.yard_line() < inside,
        }
    }
}

/// One row of the modifier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationalRule {
    /// Short name used in logs.
    pub label: String,
    /// When the rule applies.
    pub predicate: SituationalPredicate,
    /// Factor applied to positive gains.
    pub multiplier: f64,
}

impl SituationalRule {
    /// Builds a rule.
    #[must_use]
    pub fn new(label: impl Into<String>, predicate: SituationalPredicate, multiplier: f64) -> Self {
        Self {
            label: label.into(),
            predicate,
            multiplier,
        }
    }

    /// True when this rule fires for the snap.
    #[must_use]
    pub fn applies(&self, ctx: &PlayContext, archetype: PlayArchetype) -> bool {
        self.predicate.matches(ctx, archetype)
    }
}

/// Ordered situational rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierTable {
    rules: Vec<SituationalRule>,
}

impl Default for ModifierTable {
    fn default() -> Self {
        Self::new(vec![
            SituationalRule::new(
                "late_down_short_yardage",
                SituationalPredicate::LateDownShortYardage { max_distance: 2 },
                0.85,
            ),
            SituationalRule::new(
                "first_and_ten_open_field",
                SituationalPredicate::FirstAndTenOpenField {
                    min_yard_line: 20,
                    max_yard_line: 80,
                },
                1.05,
            ),
            SituationalRule::new(
                "near_goal_non_power",
                SituationalPredicate::NearGoalNonPower { within: 4 },
                0.70,
            ),
            SituationalRule::new(
                "backed_up",
                SituationalPredicate::BackedUp { inside: 20 },
                1.10,
            ),
        ])
    }
}

impl ModifierTable {
    /// Table with the given rules, applied in order.
    #[must_use]
    pub fn new(rules: Vec<SituationalRule>) -> Self {
        Self { rules }
    }

    /// Table that never adjusts anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Rules in application order.
    #[must_use]
    pub fn rules(&self) -> &[SituationalRule] {
        &self.rules
    }

    /// Applies every matching rule to `raw_yards`.
    ///
    /// Zero and negative yardage pass through untouched.
    #[must_use]
    pub fn apply(&self, raw_yards: f64, ctx: &PlayContext, archetype: PlayArchetype) -> f64 {
        if raw_yards <= 0.0 {
            return raw_yards;
        }
        self.rules
            .iter()
            .filter(|rule| rule.applies(ctx, archetype))
            .fold(raw_yards, |yards, rule| {
                tracing::trace!(rule = %rule.label, multiplier = rule.multiplier, "situational modifier");
                yards * rule.multiplier
            })
    }

    /// Checks every multiplier is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMultiplier`] for the first bad rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.rules {
            if !rule.multiplier.is_finite() || rule.multiplier < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    name: rule.label.clone(),
                    value: rule.multiplier,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Situation;

    fn ctx(yard_line: u8, down: u8, distance: u8) -> PlayContext {
        PlayContext::new(Situation::new(yard_line, down, distance).unwrap())
    }

    fn rule(table: &ModifierTable, label: &str) -> SituationalRule {
        table
            .rules()
            .iter()
            .find(|r| r.label == label)
            .cloned()
            .unwrap()
    }

    mod predicate_tests {
        use super::*;

        #[test]
        fn late_down_short_yardage() {
            let r = rule(&ModifierTable::default(), "late_down_short_yardage");
            assert!(r.applies(&ctx(40, 3, 1), PlayArchetype::InsideZone));
            assert!(r.applies(&ctx(40, 4, 2), PlayArchetype::Vertical));
            assert!(!r.applies(&ctx(40, 3, 3), PlayArchetype::InsideZone));
            assert!(!r.applies(&ctx(40, 2, 1), PlayArchetype::InsideZone));
        }

        #[test]
        fn first_and_ten_open_field() {
            let r = rule(&ModifierTable::default(), "first_and_ten_open_field");
            assert!(r.applies(&ctx(25, 1, 10), PlayArchetype::PowerRun));
            assert!(!r.applies(&ctx(15, 1, 10), PlayArchetype::PowerRun));
            assert!(!r.applies(&ctx(85, 1, 10), PlayArchetype::PowerRun));
            assert!(!r.applies(&ctx(25, 1, 15), PlayArchetype::PowerRun));
        }

        #[test]
        fn near_goal_spares_power_archetypes() {
            let r = rule(&ModifierTable::default(), "near_goal_non_power");
            assert!(r.applies(&ctx(97, 1, 3), PlayArchetype::OutsideZone));
            assert!(!r.applies(&ctx(97, 1, 3), PlayArchetype::PowerRun));
            assert!(!r.applies(&ctx(97, 1, 3), PlayArchetype::GoalLinePower));
            assert!(!r.applies(&ctx(90, 1, 10), PlayArchetype::OutsideZone));
        }

        #[test]
        fn backed_up() {
            let r = rule(&ModifierTable::default(), "backed_up");
            assert!(r.applies(&ctx(5, 2, 8), PlayArchetype::Draw));
            assert!(!r.applies(&ctx(20, 2, 8), PlayArchetype::Draw));
        }
    }

    mod apply_tests {
        use super::*;

        #[test]
        fn third_and_short_squeezes_gain() {
            let table = ModifierTable::default();
            let out = table.apply(10.0, &ctx(50, 3, 1), PlayArchetype::InsideZone);
            assert!((out - 8.5).abs() < 1e-9);
        }

        #[test]
        fn multiple_rules_compound_in_order() {
            // 3rd and 2 at the 10: short yardage and backed up.
            let table = ModifierTable::default();
            let out = table.apply(10.0, &ctx(10, 3, 2), PlayArchetype::InsideZone);
            assert!((out - 10.0 * 0.85 * 1.10).abs() < 1e-9);
        }

        #[test]
        fn losses_pass_through() {
            let table = ModifierTable::default();
            assert_eq!(table.apply(-4.0, &ctx(97, 3, 1), PlayArchetype::Draw), -4.0);
            assert_eq!(table.apply(0.0, &ctx(97, 3, 1), PlayArchetype::Draw), 0.0);
        }

        #[test]
        fn no_match_is_identity() {
            let table = ModifierTable::default();
            assert_eq!(table.apply(7.0, &ctx(50, 2, 6), PlayArchetype::Screen), 7.0);
            assert_eq!(ModifierTable::empty().apply(7.0, &ctx(97, 3, 1), PlayArchetype::Draw), 7.0);
        }

        #[test]
        fn deterministic() {
            let table = ModifierTable::default();
            let c = ctx(97, 4, 2);
            let a = table.apply(3.3, &c, PlayArchetype::QuickGame);
            let b = table.apply(3.3, &c, PlayArchetype::QuickGame);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn default_table_is_valid() {
            assert!(ModifierTable::default().validate().is_ok());
        }

        #[test]
        fn negative_multiplier_rejected() {
            let table = ModifierTable::new(vec![SituationalRule::new(
                "broken",
                SituationalPredicate::BackedUp { inside: 10 },
                -1.0,
            )]);
            assert!(matches!(
                table.validate(),
                Err(ConfigError::InvalidMultiplier { .. })
            ));
        }

        #[test]
        fn serde_uses_tagged_predicates() {
            let json = serde_json::to_string(&ModifierTable::default()).unwrap();
            assert!(json.contains("\"kind\":\"backed_up\""));
            let back: ModifierTable = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ModifierTable::default());
        }
    }
}
