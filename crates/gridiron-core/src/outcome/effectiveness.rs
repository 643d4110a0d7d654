//! Attribute effectiveness model.
//!
//! Scores how well a participant's ratings suit an archetype as a scalar in
//! `[0, 1]`, using the archetype's fixed attribute weights. An empty rating
//! bag scores exactly `0.5`.

use crate::archetype::PlayArchetype;
use crate::attributes::{ParticipantAttributes, NEUTRAL_RATING};

/// Weighted effectiveness of `attrs` for `archetype`, in `[0, 1]`.
///
/// # Example
///
/// ```
/// use gridiron_core::archetype::PlayArchetype;
/// use gridiron_core::attributes::{ParticipantAttributes, PlayerId};
/// use gridiron_core::outcome::effectiveness;
///
/// let unknown = ParticipantAttributes::new(PlayerId::new(1));
/// assert_eq!(effectiveness(&unknown, PlayArchetype::PowerRun), 0.5);
/// ```
#[must_use]
pub fn effectiveness(attrs: &ParticipantAttributes, archetype: PlayArchetype) -> f64 {
    let weights = archetype.attribute_weights();
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return 0.5;
    }
    // Measured as deviation from neutral so an empty bag is exactly 0.5.
    let deviation: f64 = weights
        .iter()
        .map(|&(attribute, weight)| weight * (attrs.rating(attribute) - NEUTRAL_RATING))
        .sum();
    (0.5 + deviation / total / 100.0).clamp(0.0, 1.0)
}

/// Highest rating among the attributes the archetype weighs.
///
/// Used to gate breakaway runs: one truly elite trait is enough.
#[must_use]
pub fn elite_rating(attrs: &ParticipantAttributes, archetype: PlayArchetype) -> f64 {
    archetype
        .attribute_weights()
        .iter()
        .map(|&(attribute, _)| attrs.rating(attribute))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Attribute, PlayerId};

    fn player() -> ParticipantAttributes {
        ParticipantAttributes::new(PlayerId::new(7))
    }

    #[test]
    fn unknown_participant_is_exactly_neutral() {
        for archetype in PlayArchetype::ALL {
            assert_eq!(effectiveness(&player(), archetype), 0.5);
        }
    }

    #[test]
    fn bounded_between_zero_and_one() {
        let mut maxed = player();
        let mut zeroed = player();
        for archetype in PlayArchetype::ALL {
            for &(attribute, _) in archetype.attribute_weights() {
                maxed = maxed.with(attribute, 100);
                zeroed = zeroed.with(attribute, 0);
            }
        }
        for archetype in PlayArchetype::ALL {
            assert!((effectiveness(&maxed, archetype) - 1.0).abs() < 1e-9);
            assert!(effectiveness(&zeroed, archetype) < 1e-9);
        }
    }

    #[test]
    fn specialists_score_higher_at_their_specialty() {
        let bruiser = player()
            .with(Attribute::Power, 95)
            .with(Attribute::Strength, 90)
            .with(Attribute::Speed, 40);
        let burner = player()
            .with(Attribute::Speed, 97)
            .with(Attribute::Agility, 92)
            .with(Attribute::Power, 40);

        assert!(
            effectiveness(&bruiser, PlayArchetype::PowerRun)
                > effectiveness(&burner, PlayArchetype::PowerRun)
        );
        assert!(
            effectiveness(&burner, PlayArchetype::OutsideZone)
                > effectiveness(&bruiser, PlayArchetype::OutsideZone)
        );
    }

    #[test]
    fn irrelevant_attributes_do_not_move_the_score() {
        let passer = player().with(Attribute::Accuracy, 99);
        assert_eq!(effectiveness(&passer, PlayArchetype::PowerRun), 0.5);
    }

    #[test]
    fn elite_rating_picks_best_weighted_trait() {
        let p = player()
            .with(Attribute::Speed, 92)
            .with(Attribute::Accuracy, 99);
        assert_eq!(elite_rating(&p, PlayArchetype::OutsideZone), 92.0);
        assert_eq!(elite_rating(&player(), PlayArchetype::OutsideZone), 50.0);
    }
}
