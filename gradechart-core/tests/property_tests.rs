//! Property tests for assessment and navigation invariants.
//!
//! Uses proptest to verify:
//! 1. Identity scaling when the maximum is 20
//! 2. Every score lands in exactly one bucket
//! 3. Peak count is the tallest bucket
//! 4. Spread is non-negative and zero only for identical scores
//! 5. Advance/retreat pairs cancel out
//! 6. A full cycle of advances returns to the start
//! 7. Scores outside 0..=max are clamped or rejected, never silently bucketed

use gradechart_core::{Assessment, BucketPolicy, ChartNavigator, Command, RawRecord};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_max_score() -> impl Strategy<Value = f64> {
    prop_oneof![Just(20.0), Just(10.0), Just(5.0), Just(100.0), 1.0..200.0_f64]
}

/// A record whose scores all lie in 0..=max, rounded to quarter points.
fn arb_record() -> impl Strategy<Value = RawRecord> {
    arb_max_score().prop_flat_map(|max| {
        prop::collection::vec(0.0..=1.0_f64, 1..60).prop_map(move |fracs| {
            let scores = fracs
                .into_iter()
                .map(|f| ((f * max) * 4.0).floor() / 4.0)
                .collect();
            RawRecord::new("prop", max, scores)
        })
    })
}

fn arb_navigator() -> impl Strategy<Value = ChartNavigator> {
    prop::collection::vec(arb_record(), 1..8).prop_map(|records| {
        let assessments = records
            .iter()
            .map(|r| Assessment::new(r).unwrap())
            .collect();
        ChartNavigator::new(assessments).unwrap()
    })
}

fn arb_commands() -> impl Strategy<Value = Vec<Command>> {
    prop::collection::vec(
        prop_oneof![Just(Command::Advance), Just(Command::Retreat)],
        0..40,
    )
}

// ── Assessment ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn max_twenty_is_identity(quarters in prop::collection::vec(0u32..=80, 1..50)) {
        let scores: Vec<f64> = quarters.into_iter().map(|q| f64::from(q) / 4.0).collect();
        let a = Assessment::new(&RawRecord::new("id", 20.0, scores.clone())).unwrap();
        prop_assert_eq!(a.normalized_scores(), scores.as_slice());
    }

    #[test]
    fn histogram_counts_every_score(record in arb_record()) {
        let a = Assessment::new(&record).unwrap();
        let total: u32 = a.histogram().iter().sum();
        prop_assert_eq!(total as usize, record.scores.len());
        prop_assert_eq!(a.clamped(), 0);
    }

    #[test]
    fn clamping_keeps_every_score(
        scores in prop::collection::vec(-50.0..80.0_f64, 1..50),
    ) {
        let a = Assessment::with_policy(&RawRecord::new("wild", 20.0, scores.clone()), BucketPolicy::Clamp).unwrap();
        let total: u32 = a.histogram().iter().sum();
        prop_assert_eq!(total as usize, scores.len());
        let outside = scores.iter().filter(|&&s| !(0.0..=20.0).contains(&s)).count();
        prop_assert_eq!(a.clamped(), outside);
    }

    #[test]
    fn strict_policy_fails_exactly_when_a_score_leaves_the_scale(
        max in arb_max_score(),
        fracs in prop::collection::vec(-0.2..1.2_f64, 1..30),
    ) {
        let scores: Vec<f64> = fracs.iter().map(|f| f * max).collect();
        let outside = scores.iter().any(|&s| !(0.0..=max).contains(&s));
        let result = Assessment::with_policy(&RawRecord::new("strict", max, scores), BucketPolicy::Reject);
        prop_assert_eq!(result.is_err(), outside);
    }

    #[test]
    fn peak_is_tallest_bucket(record in arb_record()) {
        let a = Assessment::new(&record).unwrap();
        let tallest = a.histogram().iter().copied().max().unwrap();
        prop_assert_eq!(a.peak_count(), tallest);
        prop_assert!(a.peak_count() >= 1);
    }

    #[test]
    fn spread_is_non_negative(record in arb_record()) {
        let a = Assessment::new(&record).unwrap();
        let first = a.normalized_scores()[0];
        let all_equal = a.normalized_scores().iter().all(|&x| x == first);

        prop_assert!(a.std_dev() >= 0.0);
        prop_assert_eq!(a.std_dev() == 0.0, all_equal);
    }

    #[test]
    fn truncated_mean_never_exceeds_mean(record in arb_record()) {
        let a = Assessment::new(&record).unwrap();
        prop_assert!(a.truncated_mean() <= a.mean());
        prop_assert!(a.mean() - a.truncated_mean() < 1.0);
    }
}

// ── Navigation ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn index_always_in_range(mut nav in arb_navigator(), commands in arb_commands()) {
        for cmd in commands {
            nav.apply(cmd);
            prop_assert!(nav.index() < nav.len());
        }
    }

    #[test]
    fn advance_then_retreat_restores_index(mut nav in arb_navigator(), commands in arb_commands()) {
        for cmd in commands {
            nav.apply(cmd);
        }
        let start = nav.index();
        nav.advance();
        nav.retreat();
        prop_assert_eq!(nav.index(), start);
        nav.retreat();
        nav.advance();
        prop_assert_eq!(nav.index(), start);
    }

    #[test]
    fn full_cycle_returns_to_start(mut nav in arb_navigator(), offset in 0usize..10) {
        for _ in 0..offset {
            nav.advance();
        }
        let start = nav.index();
        for _ in 0..nav.len() {
            nav.advance();
        }
        prop_assert_eq!(nav.index(), start);
    }

    #[test]
    fn render_model_tracks_current(mut nav in arb_navigator(), commands in arb_commands()) {
        for cmd in commands {
            nav.apply(cmd);
        }
        let spec = nav.render_model();
        prop_assert_eq!(spec.position, nav.index());
        prop_assert_eq!(&spec.title, &format!("{}/{}", nav.current().label(), nav.len()));
        prop_assert_eq!(spec.bars.len(), 21);
        prop_assert_eq!(spec.band.y_max, f64::from(nav.current().peak_count()));
        prop_assert!(spec.band.x_min <= spec.mean && spec.mean <= spec.band.x_max);
    }
}
