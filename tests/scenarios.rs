use proptest::prelude::*;
use scratch_reveal::coverage::meets_threshold;
use scratch_reveal::mask::OPAQUE;
use scratch_reveal::{
    BoundingBox, CardConfig, Completion, Mask, PointerEvent, RevealState, ScratchCard,
    StrokePoint, Surface, coverage,
};

/// Four corner discs plus the centre; pairwise more than 40 px apart.
const DISJOINT_CENTRES: [(f32, f32); 5] =
    [(20.0, 20.0), (80.0, 20.0), (20.0, 80.0), (80.0, 80.0), (50.0, 50.0)];

#[test]
fn five_disjoint_scratches_reveal_exactly_once() {
    let mut surface = Surface::new(100, 100, 50.0);
    let mut notes = Vec::new();

    for (x, y) in DISJOINT_CENTRES {
        notes.extend(surface.scratch(StrokePoint::new(x, y)));
    }
    assert_eq!(notes, vec![Completion::won()]);
    assert_eq!(surface.state(), RevealState::Revealed);

    let pct = surface.coverage();
    assert!((60.0..=65.0).contains(&pct), "coverage {pct}");

    // A sixth scratch may clear pixels but must not notify again.
    assert_eq!(surface.scratch(StrokePoint::new(50.0, 20.0)), None);
    assert_eq!(surface.state(), RevealState::Revealed);
}

#[test]
fn card_scenario_through_pointer_events() {
    let mut card = ScratchCard::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    card.configure(CardConfig::default());

    let (x0, y0) = DISJOINT_CENTRES[0];
    card.pointer_down(&PointerEvent::mouse(x0, y0));
    for &(x, y) in &DISJOINT_CENTRES[1..] {
        card.pointer_move(&PointerEvent::mouse(x, y));
    }
    card.pointer_move(&PointerEvent::mouse(50.0, 20.0));
    card.pointer_up();

    assert_eq!(card.drain_completions(), vec![Completion::won()]);
    assert_eq!(card.label(), "You won!");
}

#[test]
fn threshold_is_inclusive_to_the_pixel() {
    for (cleared, expect_win) in [(4999, false), (5000, true), (5001, true)] {
        let mut bytes = vec![OPAQUE; 10_000];
        bytes[..cleared].fill(0);
        let mask = Mask::from_opacity(100, 100, bytes).unwrap();
        let mut surface = Surface::from_mask(mask, 50.0);

        let fired = surface.evaluate().is_some();
        assert_eq!(fired, expect_win, "{cleared} cleared pixels");
        assert_eq!(surface.is_revealed(), expect_win);
    }
}

#[test]
fn malformed_config_leaves_round_untouched() {
    let mut card = ScratchCard::new(BoundingBox::new(0.0, 0.0, 100.0, 100.0));
    card.apply_config(r#"{"clear_percentage": 80}"#).unwrap();
    card.pointer_down(&PointerEvent::mouse(30.0, 30.0));
    card.pointer_up();

    let mask = card.surface().unwrap().mask().clone();
    let state = card.state();

    for bad in ["not json", "[]", "42", r#"{"pre_text": 5}"#, ""] {
        assert!(card.apply_config(bad).is_err(), "{bad:?} accepted");
        assert_eq!(card.surface().unwrap().mask(), &mask);
        assert_eq!(card.state(), state);
        assert_eq!(card.config().clear_percentage, 80.0);
    }
}

#[test]
fn unreachable_cover_still_gives_a_scratchable_card() {
    let mut card = ScratchCard::new(BoundingBox::new(0.0, 0.0, 60.0, 60.0));
    card.apply_config(r#"{"fg": "/nowhere/foil.png", "clear_percentage": 10}"#)
        .unwrap();

    let surface = card.surface().unwrap();
    assert_eq!(surface.mask(), &Mask::covered(60, 60));
    assert!(card.cover().is_some());

    card.pointer_down(&PointerEvent::mouse(30.0, 30.0));
    assert_eq!(card.drain_completions(), vec![Completion::won()]);
}

fn stroke() -> impl Strategy<Value = (f32, f32, f32)> {
    (-40.0f32..140.0, -40.0f32..140.0, 0.0f32..30.0)
}

proptest! {
    #[test]
    fn coverage_never_decreases(strokes in prop::collection::vec(stroke(), 1..40)) {
        let mut mask = Mask::covered(100, 100);
        let mut last = coverage(&mask);
        for (x, y, r) in strokes {
            let before = mask.clone();
            mask.erase(x, y, r);
            let now = coverage(&mask);
            prop_assert!(now >= last);
            last = now;
            for (b, a) in before.opacity().iter().zip(mask.opacity()) {
                prop_assert!(a <= b);
            }
        }
    }

    #[test]
    fn completion_fires_at_most_once(
        strokes in prop::collection::vec(stroke(), 1..80),
        threshold in 0.0f64..100.0,
    ) {
        let mut surface = Surface::new(64, 64, threshold);
        let mut fired = 0;
        for (x, y, _) in strokes {
            if surface.scratch(StrokePoint::new(x, y)).is_some() {
                fired += 1;
            }
        }
        prop_assert!(fired <= 1);
        prop_assert_eq!(fired == 1, surface.is_revealed());
        if !surface.is_revealed() {
            prop_assert!(!meets_threshold(surface.mask(), threshold));
        }
    }

    #[test]
    fn erasing_off_the_buffer_is_a_no_op(
        x in prop_oneof![-1000.0f32..-21.0, 121.0f32..1000.0],
        y in -1000.0f32..1000.0,
    ) {
        let mut mask = Mask::covered(100, 100);
        prop_assert_eq!(mask.erase(x, y, 20.0), 0);
        prop_assert_eq!(mask, Mask::covered(100, 100));
    }
}
