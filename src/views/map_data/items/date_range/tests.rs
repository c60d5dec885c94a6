use eframe::egui;

use super::*;
use crate::app::environment::MemoryLocation;
use crate::features::FeatureStore;
use crate::types::{MAX_YEAR, MIN_YEAR};

const BOUNDS: YearBounds = YearBounds::new(-4000, 2025);

fn range(min: i32, max: i32) -> DateRange {
    DateRange::new(min, max).unwrap()
}

fn setup(hash: &str) -> (DateRangeSection, FeatureStore, MemoryLocation) {
    (
        DateRangeSection::new(BOUNDS),
        FeatureStore::new(),
        MemoryLocation::new(hash),
    )
}

// Expanded state is global; drawn sections get their own id.
fn setup_drawn(id: &'static str, hash: &str) -> (DateRangeSection, FeatureStore, MemoryLocation) {
    (
        DateRangeSection::with_section_id(BOUNDS, id),
        FeatureStore::new(),
        MemoryLocation::new(hash),
    )
}

// Types into an input without committing, as the text field does.
fn type_into(section: &mut DateRangeSection, side: Bound, text: &str) {
    let input = section.input_mut(side);
    input.text = text.to_string();
    input.dirty = true;
}

#[test]
fn in_range_values_survive_validation() {
    for v in [-4000, -1, 0, 1, 1066, 2024, 2025] {
        let r = validate(&v.to_string(), "2025", BOUNDS);
        assert_eq!(r.min_year(), v);
        let r = validate("-4000", &v.to_string(), BOUNDS);
        assert_eq!(r.max_year(), v);
    }
}

#[test]
fn invalid_values_reset_to_side_default() {
    for bad in ["", "  ", "abc", "-4001", "2026", "12.5", "1e3"] {
        assert_eq!(validate(bad, "1900", BOUNDS).min_year(), -4000, "start {bad:?}");
        assert_eq!(validate("1800", bad, BOUNDS).max_year(), 2025, "end {bad:?}");
    }
}

#[test]
fn start_after_end_forces_end_up() {
    assert_eq!(validate("2000", "1990", BOUNDS), range(2000, 2000));
    assert_eq!(validate("-5", "-10", BOUNDS), range(-5, -5));
    // invalid end falls back to MAX first, so no conflict
    assert_eq!(validate("2000", "x", BOUNDS), range(2000, 2025));
}

#[test]
fn step_stays_within_bounds() {
    assert_eq!(step("2025", Bound::End, 1, BOUNDS), None);
    assert_eq!(step("-4000", Bound::Start, -1, BOUNDS), None);
    assert_eq!(step("2024", Bound::End, 1, BOUNDS), Some(2025));
    assert_eq!(step("-3999", Bound::Start, -1, BOUNDS), Some(-4000));
    // garbage steps from the side default
    assert_eq!(step("", Bound::Start, 1, BOUNDS), Some(-3999));
    assert_eq!(step("zzz", Bound::End, -1, BOUNDS), Some(2024));
}

#[test]
fn hash_range_requires_outer_limits() {
    assert_eq!(range_from_hash("#daterange=1800,1900", BOUNDS), Some((1800, 1900)));
    assert_eq!(range_from_hash("#daterange=9999,10000", BOUNDS), None);
    assert_eq!(range_from_hash("#daterange=-5000,1900", BOUNDS), None);
    assert_eq!(range_from_hash("#daterange=1800", BOUNDS), None);
    assert_eq!(range_from_hash("#daterange=a,b", BOUNDS), None);
    assert_eq!(range_from_hash("#map=1/2/3", BOUNDS), None);
    // reversed pairs are seeded and fixed up later by validation
    assert_eq!(range_from_hash("#daterange=1950,1900", BOUNDS), Some((1950, 1900)));
}

#[test]
fn hash_with_range_keeps_other_params() {
    let h = hash_with_range("#map=10/1/2&daterange=1,2", Some(range(1800, 1900)));
    assert_eq!(h, "#daterange=1800,1900&map=10/1/2");
    assert_eq!(hash_with_range("#map=10/1/2&daterange=1,2", None), "#map=10/1/2");
    assert_eq!(hash_with_range("#daterange=1,2", None), "");
}

#[test]
fn initializes_from_hash() {
    let (mut section, mut store, mut env) = setup("#daterange=1800,1900");
    section.render_pass(&mut store, &mut env);

    assert_eq!(section.value(Bound::Start), "1800");
    assert_eq!(section.value(Bound::End), "1900");
    assert_eq!(store.date_range(), Some(range(1800, 1900)));
    assert_eq!(store.revision(), 1);
    assert_eq!(env.hash(), "#daterange=1800,1900");
}

#[test]
fn out_of_bounds_hash_falls_back_to_defaults() {
    let (mut section, mut store, mut env) = setup("#daterange=9999,10000");
    section.render_pass(&mut store, &mut env);

    assert_eq!(section.value(Bound::Start), "-4000");
    assert_eq!(section.value(Bound::End), "2025");
    assert_eq!(store.date_range(), Some(range(-4000, 2025)));
    assert_eq!(env.hash(), "#daterange=-4000,2025");
}

#[test]
fn empty_hash_still_commits_defaults() {
    let (mut section, mut store, mut env) = setup("");
    section.render_pass(&mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(-4000, 2025)));
    assert_eq!(env.hash(), "#daterange=-4000,2025");
}

#[test]
fn render_pass_is_idempotent() {
    let (mut section, mut store, mut env) = setup("#daterange=1800,1900&map=3/4/5");
    section.render_pass(&mut store, &mut env);
    let first = (section.value(Bound::Start).to_string(), env.hash());
    type_into(&mut section, Bound::Start, "junk");
    section.render_pass(&mut store, &mut env);
    assert_eq!((section.value(Bound::Start).to_string(), env.hash()), first);
    assert_eq!(env.hash(), "#daterange=1800,1900&map=3/4/5");
}

#[test]
fn reversed_edit_corrects_end() {
    let (mut section, mut store, mut env) = setup("");
    section.render_pass(&mut store, &mut env);

    type_into(&mut section, Bound::Start, "2000");
    section.change(&mut store, &mut env);
    type_into(&mut section, Bound::End, "1990");
    section.change(&mut store, &mut env);

    assert_eq!(section.value(Bound::Start), "2000");
    assert_eq!(section.value(Bound::End), "2000");
    assert_eq!(store.date_range(), Some(range(2000, 2000)));
    assert_eq!(env.hash(), "#daterange=2000,2000");
}

#[test]
fn invalid_edit_resets_input() {
    let (mut section, mut store, mut env) = setup("#daterange=1800,1900");
    section.render_pass(&mut store, &mut env);

    type_into(&mut section, Bound::End, "not a year");
    section.change(&mut store, &mut env);
    assert_eq!(section.value(Bound::End), "2025");
    assert!(!section.input(Bound::End).dirty);

    type_into(&mut section, Bound::Start, "-4001");
    section.change(&mut store, &mut env);
    assert_eq!(section.value(Bound::Start), "-4000");
    assert_eq!(store.date_range(), Some(range(-4000, 2025)));
}

#[test]
fn steps_commit_and_stop_at_limits() {
    let (mut section, mut store, mut env) = setup("#daterange=-4000,2025");
    section.render_pass(&mut store, &mut env);
    let rev = store.revision();

    assert!(!section.increment(Bound::End, &mut store, &mut env));
    assert!(!section.decrement(Bound::Start, &mut store, &mut env));
    assert_eq!(store.revision(), rev, "no-op steps must not commit");

    assert!(section.increment(Bound::Start, &mut store, &mut env));
    assert!(section.decrement(Bound::End, &mut store, &mut env));
    assert_eq!(store.date_range(), Some(range(-3999, 2024)));
    assert_eq!(env.hash(), "#daterange=-3999,2024");
    assert_eq!(store.revision(), rev + 2);
}

#[test]
fn increment_past_end_drags_end() {
    let (mut section, mut store, mut env) = setup("#daterange=1900,1900");
    section.render_pass(&mut store, &mut env);
    assert!(section.increment(Bound::Start, &mut store, &mut env));
    assert_eq!(store.date_range(), Some(range(1901, 1901)));
}

#[test]
fn cleared_store_drops_hash_key() {
    let (mut section, mut store, mut env) = setup("#map=1/2/3&daterange=1800,1900");
    section.render_pass(&mut store, &mut env);

    store.clear_date_range();
    section.sync_url(&store, &mut env);
    assert_eq!(env.hash(), "#map=1/2/3");
}

#[test]
fn test_harness_leaves_hash_alone() {
    let mut section = DateRangeSection::new(BOUNDS);
    let mut store = FeatureStore::new();
    let mut env = MemoryLocation::new("#daterange=9999,10000").with_test_harness(true);

    section.render_pass(&mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(-4000, 2025)));
    assert_eq!(env.hash(), "#daterange=9999,10000");

    type_into(&mut section, Bound::Start, "1800");
    section.change(&mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(1800, 2025)));
    assert_eq!(env.hash(), "#daterange=9999,10000");
}

#[test]
fn commit_keeps_reserved_characters_in_other_params() {
    let (mut section, mut store, mut env) =
        setup("#comment=a%26b%3Dc&daterange=1800,1900&note=x+y");
    section.render_pass(&mut store, &mut env);
    assert!(section.increment(Bound::Start, &mut store, &mut env));

    let params = url_hash::parse(&env.hash());
    assert_eq!(params["comment"], "a&b=c");
    assert_eq!(params["note"], "x+y");
    assert_eq!(params[DATERANGE_PARAM], "1801,1900");
    assert_eq!(params.len(), 3);
}

#[test]
fn dispatch_routes_each_action() {
    let (mut section, mut store, mut env) = setup("#daterange=1800,1900");
    section.render_pass(&mut store, &mut env);

    type_into(&mut section, Bound::End, "1950");
    section.dispatch(Bound::End, StepAction::Changed, &mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(1800, 1950)));
    assert!(!section.input(Bound::End).dirty);

    section.dispatch(Bound::Start, StepAction::Increment, &mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(1801, 1950)));

    section.dispatch(Bound::End, StepAction::Decrement, &mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(1801, 1949)));
    assert_eq!(env.hash(), "#daterange=1801,1949");
    assert_eq!(store.revision(), 4);
}

#[test]
fn dispatch_at_limit_does_not_commit() {
    let (mut section, mut store, mut env) = setup("#daterange=-4000,2025");
    section.render_pass(&mut store, &mut env);
    section.dispatch(Bound::Start, StepAction::Decrement, &mut store, &mut env);
    section.dispatch(Bound::End, StepAction::Increment, &mut store, &mut env);
    assert_eq!(store.revision(), 1);
}

#[test]
fn production_bounds_use_current_year() {
    let section = DateRangeSection::new(YearBounds::current());
    assert!(!section.section.is_expanded());
    assert_eq!(section.value(Bound::Start), MIN_YEAR.to_string());
    assert_eq!(section.value(Bound::End), MAX_YEAR.to_string());
}

fn draw_frame(ctx: &egui::Context, section: &mut DateRangeSection, store: &mut FeatureStore, env: &mut MemoryLocation) {
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| section.show(ui, store, env));
    });
}

#[test]
fn first_frame_commits_even_when_collapsed() {
    let ctx = egui::Context::default();
    let (mut section, mut store, mut env) = setup_drawn("first_frame", "#daterange=1500,1600");
    assert!(!section.section.is_expanded());

    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(1500, 1600)));
    assert_eq!(store.revision(), 1);

    // later frames without interaction do not commit again
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.revision(), 1);
}

#[test]
fn rerender_request_reruns_initialization() {
    let ctx = egui::Context::default();
    let (mut section, mut store, mut env) = setup_drawn("rerender", "#daterange=1500,1600");
    draw_frame(&ctx, &mut section, &mut store, &mut env);

    env.replace_hash("#daterange=1700,1750".to_string());
    section.rerender();
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.date_range(), Some(range(1700, 1750)));
    assert_eq!(section.value(Bound::Start), "1700");
}

#[test]
fn expanding_reruns_initialization() {
    let ctx = egui::Context::default();
    let (mut section, mut store, mut env) = setup_drawn("expand", "#daterange=1500,1600");
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.revision(), 1);

    env.replace_hash("#daterange=1700,1750".to_string());
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.revision(), 1, "collapsed section ignores the new hash");

    section.section.set_expanded(true);
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.revision(), 2);
    assert_eq!(store.date_range(), Some(range(1700, 1750)));
    assert_eq!(section.value(Bound::End), "1750");

    // staying expanded does not commit again
    draw_frame(&ctx, &mut section, &mut store, &mut env);
    assert_eq!(store.revision(), 2);
}
