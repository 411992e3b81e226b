use super::FailingMeasurer;
use crate::catalog::{balanced_font, grow_to_fit};
use crate::measure::DeterministicTextMeasurer;

#[test]
fn grows_in_half_steps_until_the_region_is_filled() {
    // 5 chars at factor 1.0: length = 5 × font. 100 units fill at font 20.
    let measurer = DeterministicTextMeasurer::new(1.0);

    let font = grow_to_fit(&measurer, "abcde", 10.0, 10.0, 40.0, 100.0);

    assert_eq!(font, 20.0);
}

#[test]
fn backs_off_half_a_step_on_overshoot() {
    // 3 chars at factor 1.0: 50 units are exceeded at font 17, reached at 16.5.
    let measurer = DeterministicTextMeasurer::new(1.0);

    let font = grow_to_fit(&measurer, "abc", 10.0, 10.0, 40.0, 50.0);

    assert_eq!(font, 16.5);
}

#[test]
fn never_exceeds_the_font_ceiling() {
    let measurer = DeterministicTextMeasurer::new(0.1);

    let font = grow_to_fit(&measurer, "ab", 10.0, 10.0, 14.0, 1_000.0);

    assert_eq!(font, 14.0);
}

#[test]
fn overflowing_stored_text_never_dips_below_the_floor() {
    // 20 chars at factor 1.0 already exceed 50 units at the starting size,
    // so the overshoot back-off would land below the floor without the clamp.
    let measurer = DeterministicTextMeasurer::new(1.0);

    let font = grow_to_fit(&measurer, "twenty chars of text", 10.0, 10.0, 40.0, 50.0);

    assert_eq!(font, 10.0);
}

#[test]
fn a_failed_probe_stops_growth() {
    let font = grow_to_fit(&FailingMeasurer, "abcde", 12.0, 10.0, 40.0, 100.0);

    assert_eq!(font, 12.0);
}

#[test]
fn balanced_font_returns_the_minimum_only_on_disagreement() {
    assert_eq!(balanced_font(&[18.0, 30.0, 24.0]), Some(18.0));
    assert_eq!(balanced_font(&[30.0, 18.0]), Some(18.0));
    assert_eq!(balanced_font(&[20.0, 20.0, 20.0]), None);
    assert_eq!(balanced_font(&[20.0]), None);
    assert_eq!(balanced_font(&[]), None);
}
