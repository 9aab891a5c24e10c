// Host-side tests for the circular navigation cursor.

use jukebox_core::{NavCursor, NAV_MAX, NAV_MIN};

#[test]
fn step_forward_and_back() {
    let mut nav = NavCursor::new(50);
    assert_eq!(nav.step(1), 51);
    assert_eq!(nav.step(-1), 50);
    assert_eq!(nav.current(), 50);
}

#[test]
fn wraps_at_both_ends() {
    // Property 3: stepping from 100 by +1 yields 1; from 1 by -1 yields 100.
    let mut nav = NavCursor::new(NAV_MAX);
    assert_eq!(nav.step(1), NAV_MIN);

    let mut nav = NavCursor::new(NAV_MIN);
    assert_eq!(nav.step(-1), NAV_MAX);
}

#[test]
fn large_steps_snap_to_the_opposite_bound() {
    // The wrap is a snap, not modular arithmetic: overshooting either end
    // lands exactly on the other end.
    let mut nav = NavCursor::new(3);
    assert_eq!(nav.step(-10), NAV_MAX);

    let mut nav = NavCursor::new(98);
    assert_eq!(nav.step(7), NAV_MIN);
}

#[test]
fn any_step_sequence_stays_in_range() {
    let mut nav = NavCursor::new(1);
    let steps = [1, 1, -3, 50, 60, -1, -1, 7, 100, -200, 13];
    for s in steps {
        let v = nav.step(s);
        assert!(
            (NAV_MIN..=NAV_MAX).contains(&v),
            "cursor {v} escaped [{NAV_MIN}, {NAV_MAX}] after step {s}"
        );
    }
}

#[test]
fn out_of_range_start_snaps_to_first_frame() {
    // Corrupt persisted state (0, 101, garbage parse) starts over at 1.
    assert_eq!(NavCursor::new(0).current(), NAV_MIN);
    assert_eq!(NavCursor::new(101).current(), NAV_MIN);
    assert_eq!(NavCursor::new(u32::MAX).current(), NAV_MIN);
    assert_eq!(NavCursor::new(100).current(), 100);
    assert_eq!(NavCursor::default().current(), NAV_MIN);
}
