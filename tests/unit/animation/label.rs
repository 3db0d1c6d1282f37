use super::*;

fn r(at: f64, end: f64) -> TimeRange {
    TimeRange::new(at, end - at).unwrap()
}

#[test]
fn overlapping_ranges_stack_and_reuse_rows() {
    let rows = assign_rows(&[r(0.0, 5.0), r(3.0, 8.0), r(6.0, 10.0)]);
    assert_eq!(rows, vec![0, 1, 0]);
}

#[test]
fn freed_lower_row_is_reused_under_a_long_range() {
    let rows = assign_rows(&[r(0.0, 3.0), r(1.0, 10.0), r(4.0, 5.0)]);
    assert_eq!(rows, vec![0, 1, 0]);
}

#[test]
fn touching_ranges_share_a_row() {
    assert_eq!(assign_rows(&[r(0.0, 1.0), r(1.0, 2.0)]), vec![0, 0]);
}

#[test]
fn rows_follow_start_order_not_input_order() {
    let rows = assign_rows(&[r(6.0, 10.0), r(0.0, 5.0), r(3.0, 8.0)]);
    assert_eq!(rows, vec![0, 0, 1]);
}

#[test]
fn trailing_free_rows_are_dropped() {
    // Three stacked rows; at t=10 all are free, so the next two ranges reuse rows 0 then 1.
    let rows = assign_rows(&[
        r(0.0, 9.0),
        r(1.0, 9.0),
        r(2.0, 9.0),
        r(10.0, 12.0),
        r(11.0, 12.0),
    ]);
    assert_eq!(rows, vec![0, 1, 2, 0, 1]);
}

#[test]
fn no_two_ranges_in_a_row_overlap() {
    let ranges = [
        r(0.0, 2.0),
        r(0.5, 1.0),
        r(0.7, 3.0),
        r(1.0, 1.5),
        r(2.0, 4.0),
        r(2.5, 2.6),
    ];
    let rows = assign_rows(&ranges);
    for i in 0..ranges.len() {
        for j in i + 1..ranges.len() {
            if rows[i] == rows[j] {
                assert!(!ranges[i].overlaps(&ranges[j]), "{i} and {j} collide");
            }
        }
    }
}

#[test]
fn navigation_uses_strict_neighbours() {
    let starts = [0.0, 1.0, 2.5, 4.0];
    assert_eq!(prev_start(&starts, 2.5), Some(1.0));
    assert_eq!(prev_start(&starts, 2.6), Some(2.5));
    assert_eq!(prev_start(&starts, 0.0), None);
    assert_eq!(next_start(&starts, 2.5), Some(4.0));
    assert_eq!(next_start(&starts, 4.0), None);
}

#[test]
fn progress_round_trips_at_preview_rate() {
    assert_eq!(time_to_progress(1.5, 60), 90);
    assert_eq!(progress_to_time(90, 60), 1.5);
    assert_eq!(time_to_progress(-1.0, 60), 0);
}

#[test]
fn label_colors_are_distinct() {
    assert_ne!(LabelColor::In.rgb(), LabelColor::Out.rgb());
}
