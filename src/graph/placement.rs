//! Placement of newly inserted children around their parent

use std::f64::consts::{PI, TAU};

/// Direction used when the parent has no edges at all (straight up on a
/// y-down canvas)
pub const DEFAULT_ANGLE: f64 = 1.5 * PI;

/// Bisector of the widest free angle between the given edge directions.
///
/// Angles are radians in `[0, 2π)`, measured from the parent towards the
/// other endpoint. Ties keep the gap that starts at the smaller angle.
pub fn widest_gap_bisector(angles: &[f64]) -> f64 {
    match angles {
        [] => DEFAULT_ANGLE,
        [only] => normalize(only + PI),
        _ => {
            let mut sorted = angles.iter().map(|a| normalize(*a)).collect::<Vec<_>>();
            sorted.sort_by(|a, b| a.total_cmp(b));

            let mut gap_start = sorted[sorted.len() - 1];
            let mut widest = sorted[0] + TAU - gap_start;

            for pair in sorted.windows(2) {
                let gap = pair[1] - pair[0];
                if gap > widest || (gap == widest && pair[0] < gap_start) {
                    widest = gap;
                    gap_start = pair[0];
                }
            }

            normalize(gap_start + widest / 2.0)
        }
    }
}

fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid may round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(radians: f64) -> f64 {
        (radians.to_degrees() * 1e6).round() / 1e6
    }

    #[test]
    fn test_no_edges_points_up() {
        assert_eq!(degrees(widest_gap_bisector(&[])), 270.0);
    }

    #[test]
    fn test_single_edge_points_away() {
        assert_eq!(degrees(widest_gap_bisector(&[0.0])), 180.0);
        assert_eq!(degrees(widest_gap_bisector(&[1.5 * PI])), 90.0);
    }

    #[test]
    fn test_three_edges_fill_largest_gap() {
        let angles = [0.0, PI / 2.0, PI];
        assert_eq!(degrees(widest_gap_bisector(&angles)), 270.0);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let angles = [PI, 0.0, PI / 2.0];
        assert_eq!(degrees(widest_gap_bisector(&angles)), 270.0);
    }

    #[test]
    fn test_gap_inside_the_circle() {
        // 10°, 20°, 200° -> widest gap is 20°..200°
        let angles = [10f64.to_radians(), 20f64.to_radians(), 200f64.to_radians()];
        assert_eq!(degrees(widest_gap_bisector(&angles)), 110.0);
    }

    #[test]
    fn test_tie_prefers_smallest_start() {
        // two opposite edges: both gaps are 180°
        let angles = [0.0, PI];
        assert_eq!(degrees(widest_gap_bisector(&angles)), 90.0);
    }
}
