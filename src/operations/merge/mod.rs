pub mod auto;

use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{Point3, TOLERANCE};
use crate::network::{Embankment, NameSequence};

/// Which endpoint of a line participates in a pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnd {
    Start,
    End,
}

/// The four candidate endpoint pairings, in tie-break priority order.
const PAIRINGS: [(LineEnd, LineEnd); 4] = [
    (LineEnd::Start, LineEnd::Start),
    (LineEnd::Start, LineEnd::End),
    (LineEnd::End, LineEnd::Start),
    (LineEnd::End, LineEnd::End),
];

/// Merges two embankment lines into one, if the join is unambiguous.
///
/// The nearest pair among the four endpoint combinations decides where the
/// lines join (ties fall back to the fixed order start–start, start–end,
/// end–start, end–end); both lines are reoriented so the matched endpoints
/// become adjacent. The joined extents are then classified by their true
/// interior crossings:
///
/// - none: the reoriented points are concatenated as-is (no snapping);
/// - exactly one: both lines are truncated at the crossing, which appears
///   once in the result;
/// - two or more: the merge is ambiguous and `None` is returned.
///
/// The inputs are never modified; a successful merge yields a fresh
/// embankment named from `names`.
#[must_use]
pub fn merge_lines(
    a: &Embankment,
    b: &Embankment,
    names: &mut NameSequence,
) -> Option<Embankment> {
    let mut best = PAIRINGS[0];
    let mut best_distance = f64::INFINITY;
    for pairing in PAIRINGS {
        let pa = endpoint(a, pairing.0);
        let pb = endpoint(b, pairing.1);
        let distance = ((pa.x - pb.x).powi(2) + (pa.y - pb.y).powi(2)).sqrt();
        if distance < best_distance {
            best_distance = distance;
            best = pairing;
        }
    }

    // Reorient so A ends at the matched endpoint and B starts at it.
    let mut a_points = a.points().to_vec();
    if best.0 == LineEnd::Start {
        a_points.reverse();
    }
    let mut b_points = b.points().to_vec();
    if best.1 == LineEnd::End {
        b_points.reverse();
    }

    let crossings = interior_crossings(&a_points, &b_points);
    match crossings.as_slice() {
        [] => {
            a_points.extend(b_points);
            Embankment::new(names.next_merged(), a_points).ok()
        }
        [(crossing, seg_a, seg_b)] => {
            let mut merged = a_points[..=*seg_a].to_vec();
            merged.push(*crossing);
            merged.extend_from_slice(&b_points[seg_b + 1..]);
            Embankment::new(names.next_merged(), merged).ok()
        }
        _ => None,
    }
}

fn endpoint(line: &Embankment, which: LineEnd) -> Point3 {
    match which {
        LineEnd::Start => line.start(),
        LineEnd::End => line.end(),
    }
}

/// True crossings between the reoriented lines, excluding the touch at the
/// matched joint itself and collapsing hits that land on a shared vertex.
///
/// Returns `(point, segment index in a, segment index in b)` per crossing.
fn interior_crossings(
    a_points: &[Point3],
    b_points: &[Point3],
) -> Vec<(Point3, usize, usize)> {
    let eps = TOLERANCE * 100.0;
    let last_a = a_points.len() - 2;
    let mut found: Vec<(Point3, usize, usize)> = Vec::new();

    for i in 0..a_points.len() - 1 {
        for j in 0..b_points.len() - 1 {
            let Some((pt, t, u)) = segment_segment_intersect_2d(
                &a_points[i],
                &a_points[i + 1],
                &b_points[j],
                &b_points[j + 1],
            ) else {
                continue;
            };
            // The matched endpoints touching is the joint, not a crossing.
            if i == last_a && j == 0 && t > 1.0 - eps && u < eps {
                continue;
            }
            // A crossing on a shared vertex is reported by both adjacent
            // segment pairs; count it once.
            let seen = found
                .iter()
                .any(|(q, _, _)| (q.x - pt.x).powi(2) + (q.y - pt.y).powi(2) < eps * eps);
            if !seen {
                found.push((pt, i, j));
            }
        }
    }
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(name: &str, points: &[(f64, f64)]) -> Embankment {
        let pts: Vec<Point3> = points
            .iter()
            .map(|&(x, y)| Point3::new(x, y, 0.0))
            .collect();
        Embankment::new(name, pts).unwrap()
    }

    #[test]
    fn disjoint_lines_concatenate_at_nearest_endpoints() {
        // A ends near B's start; no crossing anywhere.
        let a = line("Embankment01", &[(0.0, 0.0), (10.0, 0.0)]);
        let b = line("Embankment02", &[(11.0, 1.0), (20.0, 1.0)]);
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        assert_eq!(merged.name(), "MergedEmbankment01");
        assert_eq!(merged.points().len(), a.points().len() + b.points().len());
        // Joined in order: A forward, then B forward.
        assert!((merged.points()[1].x - 10.0).abs() < 1e-12);
        assert!((merged.points()[2].x - 11.0).abs() < 1e-12);
        // Inputs untouched.
        assert_eq!(a.points().len(), 2);
        assert_eq!(b.points().len(), 2);
    }

    #[test]
    fn far_endpoint_nearest_reverses_the_input() {
        // B's END is nearest to A's end, so B is walked backwards.
        let a = line("Embankment01", &[(0.0, 0.0), (10.0, 0.0)]);
        let b = line("Embankment02", &[(20.0, 1.0), (11.0, 1.0)]);
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        assert_eq!(merged.points().len(), 4);
        assert!((merged.points()[2].x - 11.0).abs() < 1e-12);
        assert!((merged.points()[3].x - 20.0).abs() < 1e-12);
    }

    #[test]
    fn single_crossing_truncates_both_lines() {
        // A horizontal, B vertical, crossing once at (90, 10).
        let a = line("Embankment01", &[(0.0, 10.0), (100.0, 10.0)]);
        let b = line("Embankment02", &[(90.0, 0.0), (90.0, 100.0)]);
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        let pts = merged.points();
        assert!(pts.len() < a.points().len() + b.points().len());
        assert_eq!(pts.len(), 3);
        assert!((pts[0].x).abs() < 1e-12 && (pts[0].y - 10.0).abs() < 1e-12);
        assert!((pts[1].x - 90.0).abs() < 1e-12 && (pts[1].y - 10.0).abs() < 1e-12);
        assert!((pts[2].x - 90.0).abs() < 1e-12 && (pts[2].y - 100.0).abs() < 1e-12);
        // The crossing appears exactly once.
        let hits = pts
            .iter()
            .filter(|p| (p.x - 90.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9)
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn crossing_keeps_multi_vertex_prefix_and_suffix() {
        let a = line(
            "Embankment01",
            &[(0.0, -10.0), (100.0, -10.0), (110.0, 0.0), (110.0, 100.0)],
        );
        let b = line("Embankment02", &[(100.0, 90.0), (200.0, 90.0)]);
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        let pts = merged.points();
        assert_eq!(pts.len(), 5);
        assert!((pts[3].x - 110.0).abs() < 1e-12 && (pts[3].y - 90.0).abs() < 1e-12);
        assert!((pts[4].x - 200.0).abs() < 1e-12);
    }

    #[test]
    fn two_crossings_return_none() {
        // B weaves across A twice: ambiguous.
        let a = line("Embankment01", &[(0.0, 0.0), (100.0, 0.0)]);
        let b = line(
            "Embankment02",
            &[(95.0, 5.0), (90.0, -5.0), (80.0, -5.0), (75.0, 5.0)],
        );
        let mut names = NameSequence::new();

        assert!(merge_lines(&a, &b, &mut names).is_none());
    }

    #[test]
    fn perfect_cross_tie_yields_three_points() {
        // All four endpoint distances are equal; the fixed pairing order
        // picks start–start and the single crossing yields 3 points.
        let a = line("Embankment01", &[(0.0, -10.0), (0.0, 10.0)]);
        let b = line("Embankment02", &[(-10.0, 0.0), (10.0, 0.0)]);
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        assert_eq!(merged.points().len(), 3);
        let mid = merged.points()[1];
        assert!(mid.x.abs() < 1e-12 && mid.y.abs() < 1e-12);
    }

    #[test]
    fn exact_touch_joins_without_duplicate_point() {
        // A's end coincides with B's start; the shared point appears once.
        let a = line("Embankment01", &[(0.0, 0.0), (10.0, 0.0)]);
        let b = line("Embankment02", &[(10.0, 0.0), (10.0, 10.0)]);
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        assert_eq!(merged.points().len(), 3);
    }

    #[test]
    fn merged_names_count_independently() {
        let mut names = NameSequence::new();
        let a = line("Embankment01", &[(0.0, 0.0), (10.0, 0.0)]);
        let b = line("Embankment02", &[(11.0, 0.5), (20.0, 0.5)]);
        let c = line("Embankment03", &[(21.0, 1.0), (30.0, 1.0)]);

        let first = merge_lines(&a, &b, &mut names).unwrap();
        assert_eq!(first.name(), "MergedEmbankment01");
        let second = merge_lines(&first, &c, &mut names).unwrap();
        assert_eq!(second.name(), "MergedEmbankment02");
        assert_eq!(second.points().len(), 6);
    }

    #[test]
    fn elevations_survive_the_merge() {
        let a = Embankment::new(
            "Embankment01",
            vec![Point3::new(0.0, 0.0, 5.0), Point3::new(10.0, 0.0, 6.0)],
        )
        .unwrap();
        let b = Embankment::new(
            "Embankment02",
            vec![Point3::new(11.0, 0.0, 7.0), Point3::new(20.0, 0.0, 8.0)],
        )
        .unwrap();
        let mut names = NameSequence::new();

        let merged = merge_lines(&a, &b, &mut names).unwrap();
        let zs: Vec<f64> = merged.points().iter().map(|p| p.z).collect();
        assert_eq!(zs, vec![5.0, 6.0, 7.0, 8.0]);
    }
}
