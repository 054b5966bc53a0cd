//! Axis-aligned box geometry
//!
//! Boxes are `pos` plus `size` on the integer grid. Both tests treat the
//! boxes as closed intervals, so boxes that share an edge touch.

use glam::IVec2;

/// Closed-interval overlap of `[min_a, max_a]` and `[min_b, max_b]`
#[inline]
fn spans_overlap(min_a: i32, max_a: i32, min_b: i32, max_b: i32) -> bool {
    min_a <= max_b && min_b <= max_a
}

/// Check whether two boxes intersect on both axes (touching counts)
pub fn overlaps(pos_a: IVec2, size_a: IVec2, pos_b: IVec2, size_b: IVec2) -> bool {
    let max_a = pos_a + size_a;
    let max_b = pos_b + size_b;
    spans_overlap(pos_a.x, max_a.x, pos_b.x, max_b.x)
        && spans_overlap(pos_a.y, max_a.y, pos_b.y, max_b.y)
}

/// Signed travel of B along one axis until it sits `margin` away from A.
///
/// Zero when the spans already overlap; that means "no safe travel on this
/// axis", not "no contact".
#[inline]
fn axis_separation(min_a: i32, size_a: i32, min_b: i32, size_b: i32, margin: i32) -> i32 {
    let max_a = min_a + size_a;
    let max_b = min_b + size_b;
    if max_b < min_a {
        min_a - margin - size_b - min_b
    } else if min_b > max_a {
        max_a + margin - min_b
    } else {
        0
    }
}

/// How far box B can move on each axis before touching box A, keeping a gap
/// of `margin`
pub fn separation_with_margin(
    pos_a: IVec2,
    size_a: IVec2,
    pos_b: IVec2,
    size_b: IVec2,
    margin: i32,
) -> IVec2 {
    IVec2::new(
        axis_separation(pos_a.x, size_a.x, pos_b.x, size_b.x, margin),
        axis_separation(pos_a.y, size_a.y, pos_b.y, size_b.y, margin),
    )
}

/// How far box B can move on each axis before first touching box A
///
/// This is the tunneling guard: momentum is clamped to it before being
/// applied, so a body faster than a tile cannot skip over one.
#[inline]
pub fn minimal_separation(pos_a: IVec2, size_a: IVec2, pos_b: IVec2, size_b: IVec2) -> IVec2 {
    separation_with_margin(pos_a, size_a, pos_b, size_b, 0)
}

/// Shrink a box by `inset` on every side
#[inline]
pub fn inset_box(pos: IVec2, size: IVec2, inset: i32) -> (IVec2, IVec2) {
    (pos + IVec2::splat(inset), size - IVec2::splat(2 * inset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TILE: IVec2 = IVec2::new(40, 40);

    #[test]
    fn test_touching_edges_overlap() {
        assert!(overlaps(IVec2::ZERO, TILE, IVec2::new(40, 0), TILE));
        assert!(overlaps(IVec2::ZERO, TILE, IVec2::new(40, 40), TILE));
        assert!(!overlaps(IVec2::ZERO, TILE, IVec2::new(41, 0), TILE));
        assert!(!overlaps(IVec2::ZERO, TILE, IVec2::new(0, -41), TILE));
    }

    #[test]
    fn test_contained_box_overlaps() {
        assert!(overlaps(IVec2::ZERO, TILE, IVec2::new(10, 10), IVec2::new(5, 5)));
        assert!(overlaps(IVec2::new(10, 10), IVec2::new(5, 5), IVec2::ZERO, TILE));
    }

    #[test]
    fn test_minimal_separation_before_and_after() {
        let solid = IVec2::new(100, 100);
        // Mover left of the solid with a 10px gap
        let d = minimal_separation(solid, TILE, IVec2::new(50, 100), TILE);
        assert_eq!(d, IVec2::new(10, 0));
        // Mover right of the solid with a 7px gap
        let d = minimal_separation(solid, TILE, IVec2::new(147, 100), TILE);
        assert_eq!(d, IVec2::new(-7, 0));
        // Mover above with a 3px gap
        let d = minimal_separation(solid, TILE, IVec2::new(100, 57), TILE);
        assert_eq!(d, IVec2::new(0, 3));
    }

    #[test]
    fn test_minimal_separation_adjacent_is_zero() {
        let d = minimal_separation(IVec2::new(40, 0), TILE, IVec2::ZERO, TILE);
        assert_eq!(d, IVec2::ZERO);
    }

    #[test]
    fn test_margin_keeps_gap() {
        let d = separation_with_margin(IVec2::new(100, 0), TILE, IVec2::new(50, 0), TILE, 2);
        assert_eq!(d.x, 8);
        let d = separation_with_margin(IVec2::new(100, 0), TILE, IVec2::new(150, 0), TILE, 2);
        assert_eq!(d.x, -8);
    }

    #[test]
    fn test_inset_box() {
        let (pos, size) = inset_box(IVec2::new(40, 80), TILE, 3);
        assert_eq!(pos, IVec2::new(43, 83));
        assert_eq!(size, IVec2::new(34, 34));
    }

    fn coord() -> impl Strategy<Value = i32> {
        -500i32..500
    }

    fn extent() -> impl Strategy<Value = i32> {
        0i32..120
    }

    proptest! {
        #[test]
        fn prop_overlaps_is_symmetric(
            ax in coord(), ay in coord(), aw in extent(), ah in extent(),
            bx in coord(), by in coord(), bw in extent(), bh in extent(),
        ) {
            let (pa, sa) = (IVec2::new(ax, ay), IVec2::new(aw, ah));
            let (pb, sb) = (IVec2::new(bx, by), IVec2::new(bw, bh));
            prop_assert_eq!(overlaps(pa, sa, pb, sb), overlaps(pb, sb, pa, sa));
        }

        #[test]
        fn prop_separation_zero_iff_spans_overlap(
            ax in coord(), aw in extent(), bx in coord(), bw in extent(),
        ) {
            let d = minimal_separation(IVec2::new(ax, 0), IVec2::new(aw, 1), IVec2::new(bx, 0), IVec2::new(bw, 1));
            let spans = spans_overlap(ax, ax + aw, bx, bx + bw);
            prop_assert_eq!(d.x == 0, spans);
        }

        #[test]
        fn prop_separation_lands_on_contact(
            ax in coord(), aw in extent(), bx in coord(), bw in extent(),
        ) {
            let d = minimal_separation(IVec2::new(ax, 0), IVec2::new(aw, 1), IVec2::new(bx, 0), IVec2::new(bw, 1));
            let moved = bx + d.x;
            // After travelling the separation the spans touch exactly
            prop_assert!(spans_overlap(ax, ax + aw, moved, moved + bw));
            if d.x != 0 {
                prop_assert!(moved + bw == ax || moved == ax + aw);
            }
        }
    }
}
