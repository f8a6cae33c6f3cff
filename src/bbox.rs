// Copyright 2025 Lars Brubaker
// License: MIT
//
// Axis-aligned boxes over sorted point indices.
//
// Points are sorted lexicographically before any box is built, so the index
// range [imin, imax] doubles as an x-range; only y needs real coordinates.

use crate::geom::{Point2, Real};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BBox {
    pub imin: u32,
    pub imax: u32,
    pub ymin: Real,
    pub ymax: Real,
}

impl BBox {
    /// Box of the segment between point indices i and j.
    pub fn new(points: &[Point2], i: u32, j: u32) -> Self {
        let (imin, imax) = if i <= j { (i, j) } else { (j, i) };
        let y1 = points[imin as usize].y;
        let y2 = points[imax as usize].y;
        BBox {
            imin,
            imax,
            ymin: y1.min(y2),
            ymax: y1.max(y2),
        }
    }

    pub fn contains_point(&self, points: &[Point2], i: u32) -> bool {
        if i < self.imin || i > self.imax {
            return false;
        }
        let y = points[i as usize].y;
        self.ymin <= y && y <= self.ymax
    }

    pub fn overlaps(&self, other: &BBox) -> bool {
        self.imax >= other.imin
            && self.imin <= other.imax
            && self.ymax >= other.ymin
            && self.ymin <= other.ymax
    }

    /// Grow the box so it also covers point i.
    pub fn extend(&mut self, points: &[Point2], i: u32) {
        if i < self.imin {
            self.imin = i;
        } else if i > self.imax {
            self.imax = i;
        }
        let y = points[i as usize].y;
        if y < self.ymin {
            self.ymin = y;
        } else if y > self.ymax {
            self.ymax = y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_points() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, -1.0),
            Point2::new(3.0, 3.0),
        ]
    }

    #[test]
    fn new_orders_indices() {
        let pts = sorted_points();
        let bb = BBox::new(&pts, 3, 1);
        assert_eq!((bb.imin, bb.imax), (1, 3));
        assert_eq!((bb.ymin, bb.ymax), (-1.0, 2.0));
    }

    #[test]
    fn contains_point_uses_index_and_y() {
        let pts = sorted_points();
        let bb = BBox::new(&pts, 0, 4);
        assert!(bb.contains_point(&pts, 2));
        assert!(!bb.contains_point(&pts, 3));
        let narrow = BBox::new(&pts, 1, 2);
        assert!(!narrow.contains_point(&pts, 4));
        let flat = BBox::new(&pts, 0, 2);
        assert!(!flat.contains_point(&pts, 1));
    }

    #[test]
    fn overlap_is_symmetric() {
        let pts = sorted_points();
        let a = BBox::new(&pts, 0, 2);
        let b = BBox::new(&pts, 2, 4);
        let c = BBox::new(&pts, 3, 4);
        assert!(a.overlaps(&b) && b.overlaps(&a));
        assert!(!a.overlaps(&c) && !c.overlaps(&a));
    }

    #[test]
    fn extend_covers_new_point() {
        let pts = sorted_points();
        let mut bb = BBox::new(&pts, 1, 2);
        bb.extend(&pts, 4);
        assert_eq!(bb.imax, 4);
        assert_eq!(bb.ymax, 3.0);
        assert!(bb.contains_point(&pts, 4));
    }
}
