//! Tests for half-open box predicates and box arithmetic

#[cfg(test)]
mod tests {
    use chromarkov::color::bounds::BoundBox;
    use chromarkov::color::point::{Axis, Point};

    fn unit_box(x: i32, y: i32, z: i32, size: i32) -> BoundBox {
        BoundBox::new(Point::new(x, y, z), Point::new(size, size, size))
    }

    // Tests containment is inclusive at the lower corner and exclusive at the far edge
    // Verified by using <= for the far edge
    #[test]
    fn test_contains_half_open() {
        let b = unit_box(0, 0, 0, 3);
        assert!(b.contains(Point::new(0, 0, 0)));
        assert!(b.contains(Point::new(2, 2, 2)));
        assert!(!b.contains(Point::new(3, 0, 0)));
        assert!(!b.contains(Point::new(0, 3, 0)));
        assert!(!b.contains(Point::new(0, 0, 3)));
        assert!(!b.contains(Point::new(-1, 1, 1)));
    }

    // Tests that touching boxes intersect and separated boxes do not
    // Verified by treating a shared face as a gap
    #[test]
    fn test_intersects() {
        let a = unit_box(0, 0, 0, 2);
        let touching = unit_box(2, 0, 0, 2);
        let overlapping = unit_box(1, 1, 1, 2);
        let separated = unit_box(3, 0, 0, 2);
        let separated_z = unit_box(0, 0, 5, 2);

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(a.intersects(&overlapping));
        assert!(!a.intersects(&separated));
        assert!(!separated.intersects(&a));
        assert!(!a.intersects(&separated_z));
    }

    // Tests longest axis selection prefers X, then Y, then Z on ties
    // Verified by preferring the last maximal axis
    #[test]
    fn test_longest_axis_tie_break() {
        let origin = Point::default();
        assert_eq!(
            BoundBox::new(origin, Point::new(5, 5, 5)).longest_axis(),
            Axis::X
        );
        assert_eq!(
            BoundBox::new(origin, Point::new(1, 5, 5)).longest_axis(),
            Axis::Y
        );
        assert_eq!(
            BoundBox::new(origin, Point::new(1, 2, 5)).longest_axis(),
            Axis::Z
        );
        assert_eq!(
            BoundBox::new(origin, Point::new(5, 1, 5)).longest_axis(),
            Axis::X
        );
    }

    // Tests a cut yields complementary boxes covering the original
    // Verified by giving the upper box the full extent
    #[test]
    fn test_cut_produces_complementary_boxes() {
        let b = BoundBox::new(Point::new(2, 0, 0), Point::new(10, 4, 4));
        let (lower, upper) = b.cut(Axis::X, 6);

        assert_eq!(lower.pos, Point::new(2, 0, 0));
        assert_eq!(lower.dims, Point::new(4, 4, 4));
        assert_eq!(upper.pos, Point::new(6, 0, 0));
        assert_eq!(upper.dims, Point::new(6, 4, 4));
        assert_eq!(lower.end(Axis::X), upper.pos.x);
        assert_eq!(lower.volume() + upper.volume(), b.volume());
        assert_eq!(lower.hull(&upper), b);
    }

    // Tests the hull spans the outermost edges on every axis
    // Verified by taking the extent of the first box only
    #[test]
    fn test_hull() {
        let a = BoundBox::new(Point::new(0, 4, 0), Point::new(2, 2, 10));
        let b = BoundBox::new(Point::new(5, 0, 2), Point::new(3, 3, 2));
        let hull = a.hull(&b);

        assert_eq!(hull.pos, Point::new(0, 0, 0));
        assert_eq!(hull.dims, Point::new(8, 6, 10));
    }

    // Tests the color cube covers every 8-bit color
    // Verified by shrinking the cube extent
    #[test]
    fn test_color_cube() {
        let cube = BoundBox::color_cube();
        assert!(cube.contains(Point::new(0, 0, 0)));
        assert!(cube.contains(Point::new(255, 255, 255)));
        assert!(!cube.contains(Point::new(256, 0, 0)));
        assert_eq!(cube.volume(), 256 * 256 * 256);
    }
}
