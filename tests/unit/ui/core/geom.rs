use super::*;

#[test]
fn aabb_contains_is_inclusive_on_every_edge() {
    let b = Aabb::new(10, 20, 3, 2);
    assert!(b.contains(10, 20));
    assert!(b.contains(13, 22));
    assert!(b.contains(13, 20));
    assert!(b.contains(10, 22));
    assert!(b.contains(11, 21));

    assert!(!b.contains(9, 20));
    assert!(!b.contains(14, 20));
    assert!(!b.contains(10, 19));
    assert!(!b.contains(10, 23));
}

#[test]
fn aabb_corners_are_always_contained() {
    for b in [
        Aabb::new(0, 0, 0, 0),
        Aabb::new(-5, 7, 12, 1),
        Aabb::new(100, -40, 3, 90),
    ] {
        assert!(b.contains(b.x, b.y));
        assert!(b.contains(b.x + b.width, b.y + b.height));
    }
}

#[test]
fn degenerate_box_contains_only_its_point() {
    let b = Aabb::new(4, 4, 0, 0);
    assert!(b.contains(4, 4));
    assert!(!b.contains(5, 4));
    assert!(!b.contains(4, 3));
}

#[test]
fn expand_to_contain_interior_point_is_noop() {
    let mut b = Aabb::new(0, 0, 10, 10);
    b.expand_to_contain_point(3, 7);
    assert_eq!(b, Aabb::new(0, 0, 10, 10));
    b.expand_to_contain_point(10, 10);
    assert_eq!(b, Aabb::new(0, 0, 10, 10));
}

#[test]
fn expand_to_contain_point_below_left_moves_origin() {
    let mut b = Aabb::new(5, 5, 10, 10);
    b.expand_to_contain_point(2, 1);
    assert_eq!(b, Aabb::new(2, 1, 13, 14));
    assert!(b.contains(15, 15));
}

#[test]
fn expand_to_contain_point_above_right_grows_dimension_only() {
    let mut b = Aabb::new(5, 5, 10, 10);
    b.expand_to_contain_point(20, 30);
    assert_eq!(b, Aabb::new(5, 5, 15, 25));
}

#[test]
fn expand_to_contain_point_grows_one_axis_at_a_time() {
    let mut b = Aabb::new(0, 0, 4, 4);
    b.expand_to_contain_point(2, 9);
    assert_eq!(b, Aabb::new(0, 0, 4, 9));
}

#[test]
fn expand_to_contain_aabb_encloses_other_box() {
    let mut a = Aabb::new(0, 0, 2, 2);
    let other = Aabb::new(-3, 5, 4, 4);
    a.expand_to_contain_aabb(&other);
    assert_eq!(a, Aabb::new(-3, 0, 5, 9));
    for (x, y) in other.corners() {
        assert!(a.contains(x, y));
    }
}

#[test]
fn translate_returns_copy_and_leaves_source() {
    let a = Aabb::new(1, 2, 3, 4);
    let moved = a.translate(10, -2);
    assert_eq!(moved, Aabb::new(11, 0, 3, 4));
    assert_eq!(a, Aabb::new(1, 2, 3, 4));
}

#[test]
fn empty_collection_contains_nothing() {
    let c = AabbCollection::new();
    assert!(c.is_empty());
    assert!(!c.contains(0, 0));
    assert_eq!(c.bounds(), None);
}

#[test]
fn collection_contains_is_union_of_members() {
    let a = Aabb::new(0, 0, 4, 4);
    let b = Aabb::new(10, 10, 2, 2);
    let c = AabbCollection::from_regions([Region::from(a), Region::from(b)]);

    for x in -2..15 {
        for y in -2..15 {
            assert_eq!(c.contains(x, y), a.contains(x, y) || b.contains(x, y));
        }
    }
}

#[test]
fn append_flattens_nested_collections_without_mutating_receiver() {
    let base = AabbCollection::from(Aabb::new(0, 0, 1, 1));
    let nested = AabbCollection::from_regions([
        Region::from(Aabb::new(5, 5, 1, 1)),
        Region::from(Aabb::new(9, 9, 1, 1)),
    ]);

    let joined = base.append([
        Region::from(&nested),
        Region::from(Aabb::new(20, 20, 1, 1)),
    ]);

    assert_eq!(base.len(), 1);
    assert_eq!(joined.len(), 4);
    let order: Vec<_> = joined.iter().map(|b| b.x).collect();
    assert_eq!(order, vec![0, 5, 9, 20]);
}

#[test]
fn collection_translate_moves_every_member() {
    let c = AabbCollection::from(Aabb::new(0, 0, 2, 2)).with_box(Aabb::new(5, 0, 2, 2));
    let moved = c.translate(3, 4);
    assert!(moved.contains(3, 4));
    assert!(moved.contains(10, 6));
    assert!(!moved.contains(0, 0));
    assert!(c.contains(0, 0));
}

#[test]
fn bounds_encloses_disjoint_members() {
    let c = AabbCollection::from(Aabb::new(0, 0, 2, 2)).with_box(Aabb::new(8, 6, 2, 2));
    assert_eq!(c.bounds(), Some(Aabb::new(0, 0, 10, 8)));
}

#[test]
fn boxes_sharing_an_edge_intersect() {
    let a = Aabb::new(0, 0, 4, 3);
    assert!(a.intersects(&Aabb::new(0, 3, 4, 3)));
    assert!(a.intersects(&Aabb::new(1, 1, 1, 1)));
    assert!(!a.intersects(&Aabb::new(0, 4, 4, 3)));
    assert!(!a.intersects(&Aabb::new(5, 0, 1, 1)));

    let c = AabbCollection::from(Aabb::new(10, 0, 2, 2)).with_box(a);
    assert!(c.intersects(&Aabb::new(4, 3, 1, 1)));
    assert!(!AabbCollection::new().intersects(&a));
}
