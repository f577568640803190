use hypertree::partitioning::{ProgressCounter, SpatialSubdivisionTree};
use hypertree::query::Ray;
use hypertree::shape::{ParallelotopeOrtho, ParallelotopeShape, ParallelotopeWrapper};
use na::{Point2, Point3, Vector2, Vector3};

type Square = ParallelotopeWrapper<f32, 2, ParallelotopeOrtho<f32, 2>>;

fn make_squares(count: usize, rng: &mut oorandom::Rand32) -> Vec<Square> {
    (0..count)
        .map(|_| {
            let org = Point2::new(rng.rand_float() * 10.0, rng.rand_float() * 10.0);
            let sizes = Vector2::new(0.1 + rng.rand_float(), 0.1 + rng.rand_float());
            ParallelotopeWrapper::new(ParallelotopeOrtho::new(org, sizes).unwrap())
        })
        .collect()
}

#[test]
fn every_point_of_the_root_is_in_a_leaf() {
    let mut rng = oorandom::Rand32::new(42);
    let squares = make_squares(200, &mut rng);

    let mut tree = SpatialSubdivisionTree::<f32, 2>::new(7, 2);
    tree.decompose_objects(&squares, 4, &()).unwrap();
    tree.assert_well_formed();

    let root = tree.root().unwrap().parallelotope().clone();
    let sizes = *root.sizes();

    for _ in 0..2000 {
        let offset = Vector2::new(rng.rand_float() * sizes.x, rng.rand_float() * sizes.y);
        let point = root.org() + offset;
        let leaf = tree.find_leaf(&point).unwrap();
        assert!(leaf.is_leaf());
        assert!(leaf.parallelotope().inside(&point));
    }

    // Corners of the root are inside too.
    assert!(tree.find_leaf(&root.org()).is_some());
    assert!(tree.find_leaf(&root.max()).is_some());

    // Points outside the root are in no leaf.
    assert!(tree.find_leaf(&(root.org() - Vector2::new(0.01, 0.0))).is_none());
    assert!(tree.find_leaf(&(root.max() + Vector2::new(0.0, 0.01))).is_none());
}

#[test]
fn root_encloses_the_objects_with_a_margin() {
    let cubes: Vec<_> = [
        (Point3::new(-2.0, 0.0, 1.0), 1.0),
        (Point3::new(3.0, 4.0, -1.0), 0.5),
    ]
    .iter()
    .map(|(org, size)| {
        ParallelotopeWrapper::new(ParallelotopeOrtho::new(*org, Vector3::repeat(*size)).unwrap())
    })
    .collect();

    let progress = ProgressCounter::new();
    let mut tree = SpatialSubdivisionTree::<f64, 3>::new(3, 1);
    tree.decompose_objects(&cubes, 2, &progress).unwrap();

    let distance = tree.distance_from_facet();
    assert!(distance > 0.0);
    // The largest absolute coordinate is 4.5.
    approx::assert_relative_eq!(distance, 4.5 * 10.0 * f64::EPSILON);

    let root = tree.root().unwrap().parallelotope();
    let margin = Vector3::repeat(distance);
    approx::assert_relative_eq!(root.org(), Point3::new(-2.0, 0.0, -1.0) - margin);
    approx::assert_relative_eq!(root.max(), Point3::new(3.5, 4.5, 2.0) + margin);

    let (done, total) = progress.get();
    assert_eq!(done, tree.box_count());
    assert_eq!(total, tree.box_count());

    // A ray along a facet of the objects' bounds is still inside the root.
    let ray = Ray::new(Point3::new(-10.0, 0.0, -1.0), Vector3::x());
    assert!(tree.intersect_root(&ray).is_some());
}
