use approx::assert_relative_eq;
use hypertree::partitioning::SpatialSubdivisionTree;
use hypertree::query::{Ray, ShapeView};
use hypertree::shape::{ParallelotopeOrtho, ParallelotopeWrapper};
use na::{Point3, Vector3};

type Cube = ParallelotopeWrapper<f64, 3, ParallelotopeOrtho<f64, 3>>;

fn unit_cube() -> Cube {
    ParallelotopeWrapper::new(
        ParallelotopeOrtho::new(Point3::new(-0.5, -0.5, -0.5), Vector3::repeat(1.0)).unwrap(),
    )
}

/// Traces `ray` and returns the parameter of the accepted hit, if any.
fn trace(
    tree: &SpatialSubdivisionTree<f64, 3>,
    objects: &[Cube],
    ray: &Ray<f64, 3>,
) -> Option<f64> {
    let root_t = tree.intersect_root(ray)?;
    let mut hit = None;

    let found = tree.trace_ray(ray, root_t, |indices| {
        let t = indices
            .iter()
            .filter_map(|i| objects[*i as usize].intersect(ray))
            .min_by(|a, b| a.total_cmp(b))?;
        hit = Some(t);
        Some(ray.point_at(t))
    });

    if found {
        hit
    } else {
        None
    }
}

#[test]
fn unit_cube_hit_and_miss() {
    let objects = [unit_cube()];
    let mut tree = SpatialSubdivisionTree::<f64, 3>::new(2, 1);
    tree.decompose_objects(&objects, 1, &()).unwrap();
    tree.assert_well_formed();

    let hit = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(trace(&tree, &objects, &hit).unwrap(), 4.5, epsilon = 1.0e-9);

    let miss = Ray::new(Point3::new(-5.0, 5.0, 5.0), Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(tree.intersect_root(&miss), None);
    assert_eq!(trace(&tree, &objects, &miss), None);
}

#[test]
fn hit_from_inside_the_tree() {
    // A second cube makes the tree subdivide.
    let far_cube = ParallelotopeWrapper::new(
        ParallelotopeOrtho::new(Point3::new(3.0, 3.0, 3.0), Vector3::repeat(1.0)).unwrap(),
    );
    let objects = [unit_cube(), far_cube];
    let mut tree = SpatialSubdivisionTree::<f64, 3>::new(4, 1);
    tree.decompose_objects(&objects, 2, &()).unwrap();
    tree.assert_well_formed();
    assert!(tree.box_count() > 1);

    // Starting between the cubes and going toward the far one.
    let ray = Ray::new(Point3::new(1.5, 3.5, 3.5), Vector3::new(2.0, 0.0, 0.0));
    assert_relative_eq!(trace(&tree, &objects, &ray).unwrap(), 0.75, epsilon = 1.0e-9);

    // Going toward the first cube.
    let ray = Ray::new(Point3::new(1.5, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
    assert_relative_eq!(trace(&tree, &objects, &ray).unwrap(), 1.0, epsilon = 1.0e-9);

    // Between the cubes, toward nothing.
    let ray = Ray::new(Point3::new(1.5, 3.5, 0.0), Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(trace(&tree, &objects, &ray), None);
}

#[test]
fn degenerate_direction_never_hits() {
    let objects = [unit_cube()];
    let mut tree = SpatialSubdivisionTree::<f64, 3>::new(2, 1);
    tree.decompose_objects(&objects, 1, &()).unwrap();

    let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::zeros());
    assert!(!tree.trace_ray(&ray, 0.0, |_| Some(Point3::origin())));
}
