use approx::assert_relative_eq;
use hypertree::partitioning::SpatialSubdivisionTree;
use hypertree::query::{Ray, ShapeView};
use hypertree::shape::parallelotope_algorithm::vertices;
use hypertree::shape::{Parallelotope, ParallelotopeOrtho, ParallelotopeWrapper};
use na::{Point2, Point3, Vector2, Vector3};

type Block = ParallelotopeWrapper<f64, 3, Parallelotope<f64, 3>>;
type Square = ParallelotopeWrapper<f64, 2, ParallelotopeOrtho<f64, 2>>;

/// Random slanted blocks in `[0, 10]^3`.
fn make_blocks(count: usize, rng: &mut oorandom::Rand64) -> Vec<Block> {
    (0..count)
        .map(|_| {
            let org = Point3::from(Vector3::from_fn(|_, _| rng.rand_float() * 9.0));
            let shear = rng.rand_float() * 0.3;
            let edges = [
                Vector3::new(0.2 + rng.rand_float() * 0.6, shear, 0.0),
                Vector3::new(0.0, 0.2 + rng.rand_float() * 0.6, shear),
                Vector3::new(shear, 0.0, 0.2 + rng.rand_float() * 0.6),
            ];
            ParallelotopeWrapper::new(Parallelotope::new(org, edges).unwrap())
        })
        .collect()
}

fn closest_hit(
    objects: &[Block],
    indices: impl Iterator<Item = usize>,
    ray: &Ray<f64, 3>,
) -> Option<f64> {
    indices
        .filter_map(|i| objects[i].intersect(ray))
        .min_by(|a, b| a.total_cmp(b))
}

fn random_ray(rng: &mut oorandom::Rand64) -> Ray<f64, 3> {
    let center = Point3::new(5.0, 5.0, 5.0);
    let dir = Vector3::from_fn(|_, _| rng.rand_float() * 2.0 - 1.0);
    let origin = center - dir.normalize() * 30.0;
    let target = Point3::from(Vector3::from_fn(|_, _| rng.rand_float() * 10.0));
    Ray::new(origin, target - origin)
}

#[test]
fn trace_ray_finds_the_closest_hit() {
    let mut rng = oorandom::Rand64::new(42);
    let blocks = make_blocks(150, &mut rng);

    for max_depth in [1, 3, 6] {
        let mut tree = SpatialSubdivisionTree::<f64, 3>::new(max_depth, 2);
        tree.decompose_objects(&blocks, 4, &()).unwrap();
        tree.assert_well_formed();

        for _ in 0..300 {
            let ray = random_ray(&mut rng);
            let expected = closest_hit(&blocks, 0..blocks.len(), &ray);

            let Some(root_t) = tree.intersect_root(&ray) else {
                assert_eq!(expected, None, "ray {:?} misses the root", ray);
                continue;
            };

            let mut hit = None;
            let found = tree.trace_ray(&ray, root_t, |indices| {
                let t = closest_hit(&blocks, indices.iter().map(|i| *i as usize), &ray)?;
                hit = Some(t);
                Some(ray.point_at(t))
            });

            assert_eq!(found, expected.is_some(), "ray {:?}", ray);
            if let Some(expected) = expected {
                assert_relative_eq!(hit.unwrap(), expected, epsilon = 1.0e-9);
            }
        }
    }
}

#[test]
fn missing_rays_cross_the_whole_tree() {
    let mut rng = oorandom::Rand64::new(7);
    let blocks = make_blocks(100, &mut rng);

    let mut tree = SpatialSubdivisionTree::<f64, 3>::new(5, 1);
    tree.decompose_objects(&blocks, 2, &()).unwrap();
    let leaf_count = tree.leaf_count();

    let mut tested = 0;
    for _ in 0..500 {
        let ray = random_ray(&mut rng);
        let Some(root_t) = tree.intersect_root(&ray) else {
            continue;
        };
        if closest_hit(&blocks, 0..blocks.len(), &ray).is_some() {
            continue;
        }

        let mut calls = 0;
        let found = tree.trace_ray(&ray, root_t, |indices| {
            assert!(!indices.is_empty());
            calls += 1;
            let t = closest_hit(&blocks, indices.iter().map(|i| *i as usize), &ray)?;
            Some(ray.point_at(t))
        });

        assert!(!found);
        assert!(calls <= leaf_count);
        tested += 1;
    }

    assert!(tested > 0);
}

#[test]
fn rejects_hits_outside_the_current_leaf() {
    let mut rng = oorandom::Rand64::new(3);
    let blocks = make_blocks(50, &mut rng);

    let mut tree = SpatialSubdivisionTree::<f64, 3>::new(4, 1);
    tree.decompose_objects(&blocks, 1, &()).unwrap();

    // A hit reported far away from the tree is never accepted.
    let ray = Ray::new(Point3::new(-20.0, 5.0, 5.0), Vector3::x());
    let root_t = tree.intersect_root(&ray).unwrap();
    let found = tree.trace_ray(&ray, root_t, |_| Some(Point3::new(100.0, 100.0, 100.0)));
    assert!(!found);
}

fn closest_square_hit(
    squares: &[Square],
    indices: impl Iterator<Item = usize>,
    ray: &Ray<f64, 2>,
) -> Option<f64> {
    indices
        .filter_map(|i| squares[i].intersect(ray))
        .min_by(|a, b| a.total_cmp(b))
}

#[test]
fn rays_grazing_leaf_boundaries_find_the_closest_hit() {
    let mut rng = oorandom::Rand64::new(11);
    let squares: Vec<Square> = (0..150)
        .map(|_| {
            let org = Point2::new(rng.rand_float() * 9.8, rng.rand_float() * 9.8);
            ParallelotopeWrapper::new(ParallelotopeOrtho::new(org, Vector2::repeat(0.2)).unwrap())
        })
        .collect();

    let mut tree = SpatialSubdivisionTree::<f64, 2>::new(6, 1);
    tree.decompose_objects(&squares, 2, &()).unwrap();
    tree.assert_well_formed();

    let mut corners: Vec<Point2<f64>> = tree
        .boxes()
        .iter()
        .filter(|b| b.is_leaf())
        .flat_map(|b| vertices(b.parallelotope()))
        .collect();
    corners.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    corners.dedup();

    let mut hits = 0;
    for corner in &corners {
        for slope in [0.37, 1.0e-3, 1.0e-9, 0.0] {
            for offset in [-4.0e-13, 0.0, 4.0e-13] {
                // Through the corner, or along one of its grid lines, in both directions.
                let along_x = Ray::new(
                    Point2::new(-20.0, corner.y + offset - slope * (corner.x + 20.0)),
                    Vector2::new(1.0, slope),
                );
                let along_y = Ray::new(
                    Point2::new(corner.x + offset - slope * (corner.y + 20.0), -20.0),
                    Vector2::new(slope, 1.0),
                );

                for ray in [along_x, along_y] {
                    let expected = closest_square_hit(&squares, 0..squares.len(), &ray);

                    let Some(root_t) = tree.intersect_root(&ray) else {
                        assert_eq!(expected, None, "ray {:?} misses the root", ray);
                        continue;
                    };

                    let mut hit = None;
                    let found = tree.trace_ray(&ray, root_t, |indices| {
                        let t = closest_square_hit(
                            &squares,
                            indices.iter().map(|i| *i as usize),
                            &ray,
                        )?;
                        hit = Some(t);
                        Some(ray.point_at(t))
                    });

                    assert_eq!(found, expected.is_some(), "ray {:?}", ray);
                    if let Some(expected) = expected {
                        assert_relative_eq!(hit.unwrap(), expected, epsilon = 1.0e-9);
                        hits += 1;
                    }
                }
            }
        }
    }

    assert!(hits > 0);
}
