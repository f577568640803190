use super::box_jobs::{BoxJobs, Pop};
use super::{
    BuildProgress, SpatialSubdivisionTree, TreeBox, TreeError, MAX_DEPTH_BOUNDS,
    MIN_OBJECTS_PER_BOX_BOUNDS,
};
use crate::math::{real, Point, Real, Vector};
use crate::query::{shape_intersection, ShapeView, Tolerances};
use crate::shape::{ParallelotopeShape, ParallelotopeWrapper};
use num::Bounded;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Progress is reported each time a box index with these low bits all set is created.
const PROGRESS_MASK: usize = 0xfff;

/// A box waiting to be either stored as a leaf or subdivided.
#[derive(Debug)]
struct Job<P> {
    index: u32,
    parallelotope: P,
    object_indices: Vec<u32>,
    depth: usize,
}

/// The state shared by the workers of a tree build.
struct Builder<'a, T: Real, const N: usize, P, O: ?Sized> {
    max_depth: usize,
    min_objects_per_box: usize,
    tolerances: Tolerances<T>,
    objects: Vec<&'a O>,
    // Slot `i` is filled once box `i` is either a leaf or subdivided.
    boxes: Mutex<Vec<Option<TreeBox<P>>>>,
    jobs: BoxJobs<Job<P>>,
    progress: &'a dyn BuildProgress,
    error: Mutex<Option<TreeError>>,
}

/// Stops every worker if the worker holding it panics.
struct StopOnPanic<'a, J>(&'a BoxJobs<J>);

impl<J> Drop for StopOnPanic<'_, J> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.stop_all();
        }
    }
}

impl<'a, T, const N: usize, P, O> Builder<'a, T, N, P, O>
where
    T: Real,
    P: ParallelotopeShape<T, N>,
    O: ShapeView<T, N> + Sync + ?Sized,
{
    fn lock_boxes(&self) -> MutexGuard<Vec<Option<TreeBox<P>>>> {
        self.boxes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn work(&self) {
        let _stop_on_panic = StopOnPanic(&self.jobs);
        let mut returning_previous = false;

        loop {
            match self.jobs.pop(returning_previous) {
                Pop::Job(job) => {
                    returning_previous = true;
                    if let Err(err) = self.extend(job) {
                        self.fail(err);
                        return;
                    }
                }
                Pop::Wait => {
                    returning_previous = false;
                    std::thread::yield_now();
                }
                Pop::Done => return,
            }
        }
    }

    fn fail(&self, err: TreeError) {
        log::warn!("Stopping the tree build: {}", err);
        {
            let mut error = self.error.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = error.get_or_insert(err);
        }
        self.jobs.stop_all();
    }

    /// Stores the box of `job` as a leaf, or subdivides it and queues its children.
    fn extend(&self, job: Job<P>) -> Result<(), TreeError> {
        let Job {
            index,
            parallelotope,
            object_indices,
            depth,
        } = job;

        if depth >= self.max_depth || object_indices.len() <= self.min_objects_per_box {
            self.lock_boxes()[index as usize] = Some(TreeBox::leaf(parallelotope, object_indices));
            return Ok(());
        }

        let children = parallelotope.binary_division();
        let child_count = children.len();

        let first_child = {
            let mut boxes = self.lock_boxes();
            let first_child = boxes.len();
            let end = first_child + child_count;
            // Every box index, `end - 1` included, must fit in a `u32`.
            if end - 1 > u32::MAX as usize {
                return Err(TreeError::TooManyBoxes);
            }
            boxes.resize_with(end, || None);
            boxes[index as usize] = Some(TreeBox::subdivided(
                parallelotope,
                first_child as u32,
                child_count as u32,
            ));
            first_child
        };

        for (k, child) in children.into_iter().enumerate() {
            let shape = ParallelotopeWrapper::with_tolerances(child, self.tolerances);
            let child_objects = object_indices
                .iter()
                .copied()
                .filter(|i| shape_intersection(&shape, self.objects[*i as usize]))
                .collect();

            self.jobs.push(Job {
                index: (first_child + k) as u32,
                parallelotope: shape.into_inner(),
                object_indices: child_objects,
                depth: depth + 1,
            });
        }

        self.report_progress(first_child, first_child + child_count)
    }

    fn report_progress(&self, first: usize, end: usize) -> Result<(), TreeError> {
        if !(first..end).any(|index| index & PROGRESS_MASK == PROGRESS_MASK) {
            return Ok(());
        }

        let done = end.saturating_sub(self.jobs.pending());
        log::trace!("Tree build progress: {}/{} boxes.", done, end);
        self.progress.set(done, end);

        if self.progress.is_cancelled() {
            Err(TreeError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Collects the boxes once every worker is done.
    fn finish(self) -> Result<Vec<TreeBox<P>>, TreeError> {
        if let Some(err) = self.error.into_inner().unwrap_or_else(PoisonError::into_inner) {
            return Err(err);
        }

        let slots = self.boxes.into_inner().unwrap_or_else(PoisonError::into_inner);
        let missing = slots.iter().filter(|slot| slot.is_none()).count();
        let mut boxes = slots
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(TreeError::Incomplete { missing })?;

        for tree_box in &mut boxes {
            tree_box.object_indices.shrink_to_fit();
        }

        Ok(boxes)
    }
}

impl<T: Real, const N: usize, P: ParallelotopeShape<T, N>> SpatialSubdivisionTree<T, N, P> {
    /// Builds the tree for the objects of the slice `objects`.
    ///
    /// See [`Self::decompose`].
    pub fn decompose_objects<O>(
        &mut self,
        objects: &[O],
        thread_count: usize,
        progress: &dyn BuildProgress,
    ) -> Result<(), TreeError>
    where
        O: ShapeView<T, N> + Sync,
    {
        self.decompose(objects.len(), |i| &objects[i], thread_count, progress)
    }

    /// Builds the tree for `object_count` objects, the `i`-th object being `objects(i)`.
    ///
    /// The root box is the bounding box of the vertices of all the objects, enlarged by
    /// [`Self::distance_from_facet`] on every side. Boxes are then subdivided on
    /// `thread_count` threads, each child keeping the objects of its parent that intersect it.
    ///
    /// Any previous content of the tree is discarded, and the tree is left empty if the
    /// build fails. The build fails if:
    /// - the maximum depth or the minimum object count per box are out of bounds,
    /// - `thread_count` is zero or the thread pool cannot be created,
    /// - the objects don't have a finite, non-empty, extent along every dimension,
    /// - the smallest boxes would be too small for the tolerances,
    /// - the progress sink cancels the build.
    pub fn decompose<'a, O, F>(
        &mut self,
        object_count: usize,
        objects: F,
        thread_count: usize,
        progress: &dyn BuildProgress,
    ) -> Result<(), TreeError>
    where
        O: ShapeView<T, N> + Sync + ?Sized + 'a,
        F: Fn(usize) -> &'a O,
    {
        self.boxes.clear();
        self.distance_from_facet = T::zero();

        if !MAX_DEPTH_BOUNDS.contains(&self.max_depth) {
            return Err(TreeError::MaxDepthOutOfBounds(self.max_depth));
        }
        if !MIN_OBJECTS_PER_BOX_BOUNDS.contains(&self.min_objects_per_box) {
            return Err(TreeError::MinObjectsOutOfBounds(self.min_objects_per_box));
        }
        if thread_count == 0 {
            return Err(TreeError::NoThreads);
        }
        if object_count > u32::MAX as usize {
            return Err(TreeError::TooManyObjects(object_count));
        }
        if progress.is_cancelled() {
            return Err(TreeError::Cancelled);
        }

        let objects: Vec<&O> = (0..object_count).map(objects).collect();
        let (root, distance_from_facet) = self.root_parallelotope(&objects)?;

        log::debug!(
            "Decomposing {} objects in {} dimensions with {} threads, max depth {}, min objects per box {}.",
            object_count,
            N,
            thread_count,
            self.max_depth,
            self.min_objects_per_box
        );

        let root_job = Job {
            index: 0,
            parallelotope: root,
            object_indices: (0..object_count as u32).collect(),
            depth: 1,
        };

        let builder = Builder {
            max_depth: self.max_depth,
            min_objects_per_box: self.min_objects_per_box,
            tolerances: self.tolerances,
            objects,
            boxes: Mutex::new(vec![None]),
            jobs: BoxJobs::new([root_job]),
            progress,
            error: Mutex::new(None),
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()?;

        pool.scope(|scope| {
            for _ in 0..thread_count {
                scope.spawn(|_| builder.work());
            }
        });

        let boxes = builder.finish()?;
        progress.set(boxes.len(), boxes.len());

        self.boxes = boxes;
        self.distance_from_facet = distance_from_facet;

        log::debug!(
            "Built a tree of {} boxes, {} leaves, depth {}.",
            self.box_count(),
            self.leaf_count(),
            self.depth()
        );

        Ok(())
    }

    /// The root box for `objects` and the distance from its facets to the objects.
    fn root_parallelotope<O>(&self, objects: &[&O]) -> Result<(P, T), TreeError>
    where
        O: ShapeView<T, N> + ?Sized,
    {
        let mut min: Point<T, N> = Point::from(Vector::repeat(<T as Bounded>::max_value()));
        let mut max: Point<T, N> = Point::from(Vector::repeat(<T as Bounded>::min_value()));

        for object in objects {
            for vertex in object.vertices() {
                min = min.inf(vertex);
                max = max.sup(vertex);
            }
        }

        let mut abs_max = T::zero();
        for i in 0..N {
            if !(min[i] < max[i]) || !min[i].is_finite() || !max[i].is_finite() {
                return Err(TreeError::DegenerateObjects { dimension: i });
            }
            abs_max = abs_max.max(min[i].abs()).max(max[i].abs());
        }

        let distance = abs_max
            * self.tolerances.distance_from_facet_in_epsilons
            * T::default_epsilon();
        let margin = Vector::repeat(distance);
        min -= margin;
        max += margin;

        // A point looked up past a facet must land inside the box next to it.
        let leaf_divisor = real::<T>((1u64 << (self.max_depth - 1)) as f64);
        for i in 0..N {
            let half_box_size = (max[i] - min[i]) / leaf_divisor * real(0.5);
            if !(distance < half_box_size) {
                return Err(TreeError::FacetDistanceTooLarge {
                    distance: to_f64(distance),
                    half_box_size: to_f64(half_box_size),
                    dimension: i,
                });
            }
        }

        let root = P::from_corners(&min, &max)?;
        Ok((root, distance))
    }
}

fn to_f64<T: Real>(value: T) -> f64 {
    let value: Option<f64> = value.to_subset();
    value.unwrap_or(f64::NAN)
}
