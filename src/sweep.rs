use crate::domain::{Domain, Point};
use crate::envelope::LowerEnvelope;
use crate::metric::SeparableMetric;
use crate::predicate::PointPredicate;
use rayon::prelude::*;

/// How the lines of one pass are scheduled.
///
/// Both modes produce identical buffers. `Parallel` runs on the current rayon pool,
/// so the number of threads is set with `ThreadPool::install` (or `init_threads` in WASM).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

/// Progress of a [`SeparableSweep`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SweepState {
    /// The buffer has not been seeded from a predicate.
    Uninitialized,
    /// Every axis below the given one has been reduced.
    SweepingAxis(usize),
    /// All axes have been reduced; the buffer holds the nearest sites.
    Complete,
}

/// Dimension-by-dimension driver of the nearest-site computation.
///
/// After seeding, a cell holds itself if it is a site. Pass `k` then replaces every
/// cell by the nearest candidate along its axis-`k` line, so after the last pass every
/// cell holds its nearest site over the whole domain.
pub struct SeparableSweep<'a, const D: usize, M> {
    domain: Domain<D>,
    metric: &'a M,
    execution: Execution,
    state: SweepState,
    buffer: Vec<Option<Point<D>>>,
    scratch: Vec<Option<Point<D>>>,
}

impl<'a, const D: usize, M: SeparableMetric<D>> SeparableSweep<'a, D, M> {
    pub fn new(domain: Domain<D>, metric: &'a M, execution: Execution) -> Self {
        Self {
            domain,
            metric,
            execution,
            state: SweepState::Uninitialized,
            buffer: Vec::new(),
            scratch: Vec::new(),
        }
    }

    pub fn state(&self) -> SweepState {
        self.state
    }

    pub fn domain(&self) -> &Domain<D> {
        &self.domain
    }

    /// Fills the buffer from `predicate` and starts the sweep at axis 0.
    ///
    /// Seeding again restarts the sweep.
    pub fn seed<P: PointPredicate<D>>(&mut self, predicate: &P) {
        let domain = &self.domain;
        let seed = |index: usize| {
            let point = domain.point_at(index);
            predicate.test(&point).then_some(point)
        };
        self.buffer = match self.execution {
            Execution::Sequential => (0..domain.size()).map(seed).collect(),
            Execution::Parallel => (0..domain.size()).into_par_iter().map(seed).collect(),
        };
        self.state = SweepState::SweepingAxis(0);
    }

    /// Reduces every line along the current axis and moves to the next state.
    ///
    /// Does nothing before seeding or once complete.
    pub fn step(&mut self) -> SweepState {
        if let SweepState::SweepingAxis(axis) = self.state {
            self.reduce_axis(axis);
            self.state = if axis + 1 < D {
                SweepState::SweepingAxis(axis + 1)
            } else {
                SweepState::Complete
            };
        }
        self.state
    }

    /// Seeds from `predicate`, reduces every axis and returns the final buffer.
    pub fn run<P: PointPredicate<D>>(mut self, predicate: &P) -> Vec<Option<Point<D>>> {
        self.seed(predicate);
        while let SweepState::SweepingAxis(_) = self.step() {}
        self.buffer
    }

    /// The buffer in canonical order, once the sweep is complete.
    pub fn into_buffer(self) -> Option<Vec<Option<Point<D>>>> {
        (self.state == SweepState::Complete).then_some(self.buffer)
    }

    fn reduce_axis(&mut self, axis: usize) {
        let Self { domain, metric, execution, buffer, scratch, .. } = self;
        let domain: &Domain<D> = domain;
        let metric: &M = metric;
        let extent = domain.extent(axis);
        let stride = domain.strides()[axis];

        // Line-major pass: line `id` owns `scratch[id * extent..(id + 1) * extent]`.
        scratch.clear();
        scratch.resize(buffer.len(), None);
        let input: &[Option<Point<D>>] = buffer;
        let reduce_line =
            |envelope: &mut LowerEnvelope<D>, (id, out): (usize, &mut [Option<Point<D>>])| {
                let line = domain.line(axis, id);
                let start = domain.line_start_index(axis, id);
                let candidates = (0..extent).map(|i| input[start + i * stride]);
                envelope.reduce(metric, &line, candidates, out);
            };
        match execution {
            Execution::Sequential => {
                let mut envelope = LowerEnvelope::new();
                scratch
                    .chunks_mut(extent)
                    .enumerate()
                    .for_each(|item| reduce_line(&mut envelope, item));
            }
            Execution::Parallel => {
                scratch
                    .par_chunks_mut(extent)
                    .enumerate()
                    .for_each_init(LowerEnvelope::new, reduce_line);
            }
        }

        // Lines along axis 0 are already contiguous in canonical order.
        if stride == 1 {
            std::mem::swap(buffer, scratch);
            return;
        }

        let lines: &[Option<Point<D>>] = scratch;
        let gather = |(index, cell): (usize, &mut Option<Point<D>>)| {
            let offset = (index / stride) % extent;
            let id = index % stride + (index / (stride * extent)) * stride;
            *cell = lines[id * extent + offset];
        };
        match execution {
            Execution::Sequential => buffer.iter_mut().enumerate().for_each(gather),
            Execution::Parallel => buffer.par_iter_mut().enumerate().for_each(gather),
        }
    }
}
