use crate::domain::{Line, Point};
use crate::metric::{Closest, SeparableMetric};

/// Lower envelope of the candidate sites of one line.
///
/// This is the kernel of the separable sweep. Candidates are pushed in increasing
/// order along the line; hidden-point removal keeps only the sites that are selected
/// for at least one position. A query pass then walks the envelope with a monotone
/// cursor. Both phases are amortized linear in the line length.
///
/// The stack is reused across lines, one envelope per worker.
#[derive(Clone, Debug, Default)]
pub struct LowerEnvelope<const D: usize> {
    sites: Vec<Point<D>>,
}

impl<const D: usize> LowerEnvelope<D> {
    pub fn new() -> Self {
        Self { sites: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.sites.clear();
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Sites of the envelope, in increasing order along the line.
    pub fn sites(&self) -> &[Point<D>] {
        &self.sites
    }

    /// Adds `site`, which must lie after every site already pushed along `line`.
    pub fn push<M: SeparableMetric<D>>(&mut self, metric: &M, line: &Line<D>, site: Point<D>) {
        debug_assert!(self.sites.last().is_none_or(|top| top[line.axis()] < site[line.axis()]));
        while let [.., below, top] = self.sites[..] {
            if !metric.hidden_by(&below, &top, &site, line) {
                break;
            }
            self.sites.pop();
        }
        self.sites.push(site);
    }

    /// Writes the selected site of every position of `line` into `out`.
    ///
    /// Ties go to the site with the lower coordinate along the line. With an empty
    /// envelope every position gets `None`.
    pub fn assign<M: SeparableMetric<D>>(
        &self,
        metric: &M,
        line: &Line<D>,
        out: &mut [Option<Point<D>>],
    ) {
        debug_assert_eq!(out.len(), line.len());
        match self.sites[..] {
            [] => out.fill(None),
            [site] => out.fill(Some(site)),
            _ => {
                let mut k = 0;
                for (offset, cell) in out.iter_mut().enumerate() {
                    let point = line.point(offset);
                    while let [current, next, ..] = self.sites[k..] {
                        if metric.closest(&point, &current, &next) != Closest::Second {
                            break;
                        }
                        k += 1;
                    }
                    *cell = Some(self.sites[k]);
                }
            }
        }
    }

    /// Reduces one line: `candidates` yields the input of every position in order.
    pub fn reduce<M, I>(
        &mut self,
        metric: &M,
        line: &Line<D>,
        candidates: I,
        out: &mut [Option<Point<D>>],
    ) where
        M: SeparableMetric<D>,
        I: IntoIterator<Item = Option<Point<D>>>,
    {
        self.clear();
        for site in candidates.into_iter().flatten() {
            self.push(metric, line, site);
        }
        self.assign(metric, line, out);
    }
}
