use crate::error::VoronoiError;

/// A point of the integer lattice `Z^D`.
pub type Point<const D: usize> = [i32; D];

/// An axis-aligned integer hyper-rectangle, bounds included.
///
/// Cells are stored in a canonical row-major layout where axis 0 varies fastest:
/// `index = sum((p[a] - lower[a]) * stride[a])` with `stride[0] = 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Domain<const D: usize> {
    lower: Point<D>,
    upper: Point<D>,
    extents: [usize; D],
    strides: [usize; D],
    size: usize,
}

impl<const D: usize> Domain<D> {
    /// Creates the domain `lower..=upper`.
    ///
    /// Fails if `lower[a] > upper[a]` on any axis, if `D == 0`, or if the number of
    /// cells overflows `usize`.
    pub fn new(lower: Point<D>, upper: Point<D>) -> Result<Self, VoronoiError> {
        if D == 0 {
            return Err(VoronoiError::ZeroDimensional);
        }

        let mut extents = [0usize; D];
        let mut strides = [0usize; D];
        let mut size = 1usize;
        for axis in 0..D {
            if lower[axis] > upper[axis] {
                return Err(VoronoiError::InvalidDomain {
                    axis,
                    lower: lower[axis],
                    upper: upper[axis],
                });
            }
            let extent = axis_extent(axis, lower[axis], upper[axis])?;
            extents[axis] = extent;
            strides[axis] = size;
            size = size
                .checked_mul(extent)
                .ok_or(VoronoiError::DomainTooLarge { axis })?;
        }

        Ok(Self { lower, upper, extents, strides, size })
    }

    pub fn lower(&self) -> &Point<D> {
        &self.lower
    }

    pub fn upper(&self) -> &Point<D> {
        &self.upper
    }

    /// Number of cells along `axis`.
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    pub fn extents(&self) -> [usize; D] {
        self.extents
    }

    /// Distance in the canonical layout between two cells adjacent along each axis.
    pub fn strides(&self) -> [usize; D] {
        self.strides
    }

    /// Total number of cells. Never zero.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest coordinate difference between two points of the domain, over all axes.
    pub fn max_span(&self) -> u64 {
        self.extents.iter().map(|&e| e as u64 - 1).max().unwrap_or(0)
    }

    pub fn contains(&self, point: &Point<D>) -> bool {
        (0..D).all(|a| self.lower[a] <= point[a] && point[a] <= self.upper[a])
    }

    /// Canonical index of `point`, or `None` if it lies outside the domain.
    pub fn index_of(&self, point: &Point<D>) -> Option<usize> {
        if !self.contains(point) {
            return None;
        }
        Some(
            (0..D)
                .map(|a| (point[a] as i64 - self.lower[a] as i64) as usize * self.strides[a])
                .sum(),
        )
    }

    /// Point stored at canonical `index`. `index` must be below [`Domain::size`].
    pub fn point_at(&self, index: usize) -> Point<D> {
        debug_assert!(index < self.size);
        let mut point = self.lower;
        for a in 0..D {
            let offset = (index / self.strides[a]) % self.extents[a];
            point[a] = (self.lower[a] as i64 + offset as i64) as i32;
        }
        point
    }

    /// Same as [`Domain::index_of`] but reports an out-of-domain point as an error.
    pub fn checked_index(&self, point: &Point<D>) -> Result<usize, VoronoiError> {
        self.index_of(point).ok_or_else(|| VoronoiError::OutOfDomainQuery {
            point: point.to_vec(),
            lower: self.lower.to_vec(),
            upper: self.upper.to_vec(),
        })
    }

    /// Iterates over every point in canonical order.
    pub fn iter(&self) -> DomainIter<'_, D> {
        DomainIter { domain: self, next: 0 }
    }

    /// Number of lines parallel to `axis`.
    pub fn line_count(&self, axis: usize) -> usize {
        self.size / self.extents[axis]
    }

    /// Canonical index of the first cell of line `id` along `axis`.
    ///
    /// Lines are numbered by the canonical order of their first cell, so within one
    /// axis the `id`s enumerate the remaining axes with the lowest one varying fastest.
    pub fn line_start_index(&self, axis: usize, id: usize) -> usize {
        let stride = self.strides[axis];
        let low = id % stride;
        let high = id / stride;
        low + high * stride * self.extents[axis]
    }

    /// Line `id` along `axis`, see [`Domain::line_start_index`].
    pub fn line(&self, axis: usize, id: usize) -> Line<D> {
        Line {
            origin: self.point_at(self.line_start_index(axis, id)),
            axis,
            upper: self.upper[axis],
        }
    }
}

/// Number of cells of `lower..=upper`, which exceeds `u32::MAX` for the full `i32` range.
fn axis_extent(axis: usize, lower: i32, upper: i32) -> Result<usize, VoronoiError> {
    let extent = (upper as i64 - lower as i64 + 1) as u64;
    usize::try_from(extent).map_err(|_| VoronoiError::DomainTooLarge { axis })
}

impl<'a, const D: usize> IntoIterator for &'a Domain<D> {
    type Item = Point<D>;
    type IntoIter = DomainIter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`Domain`] in canonical order.
pub struct DomainIter<'a, const D: usize> {
    domain: &'a Domain<D>,
    next: usize,
}

impl<const D: usize> Iterator for DomainIter<'_, D> {
    type Item = Point<D>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.domain.size {
            return None;
        }
        let point = self.domain.point_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.domain.size - self.next;
        (remaining, Some(remaining))
    }
}

impl<const D: usize> ExactSizeIterator for DomainIter<'_, D> {}

/// A line of the domain parallel to one axis.
///
/// Only the coordinates off `axis` identify the line; positions along it run from
/// `origin[axis]` to `upper` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line<const D: usize> {
    origin: Point<D>,
    axis: usize,
    upper: i32,
}

impl<const D: usize> Line<D> {
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// First point of the line.
    pub fn origin(&self) -> &Point<D> {
        &self.origin
    }

    /// First coordinate along the axis.
    pub fn lower(&self) -> i32 {
        self.origin[self.axis]
    }

    /// Last coordinate along the axis.
    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn len(&self) -> usize {
        (self.upper as i64 - self.lower() as i64 + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Point of the line whose coordinate along the axis is `coordinate`.
    pub fn at(&self, coordinate: i32) -> Point<D> {
        let mut point = self.origin;
        point[self.axis] = coordinate;
        point
    }

    /// Point at `offset` cells from the origin.
    pub fn point(&self, offset: usize) -> Point<D> {
        self.at((self.lower() as i64 + offset as i64) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_rejects_inverted_bounds() {
        let err = Domain::new([0, 5], [3, 4]).unwrap_err();
        assert_eq!(err, VoronoiError::InvalidDomain { axis: 1, lower: 5, upper: 4 });
    }

    #[test]
    fn test_domain_rejects_zero_dimensions() {
        assert_eq!(Domain::<0>::new([], []).unwrap_err(), VoronoiError::ZeroDimensional);
    }

    #[test]
    fn test_domain_indexing() {
        let domain = Domain::new([-2, 1], [1, 3]).unwrap();
        assert_eq!(domain.extents(), [4, 3]);
        assert_eq!(domain.strides(), [1, 4]);
        assert_eq!(domain.size(), 12);

        // Axis 0 varies fastest.
        assert_eq!(domain.index_of(&[-2, 1]), Some(0));
        assert_eq!(domain.index_of(&[-1, 1]), Some(1));
        assert_eq!(domain.index_of(&[-2, 2]), Some(4));
        assert_eq!(domain.index_of(&[1, 3]), Some(11));
        assert_eq!(domain.index_of(&[2, 3]), None);

        for (i, p) in domain.iter().enumerate() {
            assert_eq!(domain.index_of(&p), Some(i));
            assert_eq!(domain.point_at(i), p);
        }
    }

    #[test]
    fn test_domain_lines_cover_every_cell_once() {
        let domain = Domain::new([0, 0, 0], [2, 3, 1]).unwrap();
        for axis in 0..3 {
            let stride = domain.strides()[axis];
            let mut seen = vec![0u32; domain.size()];
            for id in 0..domain.line_count(axis) {
                let line = domain.line(axis, id);
                let start = domain.line_start_index(axis, id);
                assert_eq!(line.len(), domain.extent(axis));
                for offset in 0..line.len() {
                    let idx = start + offset * stride;
                    assert_eq!(domain.point_at(idx), line.point(offset));
                    seen[idx] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "axis {} lines overlap or miss cells", axis);
        }
    }

    #[test]
    fn test_axis_extent_of_full_range() {
        assert_eq!(axis_extent(0, 3, 3), Ok(1));
        assert_eq!(axis_extent(0, -5, 4), Ok(10));

        let full = axis_extent(2, i32::MIN, i32::MAX);
        if usize::BITS > 32 {
            assert_eq!(full.map(|e| e as u64), Ok(1u64 << 32));
        } else {
            assert_eq!(full, Err(VoronoiError::DomainTooLarge { axis: 2 }));
        }
    }

    #[test]
    fn test_domain_size_is_never_zero() {
        match Domain::new([i32::MIN, 0], [i32::MAX, 0]) {
            Ok(domain) => {
                assert!(domain.size() > 0);
                assert_eq!(domain.max_span(), u32::MAX as u64);
            }
            Err(err) => assert_eq!(err, VoronoiError::DomainTooLarge { axis: 0 }),
        }
        assert!(matches!(
            Domain::new([i32::MIN; 3], [i32::MAX; 3]),
            Err(VoronoiError::DomainTooLarge { .. })
        ));
    }

    #[test]
    fn test_domain_single_cell() {
        let domain = Domain::new([7], [7]).unwrap();
        assert_eq!(domain.size(), 1);
        assert_eq!(domain.max_span(), 0);
        assert_eq!(domain.line(0, 0).len(), 1);
        assert_eq!(domain.iter().collect::<Vec<_>>(), vec![[7]]);
    }

    #[test]
    fn test_checked_index_reports_query() {
        let domain = Domain::new([0, 0], [4, 4]).unwrap();
        assert_eq!(domain.checked_index(&[4, 4]), Ok(24));
        assert_eq!(
            domain.checked_index(&[5, 0]),
            Err(VoronoiError::OutOfDomainQuery {
                point: vec![5, 0],
                lower: vec![0, 0],
                upper: vec![4, 4],
            })
        );
    }
}
