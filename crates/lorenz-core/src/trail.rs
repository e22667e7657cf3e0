use std::collections::VecDeque;

use crate::math::Vec3;

/// Bounded history of recent positions, oldest first.
///
/// Once full, every append evicts the oldest entry. The backing storage is
/// allocated once and reused across [`TrailBuffer::reset`].
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points: VecDeque<Vec3>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, p: Vec3) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Vec3> + ExactSizeIterator + '_ {
        self.points.iter()
    }

    /// The newest `n` entries (or fewer), still oldest first.
    pub fn recent(
        &self,
        n: usize,
    ) -> impl DoubleEndedIterator<Item = &Vec3> + ExactSizeIterator + '_ {
        let skip = self.points.len().saturating_sub(n);
        self.points.range(skip..)
    }

    #[inline]
    pub fn latest(&self) -> Option<Vec3> {
        self.points.back().copied()
    }

    pub fn reset(&mut self) {
        self.points.clear();
    }
}
