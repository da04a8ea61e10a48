use smallvec::SmallVec;

use crate::core::PointBuffer;

use super::DecimationStrategy;

/// One representation of a series. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct LodLevel {
    level: usize,
    data: PointBuffer,
    threshold: f64,
}

impl LodLevel {
    pub(crate) fn new(level: usize, data: PointBuffer, threshold: f64) -> Self {
        Self {
            level,
            data,
            threshold,
        }
    }

    /// Index into the owning table; `0` is the original input.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn data(&self) -> &PointBuffer {
        &self.data
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.data.point_count()
    }

    /// Compression ratio `original_count / point_count` at generation time.
    ///
    /// Diagnostic only; selection estimates visible density directly.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Ordered representations of one series, finest (level 0) to coarsest.
///
/// Level 0 aliases the buffer passed to generation. Point counts are
/// non-increasing with the level index.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    levels: SmallVec<[LodLevel; 6]>,
    strategy: DecimationStrategy,
}

impl LevelTable {
    pub(crate) fn new(original: PointBuffer, strategy: DecimationStrategy) -> Self {
        let mut levels = SmallVec::new();
        levels.push(LodLevel::new(0, original, 1.0));
        Self { levels, strategy }
    }

    pub(crate) fn push(&mut self, data: PointBuffer) {
        debug_assert!(data.point_count() <= self.coarsest().point_count());
        let original_count = self.original().point_count();
        let threshold = if data.point_count() == 0 {
            f64::INFINITY
        } else {
            original_count as f64 / data.point_count() as f64
        };
        let level = self.levels.len();
        self.levels.push(LodLevel::new(level, data, threshold));
    }

    #[must_use]
    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    #[must_use]
    pub fn level(&self, index: usize) -> Option<&LodLevel> {
        self.levels.get(index)
    }

    /// Number of levels, including level 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`: a table holds at least the original level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn original(&self) -> &PointBuffer {
        self.levels[0].data()
    }

    #[must_use]
    pub fn finest(&self) -> &LodLevel {
        &self.levels[0]
    }

    #[must_use]
    pub fn coarsest(&self) -> &LodLevel {
        &self.levels[self.levels.len() - 1]
    }

    #[must_use]
    pub fn strategy(&self) -> DecimationStrategy {
        self.strategy
    }

    #[must_use]
    pub fn point_counts(&self) -> Vec<usize> {
        self.levels.iter().map(LodLevel::point_count).collect()
    }

    /// Bytes held by every level's buffer.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.levels.iter().map(|level| level.data().byte_len()).sum()
    }
}
