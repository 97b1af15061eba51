use serde::{Deserialize, Serialize};

/// Element type of every visualised collection.
pub type Value = i64;

/// Semantic action a [`StepRecord`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Initial,
    SelectKey,
    Compare,
    Shift,
    Insert,
    Swap,
    StartPass,
    NewMin,
    NoSwap,
    Probe,
    Found,
    NotFound,
}

/// Positions a step refers to. `None` is the "no position" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepIndices {
    /// Position under the cursor: the probe, the key, or the left comparand.
    pub active: Option<usize>,
    /// Second comparand.
    pub compare: Option<usize>,
    /// Found element or current minimum.
    pub target: Option<usize>,
    /// Inclusive `(left, right)` window of a binary search.
    pub bounds: Option<(usize, usize)>,
}

impl StepIndices {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn active(index: usize) -> Self {
        Self {
            active: Some(index),
            ..Self::default()
        }
    }

    pub fn pair(active: usize, compare: usize) -> Self {
        Self {
            active: Some(active),
            compare: Some(compare),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, index: usize) -> Self {
        self.target = Some(index);
        self
    }

    pub fn with_bounds(mut self, left: usize, right: usize) -> Self {
        self.bounds = Some((left, right));
        self
    }

    /// Sorted, de-duplicated positions referenced by this step.
    pub fn positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = [self.active, self.compare, self.target]
            .into_iter()
            .flatten()
            .collect();
        if let Some((left, right)) = self.bounds {
            positions.push(left);
            positions.push(right);
        }
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    pub fn is_valid_for(&self, len: usize) -> bool {
        self.positions().iter().all(|&index| index < len)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    /// Highlights left standing once a run completes: only a found target.
    pub fn finalized(&self) -> Self {
        Self {
            target: self.target,
            ..Self::default()
        }
    }
}

/// Which side of `sorted_boundary` counts as settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettledRegion {
    /// Positions `< boundary` are settled (insertion and selection sort).
    Prefix,
    /// Positions `>= boundary` are settled (bubble sort), so the boundary
    /// shrinks toward zero as the run progresses.
    Suffix,
}

impl SettledRegion {
    pub fn contains(self, boundary: usize, index: usize) -> bool {
        match self {
            Self::Prefix => index < boundary,
            Self::Suffix => index >= boundary,
        }
    }
}

/// One replayable visual snapshot of an algorithm run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub kind: StepKind,
    /// Full collection contents after this step is applied.
    pub snapshot: Vec<Value>,
    pub indices: StepIndices,
    /// `None` for searches, which have no settled region.
    pub sorted_boundary: Option<usize>,
    pub narration: String,
}

impl StepRecord {
    pub fn new(
        kind: StepKind,
        snapshot: &[Value],
        indices: StepIndices,
        sorted_boundary: Option<usize>,
        narration: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            snapshot: snapshot.to_vec(),
            indices,
            sorted_boundary,
            narration: narration.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_include_bounds_once() {
        let indices = StepIndices::active(2).with_bounds(0, 2).with_target(2);
        assert_eq!(indices.positions(), vec![0, 2]);
        assert!(indices.is_valid_for(3));
        assert!(!indices.is_valid_for(2));
    }

    #[test]
    fn finalized_keeps_only_target() {
        let indices = StepIndices::pair(1, 2).with_target(4).with_bounds(0, 5);
        let finalized = indices.finalized();
        assert_eq!(finalized.target, Some(4));
        assert_eq!(finalized.positions(), vec![4]);
        assert!(StepIndices::pair(0, 1).finalized().is_empty());
    }

    #[test]
    fn settled_region_reads_boundary_by_side() {
        assert!(SettledRegion::Prefix.contains(2, 1));
        assert!(!SettledRegion::Prefix.contains(2, 2));
        assert!(SettledRegion::Suffix.contains(2, 2));
        assert!(!SettledRegion::Suffix.contains(2, 1));
    }

    #[test]
    fn kinds_serialise_in_snake_case() {
        let json = serde_json::to_string(&StepKind::SelectKey).unwrap();
        assert_eq!(json, "\"select_key\"");
    }
}
