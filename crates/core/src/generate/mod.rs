//! Eager step generation.
//!
//! Every algorithm, search included, is executed to completion up front and
//! yields an ordered list of [`StepRecord`]s. Playback only ever walks that
//! list, so searching and sorting share one controller.

mod search;
mod sort;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use search::{binary_search, linear_search};
pub use sort::{bubble_sort, insertion_sort, selection_sort};

use crate::{SettledRegion, StepKind, StepRecord, Value};

/// The five visualised algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    InsertionSort,
    SelectionSort,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::BubbleSort,
        Algorithm::InsertionSort,
        Algorithm::SelectionSort,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LinearSearch => "linear search",
            Self::BinarySearch => "binary search",
            Self::BubbleSort => "bubble sort",
            Self::InsertionSort => "insertion sort",
            Self::SelectionSort => "selection sort",
        }
    }

    pub fn is_search(self) -> bool {
        matches!(self, Self::LinearSearch | Self::BinarySearch)
    }

    /// How `sorted_boundary` is read, or `None` for searches.
    pub fn settled_region(self) -> Option<SettledRegion> {
        match self {
            Self::LinearSearch | Self::BinarySearch => None,
            Self::BubbleSort => Some(SettledRegion::Suffix),
            Self::InsertionSort | Self::SelectionSort => Some(SettledRegion::Prefix),
        }
    }

    /// Boundary shown before the first step.
    pub fn initial_boundary(self, len: usize) -> Option<usize> {
        match self.settled_region()? {
            SettledRegion::Suffix => Some(len),
            SettledRegion::Prefix => Some(0),
        }
    }

    /// Boundary shown once the run is complete.
    pub fn final_boundary(self, len: usize) -> Option<usize> {
        match self.settled_region()? {
            SettledRegion::Suffix => Some(0),
            SettledRegion::Prefix => Some(len),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal state of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(usize),
    NotFound,
}

/// Generates the run for `algorithm` over `values`. Searches look for
/// `target`; sorts ignore it. A search without a target yields a single
/// not-found record.
pub fn generate(algorithm: Algorithm, values: &[Value], target: Option<Value>) -> Run {
    match target {
        Some(target) => Run::search(algorithm, values, target),
        None => Run::sort(algorithm, values),
    }
}

/// A generated step sequence together with the input it was generated from.
///
/// Immutable once built; the playback controller shares it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    algorithm: Algorithm,
    target: Option<Value>,
    initial: Vec<Value>,
    steps: Vec<StepRecord>,
}

impl Run {
    /// Generates the sort run for `values`. Search algorithms get a run
    /// with a single not-found record since there is nothing to look for.
    pub fn sort(algorithm: Algorithm, values: &[Value]) -> Self {
        let steps = match algorithm {
            Algorithm::BubbleSort => bubble_sort(values),
            Algorithm::InsertionSort => insertion_sort(values),
            Algorithm::SelectionSort => selection_sort(values),
            Algorithm::LinearSearch | Algorithm::BinarySearch => vec![StepRecord::new(
                StepKind::NotFound,
                values,
                Default::default(),
                None,
                "No value to search for",
            )],
        };
        Self::from_parts(algorithm, None, values, steps)
    }

    /// Generates the search run for `target`. Sort algorithms ignore the
    /// target.
    pub fn search(algorithm: Algorithm, values: &[Value], target: Value) -> Self {
        let steps = match algorithm {
            Algorithm::LinearSearch => linear_search(values, target),
            Algorithm::BinarySearch => binary_search(values, target),
            _ => return Self::sort(algorithm, values),
        };
        Self::from_parts(algorithm, Some(target), values, steps)
    }

    fn from_parts(
        algorithm: Algorithm,
        target: Option<Value>,
        values: &[Value],
        steps: Vec<StepRecord>,
    ) -> Self {
        tracing::debug!(%algorithm, len = values.len(), steps = steps.len(), "generated run");
        Self {
            algorithm,
            target,
            initial: values.to_vec(),
            steps,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn target(&self) -> Option<Value> {
        self.target
    }

    /// Collection contents before the first step.
    pub fn initial(&self) -> &[Value] {
        &self.initial
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepRecord> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn outcome(&self) -> Option<SearchOutcome> {
        if !self.algorithm.is_search() {
            return None;
        }
        self.steps.last().map(|step| match step.kind {
            StepKind::Found => step
                .indices
                .target
                .map_or(SearchOutcome::NotFound, SearchOutcome::Found),
            _ => SearchOutcome::NotFound,
        })
    }

    pub fn final_snapshot(&self) -> &[Value] {
        self.steps
            .last()
            .map_or(self.initial.as_slice(), |step| step.snapshot.as_slice())
    }

    pub fn intro_narration(&self) -> String {
        match self.algorithm {
            Algorithm::LinearSearch | Algorithm::BinarySearch => match self.target {
                Some(target) => format!("Searching for {target}. Press Next to start"),
                None => "Enter a value to search for".to_string(),
            },
            Algorithm::InsertionSort => {
                "In Insertion Sort, we start with first element as sorted. Press Next to continue."
                    .to_string()
            }
            Algorithm::BubbleSort | Algorithm::SelectionSort => {
                "Press Next to start sorting".to_string()
            }
        }
    }

    pub fn final_narration(&self) -> String {
        if self.algorithm.is_search() {
            if let Some(step) = self.steps.last() {
                return step.narration.clone();
            }
        }
        "Array sorted!".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_outcomes_follow_terminal_record() {
        let found = Run::search(Algorithm::BinarySearch, &[1, 2, 4, 5, 7, 9], 5);
        assert_eq!(found.outcome(), Some(SearchOutcome::Found(3)));
        assert_eq!(found.final_narration(), "Found 5 at index 3");

        let missing = Run::search(Algorithm::LinearSearch, &[4, 2, 7], 99);
        assert_eq!(missing.outcome(), Some(SearchOutcome::NotFound));
    }

    #[test]
    fn sorts_have_no_outcome_and_a_fixed_finale() {
        let run = Run::sort(Algorithm::SelectionSort, &[3, 1, 2]);
        assert_eq!(run.outcome(), None);
        assert_eq!(run.final_snapshot(), &[1, 2, 3]);
        assert_eq!(run.final_narration(), "Array sorted!");
        assert_eq!(run.initial(), &[3, 1, 2]);
    }

    #[test]
    fn empty_sort_run_keeps_initial_snapshot() {
        let run = Run::sort(Algorithm::BubbleSort, &[]);
        assert!(run.is_empty());
        assert!(run.final_snapshot().is_empty());
    }

    #[test]
    fn boundaries_by_settled_side() {
        assert_eq!(Algorithm::BubbleSort.initial_boundary(7), Some(7));
        assert_eq!(Algorithm::BubbleSort.final_boundary(7), Some(0));
        assert_eq!(Algorithm::InsertionSort.initial_boundary(7), Some(0));
        assert_eq!(Algorithm::SelectionSort.final_boundary(7), Some(7));
        assert_eq!(Algorithm::LinearSearch.final_boundary(7), None);
    }

    #[test]
    fn search_target_is_ignored_by_sorts() {
        let run = Run::search(Algorithm::BubbleSort, &[2, 1], 1);
        assert_eq!(run.target(), None);
        assert_eq!(run.len(), 2);
    }

    #[test]
    fn generate_dispatches_on_algorithm_and_target() {
        let values = [1, 2, 4, 5, 7, 9];
        assert_eq!(
            generate(Algorithm::BinarySearch, &values, Some(7)),
            Run::search(Algorithm::BinarySearch, &values, 7)
        );
        assert_eq!(
            generate(Algorithm::InsertionSort, &[3, 1, 2], Some(1)),
            Run::sort(Algorithm::InsertionSort, &[3, 1, 2])
        );

        let untargeted = generate(Algorithm::LinearSearch, &values, None);
        assert_eq!(untargeted.len(), 1);
        assert_eq!(untargeted.outcome(), Some(SearchOutcome::NotFound));
    }
}
