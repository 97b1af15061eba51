use crate::{StepIndices, StepKind, StepRecord, Value};

/// Adjacent compare-and-swap passes. The settled region is the suffix, so
/// the boundary of pass `i` is `n - i - 1`.
pub fn bubble_sort(values: &[Value]) -> Vec<StepRecord> {
    let mut array = values.to_vec();
    let n = array.len();
    let mut steps = Vec::new();

    for i in 0..n.saturating_sub(1) {
        let boundary = Some(n - i - 1);
        for j in 0..n - i - 1 {
            let (left, right) = (array[j], array[j + 1]);
            steps.push(StepRecord::new(
                StepKind::Compare,
                &array,
                StepIndices::pair(j, j + 1),
                boundary,
                format!("Comparing {left} with {right}"),
            ));

            if left > right {
                array.swap(j, j + 1);
                steps.push(StepRecord::new(
                    StepKind::Swap,
                    &array,
                    StepIndices::pair(j, j + 1),
                    boundary,
                    format!("Swapped {left} with {right}"),
                ));
            }
        }
    }

    steps
}

/// Grows a sorted prefix by sliding each key left past larger predecessors.
///
/// A shift exchanges the key with the predecessor it passes, so every
/// snapshot holds the same multiset as the input.
pub fn insertion_sort(values: &[Value]) -> Vec<StepRecord> {
    let mut array = values.to_vec();
    let n = array.len();
    let mut steps = Vec::new();
    if n < 2 {
        return steps;
    }

    steps.push(StepRecord::new(
        StepKind::Initial,
        &array,
        StepIndices::none(),
        Some(1),
        format!(
            "First element ({}) is considered sorted as a single element is always sorted",
            array[0]
        ),
    ));

    for i in 1..n {
        let key = array[i];
        let boundary = Some(i);
        steps.push(StepRecord::new(
            StepKind::SelectKey,
            &array,
            StepIndices::active(i),
            boundary,
            format!("Selected {key} as key to insert into sorted portion"),
        ));

        let mut j = i;
        while j > 0 && array[j - 1] > key {
            let larger = array[j - 1];
            steps.push(StepRecord::new(
                StepKind::Compare,
                &array,
                StepIndices::pair(j, j - 1),
                boundary,
                format!("Comparing {key} with {larger}"),
            ));

            array.swap(j - 1, j);
            steps.push(StepRecord::new(
                StepKind::Shift,
                &array,
                StepIndices::pair(j - 1, j),
                boundary,
                format!("Shifting {larger} to the right"),
            ));
            j -= 1;
        }

        steps.push(StepRecord::new(
            StepKind::Insert,
            &array,
            StepIndices::active(j),
            Some(i + 1),
            format!("Inserted {key} at position {j}"),
        ));
    }

    steps
}

/// Selects the minimum of the unsorted suffix and swaps it into place.
pub fn selection_sort(values: &[Value]) -> Vec<StepRecord> {
    let mut array = values.to_vec();
    let n = array.len();
    let mut steps = Vec::new();

    for i in 0..n.saturating_sub(1) {
        let boundary = Some(i);
        let mut min = i;
        steps.push(StepRecord::new(
            StepKind::StartPass,
            &array,
            StepIndices::active(i).with_target(min),
            boundary,
            format!("Starting new pass from index {i}"),
        ));

        for j in i + 1..n {
            steps.push(StepRecord::new(
                StepKind::Compare,
                &array,
                StepIndices::pair(i, j).with_target(min),
                boundary,
                format!(
                    "Comparing {} with current minimum {}",
                    array[j], array[min]
                ),
            ));

            if array[j] < array[min] {
                min = j;
                steps.push(StepRecord::new(
                    StepKind::NewMin,
                    &array,
                    StepIndices::active(i).with_target(min),
                    boundary,
                    format!("New minimum found: {} at index {j}", array[j]),
                ));
            }
        }

        let settled = Some(i + 1);
        if min != i {
            let displaced = array[i];
            array.swap(i, min);
            steps.push(StepRecord::new(
                StepKind::Swap,
                &array,
                StepIndices::active(i).with_target(min),
                settled,
                format!("Swapping {displaced} with {}", array[i]),
            ));
        } else {
            steps.push(StepRecord::new(
                StepKind::NoSwap,
                &array,
                StepIndices::active(i).with_target(min),
                settled,
                format!("{} is already in correct position", array[i]),
            ));
        }
    }

    steps
}
