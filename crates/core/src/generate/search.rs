use crate::{StepIndices, StepKind, StepRecord, Value};

/// Probes every position from the left until `target` is found.
pub fn linear_search(values: &[Value], target: Value) -> Vec<StepRecord> {
    let mut steps = Vec::with_capacity(values.len() + 1);

    for (index, &value) in values.iter().enumerate() {
        steps.push(StepRecord::new(
            StepKind::Probe,
            values,
            StepIndices::active(index),
            None,
            format!("Checking index {index}: is {value} equal to {target}?"),
        ));

        if value == target {
            steps.push(StepRecord::new(
                StepKind::Found,
                values,
                StepIndices::active(index).with_target(index),
                None,
                format!("Found {target} at index {index}"),
            ));
            return steps;
        }
    }

    steps.push(not_found(values, target));
    steps
}

/// Halves the `[left, right]` window around `mid = floor((left + right) / 2)`.
///
/// `values` must already be sorted ascending. This is not checked; on
/// unsorted input the records are still well formed but the outcome is
/// meaningless.
pub fn binary_search(values: &[Value], target: Value) -> Vec<StepRecord> {
    let mut steps = Vec::new();
    let mut left: isize = 0;
    let mut right: isize = values.len() as isize - 1;

    while left <= right {
        let mid = ((left + right) / 2) as usize;
        let (lo, hi) = (left as usize, right as usize);
        let value = values[mid];
        let indices = StepIndices::active(mid).with_bounds(lo, hi);

        let direction = match value.cmp(&target) {
            std::cmp::Ordering::Equal => "found",
            std::cmp::Ordering::Less => "go right",
            std::cmp::Ordering::Greater => "go left",
        };
        steps.push(StepRecord::new(
            StepKind::Probe,
            values,
            indices,
            None,
            format!("Range [{lo}, {hi}], middle index {mid} holds {value}: {direction}"),
        ));

        match value.cmp(&target) {
            std::cmp::Ordering::Equal => {
                steps.push(StepRecord::new(
                    StepKind::Found,
                    values,
                    indices.with_target(mid),
                    None,
                    format!("Found {target} at index {mid}"),
                ));
                return steps;
            }
            std::cmp::Ordering::Less => left = mid as isize + 1,
            std::cmp::Ordering::Greater => right = mid as isize - 1,
        }
    }

    steps.push(not_found(values, target));
    steps
}

fn not_found(values: &[Value], target: Value) -> StepRecord {
    StepRecord::new(
        StepKind::NotFound,
        values,
        StepIndices::none(),
        None,
        format!("{target} not found in the array"),
    )
}
