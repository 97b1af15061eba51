use std::fmt;

use crate::{Result, Shape, Value, VisualiserError};

/// Parses text typed into an add/search field.
pub fn parse_value(input: &str) -> Result<Value> {
    let trimmed = input.trim();
    trimmed
        .parse::<Value>()
        .map_err(|_| VisualiserError::InvalidInput {
            input: trimmed.to_string(),
        })
}

#[derive(Clone, PartialEq, Eq)]
struct Node {
    value: Value,
    next: Option<Box<Node>>,
}

/// Owned singly linked list of values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LinkedList {
    head: Option<Box<Node>>,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_back(&mut self, value: Value) {
        let mut slot = &mut self.head;
        while let Some(node) = slot {
            slot = &mut node.next;
        }
        *slot = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    pub fn pop_back(&mut self) -> Option<Value> {
        if self.len <= 1 {
            let node = self.head.take()?;
            self.len = 0;
            return Some(node.value);
        }

        let mut node = self.head.as_mut()?;
        for _ in 0..self.len - 2 {
            node = node.next.as_mut()?;
        }
        let last = node.next.take()?;
        self.len -= 1;
        Some(last.value)
    }

    pub fn clear(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.iter().collect()
    }
}

impl Drop for LinkedList {
    // Unlink iteratively so long lists do not recurse through `Box` drops.
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Value> for LinkedList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut values: Vec<Value> = iter.into_iter().collect();
        let mut list = Self::new();
        // Prepending in reverse builds the list without walking it.
        while let Some(value) = values.pop() {
            list.head = Some(Box::new(Node {
                value,
                next: list.head.take(),
            }));
            list.len += 1;
        }
        list
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl Iterator for Iter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node.value)
    }
}

/// The live collection a user edits between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Array(Vec<Value>),
    List(LinkedList),
}

impl Collection {
    pub fn new(shape: Shape, values: &[Value]) -> Self {
        match shape {
            Shape::Array => Self::Array(values.to_vec()),
            Shape::LinkedList => Self::List(values.iter().copied().collect()),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::Array(_) => Shape::Array,
            Self::List(_) => Shape::LinkedList,
        }
    }

    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Array(values) => values.clone(),
            Self::List(list) => list.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Array(values) => values.len(),
            Self::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value` and returns its index.
    pub fn push(&mut self, value: Value) -> usize {
        match self {
            Self::Array(values) => values.push(value),
            Self::List(list) => list.push_back(value),
        }
        self.len() - 1
    }

    /// Inserts `value` before the first element not smaller than it and
    /// returns its index, keeping an ascending collection ascending.
    pub fn insert_sorted(&mut self, value: Value) -> usize {
        let mut values = self.values();
        let index = values.partition_point(|&existing| existing < value);
        values.insert(index, value);
        self.replace(&values);
        index
    }

    pub fn remove_last(&mut self) -> Option<Value> {
        match self {
            Self::Array(values) => values.pop(),
            Self::List(list) => list.pop_back(),
        }
    }

    /// Removes every occurrence of `value`; returns the first index it held.
    pub fn remove_value(&mut self, value: Value) -> Option<usize> {
        let mut values = self.values();
        let first = values.iter().position(|&existing| existing == value)?;
        values.retain(|&existing| existing != value);
        self.replace(&values);
        Some(first)
    }

    pub fn replace(&mut self, values: &[Value]) {
        *self = Self::new(self.shape(), values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_integers() {
        assert_eq!(parse_value(" 42 ").unwrap(), 42);
        assert_eq!(parse_value("-7").unwrap(), -7);
    }

    #[test]
    fn rejects_empty_and_non_numeric_input() {
        for input in ["", "   ", "abc", "4.5", "12x"] {
            let err = parse_value(input).unwrap_err();
            assert!(matches!(err, VisualiserError::InvalidInput { .. }), "{input:?}");
        }
    }

    #[test]
    fn linked_list_pushes_and_pops_at_the_tail() {
        let mut list = LinkedList::new();
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        list.push_back(2);
        list.push_back(3);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);

        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn linked_list_collects_in_order() {
        let list: LinkedList = vec![5, 6, 7].into_iter().collect();
        assert_eq!(list.len(), 3);
        assert_eq!(format!("{list:?}"), "[5, 6, 7]");
    }

    #[test]
    fn long_lists_drop_without_recursing() {
        let list: LinkedList = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn sorted_insert_keeps_order() {
        let mut collection = Collection::new(Shape::Array, &[1, 2, 4, 5, 7, 9]);
        assert_eq!(collection.insert_sorted(6), 4);
        assert_eq!(collection.insert_sorted(0), 0);
        assert_eq!(collection.insert_sorted(10), 8);
        assert_eq!(collection.values(), vec![0, 1, 2, 4, 5, 6, 7, 9, 10]);
    }

    #[test]
    fn remove_value_drops_every_occurrence() {
        let mut collection = Collection::new(Shape::Array, &[4, 2, 7, 2, 9]);
        assert_eq!(collection.remove_value(2), Some(1));
        assert_eq!(collection.values(), vec![4, 7, 9]);
        assert_eq!(collection.remove_value(99), None);
    }

    #[test]
    fn list_collection_keeps_its_shape() {
        let mut collection = Collection::new(Shape::LinkedList, &[]);
        assert_eq!(collection.push(3), 0);
        assert_eq!(collection.push(8), 1);
        assert_eq!(collection.shape(), Shape::LinkedList);
        assert_eq!(collection.remove_last(), Some(8));
        assert_eq!(collection.values(), vec![3]);
    }
}
