// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use tracing::debug;

use crate::compare::compare;
use crate::model::{Column, Record, Scalar, SortDirection, SortSpec};
use crate::resolve::{FieldPath, resolve};

/// Attributes the free-text filter looks at, independent of the sort column.
pub const FILTER_PATHS: [&str; 4] = ["name", "username", "email", "company.name"];

/// List-view state. `pristine` is the collection as loaded and is only read
/// by `reset`; `working` is always a permutation of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridState {
    pristine: Vec<Record>,
    working: Vec<Record>,
    sort: SortSpec,
    filter: String,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let mut grid = Self::default();
        grid.load(records);
        grid
    }

    /// Replaces both collections. Sort and filter are left as they are.
    pub fn load(&mut self, records: Vec<Record>) {
        debug!(count = records.len(), "grid loaded");
        self.working = records.clone();
        self.pristine = records;
    }

    pub fn sort(&mut self, path: &FieldPath) {
        let direction = if self.sort.is_active(path) {
            self.sort.direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.sort = SortSpec {
            path: Some(path.clone()),
            direction,
        };

        let keyed: Vec<(Option<Scalar>, Record)> = self
            .working
            .drain(..)
            .map(|record| (resolve(&record, path), record))
            .collect();
        let sorted = stable_sort_by(
            keyed,
            &mut |left: &(Option<Scalar>, Record), right: &(Option<Scalar>, Record)| {
                compare(left.0.as_ref(), right.0.as_ref(), direction)
            },
        );
        self.working = sorted.into_iter().map(|(_, record)| record).collect();
        debug!(path = %path, direction = direction.as_str(), "grid sorted");
    }

    pub fn sort_column(&mut self, column: Column) {
        self.sort(&column.path());
    }

    /// Restores the loaded order and clears sort and filter. The triggering
    /// column is accepted but the reset always covers the whole grid.
    pub fn reset(&mut self, _column: Option<&FieldPath>) {
        self.filter.clear();
        self.working = self.pristine.clone();
        self.sort = SortSpec::default();
        debug!("grid reset");
    }

    pub fn reset_column(&mut self, column: Column) {
        self.reset(Some(&column.path()));
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn sort_direction_for(&self, column: Column) -> Option<SortDirection> {
        self.sort
            .is_active(&column.path())
            .then_some(self.sort.direction)
    }

    pub fn pristine(&self) -> &[Record] {
        &self.pristine
    }

    pub fn working(&self) -> &[Record] {
        &self.working
    }

    pub fn len(&self) -> usize {
        self.working.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Working records whose filterable attributes contain the filter text,
    /// case-insensitively. Recomputed on every call.
    pub fn visible_records(&self) -> Vec<&Record> {
        if self.filter.is_empty() {
            return self.working.iter().collect();
        }

        let needle = self.filter.to_lowercase();
        self.working
            .iter()
            .filter(|record| matches_filter(record, &needle))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_records().len()
    }
}

fn matches_filter(record: &Record, needle: &str) -> bool {
    FILTER_PATHS.iter().any(|path| {
        matches!(
            resolve(record, &FieldPath::parse(path)),
            Some(Scalar::Text(value)) if value.to_lowercase().contains(needle)
        )
    })
}

// `slice::sort_by` may panic when the comparator is not a total order, and
// mixed-kind columns produce exactly that. A plain merge sort stays stable
// and never inspects consistency.
fn stable_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by(left, compare);
    let right = stable_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

#[cfg(test)]
mod tests {
    use super::{GridState, stable_sort_by};
    use crate::model::{Column, Record, SortDirection};
    use crate::resolve::FieldPath;
    use anyhow::Result;
    use serde_json::{Value, json};
    use std::collections::BTreeSet;

    fn records(values: Vec<Value>) -> Result<Vec<Record>> {
        values.into_iter().map(Record::try_from).collect()
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .filter_map(|record| record.id().map(|id| id.get()))
            .collect()
    }

    fn visible_ids(grid: &GridState) -> Vec<i64> {
        grid.visible_records()
            .into_iter()
            .filter_map(|record| record.id().map(|id| id.get()))
            .collect()
    }

    fn directory() -> Result<Vec<Record>> {
        records(vec![
            json!({
                "id": 3, "name": "Clementine Bauch", "username": "Samantha",
                "email": "Nathan@yesenia.net", "phone": "1-463-123-4447",
                "address": {"city": "McKenziehaven"}, "company": {"name": "Romaguera-Jacobson"},
            }),
            json!({
                "id": 1, "name": "Leanne Graham", "username": "Bret",
                "email": "Sincere@april.biz", "phone": "1-770-736-8031 x56442",
                "address": {"city": "Gwenborough"}, "company": {"name": "Romaguera-Crona"},
            }),
            json!({
                "id": 2, "name": "Ervin Howell", "username": "Antonette",
                "email": "Shanna@melissa.tv", "phone": "010-692-6593 x09125",
                "address": {"city": "Wisokyburgh"}, "company": {"name": "Deckow-Crist"},
            }),
        ])
    }

    #[test]
    fn loaded_collection_is_visible_in_original_order() -> Result<()> {
        let grid = GridState::with_records(directory()?);
        assert_eq!(visible_ids(&grid), vec![3, 1, 2]);
        assert_eq!(grid.sort_spec().path, None);
        assert_eq!(grid.filter_text(), "");
        Ok(())
    }

    #[test]
    fn sorting_twice_reverses_and_switching_column_restarts_ascending() -> Result<()> {
        let mut grid = GridState::with_records(records(vec![
            json!({"id": 2, "name": "Bob"}),
            json!({"id": 1, "name": "Ann"}),
        ])?);
        let name = FieldPath::parse("name");

        grid.sort(&name);
        assert_eq!(ids(grid.working()), vec![1, 2]);
        assert_eq!(grid.sort_spec().direction, SortDirection::Asc);

        grid.sort(&name);
        assert_eq!(ids(grid.working()), vec![2, 1]);
        assert_eq!(grid.sort_spec().direction, SortDirection::Desc);

        grid.sort(&FieldPath::parse("id"));
        assert_eq!(grid.sort_spec().direction, SortDirection::Asc);
        assert_eq!(grid.sort_spec().path, Some(FieldPath::parse("id")));
        assert_eq!(ids(grid.working()), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn nested_column_sort_uses_resolved_values() -> Result<()> {
        let mut grid = GridState::with_records(directory()?);
        grid.sort_column(Column::City);
        assert_eq!(ids(grid.working()), vec![1, 3, 2]);
        assert_eq!(
            grid.sort_direction_for(Column::City),
            Some(SortDirection::Asc)
        );
        assert_eq!(grid.sort_direction_for(Column::Name), None);
        Ok(())
    }

    #[test]
    fn numeric_sort_uses_value_not_text() -> Result<()> {
        let mut grid = GridState::with_records(records(vec![
            json!({"id": 10}),
            json!({"id": 9}),
            json!({"id": 100}),
        ])?);
        grid.sort(&FieldPath::parse("id"));
        assert_eq!(ids(grid.working()), vec![9, 10, 100]);
        Ok(())
    }

    #[test]
    fn ties_keep_input_order() -> Result<()> {
        let mut grid = GridState::with_records(records(vec![
            json!({"id": 1, "city": "Oslo"}),
            json!({"id": 2, "city": "Lima"}),
            json!({"id": 3, "city": "Oslo"}),
            json!({"id": 4, "city": "Lima"}),
        ])?);
        grid.sort(&FieldPath::parse("city"));
        assert_eq!(ids(grid.working()), vec![2, 4, 1, 3]);
        grid.sort(&FieldPath::parse("city"));
        assert_eq!(ids(grid.working()), vec![1, 3, 2, 4]);
        Ok(())
    }

    #[test]
    fn mixed_kind_column_sorts_without_panicking() -> Result<()> {
        let mut values = Vec::new();
        for index in 0..64_i64 {
            let rank = match index % 4 {
                0 => json!(index),
                1 => json!(format!("r{}", 64 - index)),
                2 => Value::Null,
                _ => json!({"nested": true}),
            };
            values.push(json!({"id": index, "rank": rank}));
        }
        let mut grid = GridState::with_records(records(values)?);
        let before: BTreeSet<i64> = ids(grid.working()).into_iter().collect();

        let rank = FieldPath::parse("rank");
        grid.sort(&rank);
        grid.sort(&rank);
        grid.sort(&FieldPath::parse("missing.path"));

        let after: BTreeSet<i64> = ids(grid.working()).into_iter().collect();
        assert_eq!(before, after);
        assert_eq!(grid.len(), 64);
        Ok(())
    }

    #[test]
    fn sorting_never_touches_pristine() -> Result<()> {
        let mut grid = GridState::with_records(directory()?);
        grid.sort_column(Column::Name);
        grid.sort_column(Column::Email);
        assert_eq!(ids(grid.pristine()), vec![3, 1, 2]);

        let mut working = ids(grid.working());
        working.sort_unstable();
        assert_eq!(working, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn filter_is_case_insensitive_over_fixed_attributes() -> Result<()> {
        let mut grid = GridState::with_records(directory()?);

        grid.set_filter("LEANNE");
        assert_eq!(visible_ids(&grid), vec![1]);

        grid.set_filter("antonette");
        assert_eq!(visible_ids(&grid), vec![2]);

        grid.set_filter("@april");
        assert_eq!(visible_ids(&grid), vec![1]);

        grid.set_filter("romaguera");
        assert_eq!(visible_ids(&grid), vec![3, 1]);

        // Phone and city are displayed but never filtered on.
        grid.set_filter("736-8031");
        assert!(visible_ids(&grid).is_empty());
        grid.set_filter("gwenborough");
        assert!(visible_ids(&grid).is_empty());

        assert_eq!(grid.working().len(), 3);
        Ok(())
    }

    #[test]
    fn filter_applies_to_current_sort_order() -> Result<()> {
        let mut grid = GridState::with_records(records(vec![
            json!({"id": 2, "name": "Bob"}),
            json!({"id": 1, "name": "Ann"}),
        ])?);
        grid.sort(&FieldPath::parse("name"));
        grid.set_filter("ann");
        assert_eq!(visible_ids(&grid), vec![1]);

        grid.set_filter("");
        assert_eq!(visible_ids(&grid), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn records_missing_filter_attributes_do_not_match() -> Result<()> {
        let mut grid = GridState::with_records(records(vec![
            json!({"id": 1, "name": 42}),
            json!({"id": 2, "company": "flat string"}),
            json!({"id": 3, "username": "flat"}),
        ])?);
        grid.set_filter("flat");
        assert_eq!(visible_ids(&grid), vec![3]);
        grid.set_filter("42");
        assert!(visible_ids(&grid).is_empty());
        Ok(())
    }

    #[test]
    fn reset_restores_loaded_order_and_clears_everything() -> Result<()> {
        let mut grid = GridState::with_records(directory()?);
        grid.sort_column(Column::Name);
        grid.sort_column(Column::Name);
        grid.set_filter("zzz");

        grid.reset_column(Column::Phone);
        assert_eq!(visible_ids(&grid), vec![3, 1, 2]);
        assert_eq!(grid.filter_text(), "");
        assert_eq!(grid.sort_spec().path, None);
        assert_eq!(grid.sort_spec().direction, SortDirection::Asc);

        let snapshot = grid.clone();
        grid.reset(None);
        assert_eq!(grid, snapshot);
        Ok(())
    }

    #[test]
    fn sort_after_reset_starts_ascending() -> Result<()> {
        let mut grid = GridState::with_records(directory()?);
        grid.sort_column(Column::Name);
        grid.reset(None);
        grid.sort_column(Column::Name);
        assert_eq!(grid.sort_spec().direction, SortDirection::Asc);
        Ok(())
    }

    #[test]
    fn load_keeps_sort_and_filter() -> Result<()> {
        let mut grid = GridState::new();
        grid.set_filter("ann");
        grid.load(directory()?);
        assert_eq!(grid.filter_text(), "ann");
        assert!(!grid.is_empty());
        Ok(())
    }

    #[test]
    fn merge_sort_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        let sorted = stable_sort_by(items, &mut |left: &(i32, char), right: &(i32, char)| {
            left.0.cmp(&right.0)
        });
        assert_eq!(
            sorted,
            vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c'), (1, 'e')]
        );
    }
}
