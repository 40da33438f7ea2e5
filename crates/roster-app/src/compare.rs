// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};
use std::cmp::Ordering;
use tracing::warn;

use crate::model::{Scalar, SortDirection};

/// Orders two resolved values. Text compares by collation, numbers by value.
/// Mismatched kinds and missing values compare `Equal`, so this is only a
/// total order within a single kind.
pub fn compare(left: Option<&Scalar>, right: Option<&Scalar>, direction: SortDirection) -> Ordering {
    let ordering = match (left, right) {
        (Some(Scalar::Text(left)), Some(Scalar::Text(right))) => collate(left, right),
        (Some(Scalar::Number(left)), Some(Scalar::Number(right))) => {
            left.partial_cmp(right).unwrap_or(Ordering::Equal)
        }
        _ => return Ordering::Equal,
    };

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

thread_local! {
    static ROOT_COLLATOR: Option<CollatorBorrowed<'static>> =
        Collator::try_new(CollatorPreferences::default(), CollatorOptions::default())
            .inspect_err(|error| warn!(%error, "root collation data unavailable"))
            .ok();
}

/// Unicode collation with the root locale: base letters first, then
/// accents, then case with lowercase first.
pub fn collate(left: &str, right: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(left, right),
        None => left.cmp(right),
    })
}
