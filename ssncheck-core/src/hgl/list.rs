// SPDX-FileCopyrightText: 2026 Ssncheck Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! High Group List snapshot
//!
//! An immutable snapshot mapping each three-digit area key to the ordered
//! sequence of group numbers recorded for it, oldest-issued first. The
//! highest-issued-group check and the approximate issuance year are both
//! derived views over the same sequence.

use std::collections::HashMap;

/// Number of header lines preceding the data rows in the SSA document.
const HEADER_LINES: usize = 2;

/// A parsed snapshot of the SSA High Group List.
///
/// Snapshots are built wholesale and never mutated after being published to
/// readers; a refresh replaces the whole snapshot at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighGroupList {
    groups: HashMap<String, Vec<u8>>,
}

impl HighGroupList {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the SSA high-group text document.
    ///
    /// The first two lines are a header. Each remaining non-blank line
    /// carries an area code and a group number separated by runs of
    /// whitespace; columns beyond the second are ignored. Malformed lines
    /// (missing tokens, non-numeric group) are skipped, never fatal.
    pub fn parse(document: &str) -> Self {
        let mut list = Self::new();
        for line in document.lines().skip(HEADER_LINES) {
            let mut tokens = line.split_whitespace();
            let (Some(area), Some(group)) = (tokens.next(), tokens.next()) else {
                continue;
            };
            let Ok(group) = group.parse::<u8>() else {
                continue;
            };
            list.record(area, group);
        }
        list
    }

    /// Records an issued group for an area, preserving insertion order.
    ///
    /// The area code is left-padded with zeros to three digits.
    pub fn record(&mut self, area: &str, group: u8) {
        self.groups
            .entry(format!("{area:0>3}"))
            .or_default()
            .push(group);
    }

    /// True when no area has been recorded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of recorded areas.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the area appears in the snapshot.
    pub fn contains_area(&self, area_key: &str) -> bool {
        self.groups.contains_key(area_key)
    }

    /// Highest group number recorded for an area, if the area is known.
    pub fn high_group(&self, area_key: &str) -> Option<u8> {
        self.groups.get(area_key)?.iter().copied().max()
    }

    /// Position of a group within an area's recorded issuance sequence.
    ///
    /// Returns `None` when the area is unknown or the group was never
    /// recorded for it.
    pub fn group_position(&self, area_key: &str, group: u8) -> Option<usize> {
        self.groups.get(area_key)?.iter().position(|&g| g == group)
    }
}
