// SPDX-FileCopyrightText: 2026 Ssncheck Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSN Validation Engine
//!
//! Applies the SSA issuance rules in a fixed order; the first failing check
//! decides the verdict and later checks are skipped. The High Group List
//! cache is injected at construction, so the engine can run against a fixed
//! snapshot in tests.

#[cfg(feature = "testing")]
pub mod dob;
#[cfg(not(feature = "testing"))]
mod dob;

#[cfg(feature = "testing")]
pub mod states;
#[cfg(not(feature = "testing"))]
mod states;

#[cfg(feature = "testing")]
pub mod verdict;
#[cfg(not(feature = "testing"))]
mod verdict;

pub use dob::parse_dob;
pub use states::{area_in_ranges, state_area_ranges};
pub use verdict::Verdict;

use std::sync::Arc;

use chrono::Datelike;

use crate::hgl::{HglCache, HighGroupList};
use crate::ssn::Ssn;

/// First year of nationwide SSN issuance; anchor for year estimates.
const FIRST_ISSUANCE_YEAR: usize = 1936;

/// Approximate years of issuance per recorded group-number step.
const YEARS_PER_GROUP_STEP: usize = 2;

/// The SSA switched to randomized issuance in June 2011.
const RANDOMIZATION_YEAR: i32 = 2011;

/// Births before this year predate the high area codes.
const EARLY_ISSUANCE_CUTOFF_YEAR: i32 = 1930;

/// Policy for an SSN whose area is absent from the High Group List.
///
/// An absent area usually means the refresh has not succeeded yet or the
/// area predates HGL coverage, so passing is the historical behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownAreaPolicy {
    /// Treat the missing area as non-conclusive and continue.
    #[default]
    InconclusivePass,
    /// Reject until reference data covering the area is available.
    RejectPendingData,
}

/// Validates SSNs against issuance rules and the High Group List.
pub struct Validator {
    cache: Arc<HglCache>,
    unknown_area_policy: UnknownAreaPolicy,
}

impl Validator {
    /// Creates a validator backed by the given cache.
    pub fn new(cache: Arc<HglCache>) -> Self {
        Validator {
            cache,
            unknown_area_policy: UnknownAreaPolicy::default(),
        }
    }

    /// Overrides the policy for areas missing from the High Group List.
    pub fn with_unknown_area_policy(mut self, policy: UnknownAreaPolicy) -> Self {
        self.unknown_area_policy = policy;
        self
    }

    /// Validates an SSN with optional birth state and date of birth.
    ///
    /// Checks run in a fixed order and short-circuit on the first failure.
    /// An unparseable date or unknown state code is treated as absent input,
    /// not a failure. The only await is the cache snapshot call; a stale
    /// cache refreshes there, and a failed refresh degrades to the previous
    /// snapshot.
    pub async fn validate(&self, ssn: &str, state: Option<&str>, dob: Option<&str>) -> Verdict {
        let ssn = match Ssn::parse(ssn) {
            Ok(ssn) => ssn,
            Err(err) => return Verdict::rejected(err.to_string()),
        };

        let area = ssn.area();
        if area == 0 {
            return Verdict::rejected("Area cannot be 000");
        }
        if area == 666 {
            return Verdict::rejected("Area 666 not issued");
        }
        if (900..=999).contains(&area) {
            return Verdict::rejected("Area 900-999 reserved");
        }
        if ssn.serial() == 0 {
            return Verdict::rejected("Serial cannot be 0000");
        }

        let hgl = self.cache.snapshot().await;
        match hgl.high_group(ssn.area_key()) {
            Some(high) if ssn.group() > high => {
                return Verdict::rejected(format!("Group {} > issued {}", ssn.group(), high));
            }
            Some(_) => {}
            None => {
                if self.unknown_area_policy == UnknownAreaPolicy::RejectPendingData {
                    return Verdict::rejected(format!(
                        "No issuance record for area {}",
                        ssn.area_key()
                    ));
                }
            }
        }

        let dob = dob.and_then(parse_dob);
        if let Some(date) = dob {
            if date.year() < EARLY_ISSUANCE_CUTOFF_YEAR && area > 587 {
                return Verdict::rejected("High area for pre-1930 birth");
            }
            if date.year() > RANDOMIZATION_YEAR && area < 100 {
                return Verdict::rejected("Low area post-randomization");
            }
        }

        let mut matched_state = None;
        if let (Some(code), Some(date)) = (state, dob) {
            if date.year() < RANDOMIZATION_YEAR {
                if let Some(ranges) = state_area_ranges(code) {
                    let code = code.trim().to_ascii_uppercase();
                    if !area_in_ranges(area, ranges) {
                        return Verdict::rejected(format!("Area {} not issued in {}", area, code));
                    }
                    matched_state = Some(code);
                }
            }
        }

        Verdict {
            valid: true,
            reason: "Valid".to_string(),
            matched_state,
            approx_issue_year: estimate_issue_year(&hgl, &ssn),
        }
    }
}

/// Approximates the issuance year from the position of the group in the
/// area's recorded sequence. Informational only; never causes rejection.
fn estimate_issue_year(hgl: &HighGroupList, ssn: &Ssn) -> Option<String> {
    if !hgl.contains_area(ssn.area_key()) {
        return None;
    }
    match hgl.group_position(ssn.area_key(), ssn.group()) {
        Some(position) => Some(format!(
            "~{} (approximate)",
            FIRST_ISSUANCE_YEAR + YEARS_PER_GROUP_STEP * position
        )),
        None => Some("group exceeds issued high group".to_string()),
    }
}
