//! Broken-shift detection.
//!
//! A cohort works a broken shift on a day when its shifts that day cannot be
//! merged into one continuous block. Shifts that overlap or touch end to start
//! are continuous; any gap of one minute or more breaks the day.
//!
//! Findings are advisory. The `broken-shift` allowance is never applied here.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::error::EngineResult;
use crate::models::{BrokenShift, CohortKey, Day, Shift};

/// Returns every `(day, cohort)` pair with a gap between its shifts.
///
/// # Errors
///
/// Returns [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift)
/// if any shift is malformed.
pub fn detect_broken_shifts_by_cohort(shifts: &[Shift]) -> EngineResult<BTreeSet<BrokenShift>> {
    let mut groups: BTreeMap<(Day, CohortKey), Vec<(u32, u32)>> = BTreeMap::new();
    for shift in shifts {
        let span = shift.span()?;
        groups
            .entry((shift.day, shift.cohort()))
            .or_default()
            .push((span.start_minute, span.end_minute));
    }

    let mut broken = BTreeSet::new();
    for ((day, cohort), mut intervals) in groups {
        if intervals.len() < 2 {
            continue;
        }
        intervals.sort_unstable();

        let mut block_end = intervals[0].1;
        let has_gap = intervals[1..].iter().any(|&(start, end)| {
            let gap = start > block_end;
            block_end = block_end.max(end);
            gap
        });

        if has_gap {
            broken.insert(BrokenShift { day, cohort });
        }
    }

    Ok(broken)
}

/// Returns the days on which any cohort works a broken shift.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::detect_broken_shifts;
/// use cleaning_award_engine::models::{Day, EmployeeLevel, EmploymentType, Shift};
/// use chrono::NaiveTime;
///
/// let shift = |id: &str, start: u32, end: u32| Shift {
///     id: id.to_string(),
///     day: Day::Monday,
///     start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
///     break_duration_minutes: 0,
///     number_of_cleaners: 1,
///     employment_type: EmploymentType::PartTime,
///     level: EmployeeLevel::new(1).unwrap(),
///     allowances: Default::default(),
///     location: String::new(),
///     notes: String::new(),
/// };
///
/// let split = [shift("am", 8, 12), shift("pm", 14, 18)];
/// assert!(detect_broken_shifts(&split).unwrap().contains(&Day::Monday));
///
/// let continuous = [shift("am", 8, 12), shift("pm", 12, 16)];
/// assert!(detect_broken_shifts(&continuous).unwrap().is_empty());
/// ```
pub fn detect_broken_shifts(shifts: &[Shift]) -> EngineResult<BTreeSet<Day>> {
    let findings = detect_broken_shifts_by_cohort(shifts)?;
    for finding in &findings {
        info!(
            day = %finding.day,
            cohort = %finding.cohort,
            "Broken shift candidate"
        );
    }
    Ok(findings.into_iter().map(|finding| finding.day).collect())
}
