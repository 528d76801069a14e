//! Pay-condition resolution.
//!
//! Splits one shift into chronological [`ConditionSegment`]s, each governed by a
//! single ordinary pay condition. Overtime is never assigned here.
//!
//! ## Rules, first match wins
//!
//! 1. Public holiday: the whole shift is `public-holiday`.
//! 2. Sunday: the whole shift is `sunday`.
//! 3. Saturday: the whole shift is `saturday`.
//! 4. Weekday: time inside the ordinary band is `base`, time outside it is
//!    `shift-early-late`.
//!
//! A shift crossing midnight inherits its start day's classification. On a
//! weekday the band is applied to each clock day the shift touches, so the
//! hours after midnight up to the band start are `shift-early-late`.
//!
//! The unpaid break comes out of `base` time, proportionally across `base`
//! segments. Only when there is not enough `base` time does the rest come out
//! of the earliest segments.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    ConditionSegment, Day, MINUTES_PER_DAY, OrdinaryBand, PayCondition, Shift, ShiftSpan,
};

/// Returns the condition a day imposes on a whole shift, or `None` on weekdays.
pub fn day_condition(day: Day) -> Option<PayCondition> {
    match day {
        Day::PublicHoliday => Some(PayCondition::PublicHoliday),
        Day::Sunday => Some(PayCondition::Sunday),
        Day::Saturday => Some(PayCondition::Saturday),
        Day::Monday | Day::Tuesday | Day::Wednesday | Day::Thursday | Day::Friday => None,
    }
}

/// Resolves a shift into pay-condition segments.
///
/// Segment `minutes` sum to the shift's worked minutes. Segments left with
/// no paid minutes after the break are dropped, so a shift whose break equals
/// its length resolves to no segments.
///
/// # Errors
///
/// Returns [`EngineError::InvalidShift`](crate::error::EngineError::InvalidShift)
/// for a malformed time range, break or headcount.
///
/// # Example
///
/// ```
/// use cleaning_award_engine::calculation::resolve_pay_conditions;
/// use cleaning_award_engine::models::{
///     Day, EmployeeLevel, EmploymentType, OrdinaryBand, PayCondition, Shift,
/// };
/// use chrono::NaiveTime;
///
/// let shift = Shift {
///     id: "shift_001".to_string(),
///     day: Day::Tuesday,
///     start_time: NaiveTime::from_hms_opt(4, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     break_duration_minutes: 0,
///     number_of_cleaners: 1,
///     employment_type: EmploymentType::FullTime,
///     level: EmployeeLevel::new(1).unwrap(),
///     allowances: Default::default(),
///     location: String::new(),
///     notes: String::new(),
/// };
///
/// let segments = resolve_pay_conditions(&shift, &OrdinaryBand::default()).unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].pay_condition, PayCondition::ShiftEarlyLate);
/// assert_eq!(segments[0].minutes, 120);
/// assert_eq!(segments[1].pay_condition, PayCondition::Base);
/// assert_eq!(segments[1].minutes, 360);
/// ```
pub fn resolve_pay_conditions(
    shift: &Shift,
    band: &OrdinaryBand,
) -> EngineResult<Vec<ConditionSegment>> {
    let span = shift.span()?;

    let mut segments = match day_condition(shift.day) {
        Some(condition) => vec![whole_span(&span, condition)],
        None => split_by_band(&span, band),
    };
    deduct_break(&mut segments, span.break_minutes);
    segments.retain(|segment| segment.minutes > 0);

    debug!(
        shift_id = %shift.id,
        day = %shift.day,
        segments = segments.len(),
        worked_minutes = span.worked_minutes(),
        "Resolved pay conditions"
    );

    Ok(segments)
}

fn whole_span(span: &ShiftSpan, condition: PayCondition) -> ConditionSegment {
    ConditionSegment {
        pay_condition: condition,
        start_minute: span.start_minute,
        end_minute: span.end_minute,
        minutes: span.duration_minutes(),
    }
}

/// Cuts the span at every band edge it crosses and labels each piece.
fn split_by_band(span: &ShiftSpan, band: &OrdinaryBand) -> Vec<ConditionSegment> {
    let band_start = band.start_minute();
    let band_end = band.end_minute();

    let mut cuts = vec![span.start_minute, span.end_minute];
    let mut day_offset = 0;
    while day_offset < span.end_minute {
        for edge in [day_offset + band_start, day_offset + band_end] {
            if edge > span.start_minute && edge < span.end_minute {
                cuts.push(edge);
            }
        }
        day_offset += MINUTES_PER_DAY;
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut segments: Vec<ConditionSegment> = Vec::new();
    for window in cuts.windows(2) {
        let (start, end) = (window[0], window[1]);
        let clock = start % MINUTES_PER_DAY;
        let condition = if clock >= band_start && clock < band_end {
            PayCondition::Base
        } else {
            PayCondition::ShiftEarlyLate
        };

        match segments.last_mut() {
            Some(last) if last.pay_condition == condition => {
                last.end_minute = end;
                last.minutes += end - start;
            }
            _ => segments.push(ConditionSegment {
                pay_condition: condition,
                start_minute: start,
                end_minute: end,
                minutes: end - start,
            }),
        }
    }
    segments
}

/// Takes the break out of `base` time first, then out of the earliest segments.
fn deduct_break(segments: &mut [ConditionSegment], break_minutes: u32) {
    if break_minutes == 0 {
        return;
    }

    let base_total: u32 = segments
        .iter()
        .filter(|s| s.pay_condition == PayCondition::Base)
        .map(|s| s.minutes)
        .sum();
    let from_base = break_minutes.min(base_total);
    let mut remaining = break_minutes - from_base;

    if from_base > 0 {
        // Proportional shares, rounded down; the leftover goes to the earliest
        // base segments that still have time.
        let mut taken = 0;
        for segment in segments
            .iter_mut()
            .filter(|s| s.pay_condition == PayCondition::Base)
        {
            let share = (u64::from(from_base) * u64::from(segment.minutes)
                / u64::from(base_total)) as u32;
            segment.minutes -= share;
            taken += share;
        }
        let mut leftover = from_base - taken;
        for segment in segments
            .iter_mut()
            .filter(|s| s.pay_condition == PayCondition::Base)
        {
            if leftover == 0 {
                break;
            }
            let take = leftover.min(segment.minutes);
            segment.minutes -= take;
            leftover -= take;
        }
    }

    for segment in segments.iter_mut() {
        if remaining == 0 {
            break;
        }
        let take = remaining.min(segment.minutes);
        segment.minutes -= take;
        remaining -= take;
    }
}
