use crate::domain::model::Slot;
use chrono::{NaiveDate, NaiveTime};

/// Opening hour of the synthetic fallback schedule.
pub const FALLBACK_OPEN_HOUR: u32 = 6;
/// Closing hour (exclusive) of the synthetic fallback schedule.
pub const FALLBACK_CLOSE_HOUR: u32 = 23;

/// Slots offered for a calendar date, sorted ascending by start time.
///
/// If the venue declares no slots at all, or none fall on the requested
/// date, a synthetic hourly schedule from 06:00 up to 23:00 is returned
/// instead. The synthesis can mask a genuinely fully-booked day, so it is
/// logged rather than done silently.
pub fn slots_for_date(declared: &[Slot], date: NaiveDate) -> Vec<Slot> {
    let mut matching: Vec<Slot> = declared
        .iter()
        .filter(|slot| slot.date == date)
        .copied()
        .collect();

    if matching.is_empty() {
        tracing::warn!(%date, "no declared slots for date, synthesizing hourly fallback");
        return fallback_slots(date);
    }

    matching.sort_by_key(|slot| slot.start_time);
    matching
}

fn fallback_slots(date: NaiveDate) -> Vec<Slot> {
    (FALLBACK_OPEN_HOUR..FALLBACK_CLOSE_HOUR)
        .filter_map(|hour| {
            let start_time = NaiveTime::from_hms_opt(hour, 0, 0)?;
            let end_time = NaiveTime::from_hms_opt(hour + 1, 0, 0)?;
            Some(Slot {
                date,
                start_time,
                end_time,
            })
        })
        .collect()
}

/// How many consecutive slots can be purchased starting from `start_time`.
///
/// `slots` must be the sorted slots-for-date list. Counting stops at the
/// first gap or overlap (a slot whose start is not exactly the previous
/// slot's end). An absent start slot yields 1, the minimum purchasable
/// duration, as a defensive default.
pub fn max_contiguous_hours(slots: &[Slot], start_time: NaiveTime) -> u32 {
    let Some(start_idx) = slots.iter().position(|slot| slot.start_time == start_time) else {
        return 1;
    };

    let mut hours = 1;
    let mut idx = start_idx;
    while idx + 1 < slots.len() && slots[idx].end_time == slots[idx + 1].start_time {
        hours += 1;
        idx += 1;
    }
    hours
}

/// End time of the contiguous run containing the slot that starts at
/// `start_time`, or `None` if no slot starts there.
pub fn contiguous_run_end(slots: &[Slot], start_time: NaiveTime) -> Option<NaiveTime> {
    let start_idx = slots.iter().position(|slot| slot.start_time == start_time)?;

    let mut idx = start_idx;
    while idx + 1 < slots.len() && slots[idx].end_time == slots[idx + 1].start_time {
        idx += 1;
    }
    Some(slots[idx].end_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 10).unwrap()
    }

    fn slot(day: NaiveDate, start: (u32, u32), end: (u32, u32)) -> Slot {
        Slot {
            date: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_fallback_when_no_slots_declared() {
        let slots = slots_for_date(&[], date());
        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0].start_time, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(slots[0].end_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(
            slots.last().unwrap().start_time,
            NaiveTime::from_hms_opt(22, 0, 0).unwrap()
        );
        assert_eq!(
            slots.last().unwrap().end_time,
            NaiveTime::from_hms_opt(23, 0, 0).unwrap()
        );
        assert!(slots.iter().all(|s| s.date == date()));
    }

    #[test]
    fn test_fallback_when_no_slots_match_date() {
        let other_day = NaiveDate::from_ymd_opt(2026, 8, 11).unwrap();
        let declared = vec![slot(other_day, (10, 0), (11, 0))];
        let slots = slots_for_date(&declared, date());
        assert_eq!(slots.len(), 17);
    }

    #[test]
    fn test_matching_slots_are_filtered_and_sorted() {
        let other_day = NaiveDate::from_ymd_opt(2026, 8, 11).unwrap();
        let declared = vec![
            slot(date(), (9, 0), (10, 0)),
            slot(other_day, (6, 0), (7, 0)),
            slot(date(), (7, 0), (8, 0)),
            slot(date(), (6, 0), (7, 0)),
        ];
        let slots = slots_for_date(&declared, date());
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].start_time, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(slots[1].start_time, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(slots[2].start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_contiguous_run_stops_at_gap() {
        // 06-07 and 07-08 chain; 09-10 is separated by a one-hour gap.
        let slots = vec![
            slot(date(), (6, 0), (7, 0)),
            slot(date(), (7, 0), (8, 0)),
            slot(date(), (9, 0), (10, 0)),
        ];
        let six = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(max_contiguous_hours(&slots, six), 2);
        assert_eq!(
            contiguous_run_end(&slots, six),
            Some(NaiveTime::from_hms_opt(8, 0, 0).unwrap())
        );

        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(max_contiguous_hours(&slots, nine), 1);
    }

    #[test]
    fn test_missing_start_slot_defaults_to_one() {
        let slots = vec![slot(date(), (6, 0), (7, 0))];
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(max_contiguous_hours(&slots, noon), 1);
        assert_eq!(contiguous_run_end(&slots, noon), None);
    }

    #[test]
    fn test_first_entry_run_equals_maximal_prefix_run() {
        // Full fallback schedule is one unbroken run of 17.
        let slots = slots_for_date(&[], date());
        assert_eq!(max_contiguous_hours(&slots, slots[0].start_time), 17);

        // Introduce a gap after the third entry and the prefix run shrinks.
        let broken: Vec<Slot> = slots
            .iter()
            .copied()
            .filter(|s| s.start_time != NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .collect();
        assert_eq!(max_contiguous_hours(&broken, broken[0].start_time), 3);
    }
}
