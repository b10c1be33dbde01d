//! Litter milestone tables and date computation.
//!
//! Two fixed schedules: puppy development milestones counted from the whelp
//! date, and pregnancy milestones counted from the breeding date.

use chrono::TimeDelta;

use crate::calendar::{PlannedEvent, EVENT_MILESTONE, EVENT_PREGNANCY, EVENT_VET, EVENT_WHELPING};
use crate::types::Date;

/// One row of a milestone schedule.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneTemplate {
    pub title: &'static str,
    pub offset_days: i64,
    pub event_type: &'static str,
    pub description: &'static str,
}

/// Development milestones, counted in days from the whelp date.
pub const WHELP_MILESTONES: &[MilestoneTemplate] = &[
    MilestoneTemplate {
        title: "Dewclaw check",
        offset_days: 3,
        event_type: EVENT_VET,
        description: "Check dewclaws and overall condition of each puppy.",
    },
    MilestoneTemplate {
        title: "Eyes opening",
        offset_days: 14,
        event_type: EVENT_MILESTONE,
        description: "Puppies' eyes begin to open.",
    },
    MilestoneTemplate {
        title: "First deworming",
        offset_days: 14,
        event_type: EVENT_VET,
        description: "Administer the first deworming dose.",
    },
    MilestoneTemplate {
        title: "Ears opening",
        offset_days: 21,
        event_type: EVENT_MILESTONE,
        description: "Ear canals open; puppies start reacting to sound.",
    },
    MilestoneTemplate {
        title: "Start weaning",
        offset_days: 21,
        event_type: EVENT_MILESTONE,
        description: "Introduce softened food alongside nursing.",
    },
    MilestoneTemplate {
        title: "Second deworming",
        offset_days: 28,
        event_type: EVENT_VET,
        description: "Administer the second deworming dose.",
    },
    MilestoneTemplate {
        title: "First vaccination",
        offset_days: 42,
        event_type: EVENT_VET,
        description: "First round of puppy vaccinations.",
    },
    MilestoneTemplate {
        title: "Temperament evaluation",
        offset_days: 49,
        event_type: EVENT_MILESTONE,
        description: "Evaluate temperament for placement matching.",
    },
    MilestoneTemplate {
        title: "Go-home vet check",
        offset_days: 56,
        event_type: EVENT_VET,
        description: "Final health check before puppies leave.",
    },
    MilestoneTemplate {
        title: "Go-home day",
        offset_days: 56,
        event_type: EVENT_MILESTONE,
        description: "Puppies are old enough to go to their new homes.",
    },
];

/// Pregnancy milestones, counted in days from the breeding date.
pub const PREGNANCY_MILESTONES: &[MilestoneTemplate] = &[
    MilestoneTemplate {
        title: "Progesterone follow-up",
        offset_days: 2,
        event_type: EVENT_VET,
        description: "Confirm ovulation timing with a progesterone test.",
    },
    MilestoneTemplate {
        title: "Ultrasound confirmation",
        offset_days: 28,
        event_type: EVENT_PREGNANCY,
        description: "Ultrasound to confirm pregnancy.",
    },
    MilestoneTemplate {
        title: "X-ray puppy count",
        offset_days: 55,
        event_type: EVENT_VET,
        description: "X-ray to count puppies before whelping.",
    },
    MilestoneTemplate {
        title: "Prepare whelping box",
        offset_days: 58,
        event_type: EVENT_PREGNANCY,
        description: "Set up the whelping area and supplies.",
    },
    MilestoneTemplate {
        title: "Expected whelping",
        offset_days: crate::litters::GESTATION_DAYS,
        event_type: EVENT_WHELPING,
        description: "Expected whelping date.",
    },
];

/// Expand a schedule from an anchor date. `label` (usually the litter name)
/// prefixes each title so events from different litters stay distinguishable.
/// Milestones that would fall past the end of the calendar are dropped.
pub fn expand(schedule: &[MilestoneTemplate], anchor: Date, label: Option<&str>) -> Vec<PlannedEvent> {
    schedule
        .iter()
        .filter_map(|m| {
            let event_date = TimeDelta::try_days(m.offset_days)
                .and_then(|delta| anchor.checked_add_signed(delta))?;
            Some(PlannedEvent {
                title: labelled_title(label, m.title),
                description: Some(m.description.to_string()),
                event_type: m.event_type.to_string(),
                event_date,
            })
        })
        .collect()
}

/// Development milestones for a litter whelped on `whelp_date`.
pub fn whelp_milestones(whelp_date: Date, label: Option<&str>) -> Vec<PlannedEvent> {
    expand(WHELP_MILESTONES, whelp_date, label)
}

/// Pregnancy milestones for a breeding on `breeding_date`.
pub fn pregnancy_milestones(breeding_date: Date, label: Option<&str>) -> Vec<PlannedEvent> {
    expand(PREGNANCY_MILESTONES, breeding_date, label)
}

/// All milestones applicable to a litter given which of its dates are known,
/// ordered by date.
pub fn litter_milestones(
    breeding_date: Option<Date>,
    whelp_date: Option<Date>,
    label: Option<&str>,
) -> Vec<PlannedEvent> {
    let mut events = Vec::new();
    if let Some(bred) = breeding_date {
        events.extend(pregnancy_milestones(bred, label));
    }
    if let Some(whelped) = whelp_date {
        events.extend(whelp_milestones(whelped, label));
    }
    // Stable sort keeps schedule order for milestones on the same day.
    events.sort_by_key(|e| e.event_date);
    events
}

fn labelled_title(label: Option<&str>, title: &str) -> String {
    match label.map(str::trim).filter(|l| !l.is_empty()) {
        Some(l) => format!("{l}: {title}"),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn whelp_milestones_offsets() {
        let events = whelp_milestones(date(2026, 3, 1), None);
        assert_eq!(events.len(), WHELP_MILESTONES.len());
        assert_eq!(events[0].title, "Dewclaw check");
        assert_eq!(events[0].event_date, date(2026, 3, 4));
        let go_home = events.iter().find(|e| e.title == "Go-home day").unwrap();
        assert_eq!(go_home.event_date, date(2026, 4, 26));
    }

    #[test]
    fn pregnancy_milestones_end_at_expected_whelp() {
        let events = pregnancy_milestones(date(2026, 1, 1), None);
        let last = events.last().unwrap();
        assert_eq!(last.title, "Expected whelping");
        assert_eq!(last.event_date, date(2026, 3, 5));
        assert_eq!(last.event_type, EVENT_WHELPING);
    }

    #[test]
    fn label_prefixes_titles() {
        let events = whelp_milestones(date(2026, 3, 1), Some("Bella x Duke"));
        assert_eq!(events[1].title, "Bella x Duke: Eyes opening");
    }

    #[test]
    fn blank_label_ignored() {
        let events = whelp_milestones(date(2026, 3, 1), Some("  "));
        assert_eq!(events[1].title, "Eyes opening");
    }

    #[test]
    fn litter_milestones_combine_and_sort() {
        let events = litter_milestones(Some(date(2026, 1, 1)), Some(date(2026, 3, 4)), None);
        assert_eq!(
            events.len(),
            WHELP_MILESTONES.len() + PREGNANCY_MILESTONES.len()
        );
        assert!(events.windows(2).all(|w| w[0].event_date <= w[1].event_date));
        assert_eq!(events[0].title, "Progesterone follow-up");
    }

    #[test]
    fn milestones_past_calendar_end_are_dropped() {
        assert!(whelp_milestones(Date::MAX, None).is_empty());
        let near_end = Date::MAX - TimeDelta::days(20);
        let events = whelp_milestones(near_end, None);
        assert!(!events.is_empty());
        assert!(events.len() < WHELP_MILESTONES.len());
    }

    #[test]
    fn litter_milestones_without_dates_is_empty() {
        assert!(litter_milestones(None, None, None).is_empty());
    }

    #[test]
    fn same_day_milestones_keep_schedule_order() {
        let events = litter_milestones(None, Some(date(2026, 3, 1)), None);
        let day14: Vec<_> = events
            .iter()
            .filter(|e| e.event_date == date(2026, 3, 15))
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(day14, vec!["Eyes opening", "First deworming"]);
    }
}
