//! Runs event rules when something happens to a litter, dog, puppy or
//! vaccination.
//!
//! A [`Triggered`] pairs the rule-engine context (anchor date, label and the
//! subject's fields) with the ids the created events are attached to.
//! Handlers call [`fire`] after their own write has committed; the rules
//! endpoint calls [`run`] directly so errors reach the client.

use chrono::Utc;
use kennel_core::calendar::{self, PlannedEvent};
use kennel_core::error::CoreError;
use kennel_core::rules::{
    self, RuleDefinition, TriggerContext, TRIGGER_DOG_ADDED, TRIGGER_LITTER_BRED,
    TRIGGER_LITTER_WHELPED, TRIGGER_PUPPY_SOLD, TRIGGER_VACCINATION_RECORDED,
};
use kennel_core::types::Date;
use kennel_db::models::dog::Dog;
use kennel_db::models::event::{Event, EventRule, RuleSubject};
use kennel_db::models::health::Vaccination;
use kennel_db::models::litter::Litter;
use kennel_db::models::puppy::Puppy;
use kennel_db::repositories::event_repo::EventSubject;
use kennel_db::repositories::{DogRepo, EventRepo, EventRuleRepo, LitterRepo, PuppyRepo, VaccinationRepo};
use kennel_db::DbPool;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// A trigger occurrence ready to be evaluated.
#[derive(Debug, Clone)]
pub struct Triggered {
    pub ctx: TriggerContext,
    pub subject: EventSubject,
}

fn fields_of<T: Serialize>(row: &T) -> Map<String, Value> {
    match serde_json::to_value(row) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    }
}

fn today() -> Date {
    Utc::now().date_naive()
}

/// `litter_bred` anchors on the breeding date, `litter_whelped` on the whelp
/// date. `None` when the litter lacks that date or the trigger is not a
/// litter trigger.
pub fn litter_trigger(trigger_type: &str, litter: &Litter) -> Option<Triggered> {
    let anchor_date = match trigger_type {
        TRIGGER_LITTER_BRED => litter.breeding_date?,
        TRIGGER_LITTER_WHELPED => litter.whelp_date?,
        _ => return None,
    };
    Some(Triggered {
        ctx: TriggerContext {
            trigger_type: trigger_type.to_string(),
            anchor_date,
            subject_label: Some(litter.label()),
            fields: fields_of(litter),
        },
        subject: EventSubject {
            litter_id: Some(litter.id),
            ..Default::default()
        },
    })
}

pub fn dog_added_trigger(dog: &Dog, anchor_date: Date) -> Triggered {
    Triggered {
        ctx: TriggerContext {
            trigger_type: TRIGGER_DOG_ADDED.to_string(),
            anchor_date,
            subject_label: Some(dog.name.clone()),
            fields: fields_of(dog),
        },
        subject: EventSubject {
            dog_id: Some(dog.id),
            ..Default::default()
        },
    }
}

pub fn puppy_sold_trigger(puppy: &Puppy, anchor_date: Date) -> Triggered {
    Triggered {
        ctx: TriggerContext {
            trigger_type: TRIGGER_PUPPY_SOLD.to_string(),
            anchor_date,
            subject_label: Some(puppy.label()),
            fields: fields_of(puppy),
        },
        subject: EventSubject {
            puppy_id: Some(puppy.id),
            ..Default::default()
        },
    }
}

/// Anchors on the administered date so rules can schedule boosters with
/// `offset_days`. Events attach to the vaccinated dog or puppy.
pub fn vaccination_trigger(vaccination: &Vaccination, subject_label: Option<String>) -> Triggered {
    Triggered {
        ctx: TriggerContext {
            trigger_type: TRIGGER_VACCINATION_RECORDED.to_string(),
            anchor_date: vaccination.administered_date,
            subject_label: subject_label.or_else(|| Some(vaccination.vaccine_name.clone())),
            fields: fields_of(vaccination),
        },
        subject: EventSubject {
            dog_id: vaccination.dog_id,
            puppy_id: vaccination.puppy_id,
            ..Default::default()
        },
    }
}

fn missing_subject(field: &str, trigger_type: &str) -> AppError {
    AppError::Core(CoreError::Validation(format!(
        "{field} is required for trigger '{trigger_type}'"
    )))
}

/// Load the subject named in a run/preview request and build its trigger.
pub async fn resolve(
    pool: &DbPool,
    trigger_type: &str,
    subject: &RuleSubject,
) -> AppResult<Triggered> {
    rules::validate_trigger_type(trigger_type)?;

    match trigger_type {
        TRIGGER_LITTER_BRED | TRIGGER_LITTER_WHELPED => {
            let id = subject
                .litter_id
                .ok_or_else(|| missing_subject("litter_id", trigger_type))?;
            let litter = LitterRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::not_found("Litter", id))?;
            litter_trigger(trigger_type, &litter).ok_or_else(|| {
                let field = if trigger_type == TRIGGER_LITTER_BRED {
                    "breeding_date"
                } else {
                    "whelp_date"
                };
                AppError::Core(CoreError::Validation(format!(
                    "Litter {id} has no {field}"
                )))
            })
        }
        TRIGGER_DOG_ADDED => {
            let id = subject
                .dog_id
                .ok_or_else(|| missing_subject("dog_id", trigger_type))?;
            let dog = DogRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::not_found("Dog", id))?;
            Ok(dog_added_trigger(&dog, today()))
        }
        TRIGGER_PUPPY_SOLD => {
            let id = subject
                .puppy_id
                .ok_or_else(|| missing_subject("puppy_id", trigger_type))?;
            let puppy = PuppyRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::not_found("Puppy", id))?;
            Ok(puppy_sold_trigger(&puppy, today()))
        }
        _ => {
            let id = subject
                .vaccination_id
                .ok_or_else(|| missing_subject("vaccination_id", trigger_type))?;
            let vaccination = VaccinationRepo::find_by_id(pool, id)
                .await?
                .ok_or(AppError::not_found("Vaccination", id))?;
            let label = vaccination_subject_label(pool, &vaccination).await?;
            Ok(vaccination_trigger(&vaccination, label))
        }
    }
}

/// Name of the dog or puppy a vaccination belongs to.
pub async fn vaccination_subject_label(
    pool: &DbPool,
    vaccination: &Vaccination,
) -> Result<Option<String>, sqlx::Error> {
    if let Some(dog_id) = vaccination.dog_id {
        return Ok(DogRepo::find_by_id(pool, dog_id).await?.map(|d| d.name));
    }
    if let Some(puppy_id) = vaccination.puppy_id {
        return Ok(PuppyRepo::find_by_id(pool, puppy_id)
            .await?
            .map(|p| p.label()));
    }
    Ok(None)
}

pub fn definition(rule: &EventRule) -> RuleDefinition<'_> {
    RuleDefinition {
        trigger_type: &rule.trigger_type,
        conditions: &rule.conditions,
        action_type: &rule.action_type,
        action_config: &rule.action_config,
    }
}

/// Events a rule would create for a trigger occurrence, before de-duplication.
pub fn plan(rule: &EventRule, triggered: &Triggered) -> Result<Vec<PlannedEvent>, CoreError> {
    rules::plan_actions(&definition(rule), &triggered.ctx)
}

/// Run every active rule for the trigger and persist the planned events.
///
/// Events that already exist for the subject (same title and date) are
/// skipped, so re-running a trigger does not duplicate the calendar. A rule
/// whose stored config cannot be planned is logged and skipped.
pub async fn run(pool: &DbPool, triggered: &Triggered) -> Result<Vec<Event>, sqlx::Error> {
    let active = EventRuleRepo::list_active_for_trigger(pool, &triggered.ctx.trigger_type).await?;
    if active.is_empty() {
        return Ok(Vec::new());
    }

    let mut existing = EventRepo::existing_keys(pool, triggered.subject).await?;
    let mut created = Vec::new();

    for rule in &active {
        let planned = match plan(rule, triggered) {
            Ok(planned) => planned,
            Err(e) => {
                tracing::warn!(rule_id = rule.id, error = %e, "Skipping event rule");
                continue;
            }
        };
        let planned = calendar::drop_existing(planned, &existing);
        if planned.is_empty() {
            continue;
        }

        let events =
            EventRepo::create_planned(pool, &planned, triggered.subject, Some(rule.id)).await?;
        existing.extend(events.iter().map(|e| (e.title.clone(), e.event_date)));

        tracing::info!(
            rule_id = rule.id,
            trigger = %triggered.ctx.trigger_type,
            count = events.len(),
            "Event rule created events"
        );
        created.extend(events);
    }

    Ok(created)
}

/// Run rules after a write that already succeeded. Failures are logged, not
/// returned, so the caller's response reflects its own committed change.
pub async fn fire(pool: &DbPool, triggered: Option<Triggered>) {
    let Some(triggered) = triggered else {
        return;
    };
    if let Err(e) = run(pool, &triggered).await {
        tracing::error!(
            trigger = %triggered.ctx.trigger_type,
            error = %e,
            "Failed to run event rules"
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn litter(breeding: Option<Date>, whelp: Option<Date>) -> Litter {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        Litter {
            id: 4,
            name: Some("Spring litter".into()),
            dam_id: 1,
            sire_id: Some(2),
            breeding_date: breeding,
            expected_whelp_date: None,
            whelp_date: whelp,
            status: "whelped".into(),
            puppy_count: Some(5),
            price_cents: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn litter_trigger_anchors_on_matching_date() {
        let l = litter(Some(date(2026, 1, 10)), Some(date(2026, 3, 14)));

        let bred = litter_trigger(TRIGGER_LITTER_BRED, &l).unwrap();
        assert_eq!(bred.ctx.anchor_date, date(2026, 1, 10));
        assert_eq!(bred.subject.litter_id, Some(4));
        assert_eq!(bred.ctx.subject_label.as_deref(), Some("Spring litter"));

        let whelped = litter_trigger(TRIGGER_LITTER_WHELPED, &l).unwrap();
        assert_eq!(whelped.ctx.anchor_date, date(2026, 3, 14));
        assert_eq!(whelped.ctx.fields.get("puppy_count"), Some(&Value::from(5)));
    }

    #[test]
    fn litter_trigger_needs_its_date() {
        let l = litter(Some(date(2026, 1, 10)), None);
        assert!(litter_trigger(TRIGGER_LITTER_WHELPED, &l).is_none());
        assert!(litter_trigger(TRIGGER_DOG_ADDED, &l).is_none());
    }

    #[test]
    fn vaccination_trigger_targets_owner() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let v = Vaccination {
            id: 9,
            dog_id: None,
            puppy_id: Some(12),
            vaccine_name: "DHPP".into(),
            administered_date: date(2026, 4, 1),
            next_due_date: Some(date(2026, 4, 22)),
            administered_by: None,
            lot_number: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let t = vaccination_trigger(&v, Some("Blue collar".into()));
        assert_eq!(t.subject.puppy_id, Some(12));
        assert_eq!(t.subject.dog_id, None);
        assert_eq!(t.ctx.anchor_date, date(2026, 4, 1));
        assert_eq!(t.ctx.subject_label.as_deref(), Some("Blue collar"));
    }
}
