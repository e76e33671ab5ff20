use mistake_journal_core::{
    entry_views, AnswerSet, Clock, FieldSchema, FieldValue, FormError, FormState, JournalConfig,
    JournalForm, ManualClock, MemoryStorage, RecordingSink, StorageEvents, SubmitOutcome,
};
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

const PROMPTS: [&str; 5] = [
    "mistakes",
    "triggers",
    "effects",
    "three_months",
    "tomorrow_steps",
];

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 22, 15, 0).unwrap())
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

#[test]
fn typed_draft_survives_reload() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default().with_debounce_ms(400);
    let clock = clock();

    {
        let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);
        assert!(!form.restored_from_draft());
        form.on_field_change("mistakes", "Forgot my umbrella").unwrap();
        assert!(form.has_pending_save());

        clock.advance(Duration::from_millis(450));
        assert!(form.tick());
    }

    let form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);
    assert!(form.restored_from_draft());
    let answers = form.current_answers();
    assert_eq!(answers.text("mistakes").as_deref(), Some("Forgot my umbrella"));
    for name in &PROMPTS[1..] {
        assert_eq!(answers.text(name).as_deref(), Some(""));
    }
    assert_eq!(answers.get("date"), Some(&FieldValue::Date(today())));
}

#[test]
fn date_only_edit_survives_reload() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let clock = clock();

    {
        let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);
        form.on_field_change("date", "2026-10-01").unwrap();
        assert!(form.drafts().exists());
    }

    let form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);
    assert!(form.restored_from_draft());
    assert_eq!(
        form.current_answers().get("date"),
        Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()))
    );
}

#[test]
fn resetting_date_to_today_removes_draft() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    form.on_field_change("date", "2026-10-01").unwrap();
    assert!(form.drafts().exists());

    form.on_field_change("date", today()).unwrap();
    assert!(!form.drafts().exists());
}

#[test]
fn zero_window_saves_on_every_change() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::undated();
    let config = JournalConfig::default();
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    form.on_field_change("mistakes", "a").unwrap();
    form.on_field_change("mistakes", "ab").unwrap();

    assert!(!form.has_pending_save());
    assert_eq!(storage.write_count(), 2);
    assert!(form.drafts().exists());
}

#[test]
fn clearing_all_text_removes_draft() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    form.on_field_change("effects", "Late to class").unwrap();
    assert!(form.drafts().exists());

    form.on_field_change("effects", "   ").unwrap();
    assert!(!form.drafts().exists());
}

#[test]
fn complete_submission_stores_entry_clears_draft_and_resets() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    form.on_field_change("date", "2026-10-16").unwrap();
    for name in PROMPTS {
        form.on_field_change(name, format!("{name} text")).unwrap();
    }
    assert!(form.is_valid());

    let entry = match form.on_submit().unwrap() {
        SubmitOutcome::Accepted(entry) => entry,
        SubmitOutcome::Rejected(errors) => panic!("unexpected rejection: {errors}"),
    };

    let listed = form.entries().list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], entry);
    assert_eq!(entry.created_at, clock.now());
    assert_eq!(entry.created_at, entry.updated_at);
    assert_eq!(
        entry.data.get("date"),
        Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()))
    );

    assert!(!form.drafts().exists());
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(
        form.current_answers(),
        &AnswerSet::defaults(&schema, today())
    );
    assert!(form.field_errors().is_empty());
}

#[test]
fn submission_with_empty_triggers_is_rejected() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::undated();
    let config = JournalConfig::default();
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    for name in PROMPTS.iter().filter(|name| **name != "triggers") {
        form.on_field_change(name, "filled").unwrap();
    }
    let writes = storage.write_count();

    let errors = match form.on_submit().unwrap() {
        SubmitOutcome::Rejected(errors) => errors,
        SubmitOutcome::Accepted(_) => panic!("submission should be rejected"),
    };

    assert_eq!(errors.field_names().collect::<Vec<_>>(), vec!["triggers"]);
    assert_eq!(form.field_errors(), errors);
    assert!(form.entries().list().is_empty());
    assert_eq!(storage.write_count(), writes);
    assert!(form.drafts().exists());
    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(
        form.current_answers().text("mistakes").as_deref(),
        Some("filled")
    );
}

#[test]
fn submit_cancels_pending_debounced_save() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::undated();
    let config = JournalConfig::default().with_debounce_ms(1_000);
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    for name in PROMPTS {
        form.on_field_change(name, "done").unwrap();
    }
    assert!(form.has_pending_save());
    assert!(matches!(form.on_submit().unwrap(), SubmitOutcome::Accepted(_)));

    clock.advance(Duration::from_secs(5));
    assert!(!form.tick());
    assert!(!form.drafts().exists());
    assert_eq!(form.entries().list().len(), 1);
}

#[test]
fn close_cancels_pending_save_and_blocks_input() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::undated();
    let config = JournalConfig::default().with_debounce_ms(250);
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    form.on_field_change("mistakes", "unsaved").unwrap();
    form.close();
    form.close();

    clock.advance(Duration::from_secs(1));
    assert!(!form.tick());
    assert_eq!(storage.write_count(), 0);
    assert!(form.is_closed());
    assert_eq!(
        form.on_field_change("mistakes", "more"),
        Err(FormError::Closed)
    );
    assert_eq!(form.on_submit(), Err(FormError::Closed));
}

#[test]
fn corrupt_draft_opens_with_defaults() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let clock = clock();
    let sink = Arc::new(RecordingSink::new());
    storage.put_raw(&config.draft_key, "{\"mistakes\":");

    let form = JournalForm::open(
        &storage,
        &schema,
        &config,
        StorageEvents::new().with_sink(sink.clone()),
        &clock,
    );

    assert!(!form.restored_from_draft());
    assert_eq!(form.current_answers(), &AnswerSet::defaults(&schema, today()));
    assert_eq!(sink.events().len(), 1);
}

#[test]
fn form_stays_usable_when_storage_is_unavailable() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::undated();
    let config = JournalConfig::default();
    let clock = clock();
    let sink = Arc::new(RecordingSink::new());
    storage.set_unavailable(true);
    let mut form = JournalForm::open(
        &storage,
        &schema,
        &config,
        StorageEvents::new().with_sink(sink.clone()),
        &clock,
    );

    for name in PROMPTS {
        form.on_field_change(name, "offline").unwrap();
    }
    let outcome = form.on_submit().unwrap();

    assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
    assert_eq!(form.current_answers().text("mistakes").as_deref(), Some(""));
    assert!(!sink.is_empty());
}

#[test]
fn submitted_entries_render_newest_first() {
    let storage = MemoryStorage::new();
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let clock = clock();
    let mut form = JournalForm::open(&storage, &schema, &config, StorageEvents::new(), &clock);

    for day in ["2026-10-15", "2026-10-16"] {
        form.on_field_change("date", day).unwrap();
        for name in PROMPTS {
            form.on_field_change(name, format!("{name} on {day}")).unwrap();
        }
        form.on_submit().unwrap();
        clock.advance(Duration::from_secs(60));
    }

    let views = entry_views(&schema, &form.entries().list());
    let headings: Vec<&str> = views.iter().map(|view| view.heading.as_str()).collect();
    assert_eq!(headings, vec!["October 16, 2026", "October 15, 2026"]);
    assert!(views
        .iter()
        .all(|view| view.fields.iter().all(|field| field.name != "date")));
}
