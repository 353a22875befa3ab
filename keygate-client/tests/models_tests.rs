mod common;

use chrono::{Duration as ChronoDuration, Utc};
use common::card_json;
use keygate_client::{ApiEnvelope, CardRecord, CardStatus, LoginOutcome, ProjectInfo};
use pretty_assertions::assert_eq;
use serde_json::json;

fn card_from(value: serde_json::Value) -> CardRecord {
    serde_json::from_value(value).unwrap()
}

// ── Card record ──────────────────────────────────────────────────

#[test]
fn card_parses_full_snapshot() {
    let card = card_from(card_json(true));

    assert_eq!(card.id, 42);
    assert_eq!(card.card_key, "ABC-123");
    assert!(card.activated);
    assert!(!card.frozen);
    assert_eq!(card.duration, 2_592_000);
    assert_eq!(card.card_type, "month");
    assert_eq!(card.hwid_list, vec!["device-1".to_string()]);
    assert_eq!(card.max_hwid, 3);
    assert_eq!(card.max_ip, -1);
    assert!(card.activated_at.is_some());
}

#[test]
fn card_parses_minimal_snapshot_with_defaults() {
    let card = card_from(json!({ "id": 1, "card_key": "K" }));

    assert!(!card.activated);
    assert!(!card.frozen);
    assert_eq!(card.duration, 0);
    assert!(card.expire_at.is_none());
    assert!(card.hwid_list.is_empty());
    assert_eq!(card.max_hwid, -1, "missing cap defaults to unlimited");
    assert_eq!(card.max_ip, -1);
}

#[test]
fn expiry_requires_activation_and_a_duration() {
    let past = Utc::now() - ChronoDuration::days(1);

    let mut card = card_from(card_json(true));
    card.expire_at = Some(past);
    assert!(card.is_expired());

    card.activated = false;
    assert!(!card.is_expired(), "unactivated cards never expire");

    card.activated = true;
    card.duration = 0;
    assert!(!card.is_expired(), "untimed cards never expire");

    card.duration = 60;
    card.expire_at = None;
    assert!(!card.is_expired());
}

#[test]
fn status_prefers_frozen() {
    let mut card = card_from(card_json(true));
    assert_eq!(card.status(), CardStatus::Activated);

    card.frozen = true;
    assert_eq!(card.status(), CardStatus::Frozen);

    card.frozen = false;
    card.activated = false;
    assert_eq!(card.status(), CardStatus::NotActivated);
}

#[test]
fn binding_caps() {
    let mut card = card_from(card_json(true));
    assert!(card.can_bind_hwid(), "one of three slots used");

    card.hwid_list = vec!["a".into(), "b".into(), "c".into()];
    assert!(!card.can_bind_hwid());

    card.max_hwid = -1;
    assert!(card.can_bind_hwid(), "-1 means unlimited");

    assert!(card.can_bind_ip());
}

// ── Envelope ─────────────────────────────────────────────────────

#[test]
fn envelope_parses_success_with_data() {
    let envelope: ApiEnvelope<ProjectInfo> = serde_json::from_value(json!({
        "code": 0,
        "message": "ok",
        "data": {
            "uuid": "u",
            "name": "n",
            "version": "1.0.0",
            "update_url": "https://example.com",
        },
    }))
    .unwrap();

    assert_eq!(envelope.code, 0);
    assert_eq!(envelope.data.unwrap().version, "1.0.0");
}

#[test]
fn envelope_parses_rejection_without_data() {
    let envelope: ApiEnvelope<ProjectInfo> = serde_json::from_value(json!({
        "code": 401,
        "message": "token expired",
    }))
    .unwrap();

    assert_eq!(envelope.code, 401);
    assert!(envelope.data.is_none());
}

// ── Login outcome ────────────────────────────────────────────────

#[test]
fn login_outcome_round_trips_through_json() {
    let outcome: LoginOutcome = serde_json::from_value(json!({
        "token": "tok",
        "expire_at": "2026-02-09T08:30:00Z",
        "card": card_json(true),
    }))
    .unwrap();

    let back = serde_json::to_value(&outcome).unwrap();
    assert_eq!(back["token"], "tok");
    assert_eq!(back["card"]["id"], 42);
}
