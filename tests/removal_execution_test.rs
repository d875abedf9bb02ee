//! Removal execution tests
//!
//! Covers disbandment, the updated carpool snapshot and the exact
//! notification fan-out for each remover.

mod helpers;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use helpers::*;
use std::collections::HashSet;
use CarpoolBuddy::models::{NotificationKind, RemovalRequestStatus};
use CarpoolBuddy::{
    create_removal_request, execute_driver_removal, CarpoolBuddyError, RemovalPolicy, RemovalService,
};

fn recipients(kind: NotificationKind, result: &CarpoolBuddy::models::RemovalResult) -> Vec<String> {
    result
        .notifications
        .iter()
        .filter(|n| n.kind == kind)
        .map(|n| n.recipient.clone())
        .collect()
}

#[test]
fn test_removing_only_driver_disbands() {
    init_test_env();
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_passenger("b").build();
    let event = event_in_hours(48);

    let result = service
        .execute_removal(&pool, &event, "a", EVENT_CREATOR, "Car broke down", Utc::now())
        .unwrap();

    assert!(result.disbanded);
    assert!(result.updated_carpool.is_none());
    assert_eq!(result.notifications.len(), 1);

    let notice = &result.notifications[0];
    assert_eq!(notice.kind, NotificationKind::CarpoolDisbanded);
    assert_eq!(notice.recipient, email_of("b"));
    assert_eq!(notice.carpool_id, pool.id);
    assert_eq!(notice.event_id, event.id);
    assert!(!notice.read);
    assert_eq!(
        notice.message,
        "The carpool \"Downtown Carpool\" for Tech Conference 2025 has been disbanded because the driver was removed. Reason: Car broke down"
    );
}

#[test]
fn test_removing_sole_participant_disbands_silently() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").build();

    let result = service
        .execute_removal(&pool, &event_in_hours(48), "a", CARPOOL_CREATOR, "No longer going", Utc::now())
        .unwrap();

    assert!(result.disbanded);
    assert!(result.updated_carpool.is_none());
    assert!(result.notifications.is_empty());
}

#[test]
fn test_removing_one_of_two_drivers_keeps_carpool() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_driver("b").with_passenger("c").build();

    let result = service
        .execute_removal(&pool, &event_in_hours(48), "b", &email_of("a"), "Schedule conflict", Utc::now())
        .unwrap();

    assert!(!result.disbanded);
    let updated = result.updated_carpool.as_ref().unwrap();
    assert_eq!(updated.participants.len(), 2);
    assert!(updated.find_participant("b").is_none());
    assert_eq!(updated.id, pool.id);
    assert_eq!(updated.name, pool.name);
    assert_eq!(updated.max_capacity, pool.max_capacity);
    assert_eq!(updated.created_by, pool.created_by);

    // One to the removed driver, one to the passenger; the remover gets none
    assert_eq!(result.notifications.len(), 2);
    assert_eq!(recipients(NotificationKind::DriverRemoved, &result), vec![email_of("b"), email_of("c")]);
    assert!(result.notifications[0].message.contains("Reason: Schedule conflict"));
    assert_eq!(
        result.notifications[1].message,
        "Driver b Tester has been removed from your carpool \"Downtown Carpool\" for Tech Conference 2025. Other drivers are still available."
    );
    assert!(recipients(NotificationKind::DriverNeeded, &result).is_empty());
}

#[test]
fn test_notification_count_per_remover() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_driver("b").with_passenger("c").build();
    let event = event_in_hours(48);

    let cases = [
        (email_of("b"), 3),
        (email_of("a"), 2),
        (email_of("c"), 2),
        (EVENT_CREATOR.to_string(), 3),
    ];

    for (removed_by, expected) in cases {
        let result = service
            .execute_removal(&pool, &event, "b", &removed_by, "Reason", Utc::now())
            .unwrap();
        assert_eq!(result.notifications.len(), expected, "removed by {}", removed_by);
        assert!(result.notifications.iter().all(|n| n.kind == NotificationKind::DriverRemoved));
        assert!(!result.notifications.iter().skip(1).any(|n| n.recipient == removed_by));
    }
}

#[test]
fn test_notifications_share_timestamp_and_have_unique_ids() {
    let service = RemovalService::default();
    let pool = TestCarpool::new()
        .with_capacity(6)
        .with_driver("a")
        .with_driver("b")
        .with_passenger("c")
        .with_passenger("d")
        .build();
    let at = Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap();

    let result = service
        .execute_removal(&pool, &event_in_hours(48), "a", EVENT_CREATOR, "Reason", at)
        .unwrap();

    assert_eq!(result.notifications.len(), 4);
    let ids: HashSet<_> = result.notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), result.notifications.len());
    assert!(result.notifications.iter().all(|n| n.timestamp == at && !n.read));
}

#[test]
fn test_unknown_target_is_not_found() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_driver("b").build();

    let err = service
        .execute_removal(&pool, &event_in_hours(48), "ghost", EVENT_CREATOR, "Reason", Utc::now())
        .unwrap_err();

    assert_matches!(
        err,
        CarpoolBuddyError::ParticipantNotFound { ref participant_id, ref carpool_id }
            if participant_id == "ghost" && carpool_id == "carpool-1"
    );
    assert!(!err.is_recoverable());
}

#[test]
fn test_input_carpool_is_not_mutated() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_driver("b").build();
    let before = pool.clone();

    service
        .execute_removal(&pool, &event_in_hours(48), "a", EVENT_CREATOR, "Reason", Utc::now())
        .unwrap();
    assert_eq!(pool, before);
}

#[test]
fn test_driverless_carpool_degrades_when_configured() {
    let service = RemovalService::with_policy(RemovalPolicy {
        disband_when_driverless: false,
        ..RemovalPolicy::default()
    });
    let pool = TestCarpool::new().with_driver("a").with_passenger("b").with_passenger("c").build();

    let result = service
        .execute_removal(&pool, &event_in_hours(5), "a", EVENT_CREATOR, "Sick", Utc::now())
        .unwrap();

    assert!(!result.disbanded);
    assert!(result.updated_carpool.as_ref().unwrap().needs_driver());
    assert_eq!(
        recipients(NotificationKind::DriverRemoved, &result),
        vec![email_of("a"), email_of("b"), email_of("c")]
    );
    assert_eq!(recipients(NotificationKind::DriverNeeded, &result), vec![email_of("b"), email_of("c")]);
    assert!(result.notifications[1].message.ends_with("A new driver is needed."));
}

#[test]
fn test_default_entry_points() {
    let pool = TestCarpool::new().with_driver("a").with_driver("b").build();
    let result = execute_driver_removal(&pool, &event_in_hours(48), "a", EVENT_CREATOR, "Reason").unwrap();
    assert!(!result.disbanded);

    let mut notice = result.notifications[0].clone();
    notice.mark_read();
    assert!(notice.read);
}

#[test]
fn test_removal_requests_are_pending_and_unique() {
    let first = create_removal_request("carpool-1", "a", EVENT_CREATOR, "Repeatedly late");
    let second = create_removal_request("carpool-1", "a", EVENT_CREATOR, "Repeatedly late");

    assert_eq!(first.status, RemovalRequestStatus::Pending);
    assert_eq!(second.status, RemovalRequestStatus::Pending);
    assert_ne!(first.id, second.id);
    assert_eq!(first.target_participant_id, "a");
    assert_eq!(first.requested_by, EVENT_CREATOR);
}

#[test]
fn test_result_serializes_for_caller() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_passenger("b").build();

    let result = service
        .execute_removal(&pool, &event_in_hours(48), "a", EVENT_CREATOR, "Reason", Utc::now())
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["disbanded"], true);
    assert!(json["updatedCarpool"].is_null());
    assert_eq!(json["notifications"][0]["type"], "carpool-disbanded");
}

#[test]
fn test_user_text_is_embedded_verbatim() {
    let service = RemovalService::default();
    let mut pool = TestCarpool::new().with_driver("a").with_driver("b").with_passenger("c").build();
    pool.participants[1].name = "Bob {reason}".to_string();
    let event = event_in_hours(48);

    for _ in 0..50 {
        let result = service
            .execute_removal(&pool, &event, "b", &email_of("a"), "see {event_name}", Utc::now())
            .unwrap();

        assert_eq!(
            result.notifications[0].message,
            "You have been removed as a driver from the carpool \"Downtown Carpool\" for Tech Conference 2025. Reason: see {event_name}"
        );
        assert_eq!(
            result.notifications[1].message,
            "Driver Bob {reason} has been removed from your carpool \"Downtown Carpool\" for Tech Conference 2025. Other drivers are still available."
        );
    }
}

#[test]
fn test_disband_reason_is_embedded_verbatim() {
    let service = RemovalService::default();
    let pool = TestCarpool::new().with_driver("a").with_passenger("b").build();
    let event = event_in_hours(48);

    for _ in 0..50 {
        let result = service
            .execute_removal(&pool, &event, "a", EVENT_CREATOR, "see {event_name}", Utc::now())
            .unwrap();
        assert_eq!(
            result.notifications[0].message,
            "The carpool \"Downtown Carpool\" for Tech Conference 2025 has been disbanded because the driver was removed. Reason: see {event_name}"
        );
    }
}
