//! Tests for the arrival board service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::arrival::TransportMode;
use crate::domain::ports::{MockArrivalRepository, MockUserDirectory};

fn make_service(
    arrivals: MockArrivalRepository,
    users: MockUserDirectory,
) -> ArrivalBoardService<MockArrivalRepository, MockUserDirectory> {
    ArrivalBoardService::new(Arc::new(arrivals), Arc::new(users))
}

fn upsert_by_train() -> UpsertArrival {
    UpsertArrival {
        arrives_at: Utc::now(),
        transport: TransportMode::Train,
        notes: Some("arriving on the 16:05".to_owned()),
    }
}

fn record_for(user_id: UserId, arrival: &UpsertArrival) -> ArrivalRecord {
    ArrivalRecord {
        id: Uuid::new_v4(),
        user_id,
        arrives_at: arrival.arrives_at,
        transport: arrival.transport,
        notes: arrival.notes_or_empty(),
    }
}

#[tokio::test]
async fn first_declaration_inserts_a_fresh_record() {
    let anna = UserId::random();
    let arrival = upsert_by_train();

    let mut arrivals = MockArrivalRepository::new();
    arrivals
        .expect_find_by_user()
        .times(1)
        .return_once(|_| Ok(None));
    arrivals
        .expect_insert()
        .times(1)
        .return_once(|user, arrival| Ok(record_for(user, &arrival)));
    arrivals.expect_update().times(0);

    let service = make_service(arrivals, MockUserDirectory::new());
    let stored = service.upsert(anna, arrival.clone()).await.expect("insert");

    assert_eq!(stored.user_id, anna);
    assert_eq!(stored.transport, TransportMode::Train);
    assert_eq!(stored.notes, "arriving on the 16:05");
}

#[tokio::test]
async fn redeclaration_updates_in_place_and_keeps_the_id() {
    let anna = UserId::random();
    let first = upsert_by_train();
    let existing = record_for(anna, &first);
    let existing_id = existing.id;
    let revised = UpsertArrival {
        arrives_at: Utc::now(),
        transport: TransportMode::Car,
        notes: None,
    };

    let mut arrivals = MockArrivalRepository::new();
    arrivals
        .expect_find_by_user()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    arrivals
        .expect_update()
        .withf(move |id, _| *id == existing_id)
        .times(1)
        .return_once(move |id, arrival| {
            Ok(ArrivalRecord {
                id,
                user_id: anna,
                arrives_at: arrival.arrives_at,
                transport: arrival.transport,
                notes: arrival.notes_or_empty(),
            })
        });
    arrivals.expect_insert().times(0);

    let service = make_service(arrivals, MockUserDirectory::new());
    let stored = service.upsert(anna, revised).await.expect("update");

    assert_eq!(stored.id, existing_id);
    assert_eq!(stored.transport, TransportMode::Car);
    assert_eq!(stored.notes, "");
}

#[tokio::test]
async fn withdrawing_an_absent_record_is_a_no_op() {
    let mut arrivals = MockArrivalRepository::new();
    arrivals
        .expect_delete_by_user()
        .times(1)
        .return_once(|_| Ok(false));

    let service = make_service(arrivals, MockUserDirectory::new());
    service
        .withdraw(UserId::random())
        .await
        .expect("withdraw is idempotent");
}

#[tokio::test]
async fn withdrawing_deletes_the_record() {
    let anna = UserId::random();

    let mut arrivals = MockArrivalRepository::new();
    arrivals
        .expect_delete_by_user()
        .withf(move |user| *user == anna)
        .times(1)
        .return_once(|_| Ok(true));

    let service = make_service(arrivals, MockUserDirectory::new());
    service.withdraw(anna).await.expect("withdraw succeeds");
}

#[tokio::test]
async fn roster_attributes_names_with_placeholder_fallback() {
    let anna = UserId::random();
    let ghost = UserId::random();
    let rows = vec![
        record_for(anna, &upsert_by_train()),
        record_for(ghost, &upsert_by_train()),
    ];

    let mut arrivals = MockArrivalRepository::new();
    arrivals.expect_list().times(1).return_once(move || Ok(rows));

    let mut users = MockUserDirectory::new();
    users
        .expect_display_names()
        .times(1)
        .return_once(move |_| {
            let mut names = HashMap::new();
            names.insert(anna, DisplayName::new("Anna").expect("valid name"));
            Ok(names)
        });

    let service = make_service(arrivals, users);
    let roster = service.roster().await.expect("roster");

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].display_name.as_ref(), "Anna");
    assert_eq!(roster[1].display_name, DisplayName::unknown());
}

#[tokio::test]
async fn connection_failures_surface_as_service_unavailable() {
    let mut arrivals = MockArrivalRepository::new();
    arrivals
        .expect_list()
        .times(1)
        .return_once(|| Err(ArrivalRepositoryError::connection("pool exhausted")));

    let service = make_service(arrivals, MockUserDirectory::new());
    let error = service.roster().await.expect_err("connection error");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
