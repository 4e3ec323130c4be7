//! ReservationLedger contract tests.

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use deskbook_core::error::ErrorKind;
use deskbook_database::ReservationLedger;
use deskbook_entity::booking::NewBooking;

use super::unique;

pub async fn run_all<L>(ledger: &L)
where
    L: ReservationLedger + Clone + 'static,
{
    test_create_and_find(ledger).await;
    test_same_item_same_date_is_conflict(ledger).await;
    test_same_item_other_date_is_fine(ledger).await;
    test_find_by_item_user_date(ledger).await;
    test_delete_frees_the_slot(ledger).await;
    test_delete_missing_is_not_found(ledger).await;
    test_list_for_user_includes_booker(ledger).await;
    test_list_for_user_respects_range_and_order(ledger).await;
    test_count_per_item_per_date(ledger).await;
    test_count_with_empty_inputs(ledger).await;
    test_list_for_items_on_date(ledger).await;
    test_concurrent_creates_single_winner(ledger).await;
}

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 7)
        .and_then(|d| d.checked_add_days(Days::new(offset)))
        .unwrap()
}

pub async fn test_create_and_find<L: ReservationLedger>(ledger: &L) {
    let item = unique("item");
    let user = unique("user");
    let booking = ledger
        .create(&NewBooking::personal(&item, &user, day(0)))
        .await
        .expect("create should succeed");

    assert_eq!(booking.item_id, item);
    assert_eq!(booking.booked_by_user_id, user);
    assert_eq!(booking.id.get_version_num(), 4);

    let found = ledger.find_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(found, booking);
    assert!(ledger.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

pub async fn test_same_item_same_date_is_conflict<L: ReservationLedger>(ledger: &L) {
    let item = unique("item");
    ledger
        .create(&NewBooking::personal(&item, unique("user"), day(1)))
        .await
        .unwrap();

    let err = ledger
        .create(&NewBooking::personal(&item, unique("user"), day(1)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message, "Item is already booked for this date");
}

pub async fn test_same_item_other_date_is_fine<L: ReservationLedger>(ledger: &L) {
    let item = unique("item");
    let user = unique("user");
    ledger
        .create(&NewBooking::personal(&item, &user, day(2)))
        .await
        .unwrap();
    ledger
        .create(&NewBooking::personal(&item, &user, day(3)))
        .await
        .unwrap();
}

pub async fn test_find_by_item_user_date<L: ReservationLedger>(ledger: &L) {
    let item = unique("item");
    let user = unique("user");
    let booking = ledger
        .create(&NewBooking::personal(&item, &user, day(4)))
        .await
        .unwrap();

    let hit = ledger.find_by_item_user_date(&item, &user, day(4)).await.unwrap();
    assert_eq!(hit, Some(booking.id));

    let other_user = ledger
        .find_by_item_user_date(&item, "someone-else", day(4))
        .await
        .unwrap();
    assert!(other_user.is_none());

    let other_day = ledger.find_by_item_user_date(&item, &user, day(5)).await.unwrap();
    assert!(other_day.is_none());
}

pub async fn test_delete_frees_the_slot<L: ReservationLedger>(ledger: &L) {
    let item = unique("item");
    let booking = ledger
        .create(&NewBooking::personal(&item, unique("user"), day(6)))
        .await
        .unwrap();

    ledger.delete(booking.id).await.unwrap();
    assert!(ledger.find_by_id(booking.id).await.unwrap().is_none());

    ledger
        .create(&NewBooking::personal(&item, unique("user"), day(6)))
        .await
        .expect("slot should be free after delete");
}

pub async fn test_delete_missing_is_not_found<L: ReservationLedger>(ledger: &L) {
    let err = ledger.delete(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

pub async fn test_list_for_user_includes_booker<L: ReservationLedger>(ledger: &L) {
    let alice = unique("alice");
    let bob = unique("bob");

    let own = ledger
        .create(&NewBooking::personal(unique("item"), &alice, day(7)))
        .await
        .unwrap();
    let for_bob = ledger
        .create(&NewBooking::on_behalf(unique("item"), &bob, &alice, day(8)))
        .await
        .unwrap();
    let guest = ledger
        .create(&NewBooking::guest(
            unique("item"),
            "Visitor",
            Some("visitor@example.com".to_string()),
            &alice,
            day(9),
        ))
        .await
        .unwrap();

    let alice_view = ledger.list_for_user(&alice, day(0), None).await.unwrap();
    let ids: Vec<Uuid> = alice_view.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![own.id, for_bob.id, guest.id]);
    assert!(alice_view[2].is_guest);

    let bob_view = ledger.list_for_user(&bob, day(0), None).await.unwrap();
    assert_eq!(bob_view.len(), 1);
    assert_eq!(bob_view[0].booked_by_user_id, alice);
}

pub async fn test_list_for_user_respects_range_and_order<L: ReservationLedger>(ledger: &L) {
    let user = unique("user");
    for offset in [12, 10, 11, 14] {
        ledger
            .create(&NewBooking::personal(unique("item"), &user, day(offset)))
            .await
            .unwrap();
    }

    let dates: Vec<NaiveDate> = ledger
        .list_for_user(&user, day(11), Some(day(12)))
        .await
        .unwrap()
        .iter()
        .map(|b| b.booking_date)
        .collect();
    assert_eq!(dates, vec![day(11), day(12)]);

    let open_ended = ledger.list_for_user(&user, day(11), None).await.unwrap();
    assert_eq!(open_ended.len(), 3);
    assert_eq!(open_ended[2].booking_date, day(14));
}

pub async fn test_count_per_item_per_date<L: ReservationLedger>(ledger: &L) {
    let (a, b, c) = (unique("item"), unique("item"), unique("item"));
    for (item, offset) in [(&a, 20), (&a, 21), (&b, 20), (&c, 25)] {
        ledger
            .create(&NewBooking::personal(item, unique("user"), day(offset)))
            .await
            .unwrap();
    }

    let counts = ledger
        .count_per_item_per_date(&[a.clone(), b.clone(), c.clone()], &[day(20), day(21), day(22)])
        .await
        .unwrap();

    assert_eq!(counts.len(), 3);
    assert_eq!(counts.get(&(a.clone(), day(20))), Some(&1));
    assert_eq!(counts.get(&(a, day(21))), Some(&1));
    assert_eq!(counts.get(&(b, day(20))), Some(&1));
    assert!(!counts.contains_key(&(c, day(25))));
}

pub async fn test_count_with_empty_inputs<L: ReservationLedger>(ledger: &L) {
    assert!(
        ledger
            .count_per_item_per_date(&[], &[day(0)])
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        ledger
            .count_per_item_per_date(&[unique("item")], &[])
            .await
            .unwrap()
            .is_empty()
    );
}

pub async fn test_list_for_items_on_date<L: ReservationLedger>(ledger: &L) {
    let (a, b) = (unique("item"), unique("item"));
    ledger
        .create(&NewBooking::personal(&a, unique("user"), day(30)))
        .await
        .unwrap();
    ledger
        .create(&NewBooking::personal(&b, unique("user"), day(30)))
        .await
        .unwrap();
    ledger
        .create(&NewBooking::personal(&a, unique("user"), day(31)))
        .await
        .unwrap();

    let on_day = ledger
        .list_for_items_on_date(&[a.clone(), b.clone()], day(30))
        .await
        .unwrap();
    assert_eq!(on_day.len(), 2);
    assert!(on_day.iter().all(|bk| bk.booking_date == day(30)));

    assert!(ledger.list_for_items_on_date(&[], day(30)).await.unwrap().is_empty());
}

pub async fn test_concurrent_creates_single_winner<L>(ledger: &L)
where
    L: ReservationLedger + Clone + 'static,
{
    let item = unique("item");
    let handles: Vec<_> = (0..16)
        .map(|n| {
            let ledger = ledger.clone();
            let item = item.clone();
            tokio::spawn(async move {
                ledger
                    .create(&NewBooking::personal(&item, format!("user-{n}"), day(40)))
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) if e.kind == ErrorKind::Conflict => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(conflicts, 15);
}
