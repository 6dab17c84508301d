//! BioAlert subscription and dispatch tests.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use bibliodesk::config::LoanPolicy;
use bibliodesk::db::MemoryDb;
use bibliodesk::domain::NotificationGateway;
use bibliodesk::seed::seed_demo_data;
use bibliodesk::services::alert_service::BioAlert;
use bibliodesk::services::loan_service::{
    borrow_copy, borrow_original_new_release, return_copy, return_original_new_release,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct SentEmail {
    to: String,
    subject: String,
    body: String,
}

// Gateway double that records every message instead of sending it.
#[derive(Default)]
struct RecordingGateway {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingGateway {
    fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationGateway for RecordingGateway {
    fn send_email(&self, to: &str, subject: &str, body: &str) {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
    }
}

fn setup() -> (MemoryDb, BioAlert, Arc<RecordingGateway>) {
    let mut db = MemoryDb::new();
    seed_demo_data(&mut db);
    let alerts = BioAlert::new();
    let gateway = Arc::new(RecordingGateway::default());
    alerts.set_gateway(gateway.clone());
    (db, alerts, gateway)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_return_notifies_the_subscriber_borrowing_does_not() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B1", "R2");

    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 1)).unwrap();
    assert!(gateway.sent().is_empty());

    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();
    assert_eq!(
        gateway.sent(),
        vec![SentEmail {
            to: "bob@example.com".to_owned(),
            subject: "Disponible: Software Engineering".to_owned(),
            body: "Ya puedes solicitarlo".to_owned(),
        }]
    );
}

#[test]
fn test_every_subscriber_gets_exactly_one_email() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B1", "R1");
    alerts.subscribe("B1", "R2");

    borrow_copy(&mut db, &policy, "C1", "R2", d(2025, 10, 1)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();

    let mut recipients: Vec<String> = gateway.sent().into_iter().map(|email| email.to).collect();
    recipients.sort();
    assert_eq!(recipients, vec!["alice@example.com", "bob@example.com"]);
}

#[test]
fn test_subscribe_is_idempotent() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B1", "R2");
    alerts.subscribe("B1", "R2");

    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 1)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();

    assert_eq!(gateway.sent().len(), 1);
}

#[test]
fn test_subscription_survives_delivery() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B1", "R2");

    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 1)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();
    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 6)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 8)).unwrap();

    assert_eq!(gateway.sent().len(), 2);
}

#[test]
fn test_without_a_gateway_returns_still_succeed() {
    let mut db = MemoryDb::new();
    seed_demo_data(&mut db);
    let policy = LoanPolicy::default();
    let alerts = BioAlert::new();
    alerts.subscribe("B1", "R2");

    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 1)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();

    assert_eq!(db.copies["C1"].status, bibliodesk::models::CopyStatus::InLibrary);
}

#[test]
fn test_reset_clears_subscriptions_and_gateway() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B1", "R2");

    alerts.reset();

    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 1)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();
    assert!(gateway.sent().is_empty());
}

#[test]
fn test_unknown_subscriber_is_skipped() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B1", "R9"); // nobody by that id in the store
    alerts.subscribe("B1", "R2");

    borrow_copy(&mut db, &policy, "C1", "R1", d(2025, 10, 1)).unwrap();
    return_copy(&mut db, &policy, &alerts, "C1", d(2025, 10, 5)).unwrap();

    let recipients: Vec<String> = gateway.sent().into_iter().map(|email| email.to).collect();
    assert_eq!(recipients, vec!["bob@example.com"]);
}

#[test]
fn test_returning_the_original_notifies_subscribers_too() {
    let (mut db, alerts, gateway) = setup();
    let policy = LoanPolicy::default();
    alerts.subscribe("B2", "R1");

    borrow_original_new_release(&mut db, &policy, "B2", "R2", d(2025, 10, 1)).unwrap();
    assert!(gateway.sent().is_empty());

    return_original_new_release(&mut db, &policy, &alerts, "B2", "R2", d(2025, 10, 10)).unwrap();

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "alice@example.com");
    assert_eq!(sent[0].subject, "Disponible: Clean Agile (New Release)");
}

#[test]
fn test_notify_on_a_book_without_subscribers_is_a_noop() {
    let (db, alerts, gateway) = setup();

    alerts.notify_available(
        "B1",
        |rid| db.readers.get(rid).map(|r| r.email.clone()),
        |bid| db.books.get(bid).map(|b| b.title.clone()),
    );

    assert!(gateway.sent().is_empty());
}

#[test]
fn test_subscribing_to_an_unknown_book_is_accepted_but_never_delivers() {
    let (db, alerts, gateway) = setup();
    alerts.subscribe("B9", "R2");

    // Title cannot be resolved, so the dispatch is skipped entirely
    alerts.notify_available(
        "B9",
        |rid| db.readers.get(rid).map(|r| r.email.clone()),
        |bid| db.books.get(bid).map(|b| b.title.clone()),
    );

    assert!(gateway.sent().is_empty());
}
