use std::sync::Arc;

use chrono::NaiveDate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bibliodesk::config::LoanPolicy;
use bibliodesk::db::MemoryDb;
use bibliodesk::infrastructure::ConsoleEmailGateway;
use bibliodesk::models::{Copy, CopyStatus};
use bibliodesk::seed;
use bibliodesk::services::alert_service::BioAlert;
use bibliodesk::services::loan_service::{self, LoanFilter};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid demo date")
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibliodesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let policy = LoanPolicy::from_env();

    let mut db = MemoryDb::new();
    seed::seed_demo_data(&mut db);
    // Two more copies of B1 so the loan cap can be demonstrated
    for copy_id in ["C3", "C4"] {
        db.copies.insert(
            copy_id.to_owned(),
            Copy {
                id: copy_id.to_owned(),
                book_id: "B1".to_owned(),
                status: CopyStatus::InLibrary,
            },
        );
    }

    let alerts = BioAlert::new();
    alerts.set_gateway(Arc::new(ConsoleEmailGateway));
    alerts.subscribe("B1", "R2"); // Bob is waiting for B1
    alerts.subscribe("B2", "R1"); // Alice is waiting for B2

    let start = date(2025, 10, 1);

    // 1) Plain copy loan
    let loan_id = loan_service::borrow_copy(&mut db, &policy, "C1", "R1", start)
        .expect("C1 should be available");
    println!("Loan {} created, due {}", loan_id, db.loans[&loan_id].due);

    // 2) The loan cap
    loan_service::borrow_copy(&mut db, &policy, "C2", "R1", start)
        .expect("C2 should be available");
    loan_service::borrow_copy(&mut db, &policy, "C3", "R1", start)
        .expect("C3 should be available");
    match loan_service::borrow_copy(&mut db, &policy, "C4", "R1", start) {
        Ok(_) => println!("[ERROR] the fourth loan should have been rejected"),
        Err(e) => println!("Fourth loan rejected: {}", e),
    }

    // 3) Late return: banned for twice the days late
    loan_service::return_copy(&mut db, &policy, &alerts, "C1", date(2025, 11, 5))
        .expect("C1 is out on loan");
    match db.readers["R1"].active_ban_until {
        Some(until) => println!("R1 banned until {}", until),
        None => println!("[ERROR] R1 should have been banned"),
    }

    // 4) New release: a single original, exclusive until returned
    loan_service::borrow_original_new_release(&mut db, &policy, "B2", "R2", start)
        .expect("the original of B2 is in");
    match loan_service::borrow_original_new_release(&mut db, &policy, "B2", "R1", start) {
        Ok(_) => println!("[ERROR] the second original loan should have been rejected"),
        Err(e) => println!("Second original rejected: {}", e),
    }
    loan_service::return_original_new_release(&mut db, &policy, &alerts, "B2", "R2", date(2025, 10, 10))
        .expect("R2 holds the original of B2");

    // 5) Returning C2 tells Bob that B1 is back
    loan_service::return_copy(&mut db, &policy, &alerts, "C2", date(2025, 10, 5))
        .expect("C2 is out on loan");

    // Final ledger
    let ledger = loan_service::list_loans(&db, &LoanFilter::default());
    println!(
        "{}",
        serde_json::to_string_pretty(&ledger).expect("ledger serializes")
    );
}
