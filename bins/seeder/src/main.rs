//! Database seeder for development and testing.
//!
//! Seeds the three standard accounts (admin, vorstand, spiess) and a
//! starter fine-type catalog. Passwords come from `SEED_*_PASSWORD`
//! environment variables with development-only defaults.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;

use strafenkasse_core::auth::hash_password;
use strafenkasse_db::{FineTypeRepository, UserRepository};
use strafenkasse_shared::Role;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = strafenkasse_db::connect(&database_url, 5)
        .await
        .expect("Failed to connect to database");

    println!("Seeding users...");
    seed_users(&UserRepository::new(db.clone())).await;

    println!("Seeding fine-type catalog...");
    seed_fine_types(&FineTypeRepository::new(db)).await;

    println!("Seeding complete!");
}

fn seed_password(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| {
        println!("  {var} not set, using development default");
        default.to_string()
    })
}

/// Seeds the standard accounts, skipping existing usernames.
async fn seed_users(users: &UserRepository) {
    let accounts = [
        ("admin", Role::Admin, "SEED_ADMIN_PASSWORD", "admin-start!"),
        (
            "vorstand",
            Role::Vorstand,
            "SEED_VORSTAND_PASSWORD",
            "vorstand-start!",
        ),
        (
            "spiess",
            Role::Spiess,
            "SEED_SPIESS_PASSWORD",
            "spiess-start!",
        ),
    ];

    for (username, role, password_var, default) in accounts {
        match users.username_exists(username).await {
            Ok(true) => {
                println!("  User {username} already exists, skipping...");
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("Failed to check user {username}: {e}");
                continue;
            }
        }

        let password = seed_password(password_var, default);
        let hash = hash_password(&password).expect("Failed to hash seed password");

        match users.create(username, &hash, role, None).await {
            Ok(_) => println!("  Created user: {username} ({role})"),
            Err(e) => eprintln!("Failed to insert user {username}: {e}"),
        }
    }
}

/// Seeds a starter catalog when it is empty. Amounts are fixed per
/// entry; `None` marks free-amount entries.
async fn seed_fine_types(fine_types: &FineTypeRepository) {
    match fine_types.list().await {
        Ok(existing) if !existing.is_empty() => {
            println!("  Catalog already has entries, skipping...");
            return;
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Failed to check fine-type catalog: {e}");
            return;
        }
    }

    let catalog = [
        ("Zu spät zum Antreten", Some(Decimal::new(50, 2))),
        ("Unentschuldigtes Fehlen", Some(Decimal::new(500, 2))),
        ("Ohne Kopfbedeckung", Some(Decimal::new(100, 2))),
        ("Handy während des Dienstes", Some(Decimal::new(200, 2))),
        ("Falsche Uniform", Some(Decimal::new(150, 2))),
        ("Sonstiges", None),
    ];

    let mut inserted = 0;
    for (label, amount) in catalog {
        match fine_types.create(label, amount).await {
            Ok(_) => inserted += 1,
            Err(e) => eprintln!("Failed to insert fine type {label}: {e}"),
        }
    }

    println!("  Inserted {inserted} fine types");
}
