//! Admin bootstrap command.
//!
//! Administrators cannot be created through the public signup endpoint;
//! `membergate create-admin <email> <password>` inserts one directly.

use sqlx::PgPool;

use membergate_core::{AppError, hash_password};

pub async fn handle_create_admin(args: Vec<String>) {
    if args.len() != 4 {
        eprintln!("Usage: {} create-admin <email> <password>", args[0]);
        std::process::exit(1);
    }

    let email = &args[2];
    let password = &args[3];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match create_admin(&pool, email, password).await {
        Ok(_) => {
            println!("✅ Administrator created successfully!");
            println!("   Email: {}", email);
        }
        Err(e) => {
            eprintln!("❌ Error creating administrator: {}", e.error);
            std::process::exit(1);
        }
    }
}

pub async fn create_admin(pool: &PgPool, email: &str, password: &str) -> Result<(), AppError> {
    let hashed_password = hash_password(password)?;

    sqlx::query("INSERT INTO members (email, password, role) VALUES ($1, $2, 'admin')")
        .bind(email)
        .bind(&hashed_password)
        .execute(pool)
        .await?;

    Ok(())
}
