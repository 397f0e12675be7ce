#[macro_use]
extern crate rocket;

use dotenv::dotenv;
use matchday_booking_system::build_rocket;
use matchday_booking_system::db::Database;

#[launch]
async fn rocket() -> _ {
    dotenv().ok();

    // Fail fast on missing configuration
    std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:matchday.db".to_string());

    let database = Database::new(&database_url)
        .await
        .expect("Failed to connect to database");
    database
        .run_migrations()
        .await
        .expect("Failed to run database migrations");
    database.seed().await.expect("Failed to seed initial data");

    build_rocket(database.pool)
}
