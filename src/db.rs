use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::models::event::EventCreateRequest;
use crate::models::league::LeagueCreateRequest;
use crate::models::user::{Role, UserRegistrationRequest};
use crate::services::event_service::EventService;
use crate::services::league_service::LeagueService;
use crate::services::user_service::UserService;
use crate::utils::error::AppResult;

// Database connection manager
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Database { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Populate an empty database with the staff accounts, the league
    /// catalogue and a handful of demo events. Runs once; a non-empty
    /// table skips its section.
    pub async fn seed(&self) -> AppResult<()> {
        self.seed_users().await?;
        self.seed_leagues().await?;
        self.seed_events().await?;
        Ok(())
    }

    async fn seed_users(&self) -> AppResult<()> {
        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if user_count > 0 {
            return Ok(());
        }

        let user_service = UserService::new(self.pool.clone());
        user_service
            .register_user(UserRegistrationRequest {
                username: "matchday_admin".to_string(),
                email: "admin@matchday.io".to_string(),
                password: "Stadium.Ops24".to_string(),
                full_name: Some("Platform Administrator".to_string()),
                phone: None,
                address: None,
                role: Some(Role::Admin),
            })
            .await?;
        user_service
            .register_user(UserRegistrationRequest {
                username: "cashier1".to_string(),
                email: "cashier@matchday.io".to_string(),
                password: "Counter.Sale24".to_string(),
                full_name: Some("Ticket Counter".to_string()),
                phone: None,
                address: None,
                role: Some(Role::Cashier),
            })
            .await?;

        info!("seeded default admin and cashier accounts");
        Ok(())
    }

    async fn seed_leagues(&self) -> AppResult<()> {
        let league_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leagues")
            .fetch_one(&self.pool)
            .await?;
        if league_count > 0 {
            return Ok(());
        }

        let league_service = LeagueService::new(self.pool.clone());
        let leagues = [
            ("Premier League", "England", 1992, 20),
            ("La Liga", "Spain", 1929, 20),
            ("Bundesliga", "Germany", 1963, 18),
            ("Serie A", "Italy", 1898, 20),
            ("Ligue 1", "France", 1932, 18),
            ("Champions League", "Europe", 1955, 36),
        ];
        for (name, country, founded_year, total_teams) in leagues {
            league_service
                .create_league(LeagueCreateRequest {
                    name: name.to_string(),
                    description: None,
                    country: country.to_string(),
                    founded_year: Some(founded_year),
                    total_teams: Some(total_teams),
                    season_start: Some("August".to_string()),
                    season_end: Some("May".to_string()),
                })
                .await?;
        }

        info!("seeded league catalogue");
        Ok(())
    }

    async fn seed_events(&self) -> AppResult<()> {
        let event_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;
        if event_count > 0 {
            return Ok(());
        }

        let event_service = EventService::new(self.pool.clone());
        let now = Utc::now().naive_utc();
        let events = [
            (
                "Concert Music Festival 2025",
                "An evening of live music with local and international artists",
                "Jakarta Convention Center",
                30,
                1000,
                Decimal::from(150_000),
            ),
            (
                "Football Match: Indonesia vs Malaysia",
                "International friendly at the national stadium",
                "Gelora Bung Karno Stadium",
                15,
                80_000,
                Decimal::from(75_000),
            ),
            (
                "Tech Conference 2025",
                "Talks and workshops from the regional tech community",
                "Balai Kartini",
                45,
                500,
                Decimal::from(200_000),
            ),
        ];
        for (title, description, venue, days_ahead, total_seats, price) in events {
            event_service
                .create_event(EventCreateRequest {
                    title: title.to_string(),
                    description: Some(description.to_string()),
                    venue: venue.to_string(),
                    event_date: now + chrono::Duration::days(days_ahead),
                    total_seats,
                    price,
                    league_id: None,
                })
                .await?;
        }

        info!("seeded demo events");
        Ok(())
    }
}
