use crate::models::league::{
    League, LeagueCreateRequest, LeagueResponse, LeagueStatus, LeagueUpdateRequest,
};
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use log::info;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct LeagueService {
    pool: SqlitePool,
}

impl LeagueService {
    pub fn new(pool: SqlitePool) -> Self {
        LeagueService { pool }
    }

    pub async fn create_league(&self, request: LeagueCreateRequest) -> AppResult<LeagueResponse> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM leagues WHERE name = ?")
            .bind(&request.name)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict("League name already exists".into()));
        }

        let result = sqlx::query(
            "INSERT INTO leagues (name, description, country, founded_year, total_teams, season_start, season_end, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.country)
        .bind(request.founded_year)
        .bind(request.total_teams)
        .bind(&request.season_start)
        .bind(&request.season_end)
        .bind(LeagueStatus::Active.to_string())
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        info!("created league {}", request.name);
        self.get_league_by_id(result.last_insert_rowid()).await
    }

    pub async fn get_all_leagues(&self) -> AppResult<Vec<LeagueResponse>> {
        let leagues = sqlx::query_as::<_, League>("SELECT * FROM leagues ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(leagues.into_iter().map(LeagueResponse::from).collect())
    }

    pub async fn get_active_leagues(&self) -> AppResult<Vec<LeagueResponse>> {
        let leagues = sqlx::query_as::<_, League>(
            "SELECT * FROM leagues WHERE status = ? ORDER BY name",
        )
        .bind(LeagueStatus::Active.to_string())
        .fetch_all(&self.pool)
        .await?;
        Ok(leagues.into_iter().map(LeagueResponse::from).collect())
    }

    pub async fn get_league_by_id(&self, league_id: i64) -> AppResult<LeagueResponse> {
        let league = sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE id = ?")
            .bind(league_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("League not found".into()))?;
        Ok(league.into())
    }

    pub async fn get_leagues_by_country(&self, country: &str) -> AppResult<Vec<LeagueResponse>> {
        let leagues = sqlx::query_as::<_, League>(
            "SELECT * FROM leagues WHERE country LIKE ? ORDER BY name",
        )
        .bind(format!("%{}%", country))
        .fetch_all(&self.pool)
        .await?;
        Ok(leagues.into_iter().map(LeagueResponse::from).collect())
    }

    pub async fn search_leagues(&self, query: &str) -> AppResult<Vec<LeagueResponse>> {
        let pattern = format!("%{}%", query);
        let leagues = sqlx::query_as::<_, League>(
            "SELECT * FROM leagues WHERE name LIKE ?1 OR country LIKE ?1 ORDER BY name",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(leagues.into_iter().map(LeagueResponse::from).collect())
    }

    pub async fn update_league(
        &self,
        league_id: i64,
        request: LeagueUpdateRequest,
    ) -> AppResult<LeagueResponse> {
        // A changed name must stay unique
        if let Some(new_name) = &request.name {
            let taken: Option<i64> =
                sqlx::query_scalar("SELECT id FROM leagues WHERE name = ? AND id != ?")
                    .bind(new_name)
                    .bind(league_id)
                    .fetch_optional(&self.pool)
                    .await?;
            if taken.is_some() {
                return Err(AppError::Conflict("League name already exists".into()));
            }
        }

        let updated = sqlx::query(
            "UPDATE leagues SET
                 name = COALESCE(?, name),
                 description = COALESCE(?, description),
                 country = COALESCE(?, country),
                 founded_year = COALESCE(?, founded_year),
                 total_teams = COALESCE(?, total_teams),
                 season_start = COALESCE(?, season_start),
                 season_end = COALESCE(?, season_end),
                 status = COALESCE(?, status)
             WHERE id = ?",
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.country)
        .bind(request.founded_year)
        .bind(request.total_teams)
        .bind(&request.season_start)
        .bind(&request.season_end)
        .bind(request.status.map(|s| s.to_string()))
        .bind(league_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("League not found".into()));
        }
        self.get_league_by_id(league_id).await
    }
}
