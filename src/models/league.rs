use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeagueStatus {
    Active,
    Inactive,
    SeasonEnded,
}

#[derive(Debug, Clone)]
pub struct League {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub country: String,
    pub founded_year: Option<i64>,
    pub total_teams: Option<i64>,
    pub season_start: Option<String>,
    pub season_end: Option<String>,
    pub status: LeagueStatus,
    pub created_at: NaiveDateTime,
}

impl<'r> FromRow<'r, SqliteRow> for League {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        Ok(League {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            country: row.try_get("country")?,
            founded_year: row.try_get("founded_year")?,
            total_teams: row.try_get("total_teams")?,
            season_start: row.try_get("season_start")?,
            season_end: row.try_get("season_end")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct LeagueCreateRequest {
    #[validate(length(min = 2, max = 80, message = "Name must be between 2 and 80 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 60, message = "Country must be between 2 and 60 characters"))]
    pub country: String,

    #[validate(range(min = 1850, max = 2100, message = "Founded year is out of range"))]
    pub founded_year: Option<i64>,

    #[validate(range(min = 2, max = 64, message = "Total teams must be between 2 and 64"))]
    pub total_teams: Option<i64>,

    pub season_start: Option<String>,
    pub season_end: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct LeagueUpdateRequest {
    #[validate(length(min = 2, max = 80, message = "Name must be between 2 and 80 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 60, message = "Country must be between 2 and 60 characters"))]
    pub country: Option<String>,

    #[validate(range(min = 1850, max = 2100, message = "Founded year is out of range"))]
    pub founded_year: Option<i64>,

    #[validate(range(min = 2, max = 64, message = "Total teams must be between 2 and 64"))]
    pub total_teams: Option<i64>,

    pub season_start: Option<String>,
    pub season_end: Option<String>,
    pub status: Option<LeagueStatus>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct LeagueResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub country: String,
    pub founded_year: Option<i64>,
    pub total_teams: Option<i64>,
    pub season_start: Option<String>,
    pub season_end: Option<String>,
    pub status: LeagueStatus,
}

impl From<League> for LeagueResponse {
    fn from(league: League) -> Self {
        LeagueResponse {
            id: league.id,
            name: league.name,
            description: league.description,
            country: league.country,
            founded_year: league.founded_year,
            total_teams: league.total_teams,
            season_start: league.season_start,
            season_end: league.season_end,
            status: league.status,
        }
    }
}
