//! HTTP routes.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use creature_domain::{
    parse_saving_throw, Abilities, Ability, CheckResult, Creature, CreatureName, DomainError,
    RollMode, RollResult, SavingThrows, Skill, Skills,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::app::App;
use crate::use_cases::CreatureError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        // Dice
        .route("/api/v1/roll", get(roll))
        .route("/api/v1/roll/{dice}", get(roll_notation))
        .route("/api/v1/roll/{dice}/{count}", get(roll_notation_count))
        // Creatures
        .route(
            "/api/v1/player/{name}",
            put(create_creature).get(get_creature).delete(delete_creature),
        )
        .route("/api/v1/player/{name}/abilities", get(get_abilities))
        .route("/api/v1/player/{name}/skills", get(get_skills))
        .route("/api/v1/player/{name}/saves", get(get_saving_throws))
        .route("/api/v1/player/{name}/hitpoints/{value}", put(set_hit_points))
        .route("/api/v1/player/{name}/armor/{value}", put(set_armor_class))
        .route("/api/v1/player/{name}/level/{value}", put(set_level))
        .route(
            "/api/v1/player/{name}/abilities/{ability}/{value}",
            put(set_ability_score),
        )
        .route("/api/v1/player/{name}/skills/{skill}", put(set_skill))
        .route("/api/v1/player/{name}/saves/{save}", put(set_saving_throw))
        // Checks
        .route("/api/v1/player/{name}/check/{ability}", get(ability_check))
        .route("/api/v1/player/{name}/skills/{skill}/roll", get(skill_check))
        .route("/api/v1/player/{name}/saves/{save}/roll", get(saving_throw))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Dice
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct RollQuery {
    sides: Option<i64>,
    count: Option<i64>,
    mode: Option<String>,
}

impl RollQuery {
    fn mode(&self) -> Result<RollMode, ApiError> {
        match &self.mode {
            Some(mode) => Ok(RollMode::from_str(mode)?),
            None => Ok(RollMode::Normal),
        }
    }
}

/// Roll as returned to clients.
#[derive(Debug, Serialize)]
struct RollResponse {
    dice: String,
    mode: RollMode,
    rolls: Vec<u32>,
    total: u32,
    breakdown: String,
}

impl From<RollResult> for RollResponse {
    fn from(result: RollResult) -> Self {
        Self {
            dice: result.pool.to_string(),
            mode: result.mode,
            breakdown: result.breakdown(),
            rolls: result.rolls,
            total: result.total,
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    roll: RollResponse,
    bonus: i32,
    total: i32,
}

impl From<CheckResult> for CheckResponse {
    fn from(check: CheckResult) -> Self {
        Self {
            roll: check.roll.into(),
            bonus: check.bonus,
            total: check.total,
        }
    }
}

async fn roll(
    State(app): State<Arc<App>>,
    query: Result<Query<RollQuery>, QueryRejection>,
) -> Result<Json<RollResponse>, ApiError> {
    let Query(query) = query?;
    let result = app
        .use_cases
        .dice
        .roll(query.sides, query.count, query.mode()?)?;
    Ok(Json(result.into()))
}

async fn roll_notation(
    State(app): State<Arc<App>>,
    Path(dice): Path<String>,
    query: Result<Query<RollQuery>, QueryRejection>,
) -> Result<Json<RollResponse>, ApiError> {
    let Query(query) = query?;
    let result = app
        .use_cases
        .dice
        .roll_notation(&dice, query.count, query.mode()?)?;
    Ok(Json(result.into()))
}

async fn roll_notation_count(
    State(app): State<Arc<App>>,
    Path((dice, count)): Path<(String, String)>,
    query: Result<Query<RollQuery>, QueryRejection>,
) -> Result<Json<RollResponse>, ApiError> {
    let Query(query) = query?;
    let count = parse_number("count", &count)?;
    let result = app
        .use_cases
        .dice
        .roll_notation(&dice, Some(count), query.mode()?)?;
    Ok(Json(result.into()))
}

// =============================================================================
// Creatures
// =============================================================================

fn parse_name(raw: &str) -> Result<CreatureName, ApiError> {
    Ok(CreatureName::new(raw)?)
}

fn parse_number(field: &'static str, raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::BadRequest {
        kind: "invalid_number",
        message: format!("{field} must be an integer, got '{raw}'"),
    })
}

/// Integer path segment; values beyond `i32` are out of range rather than malformed.
fn parse_value(field: &'static str, raw: &str) -> Result<i32, ApiError> {
    let value = parse_number(field, raw)?;
    i32::try_from(value)
        .map_err(|_| DomainError::out_of_range(field, value, i32::MIN, i32::MAX).into())
}

async fn create_creature(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let creature = app
        .use_cases
        .creature
        .manage
        .create(parse_name(&name)?)
        .await?;
    Ok((StatusCode::CREATED, Json(creature)))
}

async fn get_creature(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<Creature>, ApiError> {
    let creature = app
        .use_cases
        .creature
        .manage
        .get(&parse_name(&name)?)
        .await?;
    Ok(Json(creature))
}

async fn delete_creature(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .creature
        .manage
        .delete(&parse_name(&name)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_abilities(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<Abilities>, ApiError> {
    let abilities = app
        .use_cases
        .creature
        .manage
        .abilities(&parse_name(&name)?)
        .await?;
    Ok(Json(abilities))
}

async fn get_skills(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<Skills>, ApiError> {
    let skills = app
        .use_cases
        .creature
        .manage
        .skills(&parse_name(&name)?)
        .await?;
    Ok(Json(skills))
}

async fn get_saving_throws(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<SavingThrows>, ApiError> {
    let saves = app
        .use_cases
        .creature
        .manage
        .saving_throws(&parse_name(&name)?)
        .await?;
    Ok(Json(saves))
}

async fn set_hit_points(
    State(app): State<Arc<App>>,
    Path((name, value)): Path<(String, String)>,
) -> Result<Json<Creature>, ApiError> {
    let value = parse_value("hit points", &value)?;
    let creature = app
        .use_cases
        .creature
        .update
        .set_hit_points(&parse_name(&name)?, value)
        .await?;
    Ok(Json(creature))
}

async fn set_armor_class(
    State(app): State<Arc<App>>,
    Path((name, value)): Path<(String, String)>,
) -> Result<Json<Creature>, ApiError> {
    let value = parse_value("armor class", &value)?;
    let creature = app
        .use_cases
        .creature
        .update
        .set_armor_class(&parse_name(&name)?, value)
        .await?;
    Ok(Json(creature))
}

async fn set_level(
    State(app): State<Arc<App>>,
    Path((name, value)): Path<(String, String)>,
) -> Result<Json<Creature>, ApiError> {
    let value = parse_value("level", &value)?;
    let creature = app
        .use_cases
        .creature
        .update
        .set_level(&parse_name(&name)?, value)
        .await?;
    Ok(Json(creature))
}

async fn set_ability_score(
    State(app): State<Arc<App>>,
    Path((name, ability, value)): Path<(String, String, String)>,
) -> Result<Json<Creature>, ApiError> {
    let name = parse_name(&name)?;
    let ability = Ability::from_str(&ability)?;
    let value = parse_value("ability score", &value)?;
    let creature = app
        .use_cases
        .creature
        .update
        .set_ability_score(&name, ability, value)
        .await?;
    Ok(Json(creature))
}

async fn set_skill(
    State(app): State<Arc<App>>,
    Path((name, skill)): Path<(String, String)>,
) -> Result<Json<Creature>, ApiError> {
    let name = parse_name(&name)?;
    let skill = Skill::from_str(&skill)?;
    let creature = app
        .use_cases
        .creature
        .update
        .set_skill_proficiency(&name, skill)
        .await?;
    Ok(Json(creature))
}

async fn set_saving_throw(
    State(app): State<Arc<App>>,
    Path((name, save)): Path<(String, String)>,
) -> Result<Json<Creature>, ApiError> {
    let name = parse_name(&name)?;
    let save = parse_saving_throw(&save)?;
    let creature = app
        .use_cases
        .creature
        .update
        .set_saving_throw_proficiency(&name, save)
        .await?;
    Ok(Json(creature))
}

// =============================================================================
// Checks
// =============================================================================

async fn ability_check(
    State(app): State<Arc<App>>,
    Path((name, ability)): Path<(String, String)>,
    query: Result<Query<RollQuery>, QueryRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let Query(query) = query?;
    let name = parse_name(&name)?;
    let ability = Ability::from_str(&ability)?;
    let check = app
        .use_cases
        .dice
        .roll_ability_check(&name, ability, query.mode()?)
        .await?;
    Ok(Json(check.into()))
}

async fn skill_check(
    State(app): State<Arc<App>>,
    Path((name, skill)): Path<(String, String)>,
    query: Result<Query<RollQuery>, QueryRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let Query(query) = query?;
    let name = parse_name(&name)?;
    let skill = Skill::from_str(&skill)?;
    let check = app
        .use_cases
        .dice
        .roll_skill_check(&name, skill, query.mode()?)
        .await?;
    Ok(Json(check.into()))
}

async fn saving_throw(
    State(app): State<Arc<App>>,
    Path((name, save)): Path<(String, String)>,
    query: Result<Query<RollQuery>, QueryRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let Query(query) = query?;
    let name = parse_name(&name)?;
    let save = parse_saving_throw(&save)?;
    let check = app
        .use_cases
        .dice
        .roll_saving_throw(&name, save, query.mode()?)
        .await?;
    Ok(Json(check.into()))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest { kind: &'static str, message: String },
    Conflict(String),
    /// Storage failure; the client may retry.
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::BadRequest {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            kind: "invalid_query",
            message: rejection.body_text(),
        }
    }
}

impl From<CreatureError> for ApiError {
    fn from(e: CreatureError) -> Self {
        match e {
            CreatureError::NotFound(_) => ApiError::NotFound(e.to_string()),
            CreatureError::AlreadyExists(_) => ApiError::Conflict(e.to_string()),
            CreatureError::Domain(domain) => domain.into(),
            CreatureError::StorageFailure(ref repo) => {
                tracing::error!(error = %repo, "Creature store failure");
                ApiError::Unavailable(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest { kind, message } => (StatusCode::BAD_REQUEST, kind, message),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "already_exists", msg),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_failure", msg)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}
