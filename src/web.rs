use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use serde::Deserialize;
use std::sync::Mutex;
use crate::display::format_schedule;
use crate::error::Error;
use crate::export::ScheduleReport;
use crate::parser::{parse_priorities, teams_from_count, teams_from_labels, ByePolicy};
use crate::schedule::{generate, GeneratorOptions, Schedule, Team, Termination};

// Most recent schedule, kept in memory only
pub struct AppState {
    pub latest: Mutex<Option<Schedule>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState { latest: Mutex::new(None) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
pub struct ScheduleQuery {
    priorities: Option<String>,
    legacy: Option<bool>,
    bye: Option<bool>,
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    team_count: Option<usize>,
    teams: Option<Vec<String>>,
    #[serde(default)]
    priorities: Vec<usize>,
    #[serde(default)]
    legacy: bool,
    bye: Option<bool>,
}

fn bad_request(error: &Error) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": error.to_string()}))
}

fn bye_policy(bye: Option<bool>) -> ByePolicy {
    if bye.unwrap_or(true) { ByePolicy::Auto } else { ByePolicy::Never }
}

fn options(priorities: Vec<usize>, legacy: bool) -> GeneratorOptions {
    GeneratorOptions {
        priorities,
        termination: if legacy { Termination::Legacy } else { Termination::PoolExhausted },
        ..GeneratorOptions::default()
    }
}

fn query_inputs(team_count: usize, query: &ScheduleQuery) -> Result<(Vec<Team>, GeneratorOptions), Error> {
    let teams = teams_from_count(team_count, bye_policy(query.bye))?;
    let priorities = match &query.priorities {
        Some(list) => parse_priorities(list)?,
        None => Vec::new(),
    };
    Ok((teams, options(priorities, query.legacy.unwrap_or(false))))
}

fn store(state: &AppState, schedule: &Schedule) -> Result<()> {
    let mut latest = state
        .latest
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("schedule state unavailable"))?;
    *latest = Some(schedule.clone());
    Ok(())
}

// Generation runs on the blocking pool so large fields do not stall the worker
async fn generate_blocking(teams: Vec<Team>, options: GeneratorOptions) -> Result<Schedule> {
    let schedule = web::block(move || generate(&teams, &options)).await?;
    log::info!(
        "Generated {} rounds with {} matches for {} teams",
        schedule.rounds.len(), schedule.match_count(), schedule.real_teams().count()
    );
    Ok(schedule)
}

// Schedule for a lettered field, as JSON
async fn get_schedule(
    team_count: web::Path<usize>,
    query: web::Query<ScheduleQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (teams, options) = match query_inputs(team_count.into_inner(), &query) {
        Ok(inputs) => inputs,
        Err(e) => return Ok(bad_request(&e)),
    };
    let schedule = generate_blocking(teams, options).await?;
    store(&state, &schedule)?;
    Ok(HttpResponse::Ok().json(ScheduleReport::new(&schedule)))
}

// Same schedule rendered as plain text
async fn get_schedule_text(
    team_count: web::Path<usize>,
    query: web::Query<ScheduleQuery>,
) -> Result<HttpResponse> {
    let (teams, options) = match query_inputs(team_count.into_inner(), &query) {
        Ok(inputs) => inputs,
        Err(e) => return Ok(bad_request(&e)),
    };
    let schedule = generate_blocking(teams, options).await?;
    Ok(HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(format_schedule(&schedule)))
}

// Schedule for named teams or a team count posted as JSON
async fn post_schedule(
    req: web::Json<ScheduleRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let req = req.into_inner();
    let bye = bye_policy(req.bye);
    let teams = match (&req.teams, req.team_count) {
        (Some(labels), _) => teams_from_labels(labels.as_slice(), bye),
        (None, Some(count)) => teams_from_count(count, bye),
        (None, None) => Err(Error::NoTeams("request".to_string())),
    };
    let teams = match teams {
        Ok(teams) => teams,
        Err(e) => return Ok(bad_request(&e)),
    };

    let schedule = generate_blocking(teams, options(req.priorities, req.legacy)).await?;
    store(&state, &schedule)?;
    Ok(HttpResponse::Ok().json(ScheduleReport::new(&schedule)))
}

async fn get_latest(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state
        .latest
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("schedule state unavailable"))?;

    if let Some(ref schedule) = *latest {
        Ok(HttpResponse::Ok().json(ScheduleReport::new(schedule)))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"success": false, "error": "No schedule generated yet"})))
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/schedule", web::post().to(post_schedule))
        .route("/api/schedule/latest", web::get().to(get_latest))
        .route("/api/schedule/{team_count}", web::get().to(get_schedule))
        .route("/api/schedule/{team_count}/text", web::get().to(get_schedule_text));
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new());

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
