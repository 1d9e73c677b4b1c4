use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::config::{build_rng, parse_date, resolve_start_date};
use crate::pool::{CandidatePool, Identity};
use crate::roster::Roster;
use crate::schedule::ScheduleEntry;
use crate::schedule_pool;

/// Result of the latest completed run. Replaced as a whole, never patched.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub start_date: NaiveDate,
    pub entries: Vec<ScheduleEntry>,
    pub unscheduled: Vec<Identity>,
    pub slot_popularity: Vec<(String, usize)>,
}

pub struct AppState {
    pub latest: Mutex<Option<Snapshot>>,
    pub roster: Roster,
    pub admin_password: String,
}

impl AppState {
    pub fn new(roster: Roster, admin_password: String) -> Self {
        AppState {
            latest: Mutex::new(None),
            roster,
            admin_password,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct UploadParams {
    start: Option<String>,
    seed: Option<u64>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    start_date: NaiveDate,
    scheduled: usize,
    unscheduled: usize,
    slot_popularity: Vec<SlotStats>,
}

#[derive(Serialize)]
pub struct SlotStats {
    slot: String,
    available_candidates: usize,
}

fn lock_error<T>(_: T) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("schedule state unavailable")
}

async fn admin_login(req: web::Json<LoginRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

/// Runs a complete scheduling pass over the uploaded availability table
async fn admin_upload(
    req: HttpRequest,
    params: web::Query<UploadParams>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        return Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let explicit_start = match params.start.as_deref().map(parse_date).transpose() {
        Ok(start) => start,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": e.to_string()})));
        }
    };
    let start_date = resolve_start_date(explicit_start, Local::now().date_naive());

    let pool = match CandidatePool::from_reader(body.as_ref()) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Rejected uploaded availability table: {}", e);
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to process CSV: {}", e)
            })));
        }
    };

    let mut rng = build_rng(params.seed);
    let (run, entries) = match schedule_pool(&pool, &state.roster, start_date, &mut rng) {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({"success": false, "error": e.to_string()})));
        }
    };

    let snapshot = Snapshot {
        start_date,
        unscheduled: run
            .unscheduled
            .iter()
            .filter_map(|index| pool.get(*index).map(|c| c.identity.clone()))
            .collect(),
        slot_popularity: pool.slot_popularity(),
        entries,
    };
    let scheduled = snapshot.entries.len();
    let unscheduled = snapshot.unscheduled.len();

    *state.latest.lock().map_err(lock_error)? = Some(snapshot);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Schedule generated successfully",
        "start_date": start_date,
        "scheduled": scheduled,
        "unscheduled": unscheduled
    })))
}

async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(lock_error)?;
    match latest.as_ref() {
        Some(snapshot) => Ok(HttpResponse::Ok().json(snapshot)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(lock_error)?;
    let Some(snapshot) = latest.as_ref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No data available"})));
    };

    Ok(HttpResponse::Ok().json(StatsResponse {
        start_date: snapshot.start_date,
        scheduled: snapshot.entries.len(),
        unscheduled: snapshot.unscheduled.len(),
        slot_popularity: snapshot
            .slot_popularity
            .iter()
            .map(|(slot, count)| SlotStats {
                slot: slot.clone(),
                available_candidates: *count,
            })
            .collect(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/upload", web::post().to(admin_upload))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/stats", web::get().to(get_stats));
}

pub async fn start_server(port: u16, roster: Roster, admin_password: String) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(roster, admin_password));

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

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    const TABLE: &str = "\
First Name,Last Name,Email ID,Roll Number,Department,Contact Number,Interview Happened,Monday 9:30AM-10:30AM
Asha,Verma,asha@example.com,21001,CSE,98100,0,1
Ravi,Nair,ravi@example.com,21002,EE,98200,0,1
";

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Roster::standard(), "secret".to_string()))
    }

    #[actix_web::test]
    async fn upload_requires_password() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .set_payload(TABLE)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn schedule_is_missing_until_a_run_completes() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/schedule").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn upload_runs_a_full_pass() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/upload?start=2026-10-19&seed=5")
            .insert_header(("X-Admin-Password", "secret"))
            .set_payload(TABLE)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/schedule").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["slot"], "Monday 9:30AM-10:30AM");
        assert_eq!(entries[1]["slot"], "Saturday 9:30AM-10:30AM");
        assert!(entries[0].get("interviewee_index").is_none());

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["scheduled"], 2);
        assert_eq!(stats["slot_popularity"][0]["available_candidates"], 2);
    }

    #[actix_web::test]
    async fn bad_start_date_is_rejected() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/upload?start=next-week")
            .insert_header(("X-Admin-Password", "secret"))
            .set_payload(TABLE)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
