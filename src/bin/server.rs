use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sheet_packer::solver::Solver;
use sheet_packer::types::{Demand, PackingResult, Rect, expand_demands};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct OptimizeRequest {
    sheet: Rect,
    pieces: Vec<PieceRequest>,
    #[serde(default)]
    kerf: f64,
    #[serde(default = "default_max_sheets")]
    max_sheets: usize,
}

#[derive(Deserialize, Serialize)]
struct PieceRequest {
    #[serde(default)]
    label: String,
    #[serde(default)]
    group: String,
    #[serde(default)]
    color: String,
    width: f64,
    height: f64,
    #[serde(default = "default_qty")]
    qty: u32,
}

fn default_max_sheets() -> usize {
    10
}

fn default_qty() -> u32 {
    1
}

#[derive(Serialize)]
struct OptimizeResponse {
    #[serde(flatten)]
    result: PackingResult,
    sheet_count: usize,
    min_sheets: usize,
    waste_percent: f64,
}

async fn optimize(
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let demands: Vec<Demand> = req
        .pieces
        .into_iter()
        .map(|p| {
            if p.qty == 0 {
                return Err(format!("piece '{}' has zero quantity", p.label));
            }
            Ok(Demand {
                label: p.label,
                group: p.group,
                color: p.color,
                rect: Rect::new(p.width, p.height),
                qty: p.qty,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let solver = Solver::new(req.sheet, req.kerf, req.max_sheets, expand_demands(&demands))
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let result = solver.solve();

    Ok(Json(OptimizeResponse {
        sheet_count: result.sheet_count(),
        min_sheets: result.min_sheets(),
        waste_percent: result.total_waste_percent(),
        result,
    }))
}

#[tokio::main]
async fn main() {
    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}
