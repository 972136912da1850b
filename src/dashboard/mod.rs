use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::evaluation::{evaluate, Evaluation};
use crate::input::EvaluationRequest;
use crate::model::ModelParams;

#[derive(Clone)]
pub struct AppState {
    /// Parameters used when a request carries no `model` block.
    pub params: ModelParams,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/model", get(model_handler))
        .route("/api/evaluate", post(evaluate_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the dashboard HTML page.
async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

/// GET /api/model
async fn model_handler(State(state): State<Arc<AppState>>) -> Json<ModelParams> {
    Json(state.params)
}

/// POST /api/evaluate
async fn evaluate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<Evaluation>, ApiError> {
    match evaluate(&request, &state.params) {
        Ok(eval) => {
            info!(
                "Evaluated {}-{} (bo{}): frame p {:.3}, match p {:.3}",
                eval.score.frames_a,
                eval.score.frames_b,
                eval.score.best_of,
                eval.frame.value,
                eval.match_probability
            );
            Ok(Json(eval))
        }
        Err(e) => {
            info!("Evaluation rejected: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string(), "field": e.field(), "hint": e.hint() })),
            ))
        }
    }
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Snooker In-Play Match Odds</title>
<style>
  :root {
    --bg: #0e0f13;
    --card: #141720;
    --border: #2a2d3a;
    --accent: #37a3ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e6ebff;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.3rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; display: grid; grid-template-columns: repeat(3, 1fr); gap: 1.5rem; }
  @media (max-width: 960px) { main { grid-template-columns: 1fr; } }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1rem 1.2rem; }
  .panel h2 { color: var(--accent); font-size: .95rem; margin: .6rem 0 .4rem; }
  .row { display: flex; justify-content: space-between; align-items: center; margin: .25rem 0; font-size: .88rem; }
  input { width: 6rem; background: #0f121a; color: var(--text); border: 1px solid var(--border); border-radius: 4px; padding: .2rem .4rem; }
  input[type=checkbox] { width: auto; }
  button { width: 100%; margin: .8rem 0; padding: .5rem; background: var(--accent); color: #06111a; border: none; border-radius: 6px; font-weight: 700; cursor: pointer; }
  .out { color: var(--accent); font-weight: 600; }
  .pos { color: var(--green); }
  .neg { color: var(--red); }
  #hint { color: var(--muted); font-size: .85rem; white-space: pre-line; }
</style>
</head>
<body>
<header><h1>Snooker In-Play: Match Odds (Season + Live + Score)</h1></header>
<main>
  <section class="panel" id="season"></section>
  <section class="panel" id="live"></section>
  <section class="panel">
    <h2>Match state</h2>
    <div class="row">Best-of <input data-path="score.best_of"></div>
    <div class="row">Frames won A <input data-path="score.frames_a"></div>
    <div class="row">Frames won B <input data-path="score.frames_b"></div>
    <h2>Realism guards</h2>
    <div class="row">Shrink &lambda; <input id="lambda" type="number" step="0.01" min="0" max="1"></div>
    <div class="row">Cap per-frame p <input id="cap-on" type="checkbox"></div>
    <div class="row">Cap min <input id="cap-min" type="number" step="0.01"></div>
    <div class="row">Cap max <input id="cap-max" type="number" step="0.01"></div>
    <h2>Book back odds (match)</h2>
    <div class="row">Player A <input data-path="book_odds.a"></div>
    <div class="row">Player B <input data-path="book_odds.b"></div>
    <button onclick="update()">Update</button>
    <h2>Fair prices</h2>
    <div class="row">Per-frame win p (A) <span class="out" id="o-pframe"></span></div>
    <div class="row">Per-frame fair odds <span class="out" id="o-oframe"></span></div>
    <div class="row">Match win p (A) <span class="out" id="o-pmatch"></span></div>
    <div class="row">Player A fair odds <span class="out" id="o-oa"></span></div>
    <div class="row">Player B fair odds <span class="out" id="o-ob"></span></div>
    <p id="value"></p>
    <p id="hint">Fill season + live + score, then click Update.</p>
  </section>
</main>
<script>
const SEASON = [["points","Points scored"],["matches","Matches played"],["win_rate","Match win rate %"],
  ["shot_time","Avg shot time (s)"],["fifties","50+ breaks"],["centuries","100+ breaks"]];
const LIVE = [["pot_rate","Pot rate %"],["shot_time","Avg shot time (s)"],["fifties","50+ breaks"],
  ["centuries","100+ breaks"],["high_break","Highest break"],["points","Total match points"],
  ["shots","Shots taken"],["table_time","Time on table %"]];
let model = null;

function build(id, title, block, fields) {
  const el = document.getElementById(id);
  for (const p of ["a", "b"]) {
    el.insertAdjacentHTML("beforeend", `<h2>Player ${p.toUpperCase()} &mdash; ${title}</h2>`);
    for (const [key, label] of fields) {
      el.insertAdjacentHTML("beforeend",
        `<div class="row">${label} <input data-path="${block}.${p}.${key}"></div>`);
    }
  }
}

function setPath(obj, path, value) {
  const keys = path.split(".");
  let cur = obj;
  for (const k of keys.slice(0, -1)) cur = cur[k] = cur[k] || {};
  cur[keys[keys.length - 1]] = value;
}

function clearOutputs() {
  for (const id of ["o-pframe","o-oframe","o-pmatch","o-oa","o-ob","value"]) {
    document.getElementById(id).textContent = "";
  }
}

function sideText(label, side) {
  if (side.status === "blank") return `${label}: -`;
  if (side.status === "invalid") return `${label}: invalid odds`;
  const cls = side.band === "value" ? "pos" : (side.band === "no_value" ? "neg" : "");
  const edge = (side.edge_pct >= 0 ? "+" : "") + side.edge_pct.toFixed(1);
  return `<span class="${cls}">${label}: Fair ${side.fair_odds.toFixed(2)} vs Book ${side.book_odds.toFixed(2)} ` +
    `&rarr; Edge ${edge}% ${side.band.replace("_", " ").toUpperCase()}</span>`;
}

async function update() {
  const req = {};
  document.querySelectorAll("input[data-path]").forEach(i => setPath(req, i.dataset.path, i.value));
  req.model = JSON.parse(JSON.stringify(model));
  req.model.realism.shrink_lambda = parseFloat(document.getElementById("lambda").value);
  req.model.realism.cap_enabled = document.getElementById("cap-on").checked;
  req.model.realism.cap_min = parseFloat(document.getElementById("cap-min").value);
  req.model.realism.cap_max = parseFloat(document.getElementById("cap-max").value);

  const res = await fetch("/api/evaluate", {
    method: "POST", headers: {"Content-Type": "application/json"}, body: JSON.stringify(req)
  });
  const hint = document.getElementById("hint");
  if (!res.ok) {
    clearOutputs();
    const body = await res.json().catch(() => ({}));
    hint.textContent = body.hint || "Fill required Season + Live + Score fields and click Update.";
    return;
  }
  const e = await res.json();
  document.getElementById("o-pframe").textContent = e.frame.value.toFixed(3);
  document.getElementById("o-oframe").textContent = e.fair.frame.toFixed(2);
  document.getElementById("o-pmatch").textContent = e.match_probability.toFixed(3);
  document.getElementById("o-oa").textContent = e.fair.player_a.toFixed(2);
  document.getElementById("o-ob").textContent = e.fair.player_b.toFixed(2);
  document.getElementById("value").innerHTML =
    sideText("Player A", e.value.player_a) + "<br>" + sideText("Player B", e.value.player_b);
  hint.textContent = "";
}

async function init() {
  build("season", "Season", "season", SEASON);
  build("live", "Live", "live", LIVE);
  model = await (await fetch("/api/model")).json();
  document.getElementById("lambda").value = model.realism.shrink_lambda;
  document.getElementById("cap-on").checked = model.realism.cap_enabled;
  document.getElementById("cap-min").value = model.realism.cap_min;
  document.getElementById("cap-max").value = model.realism.cap_max;
}
init();
</script>
</body>
</html>
"#;
