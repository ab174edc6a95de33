// HTTP handler bindings for the SnakeGo bot
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Rejecting snapshots whose maps do not match the board size
// - Delegating to Bot methods
// - Serializing responses

use log::warn;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use snakego_bot::bot::Bot;
use snakego_bot::debug_logger::DebugLogger;
use snakego_bot::types::{Context, GameOverReport, MoveRequest};

/// GET / endpoint
/// Returns bot metadata
#[get("/")]
pub fn index(bot: &State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /move endpoint
/// Called for each of our snakes every round
#[post("/move", format = "json", data = "<move_req>")]
pub fn get_move(
    bot: &State<Bot>,
    logger: &State<DebugLogger>,
    move_req: Json<MoveRequest>,
) -> Result<Json<Value>, Status> {
    let MoveRequest { snake_id, context } = move_req.into_inner();

    if let Err(e) = context.validate() {
        warn!("Rejecting snapshot for round {}: {}", context.current_round, e);
        return Err(Status::UnprocessableEntity);
    }

    let snake = context.find_snake(snake_id).ok_or_else(|| {
        warn!("Snake {} is not one of ours", snake_id);
        Status::NotFound
    })?;

    let action = bot.decide(snake, &context);
    logger.log_decision(snake_id, context, action);

    Ok(Json(json!({ "action": action.as_str(), "code": action.code() })))
}

/// POST /moves endpoint
/// Decides for all of our snakes against one snapshot
#[post("/moves", format = "json", data = "<context>")]
pub fn get_moves(bot: &State<Bot>, context: Json<Context>) -> Result<Json<Value>, Status> {
    if let Err(e) = context.validate() {
        warn!("Rejecting snapshot for round {}: {}", context.current_round, e);
        return Err(Status::UnprocessableEntity);
    }

    let actions: Vec<Value> = bot
        .decide_all(&context)
        .into_iter()
        .map(|(snake_id, action)| {
            json!({ "snake_id": snake_id, "action": action.as_str(), "code": action.code() })
        })
        .collect();

    Ok(Json(json!({ "actions": actions })))
}

/// POST /end endpoint
/// Called when a game ends - only logs the result
#[post("/end", format = "json", data = "<report>")]
pub fn end(bot: &State<Bot>, report: Json<GameOverReport>) -> Status {
    bot.game_over(&report);

    Status::Ok
}
