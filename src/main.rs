#[macro_use]
extern crate rocket;

use log::info;
use rocket::fairing::AdHoc;
use std::env;

use snakego_bot::bot::Bot;
use snakego_bot::config::Config;
use snakego_bot::debug_logger::DebugLogger;

mod handler;

#[launch]
async fn rocket() -> _ {
    // Hosting services usually hand us `PORT`, while Rocket reads `ROCKET_PORT`.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // Default to 'info' unless `RUST_LOG` says otherwise.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting SnakeGo bot server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::new(config);

    rocket::build()
        .manage(bot)
        .manage(logger)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "snakego-bot");
            })
        }))
        .mount(
            "/",
            routes![
                handler::index,
                handler::get_move,
                handler::get_moves,
                handler::end
            ],
        )
}
