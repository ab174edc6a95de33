// Library exports for the SnakeGo bot
// This allows the replay tool and other utilities to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod replay;
pub mod types;
