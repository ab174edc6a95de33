// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the request/response cycle. Each decision is written as one JSONL line
// that the replay module can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Action, Context};

/// A single logged decision
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecisionRecord {
    pub round: i32,
    pub snake_id: i32,
    pub action: String,
    pub context: Context,
    pub timestamp: String,
}

impl DecisionRecord {
    pub fn new(snake_id: i32, context: Context, action: Action) -> Self {
        DecisionRecord {
            round: context.current_round,
            snake_id,
            action: action.as_str().to_string(),
            context,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_decision(&self, snake_id: i32, context: Context, action: Action) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let record = DecisionRecord::new(snake_id, context, action);

        tokio::spawn(async move {
            Self::write_record(file_handle, record).await;
        });
    }

    /// Logs a decision and waits until it is on disk
    pub async fn log_decision_now(&self, snake_id: i32, context: Context, action: Action) {
        if !self.enabled {
            return;
        }

        let record = DecisionRecord::new(snake_id, context, action);
        Self::write_record(self.file.clone(), record).await;
    }

    async fn write_record(file_handle: Arc<Mutex<Option<File>>>, record: DecisionRecord) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&record) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
