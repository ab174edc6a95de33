// Configuration module for reading SnakeGo.toml
// This module provides OOP-style configuration management for the SnakeGo bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub policy: PolicyConfig,
    pub debug: DebugConfig,
}

/// Move selector constants
#[derive(Debug, Deserialize, Clone)]
pub struct PolicyConfig {
    /// Minimum primary snake length before it splits
    pub split_min_length: usize,
    /// Splitting stops once we control this many snakes
    pub max_own_snakes: usize,
    /// Stepping onto the neck is illegal only for snakes longer than this
    pub reversal_min_length: usize,
    /// Rounds an item stays on the map after it appears
    pub item_expire_limit: i32,
    /// Width of the arrival window that makes an item worth chasing
    pub item_reach_horizon: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the SnakeGo.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from SnakeGo.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("SnakeGo.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in SnakeGo.toml
    pub fn default_hardcoded() -> Self {
        Config {
            policy: PolicyConfig {
                split_min_length: 10,
                max_own_snakes: 4,
                reversal_min_length: 2,
                item_expire_limit: 16,
                item_reach_horizon: 16,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snakego_decisions.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load SnakeGo.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
