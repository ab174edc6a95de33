// Replay module for analyzing logged decisions and debugging the move selector
//
// This module provides functionality to:
// 1. Parse JSONL decision logs
// 2. Replay the policy on historical snapshots
// 3. Compare logged vs replayed actions
// 4. Generate analysis reports

use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DecisionRecord;
use crate::types::Action;

/// Result of replaying a single decision
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub round: i32,
    pub snake_id: i32,
    pub original_action: Action,
    pub replayed_action: Action,
    pub matches: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_decisions: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all records from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DecisionRecord>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DecisionRecord = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-runs the policy on one logged snapshot
    pub fn replay_entry(&self, entry: &DecisionRecord) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying round {} for snake {}...", entry.round, entry.snake_id);
        }

        let snake = entry.context.find_snake(entry.snake_id).ok_or_else(|| {
            format!(
                "Snake {} not found among own snakes in round {}",
                entry.snake_id, entry.round
            )
        })?;

        let original_action = Action::parse(&entry.action)?;

        let start_time = Instant::now();
        let replayed_action = self.bot.decide(snake, &entry.context);
        let computation_time_us = start_time.elapsed().as_micros();

        let matches = original_action == replayed_action;

        if self.verbose {
            if matches {
                info!(
                    "Round {} snake {}: ✓ MATCH - {} ({}us)",
                    entry.round,
                    entry.snake_id,
                    replayed_action.as_str(),
                    computation_time_us
                );
            } else {
                warn!(
                    "Round {} snake {}: ✗ MISMATCH - Original: {}, Replayed: {} ({}us)",
                    entry.round,
                    entry.snake_id,
                    original_action.as_str(),
                    replayed_action.as_str(),
                    computation_time_us
                );
            }
        }

        Ok(ReplayResult {
            round: entry.round,
            snake_id: entry.snake_id,
            original_action,
            replayed_action,
            matches,
            computation_time_us,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[DecisionRecord]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay round {}: {}", entry.round, e);
                }
            }
        }

        results
    }

    /// Replays every decision logged in the given rounds
    pub fn replay_rounds(
        &self,
        entries: &[DecisionRecord],
        rounds: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for round in rounds {
            let selected: Vec<&DecisionRecord> =
                entries.iter().filter(|e| e.round == *round).collect();
            if selected.is_empty() {
                return Err(format!("Round {} not found in log file", round));
            }

            for entry in selected {
                match self.replay_entry(entry) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        warn!("Failed to replay round {}: {}", round, e);
                    }
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_decisions = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_decisions - matches;
        let match_rate = if total_decisions > 0 {
            (matches as f64 / total_decisions as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_decisions,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Decisions: {}", stats.total_decisions);
        println!("Matches:         {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:      {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Decision Time:  {:.1}us\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Round {} snake {}: {} → {}",
                    result.round,
                    result.snake_id,
                    result.original_action.as_str(),
                    result.replayed_action.as_str()
                );
            }
            println!();
        }
    }

    /// Validates that the logged action in each round is one of the acceptable ones
    pub fn validate_expected_actions(
        &self,
        entries: &[DecisionRecord],
        expected: &[(i32, Vec<Action>)], // (round, acceptable_actions)
    ) -> Result<(), String> {
        for (round, acceptable) in expected {
            let entry = entries
                .iter()
                .find(|e| e.round == *round)
                .ok_or_else(|| format!("Round {} not found in log", round))?;

            let actual = Action::parse(&entry.action)?;

            if !acceptable.contains(&actual) {
                return Err(format!(
                    "Round {}: Expected one of {:?}, but got {}",
                    round,
                    acceptable.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
                    actual.as_str()
                ));
            }
        }

        Ok(())
    }
}
