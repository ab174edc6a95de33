// SnakeGo move selector
//
// Every tick the host hands us one of our snakes plus a snapshot of the board,
// and we answer with a single action. The decision is a fixed priority chain:
//
//   railgun -> split -> policy (item seeking / tail following) -> fallback
//
// Each link either returns an action or passes control to the next one.

use log::{debug, info, warn};
use rayon::prelude::*;
use serde_json::{json, Value};

use crate::config::Config;
use crate::types::{Action, Context, Coord, Direction, GameOverReport, Snake, EMPTY};

/// Result of stepping the head one cell in some direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveClass {
    /// Off the board, into a wall, into another snake, or back onto the neck
    Illegal,
    /// Into free space
    Open,
    /// Onto our own body, closing a loop
    Solidify,
}

impl MoveClass {
    /// Numeric form used in logs: -1 illegal, 0 open, 1 solidify
    pub fn code(&self) -> i8 {
        match self {
            MoveClass::Illegal => -1,
            MoveClass::Open => 0,
            MoveClass::Solidify => 1,
        }
    }
}

/// Classification of each direction, indexed in `Direction::ALL` order
pub type Legality = [MoveClass; 4];

/// Which heuristic steers a snake once the gates have passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// `my_snakes[0]`: chases items
    ItemSeeker,
    /// Every other snake we own: solidifies or curls toward its tail
    TailFollower,
}

impl Policy {
    pub fn for_snake(snake: &Snake, ctx: &Context) -> Self {
        if ctx.is_primary(snake) {
            Policy::ItemSeeker
        } else {
            Policy::TailFollower
        }
    }
}

/// SnakeGo bot with OOP-style API
/// Takes static configuration and exposes one method per host interaction
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    /// Returns bot metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "snakego-bot",
            "version": env!("CARGO_PKG_VERSION"),
        })
    }

    /// Called when a game ends; only reports the result
    /// Corresponds to POST /end endpoint
    pub fn game_over(&self, report: &GameOverReport) {
        info!(
            "GAME OVER: {:?}, winner {}, scores {} : {}",
            report.kind(),
            report.winner,
            report.player0_score,
            report.player1_score
        );
    }

    /// Chooses the action for `snake` on this tick
    ///
    /// Total over its input: every path ends in an action, including a boxed-in
    /// snake, for which the fallback may return a move that kills it.
    pub fn decide(&self, snake: &Snake, ctx: &Context) -> Action {
        if let Some(action) = self.weapon_gate(snake) {
            return action;
        }

        if let Some(action) = self.growth_gate(snake, ctx) {
            return action;
        }

        let legality = self.classify_moves(snake, ctx);
        debug!(
            "Round {}: snake {} legality {:?}",
            ctx.current_round,
            snake.id,
            legality.iter().map(MoveClass::code).collect::<Vec<_>>()
        );

        let steered = match Policy::for_snake(snake, ctx) {
            Policy::ItemSeeker => self.seek_item(snake, &legality, ctx),
            Policy::TailFollower => Self::follow_tail(snake, &legality),
        };

        if let Some(direction) = steered {
            debug!(
                "Round {}: snake {} steered {}",
                ctx.current_round,
                snake.id,
                direction.action().as_str()
            );
            return direction.action();
        }

        Self::fallback(&legality).action()
    }

    /// Decides for every snake in `my_snakes` against the same snapshot
    ///
    /// Results come back in `my_snakes` order.
    pub fn decide_all(&self, ctx: &Context) -> Vec<(i32, Action)> {
        ctx.my_snakes
            .par_iter()
            .map(|snake| (snake.id, self.decide(snake, ctx)))
            .collect()
    }

    /// A held railgun is always fired
    fn weapon_gate(&self, snake: &Snake) -> Option<Action> {
        if snake.has_railgun() {
            Some(Action::FireRailgun)
        } else {
            None
        }
    }

    /// The primary snake splits when long enough and under the population cap
    fn growth_gate(&self, snake: &Snake, ctx: &Context) -> Option<Action> {
        let policy = &self.config.policy;
        if ctx.is_primary(snake)
            && snake.length() >= policy.split_min_length
            && ctx.my_snakes.len() < policy.max_own_snakes
        {
            Some(Action::Split)
        } else {
            None
        }
    }

    /// Classifies each direction for the snake's head
    ///
    /// A snake with no body gets all four directions illegal.
    pub fn classify_moves(&self, snake: &Snake, ctx: &Context) -> Legality {
        let mut legality = [MoveClass::Illegal; 4];
        if let Some(head) = snake.head() {
            for (slot, direction) in legality.iter_mut().zip(Direction::ALL.iter()) {
                *slot = self.classify(snake, &direction.apply(head), ctx);
            }
        }
        legality
    }

    fn classify(&self, snake: &Snake, target: &Coord, ctx: &Context) -> MoveClass {
        if !ctx.in_bounds(target) {
            return MoveClass::Illegal;
        }

        if ctx.wall_at(target) != EMPTY {
            return MoveClass::Illegal;
        }

        let occupant = ctx.snake_at(target);
        if occupant != EMPTY && occupant != snake.id {
            return MoveClass::Illegal;
        }

        // Neck check comes before the own-body check: the neck is own body too
        if snake.length() > self.config.policy.reversal_min_length
            && snake.coord_list.get(1) == Some(target)
        {
            return MoveClass::Illegal;
        }

        if occupant == snake.id {
            return MoveClass::Solidify;
        }

        MoveClass::Open
    }

    /// Item-seeking policy for the primary snake
    ///
    /// Items are tried in list order. An item counts if it has not expired and
    /// the snake could arrive inside its reach window; for it we take the first
    /// open direction that does not increase the distance. If no open
    /// direction works for an item, the next item is tried.
    pub fn seek_item(
        &self,
        snake: &Snake,
        legality: &Legality,
        ctx: &Context,
    ) -> Option<Direction> {
        let head = snake.head()?;
        let policy = &self.config.policy;
        // Round arithmetic in i64: host-supplied times may sit near i32::MAX
        let round = i64::from(ctx.current_round);
        let expire_limit = i64::from(policy.item_expire_limit);
        let reach_horizon = i64::from(policy.item_reach_horizon);

        ctx.item_list
            .iter()
            .filter(|item| i64::from(item.time) + expire_limit > round)
            .find_map(|item| {
                let target = item.coord();
                let distance = head.manhattan(&target);
                let arrival = round + distance;
                let appears = i64::from(item.time);
                if arrival < appears || arrival >= appears + reach_horizon {
                    return None;
                }

                Direction::ALL
                    .iter()
                    .zip(legality.iter())
                    .find(|(direction, class)| {
                        **class == MoveClass::Open
                            && direction.apply(head).manhattan(&target) <= distance
                    })
                    .map(|(direction, _)| *direction)
            })
    }

    /// Tail-following policy for every snake except the primary one
    ///
    /// Closing a loop beats any distance-based move. Otherwise take the first
    /// open direction that keeps the head no farther from the tail.
    pub fn follow_tail(snake: &Snake, legality: &Legality) -> Option<Direction> {
        let head = snake.head()?;
        let tail = snake.tail()?;

        let solidify = Direction::ALL
            .iter()
            .zip(legality.iter())
            .find(|(_, class)| **class == MoveClass::Solidify)
            .map(|(direction, _)| *direction);
        if solidify.is_some() {
            return solidify;
        }

        let distance = head.manhattan(tail);
        Direction::ALL
            .iter()
            .zip(legality.iter())
            .find(|(direction, class)| {
                **class == MoveClass::Open && direction.apply(head).manhattan(tail) <= distance
            })
            .map(|(direction, _)| *direction)
    }

    /// Last resort: first open direction, else first illegal one, else RIGHT
    ///
    /// The second scan can pick a move into a wall, a snake or off the board.
    pub fn fallback(legality: &Legality) -> Direction {
        let first = |wanted: MoveClass| {
            Direction::ALL
                .iter()
                .zip(legality.iter())
                .find(|(_, class)| **class == wanted)
                .map(|(direction, _)| *direction)
        };

        if let Some(direction) = first(MoveClass::Open) {
            return direction;
        }

        if let Some(direction) = first(MoveClass::Illegal) {
            warn!(
                "No open move, falling back to illegal {}",
                direction.action().as_str()
            );
            return direction;
        }

        Direction::Right
    }
}
