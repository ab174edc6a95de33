// SnakeGo game-state types
// Snapshots are built by the host once per tick and are read-only for the bot.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel the host uses for "nobody here" in maps and "no item" in slots
pub const EMPTY: i32 = -1;

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Calculates Manhattan distance between two coordinates
    ///
    /// Widened to i64 so host coordinates of any size cannot overflow.
    pub fn manhattan(&self, other: &Coord) -> i64 {
        (i64::from(self.x) - i64::from(other.x)).abs()
            + (i64::from(self.y) - i64::from(other.y)).abs()
    }
}

/// Item placed on the map by the host
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i32,
    pub x: i32,
    pub y: i32,
    /// Round in which the item appears
    pub time: i32,
    /// 0 = growth, 2 = railgun
    #[serde(rename = "type", default)]
    pub kind: i32,
    #[serde(default)]
    pub param: i32,
}

impl Item {
    pub fn coord(&self) -> Coord {
        Coord { x: self.x, y: self.y }
    }
}

/// One snake, head first and tail last
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Snake {
    pub id: i32,
    pub coord_list: Vec<Coord>,
    #[serde(default, deserialize_with = "deserialize_item_slot")]
    pub railgun_item: Option<Item>,
}

impl Snake {
    pub fn length(&self) -> usize {
        self.coord_list.len()
    }

    pub fn head(&self) -> Option<&Coord> {
        self.coord_list.first()
    }

    pub fn tail(&self) -> Option<&Coord> {
        self.coord_list.last()
    }

    pub fn has_railgun(&self) -> bool {
        self.railgun_item.is_some()
    }
}

/// The host fills an empty slot with an item whose id is -1
fn deserialize_item_slot<'de, D>(deserializer: D) -> Result<Option<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    let slot = Option::<Item>::deserialize(deserializer)?;
    Ok(slot.filter(|item| item.id != EMPTY))
}

/// Per-tick snapshot handed to the bot
///
/// Maps are indexed `[x][y]` with `x < length` and `y < width`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Context {
    pub length: i32,
    pub width: i32,
    pub wall_map: Vec<Vec<i32>>,
    pub snake_map: Vec<Vec<i32>>,
    pub my_snakes: Vec<Snake>,
    #[serde(default)]
    pub item_list: Vec<Item>,
    pub current_round: i32,
}

impl Context {
    /// Builds an empty board: no walls, no snakes on the map, no items
    pub fn empty(length: i32, width: i32, current_round: i32) -> Self {
        let grid = vec![vec![EMPTY; width.max(0) as usize]; length.max(0) as usize];
        Context {
            length,
            width,
            wall_map: grid.clone(),
            snake_map: grid,
            my_snakes: Vec::new(),
            item_list: Vec::new(),
            current_round,
        }
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.length && coord.y >= 0 && coord.y < self.width
    }

    /// Wall occupant at `coord`, EMPTY if none or off the grid
    pub fn wall_at(&self, coord: &Coord) -> i32 {
        Self::lookup(&self.wall_map, coord)
    }

    /// Snake id at `coord`, EMPTY if none or off the grid
    pub fn snake_at(&self, coord: &Coord) -> i32 {
        Self::lookup(&self.snake_map, coord)
    }

    fn lookup(map: &[Vec<i32>], coord: &Coord) -> i32 {
        if coord.x < 0 || coord.y < 0 {
            return EMPTY;
        }
        map.get(coord.x as usize)
            .and_then(|column| column.get(coord.y as usize))
            .copied()
            .unwrap_or(EMPTY)
    }

    /// The first of our snakes; it alone seeks items and splits
    pub fn primary_snake(&self) -> Option<&Snake> {
        self.my_snakes.first()
    }

    pub fn is_primary(&self, snake: &Snake) -> bool {
        self.primary_snake().map_or(false, |primary| primary.id == snake.id)
    }

    pub fn find_snake(&self, id: i32) -> Option<&Snake> {
        self.my_snakes.iter().find(|snake| snake.id == id)
    }

    /// Places a snake on the snake map and, if `ours`, appends it to `my_snakes`
    pub fn add_snake(&mut self, snake: Snake, ours: bool) {
        for coord in &snake.coord_list {
            if !self.in_bounds(coord) {
                continue;
            }
            if let Some(cell) = self
                .snake_map
                .get_mut(coord.x as usize)
                .and_then(|column| column.get_mut(coord.y as usize))
            {
                *cell = snake.id;
            }
        }
        if ours {
            self.my_snakes.push(snake);
        }
    }

    /// Checks that both maps cover exactly `length × width`
    pub fn validate(&self) -> Result<(), String> {
        if self.length <= 0 || self.width <= 0 {
            return Err(format!(
                "Invalid board size {}x{}",
                self.length, self.width
            ));
        }

        for (name, map) in [("wall_map", &self.wall_map), ("snake_map", &self.snake_map)] {
            if map.len() != self.length as usize {
                return Err(format!(
                    "{} has {} columns, expected {}",
                    name,
                    map.len(),
                    self.length
                ));
            }
            if let Some((x, column)) = map
                .iter()
                .enumerate()
                .find(|(_, column)| column.len() != self.width as usize)
            {
                return Err(format!(
                    "{} column {} has {} cells, expected {}",
                    name,
                    x,
                    column.len(),
                    self.width
                ));
            }
        }

        Ok(())
    }
}

/// Movement directions in the fixed order every tie-break follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    /// RIGHT, UP, LEFT, DOWN
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// Returns the (dx, dy) offset; UP increases y
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, -1),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        let (dx, dy) = self.delta();
        Coord {
            x: coord.x.saturating_add(dx),
            y: coord.y.saturating_add(dy),
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Direction::Right => Action::MoveRight,
            Direction::Up => Action::MoveUp,
            Direction::Left => Action::MoveLeft,
            Direction::Down => Action::MoveDown,
        }
    }
}

/// Command returned to the host, one per snake per tick
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveRight,
    MoveUp,
    MoveLeft,
    MoveDown,
    FireRailgun,
    Split,
}

impl Action {
    /// Host operation code
    pub fn code(&self) -> u8 {
        match self {
            Action::MoveRight => 1,
            Action::MoveUp => 2,
            Action::MoveLeft => 3,
            Action::MoveDown => 4,
            Action::FireRailgun => 5,
            Action::Split => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Action> {
        match code {
            1 => Some(Action::MoveRight),
            2 => Some(Action::MoveUp),
            3 => Some(Action::MoveLeft),
            4 => Some(Action::MoveDown),
            5 => Some(Action::FireRailgun),
            6 => Some(Action::Split),
            _ => None,
        }
    }

    /// Converts action to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveRight => "right",
            Action::MoveUp => "up",
            Action::MoveLeft => "left",
            Action::MoveDown => "down",
            Action::FireRailgun => "fire",
            Action::Split => "split",
        }
    }

    /// Parses a name as produced by `as_str`, case-insensitively
    pub fn parse(s: &str) -> Result<Action, String> {
        match s.to_lowercase().as_str() {
            "right" => Ok(Action::MoveRight),
            "up" => Ok(Action::MoveUp),
            "left" => Ok(Action::MoveLeft),
            "down" => Ok(Action::MoveDown),
            "fire" => Ok(Action::FireRailgun),
            "split" => Ok(Action::Split),
            _ => Err(format!("Invalid action: {}", s)),
        }
    }
}

/// Body of a per-tick move request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MoveRequest {
    pub snake_id: i32,
    pub context: Context,
}

/// How a game ended, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverType {
    Normal,
    PlayerError,
    IllegalAction,
    InvalidFormat,
    InternalError,
    Unknown(i32),
}

impl GameOverType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0x00 => GameOverType::Normal,
            0x10 => GameOverType::PlayerError,
            0x11 => GameOverType::IllegalAction,
            0x12 => GameOverType::InvalidFormat,
            0x20 => GameOverType::InternalError,
            other => GameOverType::Unknown(other),
        }
    }
}

/// End-of-game notification, logged and otherwise ignored
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GameOverReport {
    pub gameover_type: i32,
    pub winner: i32,
    pub player0_score: i32,
    pub player1_score: i32,
}

impl GameOverReport {
    pub fn kind(&self) -> GameOverType {
        GameOverType::from_code(self.gameover_type)
    }
}
