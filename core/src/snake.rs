use std::collections::VecDeque;

use serde::Serialize;

use crate::rng::rand_index;

pub const GRID_SIZE: i32 = 21;
pub const TICK_MS: u32 = 130;
pub const GAME_OVER_MESSAGE: &str = "Game over. Press Restart to try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        let (ax, ay) = self.delta();
        let (bx, by) = other.delta();
        ax + bx == 0 && ay + by == 0
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Some(Direction::Up),
            "arrowdown" | "s" => Some(Direction::Down),
            "arrowleft" | "a" => Some(Direction::Left),
            "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn from_control(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Dominant axis of a swipe; ties go vertical.
    pub fn from_swipe(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved,
    Ate { score: u32 },
    Crashed,
}

#[derive(Clone, Debug, Serialize)]
pub struct SnakeGame {
    body: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
    food: Cell,
    score: u32,
    running: bool,
    over: bool,
    seed: u32,
    draws: u32,
}

impl SnakeGame {
    pub fn new(seed: u32) -> Self {
        let mut game = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Cell::new(10, 10),
            score: 0,
            running: false,
            over: false,
            seed,
            draws: 0,
        };
        game.reset();
        game
    }

    pub fn reset(&mut self) {
        self.body = VecDeque::from([Cell::new(9, 10), Cell::new(8, 10), Cell::new(7, 10)]);
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.running = false;
        self.over = false;
        self.place_food();
    }

    pub fn body(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Returns `false` when a game is already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.over = false;
        true
    }

    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.running || self.direction.is_opposite(direction) {
            return false;
        }
        self.next_direction = direction;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        let Some(head) = self.head() else {
            return TickOutcome::Idle;
        };
        self.direction = self.next_direction;
        let (dx, dy) = self.direction.delta();
        let next = Cell::new(
            (head.x + dx).rem_euclid(GRID_SIZE),
            (head.y + dy).rem_euclid(GRID_SIZE),
        );
        // The tail still counts: it has not moved yet this tick.
        if self.body.contains(&next) {
            self.running = false;
            self.over = true;
            return TickOutcome::Crashed;
        }
        self.body.push_front(next);
        if next == self.food {
            self.score += 1;
            self.place_food();
            TickOutcome::Ate { score: self.score }
        } else {
            self.body.pop_back();
            TickOutcome::Moved
        }
    }

    fn place_food(&mut self) {
        let free: Vec<Cell> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        if free.is_empty() {
            return;
        }
        self.draws = self.draws.wrapping_add(1);
        let index = rand_index(self.seed, self.draws, free.len());
        self.food = free[index];
    }

    #[cfg(test)]
    fn with_body(&mut self, cells: &[(i32, i32)], direction: Direction) {
        self.body = cells.iter().map(|(x, y)| Cell::new(*x, *y)).collect();
        self.direction = direction;
        self.next_direction = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut game = SnakeGame::new(1);
        assert_eq!(game.tick(), TickOutcome::Idle);
        assert!(!game.set_direction(Direction::Up));
        assert!(game.start());
        assert!(!game.start());
    }

    #[test]
    fn opposite_turn_is_ignored() {
        let mut game = SnakeGame::new(1);
        game.start();
        assert!(!game.set_direction(Direction::Left));
        assert!(game.set_direction(Direction::Up));
    }

    #[test]
    fn moves_and_wraps() {
        let mut game = SnakeGame::new(3);
        game.start();
        game.with_body(&[(20, 5), (19, 5), (18, 5)], Direction::Right);
        game.food = Cell::new(0, 0);
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_eq!(game.head(), Some(Cell::new(0, 5)));
        assert_eq!(game.len(), 3);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut game = SnakeGame::new(5);
        game.start();
        game.food = Cell::new(10, 10);
        assert_eq!(game.tick(), TickOutcome::Ate { score: 1 });
        assert_eq!(game.len(), 4);
        assert!(!game.body().any(|cell| *cell == game.food()));
    }

    #[test]
    fn self_collision_ends_game() {
        let mut game = SnakeGame::new(9);
        game.start();
        game.with_body(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Direction::Down);
        game.food = Cell::new(0, 0);
        assert_eq!(game.tick(), TickOutcome::Crashed);
        assert!(game.is_over());
        assert!(!game.is_running());
        assert_eq!(game.tick(), TickOutcome::Idle);
    }

    #[test]
    fn restart_resets_state() {
        let mut game = SnakeGame::new(11);
        game.start();
        game.food = Cell::new(10, 10);
        game.tick();
        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.len(), 3);
        assert!(game.is_running());
        assert_eq!(game.direction(), Direction::Right);
    }

    #[test]
    fn food_never_on_body() {
        for seed in 0..64 {
            let game = SnakeGame::new(seed);
            assert!(!game.body().any(|cell| *cell == game.food()));
        }
    }

    #[test]
    fn input_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("Enter"), None);
        assert_eq!(Direction::from_control("left"), Some(Direction::Left));
        assert_eq!(Direction::from_swipe(30.0, -4.0), Direction::Right);
        assert_eq!(Direction::from_swipe(-2.0, -40.0), Direction::Up);
    }
}
