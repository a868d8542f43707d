use rand::rngs::StdRng;
use rand::{distributions::Uniform, prelude::Distribution, Rng, SeedableRng};

use super::{ActionEnumerator, EnvError, Environment};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GridWorldAction {
    North,
    South,
    East,
    West,
}

impl GridWorldAction {
    pub const ALL: [GridWorldAction; 4] = [
        GridWorldAction::North,
        GridWorldAction::South,
        GridWorldAction::East,
        GridWorldAction::West,
    ];

    fn delta(&self) -> (isize, isize) {
        match self {
            GridWorldAction::North => (0, 1),
            GridWorldAction::South => (0, -1),
            GridWorldAction::East => (1, 0),
            GridWorldAction::West => (-1, 0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridWorldState {
    pub x: usize,
    pub y: usize,
}

impl GridWorldState {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Static description of a grid: size, walls and where it ends.
#[derive(Debug, Clone)]
pub struct GridWorldDomain {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    goal: GridWorldState,
    success_probability: f64,
}

impl GridWorldDomain {
    pub fn new(width: usize, height: usize, goal: GridWorldState) -> Self {
        Self {
            width,
            height,
            walls: vec![false; width * height],
            goal,
            success_probability: 1.0,
        }
    }

    /// Classic 11x11 layout split in four rooms connected by single-cell doors.
    pub fn four_rooms(success_probability: f64) -> Self {
        let mut domain = Self::new(11, 11, GridWorldState::new(10, 10));
        domain.success_probability = success_probability;
        domain.horizontal_wall(0, 0, 5);
        domain.horizontal_wall(2, 4, 5);
        domain.horizontal_wall(6, 7, 4);
        domain.horizontal_wall(9, 10, 4);
        domain.vertical_wall(0, 0, 5);
        domain.vertical_wall(2, 7, 5);
        domain.vertical_wall(9, 10, 5);
        domain
    }

    pub fn horizontal_wall(&mut self, x_start: usize, x_end: usize, y: usize) {
        for x in x_start..=x_end {
            let i = self.index(x, y);
            self.walls[i] = true;
        }
    }

    pub fn vertical_wall(&mut self, y_start: usize, y_end: usize, x: usize) {
        for y in y_start..=y_end {
            let i = self.index(x, y);
            self.walls[i] = true;
        }
    }

    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        self.walls[self.index(x, y)]
    }

    pub fn goal(&self) -> GridWorldState {
        self.goal
    }

    pub fn is_terminal(&self, state: &GridWorldState) -> bool {
        *state == self.goal
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Cell reached when the move succeeds, borders and walls keep the agent in place.
    pub fn move_from(&self, state: &GridWorldState, action: GridWorldAction) -> GridWorldState {
        let (dx, dy) = action.delta();
        let nx = state.x as isize + dx;
        let ny = state.y as isize + dy;
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return *state;
        }
        if self.is_wall(nx as usize, ny as usize) {
            return *state;
        }
        GridWorldState::new(nx as usize, ny as usize)
    }
}

impl ActionEnumerator<GridWorldState, GridWorldAction> for GridWorldDomain {
    fn legal_actions(&self, _state: &GridWorldState) -> Vec<GridWorldAction> {
        GridWorldAction::ALL.to_vec()
    }
}

#[derive(Debug, Clone)]
pub struct GridWorldEnv {
    domain: GridWorldDomain,
    initial_state: GridWorldState,
    agent: GridWorldState,
    rng: StdRng,
    direction_decider: Uniform<f64>,
}

impl GridWorldEnv {
    pub fn new(domain: GridWorldDomain, initial_state: GridWorldState, seed: u64) -> Self {
        Self {
            domain,
            initial_state,
            agent: initial_state,
            rng: StdRng::seed_from_u64(seed),
            direction_decider: Uniform::from(0.0..1.0),
        }
    }

    pub fn four_rooms(seed: u64) -> Self {
        Self::new(
            GridWorldDomain::four_rooms(0.8),
            GridWorldState::new(0, 0),
            seed,
        )
    }

    pub fn domain(&self) -> &GridWorldDomain {
        &self.domain
    }

    /// Direction actually taken: the intended one with the domain's success
    /// probability, otherwise one of the remaining three chosen uniformly.
    fn sample_direction(&mut self, intended: GridWorldAction) -> GridWorldAction {
        if self.direction_decider.sample(&mut self.rng) < self.domain.success_probability {
            return intended;
        }
        let others: Vec<GridWorldAction> = GridWorldAction::ALL
            .iter()
            .copied()
            .filter(|a| *a != intended)
            .collect();
        others[self.rng.gen_range(0..others.len())]
    }
}

impl Environment<GridWorldState, GridWorldAction> for GridWorldEnv {
    fn current_observation(&self) -> GridWorldState {
        self.agent
    }

    fn is_in_terminal_state(&self) -> bool {
        self.domain.is_terminal(&self.agent)
    }

    fn execute_action(
        &mut self,
        action: &GridWorldAction,
    ) -> Result<(GridWorldState, f64, bool), EnvError> {
        if self.is_in_terminal_state() {
            return Err(EnvError::EnvNotReady);
        }
        let direction = self.sample_direction(*action);
        self.agent = self.domain.move_from(&self.agent, direction);
        Ok((self.agent, -1.0, self.is_in_terminal_state()))
    }

    fn reset_environment(&mut self) {
        self.agent = self.initial_state;
    }
}
