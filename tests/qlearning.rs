use tabular_qlearning::action_selection::TieBreak;
use tabular_qlearning::env::{
    EnvError, Environment, GridWorldAction, GridWorldDomain, GridWorldEnv, GridWorldState,
};
use tabular_qlearning::observation::IdentityCanonicalizer;
use tabular_qlearning::policy::ConstantValueInitialization;
use tabular_qlearning::trainer::{evaluate, train};
use tabular_qlearning::{AgentConfig, Episode, Error, LearningAgent, QLearningAgent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Node {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Dir {
    Left,
    Right,
}

/// A: `Left` stays in A, `Right` moves to the terminal B. Every step costs 1.
struct TwoStateEnv {
    node: Node,
}

impl Environment<Node, Dir> for TwoStateEnv {
    fn current_observation(&self) -> Node {
        self.node
    }

    fn is_in_terminal_state(&self) -> bool {
        self.node == Node::B
    }

    fn execute_action(&mut self, action: &Dir) -> Result<(Node, f64, bool), EnvError> {
        if *action == Dir::Right {
            self.node = Node::B;
        }
        Ok((self.node, -1.0, self.is_in_terminal_state()))
    }

    fn reset_environment(&mut self) {
        self.node = Node::A;
    }
}

fn two_state_actions(node: &Node) -> Vec<Dir> {
    match node {
        Node::A => vec![Dir::Left, Dir::Right],
        Node::B => vec![],
    }
}

fn scenario_config() -> AgentConfig {
    AgentConfig::new(0.9, 0.5, 0.0)
        .with_tie_break(TieBreak::FirstMatch)
        .with_seed(0)
}

#[test]
fn zero_initialized_scenario_switches_to_right_after_one_update() {
    let mut agent: QLearningAgent<Node, Dir, IdentityCanonicalizer> = QLearningAgent::with_config(
        two_state_actions,
        IdentityCanonicalizer,
        ConstantValueInitialization::new(0.0),
        scenario_config(),
    )
    .unwrap();
    let mut env = TwoStateEnv { node: Node::A };

    let episode = agent.run_learning_episode(&mut env, Some(5)).unwrap();

    assert_eq!(episode.actions(), &[Dir::Left, Dir::Right]);
    assert_eq!(agent.q_value(&Node::A, &Dir::Left).unwrap(), -0.5);
    assert_eq!(agent.q_value(&Node::A, &Dir::Right).unwrap(), -0.5);
}

#[test]
fn step_budget_cuts_a_never_ending_left_loop() {
    // Right starts out bad enough that Left stays greedy for the whole run
    let mut agent: QLearningAgent<Node, Dir, IdentityCanonicalizer> = QLearningAgent::with_config(
        two_state_actions,
        IdentityCanonicalizer,
        |_: &Node, action: &Dir| if *action == Dir::Right { -100.0 } else { 0.0 },
        scenario_config(),
    )
    .unwrap();
    let mut env = TwoStateEnv { node: Node::A };

    let episode = agent.run_learning_episode(&mut env, Some(5)).unwrap();

    assert_eq!(episode.max_time_step(), 5);
    assert_eq!(episode.num_time_steps(), 6);
    for transition in episode.transitions() {
        assert_eq!(
            (
                *transition.state,
                *transition.action,
                transition.reward,
                *transition.next_state
            ),
            (Node::A, Dir::Left, -1.0, Node::A)
        );
    }

    let mut expected: f64 = 0.0;
    for _ in 0..5 {
        let target = -1.0 + 0.9 * expected;
        expected += 0.5 * (target - expected);
    }
    let learned = agent.q_value(&Node::A, &Dir::Left).unwrap();
    assert!((learned - expected).abs() < 1e-12, "{} != {}", learned, expected);
    assert_eq!(agent.q_value(&Node::A, &Dir::Right).unwrap(), -100.0);
}

#[test]
fn episodes_never_exceed_their_budget() {
    let mut agent: QLearningAgent<Node, Dir, IdentityCanonicalizer> = QLearningAgent::with_config(
        |_: &Node| vec![Dir::Left],
        IdentityCanonicalizer,
        ConstantValueInitialization::new(0.0),
        AgentConfig::new(0.95, 0.3, 0.5).with_seed(8),
    )
    .unwrap();
    let mut env = TwoStateEnv { node: Node::A };
    for budget in [0, 1, 7, 50] {
        let episode = agent.run_learning_episode(&mut env, Some(budget)).unwrap();
        assert_eq!(episode.max_time_step(), budget);
    }
}

#[test]
fn fresh_state_values_match_initialization_until_updated() {
    let mut agent: QLearningAgent<Node, Dir, IdentityCanonicalizer> = QLearningAgent::with_config(
        two_state_actions,
        IdentityCanonicalizer,
        |_: &Node, action: &Dir| match action {
            Dir::Left => 1.5,
            Dir::Right => -2.0,
        },
        scenario_config(),
    )
    .unwrap();
    let values: Vec<(Dir, f64)> = agent
        .q_values(&Node::A)
        .iter()
        .map(|entry| (entry.action, entry.value))
        .collect();
    assert_eq!(values, vec![(Dir::Left, 1.5), (Dir::Right, -2.0)]);
    assert_eq!(agent.value(&Node::A), 1.5);
    let again: Vec<f64> = agent.q_values(&Node::A).iter().map(|e| e.value).collect();
    assert_eq!(again, vec![1.5, -2.0]);

    let mut env = TwoStateEnv { node: Node::A };
    agent.run_learning_episode(&mut env, Some(3)).unwrap();
    agent.reset_solver();
    let reset: Vec<f64> = agent.q_values(&Node::A).iter().map(|e| e.value).collect();
    assert_eq!(reset, vec![1.5, -2.0]);
}

#[test]
fn unknown_action_is_reported() {
    let mut agent: QLearningAgent<Node, Dir, IdentityCanonicalizer> = QLearningAgent::with_config(
        two_state_actions,
        IdentityCanonicalizer,
        ConstantValueInitialization::new(0.0),
        scenario_config(),
    )
    .unwrap();
    match agent.q_value(&Node::B, &Dir::Left) {
        Err(Error::ActionNotFound { state, action }) => {
            assert_eq!(state, "B");
            assert_eq!(action, "Left");
        }
        other => panic!("unexpected {:?}", other),
    }
}

/// Fails on the step after `fail_after` successful ones.
struct FlakyEnv {
    steps: usize,
    fail_after: usize,
}

impl Environment<u32, u32> for FlakyEnv {
    fn current_observation(&self) -> u32 {
        self.steps as u32
    }

    fn is_in_terminal_state(&self) -> bool {
        false
    }

    fn execute_action(&mut self, _action: &u32) -> Result<(u32, f64, bool), EnvError> {
        if self.steps == self.fail_after {
            return Err(EnvError::Failed("sensor lost".to_string()));
        }
        self.steps += 1;
        Ok((self.steps as u32, 1.0, false))
    }

    fn reset_environment(&mut self) {
        self.steps = 0;
    }
}

#[test]
fn environment_failure_aborts_and_keeps_the_partial_record() {
    let mut agent: QLearningAgent<u32, u32, IdentityCanonicalizer> = QLearningAgent::with_config(
        |_: &u32| vec![0, 1],
        IdentityCanonicalizer,
        ConstantValueInitialization::new(0.0),
        AgentConfig::new(0.5, 1.0, 0.0).with_seed(2),
    )
    .unwrap();
    let mut env = FlakyEnv {
        steps: 0,
        fail_after: 2,
    };
    let mut episode: Episode<u32, u32> = Episode::new(env.current_observation());

    let result = agent.run_learning_episode_into(&mut env, None, &mut episode);

    match result {
        Err(Error::Env(EnvError::Failed(message))) => assert_eq!(message, "sensor lost"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(episode.max_time_step(), 2);
    assert_eq!(episode.states(), &[0, 1, 2]);
    assert_eq!(episode.rewards(), &[1.0, 1.0]);
}

#[test]
fn corridor_values_converge_to_discounted_costs() {
    let domain = GridWorldDomain::new(5, 1, GridWorldState::new(4, 0));
    let mut env = GridWorldEnv::new(domain.clone(), GridWorldState::new(0, 0), 3);
    let mut agent: QLearningAgent<GridWorldState, GridWorldAction, IdentityCanonicalizer> =
        QLearningAgent::with_config(
            domain,
            IdentityCanonicalizer,
            ConstantValueInitialization::new(0.0),
            AgentConfig::new(0.9, 0.5, 0.3).with_seed(21),
        )
        .unwrap();

    train(&mut agent, &mut env, 500, Some(200), false).unwrap();

    for x in 0..4usize {
        let distance = 4 - x;
        let expected: f64 = -(0..distance).map(|t| 0.9f64.powi(t as i32)).sum::<f64>();
        let value = agent.value(&GridWorldState::new(x, 0));
        assert!(
            (value - expected).abs() < 1e-2,
            "state {}: {} != {}",
            x,
            value,
            expected
        );
    }

    let evaluation = evaluate(&mut agent, &mut env, 5, Some(50)).unwrap();
    assert_eq!(evaluation.episode_lengths, vec![4; 5]);
    assert_eq!(evaluation.episode_rewards, vec![-4.0; 5]);
    let greedy = agent
        .q_values(&GridWorldState::new(0, 0))
        .iter()
        .max_by(|a, b| a.value.partial_cmp(&b.value).unwrap())
        .map(|entry| entry.action);
    assert_eq!(greedy, Some(GridWorldAction::East));
}

#[test]
fn four_rooms_episodes_get_shorter() {
    let mut env = GridWorldEnv::four_rooms(5);
    let mut agent: QLearningAgent<GridWorldState, GridWorldAction, IdentityCanonicalizer> =
        QLearningAgent::with_config(
            env.domain().clone(),
            IdentityCanonicalizer,
            ConstantValueInitialization::new(0.0),
            AgentConfig::default().with_seed(13),
        )
        .unwrap();

    let results = train(&mut agent, &mut env, 1000, None, false).unwrap();

    assert_eq!(results.episode_lengths.len(), 1000);
    let early: f64 = results.episode_lengths[..10].iter().sum::<usize>() as f64 / 10.0;
    let late: f64 = results.episode_lengths[900..].iter().sum::<usize>() as f64 / 100.0;
    assert!(late < early / 2.0, "early {} late {}", early, late);
    assert!(late < 150.0, "late {}", late);
    assert!(!env.is_in_terminal_state());
}
