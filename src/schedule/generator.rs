use super::pool::{LoadCounter, PairingPool};
use super::round::build_round;
use super::types::{Schedule, Team};

/// Hard ceiling on round-builder invocations
pub const MAX_ROUNDS: usize = 98;

/// When generation stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// Stop once every pair has been consumed
    #[default]
    PoolExhausted,
    /// Stop at the first round without a real match, even if pairs remain
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Priority index per round; missing entries mean no override
    pub priorities: Vec<usize>,
    pub termination: Termination,
    pub max_rounds: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            priorities: Vec::new(),
            termination: Termination::default(),
            max_rounds: MAX_ROUNDS,
        }
    }
}

/// Generates a full round-robin schedule for `teams` (bye already appended if wanted)
pub fn generate(teams: &[Team], options: &GeneratorOptions) -> Schedule {
    let mut pool = PairingPool::new(teams);
    let mut loads = LoadCounter::new(teams);
    let mut rounds = Vec::new();

    for _ in 0..options.max_rounds {
        if options.termination == Termination::PoolExhausted && pool.is_empty() {
            break;
        }

        let number = rounds.len() + 1;
        let priority_index = options.priorities.get(number - 1).copied().unwrap_or(0);
        let round = build_round(number, &mut pool, &mut loads, priority_index);

        if round.matches.is_empty() {
            match options.termination {
                Termination::Legacy => break,
                // Only bye pairs were consumed, nobody played
                Termination::PoolExhausted => continue,
            }
        }
        rounds.push(round);
    }

    let unscheduled = pool.real_pairs();
    if !unscheduled.is_empty() {
        log::warn!(
            "Schedule stopped after {} rounds with {} pairs unscheduled",
            rounds.len(), unscheduled.len()
        );
    }

    Schedule {
        teams: teams.to_vec(),
        rounds,
        unscheduled,
    }
}
