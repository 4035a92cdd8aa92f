use std::collections::HashMap;
use itertools::Itertools;
use super::types::{Pair, Team};

/// Pairs not yet scheduled, in combination order of the input teams
#[derive(Debug, Clone)]
pub struct PairingPool {
    pairs: Vec<Pair>,
}

impl PairingPool {
    pub fn new(teams: &[Team]) -> Self {
        let pairs = teams
            .iter()
            .cloned()
            .tuple_combinations()
            .map(|(first, second)| Pair::new(first, second))
            .collect();
        PairingPool { pairs }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Removes a scheduled pair. Returns false if it was not in the pool.
    pub fn remove(&mut self, pair: &Pair) -> bool {
        match self.pairs.iter().position(|p| p == pair) {
            Some(index) => {
                self.pairs.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn real_pairs(&self) -> Vec<Pair> {
        self.pairs.iter().filter(|p| p.is_real()).cloned().collect()
    }
}

/// Real matches assigned so far, per team
#[derive(Debug, Clone)]
pub struct LoadCounter {
    teams: Vec<Team>,
    loads: HashMap<Team, u32>,
}

impl LoadCounter {
    pub fn new(teams: &[Team]) -> Self {
        LoadCounter {
            teams: teams.to_vec(),
            loads: teams.iter().map(|team| (team.clone(), 0)).collect(),
        }
    }

    /// Teams in input order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn get(&self, team: &Team) -> u32 {
        self.loads.get(team).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, team: &Team) {
        *self.loads.entry(team.clone()).or_insert(0) += 1;
    }

    /// Combined load of both sides of a pair
    pub fn pair_load(&self, pair: &Pair) -> u32 {
        self.get(&pair.first) + self.get(&pair.second)
    }

    /// Teams ascending by load; ties keep input order
    pub fn visitation_order(&self) -> Vec<Team> {
        let mut order = self.teams.clone();
        order.sort_by_key(|team| self.get(team));
        order
    }
}
