use std::collections::HashSet;
use super::pool::{LoadCounter, PairingPool};
use super::types::{Pair, Round, Team};

/// Builds one round greedily from the remaining pool.
///
/// Teams are visited from least to most loaded; each one takes the first candidate pair
/// whose teams are both still unassigned. Candidates are ordered by combined load, with
/// the pair at `priority_index` moved to the front when the index is non-zero. Pairs
/// against the bye are consumed from the pool but are not recorded as matches.
pub fn build_round(
    number: usize,
    pool: &mut PairingPool,
    loads: &mut LoadCounter,
    priority_index: usize,
) -> Round {
    let visitation_order = loads.visitation_order();

    let mut candidates: Vec<Pair> = pool.pairs().to_vec();
    candidates.sort_by_key(|pair| loads.pair_load(pair));

    if priority_index > 0 {
        if priority_index < candidates.len() {
            let promoted = candidates.remove(priority_index);
            candidates.insert(0, promoted);
        } else {
            log::warn!(
                "Round {}: ignoring priority index {} ({} candidate pairs)",
                number, priority_index, candidates.len()
            );
        }
    }

    let mut assigned: HashSet<Team> = HashSet::new();
    let mut matches = Vec::new();

    for team in &visitation_order {
        if assigned.contains(team) {
            continue;
        }

        let found = candidates.iter().position(|pair| {
            pair.contains(team) && !assigned.contains(&pair.first) && !assigned.contains(&pair.second)
        });

        if let Some(index) = found {
            let pair = candidates.remove(index);
            pool.remove(&pair);

            if pair.is_real() {
                loads.increment(&pair.first);
                loads.increment(&pair.second);
            }

            assigned.insert(pair.first.clone());
            assigned.insert(pair.second.clone());

            if pair.is_real() {
                matches.push(pair);
            }
        }
    }

    let playing: HashSet<&Team> = matches.iter().flat_map(|pair| [&pair.first, &pair.second]).collect();
    let free_teams: Vec<Team> = loads
        .teams()
        .iter()
        .filter(|team| !team.is_bye() && !playing.contains(team))
        .cloned()
        .collect();

    matches.sort();

    log::debug!("Round {}: {} matches, {} free teams", number, matches.len(), free_teams.len());

    Round {
        number,
        matches,
        free_teams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(labels: &str, bye: bool) -> Vec<Team> {
        let mut teams: Vec<Team> = labels.chars().map(|c| Team::real(c.to_string())).collect();
        if bye {
            teams.push(Team::Bye);
        }
        teams
    }

    fn labels(pairs: &[Pair]) -> Vec<String> {
        pairs.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_first_round_of_four() {
        let input = teams("ABCD", false);
        let mut pool = PairingPool::new(&input);
        let mut loads = LoadCounter::new(&input);

        let round = build_round(1, &mut pool, &mut loads, 0);
        assert_eq!(labels(&round.matches), vec!["A-B", "C-D"]);
        assert!(round.free_teams.is_empty());
        assert_eq!(pool.pairs().len(), 4);
        for team in &input {
            assert_eq!(loads.get(team), 1);
        }
    }

    #[test]
    fn test_priority_index_promotes_candidate() {
        let input = teams("ABCD", false);
        let mut pool = PairingPool::new(&input);
        let mut loads = LoadCounter::new(&input);

        // Candidate 2 is A-D
        let round = build_round(1, &mut pool, &mut loads, 2);
        assert_eq!(labels(&round.matches), vec!["A-D", "B-C"]);
    }

    #[test]
    fn test_out_of_range_priority_is_ignored() {
        let input = teams("ABCD", false);
        let mut pool = PairingPool::new(&input);
        let mut loads = LoadCounter::new(&input);

        let round = build_round(1, &mut pool, &mut loads, 40);
        assert_eq!(labels(&round.matches), vec!["A-B", "C-D"]);
    }

    #[test]
    fn test_bye_pair_is_consumed_but_not_counted() {
        let input = teams("ABC", true);
        let mut pool = PairingPool::new(&input);
        let mut loads = LoadCounter::new(&input);

        let round = build_round(1, &mut pool, &mut loads, 0);
        assert_eq!(labels(&round.matches), vec!["A-B"]);
        assert_eq!(round.free_teams, vec![Team::real("C")]);
        assert!(!pool.pairs().contains(&Pair::new(Team::real("C"), Team::Bye)));
        assert_eq!(loads.get(&Team::real("C")), 0);
        assert_eq!(loads.get(&Team::Bye), 0);
    }

    #[test]
    fn test_unmatched_team_is_free_without_bye() {
        let input = teams("ABC", false);
        let mut pool = PairingPool::new(&input);
        let mut loads = LoadCounter::new(&input);

        let round = build_round(1, &mut pool, &mut loads, 0);
        assert_eq!(labels(&round.matches), vec!["A-B"]);
        assert_eq!(round.free_teams, vec![Team::real("C")]);
        assert_eq!(pool.pairs().len(), 2);
    }

    #[test]
    fn test_empty_pool_gives_empty_round() {
        let input = teams("A", false);
        let mut pool = PairingPool::new(&input);
        let mut loads = LoadCounter::new(&input);

        let round = build_round(1, &mut pool, &mut loads, 0);
        assert!(round.matches.is_empty());
        assert_eq!(round.free_teams, vec![Team::real("A")]);
    }
}
