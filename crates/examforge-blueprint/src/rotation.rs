//! Least-recently-used rotation over a session's history window.

use std::collections::HashMap;

use crate::random::RandomSource;

/// Pick the option used least recently in `recent` (oldest first).
///
/// Options never seen in the window rank before any seen option. Ties are
/// broken uniformly at random. Returns `None` when `options` is empty.
pub fn least_recently_used<'a>(
    options: &[&'a str],
    recent: &[&str],
    rng: &mut dyn RandomSource,
) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let mut last_seen: HashMap<&str, usize> = HashMap::new();
    for (pos, id) in recent.iter().enumerate() {
        // Offset by one so "never seen" (0) sorts first.
        last_seen.insert(*id, pos + 1);
    }
    let rank = |id: &str| last_seen.get(id).copied().unwrap_or(0);
    let best = options.iter().map(|o| rank(*o)).min()?;
    let tied: Vec<&'a str> = options
        .iter()
        .copied()
        .filter(|o| rank(*o) == best)
        .collect();
    pick(&tied, rng)
}

/// Pick an option absent from `recent` if there is one (uniformly among
/// them); otherwise the option with the fewest occurrences, ties at random.
pub fn least_frequently_used<'a>(
    options: &[&'a str],
    recent: &[&str],
    rng: &mut dyn RandomSource,
) -> Option<&'a str> {
    if options.is_empty() {
        return None;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in recent {
        *counts.entry(*id).or_insert(0) += 1;
    }
    let count = |id: &str| counts.get(id).copied().unwrap_or(0);
    let fewest = options.iter().map(|o| count(*o)).min()?;
    let tied: Vec<&'a str> = options
        .iter()
        .copied()
        .filter(|o| count(*o) == fewest)
        .collect();
    pick(&tied, rng)
}

fn pick<'a>(candidates: &[&'a str], rng: &mut dyn RandomSource) -> Option<&'a str> {
    match candidates.len() {
        0 => None,
        1 => Some(candidates[0]),
        n => Some(candidates[rng.next_index(n)]),
    }
}
