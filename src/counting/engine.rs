use tracing::debug;

use super::models::{CounterSnapshot, CountingRules, GuessResult, Outcome};

/// Decides what a guess does to the counter.
///
/// Branch order matters: the repeat check runs before the match check, and a
/// wrong guess at zero is ignored rather than counted as a loss. The match is
/// an exact comparison against the decimal text of the next count, so "007"
/// or "7.0" never match 7.
pub fn decide(
    snapshot: &CounterSnapshot,
    participant: &str,
    guess: &str,
    rules: &CountingRules,
) -> GuessResult {
    let count = snapshot.counter.count;

    if snapshot.counter.last_contributor.as_deref() == Some(participant) && !rules.allow_repeats
    {
        debug!(participant = %participant, "Ignoring repeat guess");
        return GuessResult::new(Outcome::Ignore, count);
    }

    // A counter at u64::MAX has no next count, so every guess misses
    let next = count.checked_add(1);
    if let Some(next) = next.filter(|next| next.to_string() == guess) {
        let outcome = if next > snapshot.high_score {
            Outcome::Record
        } else {
            Outcome::Bump
        };
        return GuessResult::new(outcome, count);
    }

    if count == 0 {
        debug!(participant = %participant, guess = %guess, "Ignoring wrong guess at zero");
        return GuessResult::new(Outcome::Ignore, count);
    }

    GuessResult::new(Outcome::Loss, count)
}
