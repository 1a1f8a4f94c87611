// Text and reaction rendering for engine results. Pure functions only; display
// names are resolved by the caller and passed in.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::counting::{GuessResult, LeaderboardEntry, LeaderboardView, LoserView, Outcome};
use crate::identity::UNKNOWN_NAME;
use crate::phrase::{RankResult, Standing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    ThumbsUp,
    ThumbsDown,
    Eyes,
    Horns,
    LetterN,
    LetterI,
    LetterC,
    LetterE,
}

impl Reaction {
    pub fn emoji(&self) -> &'static str {
        match self {
            Reaction::ThumbsUp => "👍",
            Reaction::ThumbsDown => "👎",
            Reaction::Eyes => "👀",
            Reaction::Horns => "🤘",
            Reaction::LetterN => "🇳",
            Reaction::LetterI => "🇮",
            Reaction::LetterC => "🇨",
            Reaction::LetterE => "🇪",
        }
    }
}

/// Number of "69" digit pairs in the decimal text of `n`
pub fn niceness(n: u64) -> usize {
    n.to_string()
        .as_bytes()
        .windows(2)
        .filter(|pair| *pair == b"69")
        .count()
}

/// Reactions for a guess outcome, in posting order
pub fn reactions_for(result: &GuessResult) -> Vec<Reaction> {
    match result.outcome {
        Outcome::Bump => {
            let mut reactions = vec![Reaction::ThumbsUp];
            if niceness(result.current_count()) > niceness(result.previous_count) {
                reactions.extend([
                    Reaction::LetterN,
                    Reaction::LetterI,
                    Reaction::LetterC,
                    Reaction::LetterE,
                ]);
            }
            reactions
        }
        Outcome::Record => vec![Reaction::Horns],
        Outcome::Ignore => vec![Reaction::Eyes],
        Outcome::Loss => vec![Reaction::ThumbsDown],
    }
}

pub fn ordinal(n: u64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

pub fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn name_of<'a>(names: &'a HashMap<String, String>, participant: &str) -> &'a str {
    names
        .get(participant)
        .map(String::as_str)
        .unwrap_or(UNKNOWN_NAME)
}

fn ranked_lines(
    entries: &[LeaderboardEntry],
    names: &HashMap<String, String>,
    unit: &str,
) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}: {}, with {} {}",
                i + 1,
                name_of(names, &entry.participant),
                entry.value,
                unit
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Participants a leaderboard mentions, for name resolution
pub fn mentioned_participants<'a>(
    view: &'a LeaderboardView,
) -> impl Iterator<Item = &'a str> + 'a {
    view.top_contributors
        .iter()
        .chain(view.top_losers.iter())
        .map(|entry| entry.participant.as_str())
}

pub fn leaderboard_text(view: &LeaderboardView, names: &HashMap<String, String>) -> String {
    format!(
        "Biggest contributors:\n{}\n\nBiggest losers:\n{}\n\nThe count's at {}. High score is {}.",
        ranked_lines(&view.top_contributors, names, "bumps"),
        ranked_lines(&view.top_losers, names, "losses"),
        view.count,
        view.high_score
    )
}

pub fn loser_text(view: &LoserView, names: &HashMap<String, String>) -> String {
    format!(
        "{} RUINED IT at {}!\n\n{}",
        name_of(names, &view.participant),
        view.previous_count,
        leaderboard_text(&view.leaderboard, names)
    )
}

pub fn announcement_text(name: &str, result: &RankResult) -> String {
    let place = if result.place == 1 {
        "the lead".to_string()
    } else {
        format!("{} place", ordinal(result.place))
    };
    let verb = match result.standing() {
        Standing::Took => "took",
        Standing::TiedFor => "is tied for",
        Standing::IsIn => "is in",
    };
    format!(
        "{} {} {} with {} point{}",
        name,
        verb,
        place,
        result.score,
        plural(result.score)
    )
}
