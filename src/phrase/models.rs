use serde::{Deserialize, Serialize};

/// How an announcement phrases the participant's place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// "took Nth place": first score, or the rank changed
    Took,
    /// "is tied for Nth place"
    TiedFor,
    /// "is in Nth place"
    IsIn,
}

/// Outcome of `record_trigger`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankResult {
    pub score: u64,
    /// 1-based place: one more than the number of participants strictly ahead
    pub place: u64,
    pub moved: bool,
    /// At least one other participant holds the same score
    pub tied: bool,
}

impl RankResult {
    /// Builds the result from ranks measured before and after the increment.
    ///
    /// `old_rank` is `None` for a participant with no prior score. Ranks count
    /// the participants with a strictly greater score; `holders` counts every
    /// participant at `score`, the caller included.
    pub fn from_ranks(score: u64, old_rank: Option<u64>, new_rank: u64, holders: u64) -> Self {
        Self {
            score,
            place: new_rank + 1,
            moved: old_rank != Some(new_rank),
            tied: holders > 1,
        }
    }

    pub fn standing(&self) -> Standing {
        if self.moved {
            Standing::Took
        } else if self.tied {
            Standing::TiedFor
        } else {
            Standing::IsIn
        }
    }
}
