use serde::{Deserialize, Deserializer, Serialize};

use super::period::{PERIOD_COUNT, Period};

/// Score slots for one subject, indexed by grading period.
pub type ScoreSlots = [Option<f64>; PERIOD_COUNT];

/// One subject's scores across the grading periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_slots")]
    pub scores: ScoreSlots,
}

impl SubjectRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, scores: ScoreSlots) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scores,
        }
    }

    pub fn score(&self, period: Period) -> Option<f64> {
        self.scores[period.index()]
    }

    /// Slots paired with their period, in period order.
    pub fn slots(&self) -> impl Iterator<Item = (Period, Option<f64>)> + '_ {
        Period::ALL.iter().map(|&p| (p, self.scores[p.index()]))
    }
}

/// Accept a score array of any length: extra entries are dropped and
/// missing ones stay empty.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<ScoreSlots, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    let mut slots = [None; PERIOD_COUNT];
    for (slot, value) in slots.iter_mut().zip(raw) {
        *slot = value;
    }
    Ok(slots)
}
