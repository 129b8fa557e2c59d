use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoStaticStr};

/// Number of grading periods in one academic cycle.
pub const PERIOD_COUNT: usize = 5;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
    EnumIter,
)]
#[repr(u8)]
pub enum Period {
    S1 = 0,
    S2 = 1,
    S3 = 2,
    S4 = 3,
    S5 = 4,
}

impl Period {
    pub const ALL: [Period; PERIOD_COUNT] =
        [Period::S1, Period::S2, Period::S3, Period::S4, Period::S5];

    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().and_then(Self::from_repr)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_period_labels() {
        let labels: Vec<&str> = Period::iter().map(|p| p.label()).collect();
        assert_eq!(labels, vec!["S1", "S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn test_period_from_index() {
        assert_eq!(Period::from_index(0), Some(Period::S1));
        assert_eq!(Period::from_index(4), Some(Period::S5));
        assert_eq!(Period::from_index(5), None);
        assert_eq!(Period::from_index(300), None);
    }

    #[test]
    fn test_all_matches_iter_order() {
        let iterated: Vec<Period> = Period::iter().collect();
        assert_eq!(iterated, Period::ALL.to_vec());
    }
}
