//! "NdK" pool notation: `3d6`, `d20` (one die), `2D100`.

use std::fmt;
use std::str::FromStr;

use crate::chance::Chance;
use crate::dice_set::DiceSet;
use crate::die::DieKind;
use crate::error::DiceError;

/// Largest die count accepted from notation.
pub const MAX_POOL_DICE: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSpec {
    pub count: usize,
    pub kind: DieKind,
}

impl PoolSpec {
    pub fn new(count: usize, kind: DieKind) -> Self {
        Self { count, kind }
    }

    pub fn build(&self, chance: Chance) -> DiceSet {
        DiceSet::with_chance(self.kind, self.count, chance)
    }
}

impl fmt::Display for PoolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.kind)
    }
}

impl FromStr for PoolSpec {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |msg| DiceError::InvalidNotation {
            text: s.to_string(),
            msg,
        };
        let t = s.trim();
        let split = t
            .find(|c: char| c == 'd' || c == 'D')
            .ok_or_else(|| invalid("expected NdK, e.g. 3d6"))?;
        let (count_str, kind_str) = t.split_at(split);
        let count = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse::<usize>()
                .map_err(|_| invalid("die count must be a non-negative integer"))?
        };
        if count > MAX_POOL_DICE {
            return Err(invalid("die count exceeds the 10000 dice limit"));
        }
        let kind = kind_str
            .parse::<DieKind>()
            .map_err(|_| invalid("unsupported die kind"))?;
        Ok(Self { count, kind })
    }
}
