//! Error type shared by dice, pools, and the roll coordinator.

use thiserror::Error;

/// Every failure raised by `dice-core`.
///
/// Errors are raised before any state is mutated, with one exception noted on
/// [`crate::DiceSet::roll`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    // Construction.
    #[error("cannot build a dice pool from an empty list of dice")]
    EmptyDiceList,
    #[error("unknown die kind: {0} (expected one of d4, d6, d8, d10, d12, d20, d100)")]
    UnknownDieKind(String),
    #[error("invalid dice notation {text:?}: {msg}")]
    InvalidNotation { text: String, msg: &'static str },

    // State access.
    #[error("not enough roll history to obtain a previous roll")]
    NoPreviousRoll,
    #[error("die index {index} out of range for pool of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    // Operation preconditions.
    #[error("no dice to remove")]
    EmptyPool,
    #[error("no input provided: expected a dice target or all_dice=true")]
    MissingFreezeTarget,
    #[error("cannot combine a dice target with all_dice=true")]
    ConflictingFreezeTarget,
    #[error("dice target list is empty")]
    EmptyFreezeTarget,
    #[error("one or more targets do not name a die in the pool: {}", join_indices(.indices))]
    NotInPool { indices: Vec<usize> },

    // Arithmetic.
    #[error("{dividend} cannot be divided by 0")]
    DivisionByZero { dividend: i64 },
    #[error("({op}) overflowed the 64-bit integer range")]
    ArithmeticOverflow { op: char },
    #[error("unsupported ({op}) operands: '{left}' and '{right}'")]
    UnsupportedOperand {
        op: char,
        left: &'static str,
        right: &'static str,
    },

    // Presentation.
    #[error("{name} does not implement face art")]
    FaceArtUnsupported { name: &'static str },
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_in_pool_names_offending_indices() {
        let e = DiceError::NotInPool {
            indices: vec![7, 9],
        };
        assert_eq!(
            e.to_string(),
            "one or more targets do not name a die in the pool: 7, 9"
        );
    }

    #[test]
    fn division_message_includes_dividend() {
        let e = DiceError::DivisionByZero { dividend: 4 };
        assert_eq!(e.to_string(), "4 cannot be divided by 0");
    }
}
