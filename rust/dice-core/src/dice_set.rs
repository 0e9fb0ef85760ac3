//! Homogeneous dice pool with an append-only roll history.
//!
//! Invariants:
//! - `roll_history` is never empty: snapshot 0 is taken at construction.
//! - Snapshots are value copies of the pool, so later freeze/add/remove calls
//!   never rewrite an earlier roll.
//! - Only [`DiceSet::roll`] appends to the history.

use std::fmt;

use crate::chance::Chance;
use crate::die::{Die, DieKind};
use crate::error::DiceError;

/// Which dice a freeze/unfreeze call applies to, by position in the live pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreezeTarget {
    Die(usize),
    Dice(Vec<usize>),
}

impl From<usize> for FreezeTarget {
    fn from(index: usize) -> Self {
        FreezeTarget::Die(index)
    }
}

impl From<Vec<usize>> for FreezeTarget {
    fn from(indices: Vec<usize>) -> Self {
        FreezeTarget::Dice(indices)
    }
}

impl From<&[usize]> for FreezeTarget {
    fn from(indices: &[usize]) -> Self {
        FreezeTarget::Dice(indices.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct DiceSet {
    kind: DieKind,
    dice: Vec<Die>,
    roll_history: Vec<Vec<Die>>,
    chance: Chance,
}

impl DiceSet {
    /// `count` fresh dice of `kind`, rolled from OS entropy.
    pub fn new(kind: DieKind, count: usize) -> Self {
        Self::with_chance(kind, count, Chance::from_entropy())
    }

    pub fn with_chance(kind: DieKind, count: usize, chance: Chance) -> Self {
        let dice = vec![Die::new(kind); count];
        let roll_history = vec![dice.clone()];
        Self {
            kind,
            dice,
            roll_history,
            chance,
        }
    }

    /// Wrap already-built dice. The first die's kind becomes the pool kind;
    /// the rest are not checked.
    pub fn from_dice(dice: Vec<Die>) -> Result<Self, DiceError> {
        Self::from_dice_with_chance(dice, Chance::from_entropy())
    }

    pub fn from_dice_with_chance(dice: Vec<Die>, chance: Chance) -> Result<Self, DiceError> {
        let kind = dice.first().ok_or(DiceError::EmptyDiceList)?.kind();
        let roll_history = vec![dice.clone()];
        Ok(Self {
            kind,
            dice,
            roll_history,
            chance,
        })
    }

    pub fn kind(&self) -> DieKind {
        self.kind
    }

    /// Number of dice in the live pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// The live pool, in pool order.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.dice.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Die, DiceError> {
        self.dice.get(index).ok_or(DiceError::IndexOutOfRange {
            index,
            len: self.dice.len(),
        })
    }

    pub fn roll_history(&self) -> &[Vec<Die>] {
        &self.roll_history
    }

    pub fn chance_mut(&mut self) -> &mut Chance {
        &mut self.chance
    }

    /// Roll every die (frozen dice keep their value), then record a snapshot.
    ///
    /// The live dice are mutated before the snapshot is pushed; if the push
    /// itself fails the dice keep their new values.
    pub fn roll(&mut self) -> &[Die] {
        for die in &mut self.dice {
            die.roll(&mut self.chance);
        }
        self.roll_history.push(self.dice.clone());
        self.current_roll()
    }

    pub fn current_roll(&self) -> &[Die] {
        // Never empty: snapshot 0 is recorded at construction.
        self.roll_history.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn previous_roll(&self) -> Result<&[Die], DiceError> {
        let n = self.roll_history.len();
        if n < 2 {
            return Err(DiceError::NoPreviousRoll);
        }
        Ok(&self.roll_history[n - 2])
    }

    pub fn current_total(&self) -> u32 {
        total(self.current_roll())
    }

    pub fn previous_total(&self) -> Result<u32, DiceError> {
        self.previous_roll().map(total)
    }

    /// Append `number` unrolled dice of the pool kind. History is untouched.
    pub fn add_dice(&mut self, number: usize) {
        self.dice
            .extend(std::iter::repeat(Die::new(self.kind)).take(number));
    }

    /// Remove the first die holding the lowest value. Returns the removed die.
    pub fn remove_lowest_roll(&mut self) -> Result<Die, DiceError> {
        let index = self.extreme_index(|candidate, best| candidate < best)?;
        Ok(self.dice.remove(index))
    }

    /// Remove the first die holding the highest value. Returns the removed die.
    pub fn remove_highest_roll(&mut self) -> Result<Die, DiceError> {
        let index = self.extreme_index(|candidate, best| candidate > best)?;
        Ok(self.dice.remove(index))
    }

    /// Freeze the targeted dice, or every die with `all_dice`.
    ///
    /// Exactly one of `target` and `all_dice` must be given. The whole request
    /// is validated before any die changes.
    pub fn freeze(
        &mut self,
        target: Option<FreezeTarget>,
        all_dice: bool,
    ) -> Result<(), DiceError> {
        for index in self.resolve_target(target, all_dice)? {
            self.dice[index].freeze();
        }
        Ok(())
    }

    /// Mirror of [`DiceSet::freeze`].
    pub fn unfreeze(
        &mut self,
        target: Option<FreezeTarget>,
        all_dice: bool,
    ) -> Result<(), DiceError> {
        for index in self.resolve_target(target, all_dice)? {
            self.dice[index].unfreeze();
        }
        Ok(())
    }

    pub fn freeze_die(&mut self, index: usize) -> Result<(), DiceError> {
        self.freeze(Some(FreezeTarget::Die(index)), false)
    }

    pub fn unfreeze_die(&mut self, index: usize) -> Result<(), DiceError> {
        self.unfreeze(Some(FreezeTarget::Die(index)), false)
    }

    pub fn freeze_all(&mut self) {
        self.dice.iter_mut().for_each(Die::freeze);
    }

    pub fn unfreeze_all(&mut self) {
        self.dice.iter_mut().for_each(Die::unfreeze);
    }

    /// True when every live die is frozen (and the pool is non-empty).
    pub fn is_all_frozen(&self) -> bool {
        !self.dice.is_empty() && self.dice.iter().all(Die::is_frozen)
    }

    /// Lowest value in the current snapshot.
    pub fn min_roll(&self) -> Option<u32> {
        self.current_roll().iter().map(Die::rolled).min()
    }

    /// Highest value in the current snapshot.
    pub fn max_roll(&self) -> Option<u32> {
        self.current_roll().iter().map(Die::rolled).max()
    }

    /// The live pool in the same `"{n}{kind}, [..]"` form as Display. After a
    /// removal this differs from the current snapshot.
    pub fn pool_line(&self) -> String {
        format_snapshot(self.kind, &self.dice)
    }

    /// One pretty-print line per snapshot, oldest first.
    pub fn history_lines(&self) -> Vec<String> {
        self.roll_history
            .iter()
            .map(|snapshot| format_snapshot(self.kind, snapshot))
            .collect()
    }

    fn extreme_index(&self, better: impl Fn(u32, u32) -> bool) -> Result<usize, DiceError> {
        let mut best: Option<(usize, u32)> = None;
        for (i, die) in self.dice.iter().enumerate() {
            match best {
                Some((_, v)) if !better(die.rolled(), v) => {}
                _ => best = Some((i, die.rolled())),
            }
        }
        best.map(|(i, _)| i).ok_or(DiceError::EmptyPool)
    }

    fn resolve_target(
        &self,
        target: Option<FreezeTarget>,
        all_dice: bool,
    ) -> Result<Vec<usize>, DiceError> {
        let indices = match (target, all_dice) {
            (Some(_), true) => return Err(DiceError::ConflictingFreezeTarget),
            (None, false) => return Err(DiceError::MissingFreezeTarget),
            (None, true) => return Ok((0..self.dice.len()).collect()),
            (Some(FreezeTarget::Die(i)), false) => vec![i],
            (Some(FreezeTarget::Dice(v)), false) => {
                if v.is_empty() {
                    return Err(DiceError::EmptyFreezeTarget);
                }
                v
            }
        };
        let missing: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i >= self.dice.len())
            .collect();
        if !missing.is_empty() {
            return Err(DiceError::NotInPool { indices: missing });
        }
        Ok(indices)
    }
}

impl<'a> IntoIterator for &'a DiceSet {
    type Item = &'a Die;
    type IntoIter = std::slice::Iter<'a, Die>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}

/// `"{count}{name}, [v1, v2, ...]"` for the current snapshot.
impl fmt::Display for DiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_snapshot(self.kind, self.current_roll()))
    }
}

fn total(dice: &[Die]) -> u32 {
    dice.iter().map(Die::rolled).sum()
}

fn format_snapshot(kind: DieKind, dice: &[Die]) -> String {
    let values: Vec<String> = dice.iter().map(|d| d.rolled().to_string()).collect();
    format!("{}{}, [{}]", dice.len(), kind.name(), values.join(", "))
}
