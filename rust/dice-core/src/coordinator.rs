//! `RollCoordinator`: a single dice pool behind normal/advantage/disadvantage rolls.

use std::sync::OnceLock;

use crate::dice_set::{DiceSet, FreezeTarget};
use crate::die::Die;
use crate::error::DiceError;

fn dbg_enabled() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| {
        matches!(
            std::env::var("DICE_DEBUG_LOG").as_deref(),
            Ok("1" | "true" | "yes")
        )
    })
}

fn dbg_log(location: &str, message: impl FnOnce() -> String) {
    if dbg_enabled() {
        eprintln!("[dice-core {location}] {}", message());
    }
}

/// Inputs a coordinator can be built from.
#[derive(Debug, Clone)]
pub enum RollInput {
    Die(Die),
    Dice(Vec<Die>),
    Set(DiceSet),
}

impl From<Die> for RollInput {
    fn from(d: Die) -> Self {
        RollInput::Die(d)
    }
}

impl From<Vec<Die>> for RollInput {
    fn from(dice: Vec<Die>) -> Self {
        RollInput::Dice(dice)
    }
}

impl From<DiceSet> for RollInput {
    fn from(set: DiceSet) -> Self {
        RollInput::Set(set)
    }
}

#[derive(Debug, Clone)]
pub struct RollCoordinator {
    dice: DiceSet,
}

impl RollCoordinator {
    /// Normalize the input into one pool. An empty list fails.
    pub fn new(input: impl Into<RollInput>) -> Result<Self, DiceError> {
        let dice = match input.into() {
            RollInput::Die(d) => DiceSet::from_dice(vec![d])?,
            RollInput::Dice(list) => DiceSet::from_dice(list)?,
            RollInput::Set(set) => set,
        };
        Ok(Self { dice })
    }

    pub fn dice_set(&self) -> &DiceSet {
        &self.dice
    }

    pub fn dice_set_mut(&mut self) -> &mut DiceSet {
        &mut self.dice
    }

    pub fn into_dice_set(self) -> DiceSet {
        self.dice
    }

    /// Total of the current roll.
    pub fn total(&self) -> u32 {
        self.dice.current_total()
    }

    pub fn roll(&mut self) -> u32 {
        self.dice.roll();
        let total = self.total();
        dbg_log("roll", || format!("Regular roll total: {total}"));
        total
    }

    /// Add one die, roll, drop the lowest. Pool size is unchanged afterwards.
    pub fn roll_with_advantage(&mut self) -> Result<u32, DiceError> {
        dbg_log("roll_with_advantage", || {
            format!(
                "Rolling with advantage. Adding an extra {}.",
                self.dice.kind()
            )
        });
        self.dice.add_dice(1);
        self.dice.roll();
        self.dice.remove_lowest_roll()?;
        let total = self.kept_total();
        dbg_log("roll_with_advantage", || {
            format!("Advantage roll total: {total}")
        });
        Ok(total)
    }

    /// Add one die, roll, drop the highest. Pool size is unchanged afterwards.
    pub fn roll_with_disadvantage(&mut self) -> Result<u32, DiceError> {
        dbg_log("roll_with_disadvantage", || {
            format!(
                "Rolling with disadvantage. Adding an extra {}.",
                self.dice.kind()
            )
        });
        self.dice.add_dice(1);
        self.dice.roll();
        self.dice.remove_highest_roll()?;
        let total = self.kept_total();
        dbg_log("roll_with_disadvantage", || {
            format!("Disadvantage roll total: {total}")
        });
        Ok(total)
    }

    pub fn add_dice(&mut self, number: usize) {
        self.dice.add_dice(number);
        dbg_log("add_dice", || {
            format!("Added {number} {} die/dice.", self.dice.kind())
        });
    }

    pub fn remove_lowest_roll(&mut self) -> Result<Die, DiceError> {
        self.dice.remove_lowest_roll()
    }

    pub fn remove_highest_roll(&mut self) -> Result<Die, DiceError> {
        self.dice.remove_highest_roll()
    }

    pub fn freeze(
        &mut self,
        target: Option<FreezeTarget>,
        all_dice: bool,
    ) -> Result<(), DiceError> {
        self.dice.freeze(target, all_dice)
    }

    pub fn unfreeze(
        &mut self,
        target: Option<FreezeTarget>,
        all_dice: bool,
    ) -> Result<(), DiceError> {
        self.dice.unfreeze(target, all_dice)
    }

    // The post-roll snapshot still holds the discarded die; the live pool does not.
    fn kept_total(&self) -> u32 {
        self.dice.iter().map(Die::rolled).sum()
    }
}
