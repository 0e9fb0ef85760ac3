use crate::chance::Chance;
use crate::coordinator::{RollCoordinator, RollInput};
use crate::dice_set::{DiceSet, FreezeTarget};
use crate::die::{Die, DieKind};
use crate::error::DiceError;

fn values(dice: &[Die]) -> Vec<u32> {
    dice.iter().map(Die::rolled).collect()
}

fn scripted(count: usize, script: &[u32]) -> RollCoordinator {
    let set = DiceSet::with_chance(DieKind::D6, count, Chance::scripted(script.iter().copied(), 0));
    RollCoordinator::new(set).unwrap()
}

#[test]
fn builds_from_single_die() {
    let rc = RollCoordinator::new(Die::new(DieKind::D20)).unwrap();
    assert_eq!(rc.dice_set().count(), 1);
    assert_eq!(rc.dice_set().kind(), DieKind::D20);
}

#[test]
fn builds_from_list_of_dice() {
    let dice = vec![Die::new(DieKind::D6); 4];
    let rc = RollCoordinator::new(dice).unwrap();
    assert_eq!(rc.dice_set().count(), 4);
    assert_eq!(rc.dice_set().kind(), DieKind::D6);
}

#[test]
fn builds_from_existing_set() {
    let mut set = DiceSet::with_chance(DieKind::D8, 2, Chance::seeded(3));
    set.roll();
    let before = values(set.current_roll());
    let rc = RollCoordinator::new(RollInput::Set(set)).unwrap();
    assert_eq!(rc.dice_set().roll_history().len(), 2);
    assert_eq!(values(rc.dice_set().current_roll()), before);
}

#[test]
fn empty_list_fails() {
    let err = RollCoordinator::new(Vec::<Die>::new()).unwrap_err();
    assert_eq!(err, DiceError::EmptyDiceList);
}

#[test]
fn roll_returns_current_total() {
    let mut rc = scripted(3, &[4, 2, 5]);
    assert_eq!(rc.roll(), 11);
    assert_eq!(rc.total(), 11);
    assert_eq!(rc.dice_set().roll_history().len(), 2);
}

#[test]
fn advantage_drops_lowest_of_four() {
    let mut rc = scripted(3, &[2, 5, 6, 1]);
    let total = rc.roll_with_advantage().unwrap();
    assert_eq!(total, 5 + 6 + 2);
    assert_eq!(rc.dice_set().count(), 3);
    assert_eq!(values(rc.dice_set().dice()), vec![2, 5, 6]);
    // The recorded roll keeps all four values.
    assert_eq!(values(rc.dice_set().current_roll()), vec![2, 5, 6, 1]);
}

#[test]
fn advantage_can_drop_a_die_from_the_starting_pool() {
    let mut rc = scripted(3, &[1, 5, 6, 4]);
    let total = rc.roll_with_advantage().unwrap();
    assert_eq!(total, 15);
    assert_eq!(values(rc.dice_set().dice()), vec![5, 6, 4]);
}

#[test]
fn disadvantage_drops_highest_of_four() {
    let mut rc = scripted(3, &[2, 5, 6, 1]);
    let total = rc.roll_with_disadvantage().unwrap();
    assert_eq!(total, 2 + 5 + 1);
    assert_eq!(rc.dice_set().count(), 3);
    assert_eq!(values(rc.dice_set().dice()), vec![2, 5, 1]);
}

#[test]
fn advantage_total_is_sum_of_highest_values() {
    let set = DiceSet::with_chance(DieKind::D20, 2, Chance::seeded(77));
    let mut rc = RollCoordinator::new(set).unwrap();
    for _ in 0..200 {
        let total = rc.roll_with_advantage().unwrap();
        let mut all = values(rc.dice_set().current_roll());
        assert_eq!(all.len(), 3);
        all.sort_unstable();
        assert_eq!(total, all[1] + all[2]);
        assert_eq!(rc.dice_set().count(), 2);
    }
}

#[test]
fn disadvantage_total_is_sum_of_lowest_values() {
    let set = DiceSet::with_chance(DieKind::D20, 2, Chance::seeded(78));
    let mut rc = RollCoordinator::new(set).unwrap();
    for _ in 0..200 {
        let total = rc.roll_with_disadvantage().unwrap();
        let mut all = values(rc.dice_set().current_roll());
        all.sort_unstable();
        assert_eq!(total, all[0] + all[1]);
    }
}

#[test]
fn pass_through_add_and_remove() {
    let mut rc = scripted(2, &[3, 6, 1]);
    rc.add_dice(1);
    assert_eq!(rc.dice_set().count(), 3);
    rc.roll();
    assert_eq!(rc.remove_highest_roll().unwrap().rolled(), 6);
    assert_eq!(rc.remove_lowest_roll().unwrap().rolled(), 1);
    assert_eq!(rc.dice_set().count(), 1);
    rc.remove_lowest_roll().unwrap();
    assert_eq!(rc.remove_lowest_roll().unwrap_err(), DiceError::EmptyPool);
}

#[test]
fn freeze_pass_through_uses_same_validation() {
    let mut rc = scripted(3, &[]);
    assert_eq!(
        rc.freeze(None, false).unwrap_err(),
        DiceError::MissingFreezeTarget
    );
    assert_eq!(
        rc.unfreeze(Some(FreezeTarget::Die(1)), true).unwrap_err(),
        DiceError::ConflictingFreezeTarget
    );
    assert_eq!(
        rc.freeze(Some(FreezeTarget::Dice(vec![])), false)
            .unwrap_err(),
        DiceError::EmptyFreezeTarget
    );
    rc.freeze(None, true).unwrap();
    assert!(rc.dice_set().is_all_frozen());
    rc.unfreeze(Some(vec![0, 1].into()), false).unwrap();
    assert!(!rc.dice_set().dice()[0].is_frozen());
    assert!(rc.dice_set().dice()[2].is_frozen());
}

#[test]
fn frozen_pool_keeps_total_across_rolls() {
    let mut rc = scripted(3, &[4, 4, 4]);
    let first = rc.roll();
    rc.freeze(None, true).unwrap();
    for _ in 0..100 {
        assert_eq!(rc.roll(), first);
    }
}
