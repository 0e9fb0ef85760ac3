use crate::chance::{derive_seed, Chance};

#[test]
fn seeded_stream_is_deterministic() {
    let mut a = Chance::seeded(123);
    let mut b = Chance::seeded(123);
    let xs: Vec<u32> = (0..50).map(|_| a.draw(20)).collect();
    let ys: Vec<u32> = (0..50).map(|_| b.draw(20)).collect();
    assert_eq!(xs, ys);
}

#[test]
fn draws_stay_in_range_for_every_face_count() {
    let mut c = Chance::seeded(7);
    for n in [1u32, 4, 6, 8, 10, 12, 20, 100] {
        for _ in 0..500 {
            let v = c.draw(n);
            assert!((1..=n).contains(&v), "d{n} drew {v}");
        }
    }
}

#[test]
fn scripted_values_replay_in_order_then_fall_back() {
    let mut c = Chance::scripted([4, 2, 5], 0);
    assert_eq!(c.scripted_remaining(), 3);
    assert_eq!(c.draw(6), 4);
    assert_eq!(c.draw(6), 2);
    assert_eq!(c.draw(6), 5);
    assert_eq!(c.scripted_remaining(), 0);
    let v = c.draw(6);
    assert!((1..=6).contains(&v));
}

#[test]
fn scripted_values_in_range_pass_through() {
    let mut c = Chance::scripted([1, 6, 3], 0);
    assert_eq!(c.draw(6), 1);
    assert_eq!(c.draw(6), 6);
    assert_eq!(c.draw(6), 3);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "scripted value 7 outside 1..=6")]
fn out_of_range_scripted_value_panics_in_debug() {
    let mut c = Chance::scripted([7], 0);
    c.draw(6);
}

#[test]
#[cfg(not(debug_assertions))]
fn out_of_range_scripted_values_wrap_in_release() {
    let mut c = Chance::scripted([0, 7, 12], 0);
    assert_eq!(c.draw(6), 6);
    assert_eq!(c.draw(6), 1);
    assert_eq!(c.draw(6), 6);
}

#[test]
fn push_scripted_keeps_underlying_stream_position() {
    let mut reference = Chance::seeded(99);
    let expected_first = reference.draw(100);
    let expected_second = reference.draw(100);

    let mut c = Chance::seeded(99);
    assert_eq!(c.draw(100), expected_first);
    c.push_scripted([42]);
    assert_eq!(c.draw(100), 42);
    assert_eq!(c.draw(100), expected_second);
}

#[test]
fn derive_seed_separates_streams() {
    assert_eq!(derive_seed(5, 0), derive_seed(5, 0));
    assert_ne!(derive_seed(5, 0), derive_seed(5, 1));
    assert_ne!(derive_seed(5, 0), derive_seed(6, 0));
}
