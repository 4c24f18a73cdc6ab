#![cfg(test)]

// Property tests for ProbingHashTable kept inside the crate so they can
// reach the hashing internals used to build colliding key pools.

use crate::djb2::{djb2, slot_index};
use crate::error::TableError;
use crate::probing_hash_table::{ProbingHashTable, INITIAL_CAPACITY};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

const VALUE_POOL: usize = 32;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, usize),
    SetNull(usize),
    Get(usize),
    Contains(String),
    Iterate,
}

fn arb_ops(pool: Vec<String>) -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    let idx = proptest::sample::select((0..pool.len()).collect::<Vec<_>>());
    let contains_pool = proptest::sample::select(pool.clone());
    let op = prop_oneof![
        4 => (idx.clone(), 0..VALUE_POOL).prop_map(|(i, v)| OpI::Set(i, v)),
        1 => idx.clone().prop_map(OpI::SetNull),
        2 => idx.prop_map(OpI::Get),
        1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
        1 => Just(OpI::Iterate),
    ];
    proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(arb_ops)
}

// Keys that all share one home slot in a fresh table.
fn colliding_keys() -> Vec<String> {
    (0u32..)
        .map(|i| format!("c{i}"))
        .filter(|k| slot_index(djb2(k), INITIAL_CAPACITY) == 5)
        .take(24)
        .collect()
}

fn arb_colliding_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::sample::subsequence(colliding_keys(), 1..=24).prop_flat_map(arb_ops)
}

fn run_against_model(pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let values: Vec<usize> = (0..VALUE_POOL).collect();
    let mut sut: ProbingHashTable<'_, usize> = ProbingHashTable::new();
    let mut model: HashMap<String, usize> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                let stored = sut.set(k, &values[v]).expect("set succeeds").to_string();
                prop_assert_eq!(&stored, k);
                model.insert(k.clone(), v);
            }
            OpI::SetNull(i) => {
                let before = sut.len();
                let cap = sut.capacity();
                prop_assert_eq!(sut.set_option(&pool[i], None), Err(TableError::NullValue));
                prop_assert_eq!(sut.len(), before);
                prop_assert_eq!(sut.capacity(), cap);
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k).copied(), model.get(k).copied());
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Iterate => {
                let mut seen: BTreeMap<String, usize> = BTreeMap::new();
                for (k, v) in sut.iter() {
                    let prev = seen.insert(k.to_string(), *v);
                    prop_assert!(prev.is_none(), "iteration yielded {} twice", k);
                }
                let expected: BTreeMap<String, usize> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, expected);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.capacity().is_power_of_two());
        prop_assert!(sut.len() * 2 <= sut.capacity());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `get`/`contains_key` parity with the model, last write wins.
// - `set_option(None)` never mutates.
// - `iter` yields each live entry exactly once with its latest value.
// - Length parity, power-of-two capacity and load factor <= 1/2 after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(&pool, ops)?;
    }
}

// Property: Same invariants with every key homed on one slot of a fresh
// table, so early operations run long probe chains and migration has to
// untangle them.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_colliding_scenario()) {
        run_against_model(&pool, ops)?;
    }
}
