#![cfg(test)]

// Property tests for LongHashMap kept inside the crate so they can call
// the private structural invariant checker after every step.

use crate::config::LongMapConfig;
use crate::long_hash_map::LongHashMap;
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    ContainsValue(i32),
    Snapshot,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<i64>, Vec<OpI>)> {
    // Mix small keys (dense buckets) with arbitrary ones (sign and magnitude).
    let key = prop_oneof![-64i64..64, any::<i64>()];
    proptest::collection::vec(key, 1..=24).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (idx, any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (-4i32..4).prop_map(OpI::ContainsValue),
            1 => Just(OpI::Snapshot),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run(
    mut sut: LongHashMap<i32>,
    pool: Vec<i64>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<i64, i32> = HashMap::new();
    let mut capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i];
                prop_assert_eq!(sut.insert(k, v), model.insert(k, v));
                prop_assert_eq!(sut.get(k), Some(&v));
            }
            OpI::Remove(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(&k));
                prop_assert!(!sut.contains_key(k));
            }
            OpI::Get(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.get(k), model.get(&k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
            }
            OpI::Mutate(i, d) => {
                let k = pool[i];
                match (sut.get_mut(k), model.get_mut(&k)) {
                    (Some(s), Some(m)) => {
                        *s = s.wrapping_add(d);
                        *m = m.wrapping_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "get_mut disagrees: {:?} vs {:?}", s, m),
                }
            }
            OpI::ContainsValue(v) => {
                prop_assert_eq!(sut.contains_value(&v), model.values().any(|&m| m == v));
            }
            OpI::Snapshot => {
                let keys = sut.keys();
                let values = sut.values();
                prop_assert_eq!(keys.len(), model.len());
                prop_assert_eq!(values.len(), model.len());
                for (k, v) in keys.iter().zip(&values) {
                    prop_assert_eq!(model.get(k), Some(v));
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert!(sut.is_empty());
            }
        }

        // Post-conditions after each op
        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity() >= capacity, "table shrank");
        capacity = sut.capacity();
    }
    Ok(())
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` returns the replaced value exactly when the key was present.
// - `get`/`contains_key`/`get_mut` parity with the model, for negative keys too.
// - `remove` returns the model's value once, then `None`.
// - `keys()`/`values()` cover the live set and correspond index for index.
// - Structural invariants hold after every op and capacity never decreases.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(LongHashMap::new(), pool, ops)?;
    }
}

// Property: Same state machine on a tiny table with a high load factor, so
// chains get long and removal from the middle and tail of chains is common.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_long_chains((pool, ops) in arb_scenario()) {
        let config = LongMapConfig::new()
            .with_initial_capacity(2)
            .with_load_factor(8.0);
        run(LongHashMap::with_config(config).unwrap(), pool, ops)?;
    }
}

// Property: Growth with a non-default growth factor keeps every entry.
proptest! {
    #[test]
    fn prop_growth_factor_preserves_entries(
        growth_shift in 1u32..=3,
        keys in proptest::collection::hash_set(any::<i64>(), 1..300),
    ) {
        let config = LongMapConfig::new()
            .with_initial_capacity(2)
            .with_growth_factor(1 << growth_shift);
        let mut m = LongHashMap::with_config(config).unwrap();
        for &k in &keys {
            m.insert(k, k.wrapping_mul(3));
        }
        m.assert_invariants();
        prop_assert_eq!(m.len(), keys.len());
        for &k in &keys {
            prop_assert_eq!(m.get(k), Some(&k.wrapping_mul(3)));
        }
    }
}
