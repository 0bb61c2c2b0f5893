#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check
// bucket-level invariants that the public API does not expose.

use crate::hash_table::HashTable;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Has(String),
    Remove(usize),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario(max_pool: usize) -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=max_pool).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![
                has_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Has),
            3 => idx.clone().prop_map(OpI::Remove),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives `sut` and a std HashMap model through the same operations.
// Invariants exercised after every step:
// - `length()` recount equals `len()` and the model's size.
// - `len() / bucket_count() <= load_factor()`; bucket count never shrinks.
// - Every entry sits in the bucket its key hashes to; no empty chain is kept.
// - `get`/`has`/`remove` agree with the model; `entries()` equals the model.
fn run_state_machine(
    mut sut: HashTable<i32>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    let mut buckets = sut.bucket_count();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = &pool[i];
                sut.set(k.as_str(), v);
                model.insert(k.clone(), v);
                prop_assert_eq!(sut.get(k), Some(&v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Has(s) => {
                prop_assert_eq!(sut.has(&s), model.contains_key(&s));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let before = sut.bucket_count();
                prop_assert_eq!(sut.remove(k), model.remove(k).is_some());
                prop_assert!(!sut.has(k));
                prop_assert_eq!(sut.bucket_count(), before, "remove must not resize");
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.get_mut(k), model.get_mut(k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                for k in pool {
                    prop_assert!(!sut.has(k));
                }
            }
            OpI::Iterate => {
                let s: BTreeSet<(String, i32)> = sut
                    .entries()
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect();
                let m: BTreeSet<(String, i32)> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s, m);
                prop_assert_eq!(sut.keys().len(), model.len());
                prop_assert_eq!(sut.values().len(), model.len());
            }
        }

        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.length(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.bucket_count() >= buckets, "bucket count shrank");
        buckets = sut.bucket_count();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(40)) {
        run_state_machine(HashTable::new(), &pool, ops)?;
    }
}

// Same machine starting from a single bucket with a small threshold: heavy
// collisions at first, then several growth steps per run.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(
        (pool, ops) in arb_scenario(40),
        load_factor in prop_oneof![Just(0.2f64), Just(0.75), Just(3.0)],
    ) {
        let sut = HashTable::with_buckets(1, load_factor).unwrap();
        run_state_machine(sut, &pool, ops)?;
    }
}

// Property: inserting distinct keys then overwriting them all keeps every
// key retrievable with its last value across however many doublings occur.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_last_values(
        keys in proptest::collection::btree_set("[a-zA-Z0-9]{1,8}", 1..200),
    ) {
        let mut t = HashTable::new();
        for (i, k) in keys.iter().enumerate() {
            t.set(k.as_str(), i as i32);
        }
        for (i, k) in keys.iter().enumerate() {
            t.set(k.as_str(), -(i as i32));
        }
        t.check_invariants();
        prop_assert_eq!(t.len(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(t.get(k), Some(&-(i as i32)));
        }
    }
}
