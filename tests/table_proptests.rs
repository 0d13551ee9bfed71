// Table property tests.
//
// Model: std::collections::HashMap receiving the same operations.
// Invariants after every step:
//  - set/remove return what the model returns;
//  - len matches and every model entry is reachable through get;
//  - len <= 3/4 of the capacity, which stays a power of two.
// Keys are drawn from a small range so removals, reinsertions and tombstone reuse are frequent.
use std::collections::HashMap;
use std::hash::BuildHasher;

use bricks::collections::hash::{BuildFnv1a, Table};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(u16, u32),
    Remove(u16),
    Get(u16),
}

fn op(keys: u16) -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..keys, any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => (0..keys).prop_map(Op::Remove),
        1 => (0..keys).prop_map(Op::Get),
    ]
}

fn check<B: BuildHasher>(
    table: &Table<u16, u32, B>,
    model: &HashMap<u16, u32>,
) -> Result<(), TestCaseError> {
    prop_assert_eq!(table.len(), model.len());
    prop_assert!(table.cap().is_power_of_two());
    prop_assert!(table.len() * 4 <= table.cap() * 3);
    for (k, v) in model {
        prop_assert_eq!(table.get(k), Some(v));
    }
    Ok(())
}

fn run<B: BuildHasher>(mut table: Table<u16, u32, B>, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut model = HashMap::new();

    for op in ops {
        match op {
            Op::Set(k, v) => prop_assert_eq!(table.set(k, v), model.insert(k, v)),
            Op::Remove(k) => prop_assert_eq!(table.remove(&k), model.remove(&k)),
            Op::Get(k) => prop_assert_eq!(table.get(&k), model.get(&k)),
        }
        check(&table, &model)?;
    }

    let mut entries: Vec<(u16, u32)> = table.into_iter().collect();
    entries.sort_unstable();
    let mut expected: Vec<(u16, u32)> = model.into_iter().collect();
    expected.sort_unstable();
    prop_assert_eq!(entries, expected);
    Ok(())
}

proptest! {
    #[test]
    fn prop_table_matches_hash_map(ops in proptest::collection::vec(op(64), 1..400)) {
        run(Table::new(), ops)?;
    }

    #[test]
    fn prop_table_matches_hash_map_with_fnv(ops in proptest::collection::vec(op(24), 1..400)) {
        run(Table::with_hasher(BuildFnv1a), ops)?;
    }

    #[test]
    fn prop_table_small_start(cap in 0usize..4, ops in proptest::collection::vec(op(16), 1..200)) {
        run(Table::with_cap(cap), ops)?;
    }

    #[test]
    fn prop_set_then_get_round_trips(
        entries in proptest::collection::vec((any::<u16>(), any::<u32>()), 1..300),
    ) {
        let mut table = Table::new();
        for (k, v) in &entries {
            table.set(*k, *v);
            prop_assert_eq!(table.get(k), Some(v));
        }
    }
}
