#![cfg(test)]

// Property tests for RandomSet kept inside the crate so they can check the
// private dense-store/index pairing after every step.

use crate::random_set::RandomSet;
use core::hash::BuildHasher;
use hashbrown::HashSet;
use proptest::prelude::*;
use rand_core::{RngCore, SeedableRng};
use rand_pcg::Pcg64;
use std::hash::Hasher;

// Pool-indexed operations so shrinking moves toward earlier keys and shorter
// op lists.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Remove(usize),
    Take(usize),
    Contains(String),
    Pick,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => idx.clone().prop_map(Op::Insert),
            3 => idx.clone().prop_map(Op::Remove),
            1 => idx.clone().prop_map(Op::Take),
            2 => prop_oneof![contains_pool, "[a-z]{0,4}"].prop_map(Op::Contains),
            2 => Just(Op::Pick),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Runs one scenario against a hashbrown::HashSet model.
// Invariants exercised after every op:
// - insert/remove/take outcomes match the model (duplicates rejected).
// - contains parity for pool keys and arbitrary strings.
// - get_random returns a member, and errors exactly when empty.
// - len/is_empty parity; iter yields the model's elements exactly once.
// - the index table never exceeds the 0.7 load factor.
fn run_scenario<S, R>(
    mut sut: RandomSet<String, S, R>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
    R: RngCore,
{
    let mut model: HashSet<String> = HashSet::new();
    for op in ops {
        match op {
            Op::Insert(i) => {
                let k = pool[i].clone();
                let fresh = !model.contains(&k);
                prop_assert_eq!(sut.insert(k.clone()), fresh);
                model.insert(k);
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
            }
            Op::Take(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.take(k), model.take(k));
            }
            Op::Contains(s) => {
                prop_assert_eq!(sut.contains(s.as_str()), model.contains(&s));
            }
            Op::Pick => match sut.get_random() {
                Ok(v) => {
                    prop_assert!(model.contains(v), "picked non-member {:?}", v);
                }
                Err(_) => {
                    prop_assert!(model.is_empty(), "pick failed on non-empty set");
                }
            },
            Op::Clear => {
                sut.clear();
                model.clear();
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        let seen: HashSet<String> = sut.iter().cloned().collect();
        prop_assert_eq!(seen.len(), sut.len(), "iter yielded a duplicate");
        prop_assert_eq!(&seen, &model);
        prop_assert!(sut.load_within_threshold());
    }
    Ok(())
}

impl<T, S, R> RandomSet<T, S, R>
where
    T: Eq + core::hash::Hash,
    S: BuildHasher,
    R: RngCore,
{
    fn load_within_threshold(&self) -> bool {
        self.table_occupancy() * 10 <= self.table_capacity() * 7
    }
}

// Collision variant: every key hashes to zero, so all entries share one probe
// chain and equality alone separates them.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), seed in any::<u64>()) {
        run_scenario(RandomSet::seed_from_u64(seed), pool, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), seed in any::<u64>()) {
        let sut = RandomSet::with_hasher_and_rng(ConstBuildHasher, Pcg64::seed_from_u64(seed));
        run_scenario(sut, pool, ops)?;
    }
}
