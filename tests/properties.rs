use std::collections::HashMap;

use lungo::LruCache;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u64),
    Get(u8),
    Peek(u8),
    Remove(u8),
    RemoveOldest,
    Resize(u64),
    Purge,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (any::<u8>(), 0..40u64).prop_map(|(k, c)| Op::Add(k, c)),
        3 => any::<u8>().prop_map(Op::Get),
        1 => any::<u8>().prop_map(Op::Peek),
        2 => any::<u8>().prop_map(Op::Remove),
        1 => Just(Op::RemoveOldest),
        1 => (0..120u64).prop_map(Op::Resize),
        1 => Just(Op::Purge),
    ]
}

proptest! {
    /// After every operation the accumulator matches the resident costs,
    /// stays under the ceiling, and keys/len agree with each other.
    #[test]
    fn invariants_hold_under_random_ops(ops in prop::collection::vec(op(), 1..200)) {
        let mut cache: LruCache<u8, u64> = LruCache::new(64).unwrap();
        // Model of resident key -> cost at first insertion.
        let mut costs: HashMap<u8, u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Add(k, c) => {
                    let before = cache.len();
                    match cache.add(k, c, c) {
                        Ok(evicted) => {
                            costs.entry(k).or_insert(c);
                            prop_assert!(evicted <= before);
                        }
                        Err(_) => {
                            prop_assert!(c > cache.max_cost());
                            prop_assert!(!costs.contains_key(&k));
                        }
                    }
                }
                Op::Get(k) => { cache.get(&k); }
                Op::Peek(k) => { cache.peek(&k); }
                Op::Remove(k) => {
                    prop_assert_eq!(cache.remove(&k), costs.contains_key(&k));
                }
                Op::RemoveOldest => {
                    let oldest = cache.get_oldest().map(|(k, _)| *k);
                    prop_assert_eq!(cache.remove_oldest().map(|(k, _)| k), oldest);
                }
                Op::Resize(m) => {
                    prop_assert_eq!(cache.resize(m).is_err(), m == 0);
                }
                Op::Purge => cache.purge(),
            }

            // Evictions are not modelled; drop whatever the cache dropped.
            costs.retain(|k, _| cache.contains(k));

            let keys = cache.keys();
            prop_assert_eq!(keys.len(), cache.len());
            prop_assert_eq!(keys.len(), costs.len());
            prop_assert!(cache.cost() <= cache.max_cost());
            prop_assert_eq!(cache.cost(), costs.values().sum::<u64>());
        }
    }

    /// With only adds and no reads, the survivors are exactly the newest keys.
    #[test]
    fn unit_cost_adds_keep_newest(max in 1..50u64, n in 0..200u64) {
        let mut cache: LruCache<u64, ()> = LruCache::new(max).unwrap();
        let mut evicted = 0;
        for i in 0..n {
            evicted += cache.add(i, (), 1).unwrap();
        }
        let kept = n.min(max);
        prop_assert_eq!(cache.len() as u64, kept);
        prop_assert_eq!(evicted as u64, n - kept);
        prop_assert_eq!(cache.keys(), (n - kept..n).collect::<Vec<_>>());
    }
}
