// ProbingHashTable integration test suite.
//
// Each test documents what behavior is being verified. The core
// invariants exercised:
// - Lookup: absent keys are not found; present keys return the latest value.
// - Length: counts distinct keys only; updates never change it.
// - Growth: capacity doubles once length reaches half of it, and every key
//   survives any number of resizes.
// - Iteration: yields each entry exactly once with its latest value.
// - Usage errors: a null value is rejected without side effects.
use probing_hashmap::{ProbingHashTable, TableError, INITIAL_CAPACITY};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Once;

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// Test: the tennis scenario with mixed payload types.
// Verifies: len, hit/miss lookups and the exact pairs seen by iteration.
#[test]
fn mixed_payloads_scenario() {
    init_tracing();
    let federer = 1i32;
    let djokovic = 2i32;
    let mia = "the best";
    let mut t: ProbingHashTable<'_, dyn Any> = ProbingHashTable::new();
    t.set("federer", &federer).unwrap();
    t.set("djokovic", &djokovic).unwrap();
    t.set("mia", &mia).unwrap();

    assert_eq!(t.len(), 3);
    assert_eq!(t.get("federer").and_then(|v| v.downcast_ref::<i32>()), Some(&1));
    assert!(t.get("alcaraz").is_none());

    let mut seen = BTreeSet::new();
    for (k, v) in &t {
        match k {
            "federer" => assert_eq!(v.downcast_ref::<i32>(), Some(&1)),
            "djokovic" => assert_eq!(v.downcast_ref::<i32>(), Some(&2)),
            "mia" => assert_eq!(v.downcast_ref::<&str>(), Some(&"the best")),
            other => panic!("unexpected key {other}"),
        }
        assert!(seen.insert(k.to_string()));
    }
    assert_eq!(seen.len(), 3);
}

// Test: null values are a usage error.
// Verifies: rejection leaves the table empty.
#[test]
fn null_value_rejected_on_empty_table() {
    let mut t: ProbingHashTable<'_, i32> = ProbingHashTable::new();
    match t.set_option("k", None) {
        Err(TableError::NullValue) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(t.len(), 0);
    assert!(t.is_empty());
}

// Test: never-set keys are absent.
#[test]
fn unknown_keys_not_found() {
    let v = 0u8;
    let mut t = ProbingHashTable::new();
    for k in ["a", "b", "c"] {
        t.set(k, &v).unwrap();
    }
    for k in ["", "x", "ab", "A", "a "] {
        assert!(t.get(k).is_none(), "{k:?} should be absent");
        assert!(!t.contains_key(k));
    }
}

// Test: last write wins.
// Verifies: a second set on the same key keeps len and replaces the value.
#[test]
fn repeated_set_updates_value() {
    let (first, second) = (10, 20);
    let mut t = ProbingHashTable::new();
    t.set("k", &first).unwrap();
    t.set("k", &second).unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("k"), Some(&20));
}

// Test: len counts distinct keys across N calls with M distinct keys.
#[test]
fn len_counts_distinct_keys() {
    let values: Vec<usize> = (0..100).collect();
    let mut t = ProbingHashTable::new();
    for v in &values {
        t.set(&format!("key{}", v % 7), v).unwrap();
    }
    assert_eq!(t.len(), 7);
    for r in 0..7 {
        // latest value for residue r is the largest v < 100 with v % 7 == r
        let latest = (0..100).rev().find(|v| v % 7 == r).unwrap();
        assert_eq!(t.get(&format!("key{r}")), Some(&latest));
    }
}

// Test: 9 distinct keys trip exactly one resize.
// Verifies: capacity 16 -> 32 and all keys retrievable.
#[test]
fn nine_keys_resize_once() {
    init_tracing();
    let values: Vec<u32> = (0..9).collect();
    let mut t = ProbingHashTable::new();
    assert_eq!(t.capacity(), INITIAL_CAPACITY);
    for v in &values {
        t.set(&format!("player{v}"), v).unwrap();
    }
    assert_eq!(t.capacity(), 32);
    assert_eq!(t.len(), 9);
    for v in &values {
        assert_eq!(t.get(&format!("player{v}")), Some(v));
    }
}

// Test: many resizes preserve every entry.
// Verifies: load factor after each set, and lookups after >= 3 doublings.
#[test]
fn multiple_resizes_preserve_entries() {
    init_tracing();
    let values: Vec<u64> = (0..1_000).collect();
    let mut t = ProbingHashTable::new();
    for v in &values {
        t.set(&format!("k{v:04}"), v).unwrap();
        assert!(t.len() * 2 <= t.capacity());
        assert!(t.capacity().is_power_of_two());
    }
    assert!(t.capacity() >= INITIAL_CAPACITY << 3);
    assert_eq!(t.len(), 1_000);
    for v in &values {
        assert_eq!(t.get(&format!("k{v:04}")), Some(v));
    }
}

// Test: iteration completeness after updates and resizes.
// Verifies: exactly one pair per key, carrying the last-written value.
#[test]
fn iteration_yields_latest_values_once() {
    let values: Vec<i64> = (0..200).collect();
    let mut t = ProbingHashTable::new();
    let mut expected = BTreeMap::new();
    for v in &values {
        let key = format!("k{}", v % 50);
        t.set(&key, v).unwrap();
        expected.insert(key, *v);
    }

    let it = t.iter();
    assert_eq!(it.len(), 50);
    let mut seen = BTreeMap::new();
    for (k, v) in it {
        assert!(seen.insert(k.to_string(), *v).is_none(), "duplicate {k}");
    }
    assert_eq!(seen, expected);
}

// Test: a fresh iterator rescans from the start.
#[test]
fn iterators_are_independent() {
    let v = 1;
    let mut t = ProbingHashTable::new();
    t.set("only", &v).unwrap();
    let mut first = t.iter();
    assert_eq!(first.next(), Some(("only", &1)));
    assert_eq!(first.next(), None);
    let mut second = t.iter();
    assert_eq!(second.next(), Some(("only", &1)));
}

// Test: caller keys are copied.
// Verifies: the table keeps working after the caller's key buffer is gone.
#[test]
fn keys_outlive_caller_buffers() {
    let v = 3;
    let mut t = ProbingHashTable::new();
    {
        let key = String::from("transient");
        t.set(&key, &v).unwrap();
    }
    assert_eq!(t.get("transient"), Some(&3));
    assert_eq!(t.iter().next().map(|(k, _)| k), Some("transient"));
}

// Test: try_new behaves like new.
#[test]
fn try_new_creates_empty_table() {
    let t: ProbingHashTable<'_, str> = ProbingHashTable::try_new().unwrap();
    assert_eq!(t.len(), 0);
    assert_eq!(t.capacity(), INITIAL_CAPACITY);
}

// Test: unsized values are stored as plain references.
#[test]
fn str_values() {
    let owned = String::from("world");
    let mut t: ProbingHashTable<'_, str> = ProbingHashTable::default();
    t.set("greeting", "hello").unwrap();
    t.set("target", owned.as_str()).unwrap();
    assert_eq!(t.get("greeting"), Some("hello"));
    assert_eq!(t.get("target"), Some("world"));
}
