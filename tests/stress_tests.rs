//! Stress tests that push the Fibonacci heap through long operation mixes
//!
//! These use large element counts and adversarial shapes (long cut chains,
//! many duplicates) to catch structural bugs that small cases miss.

mod common;

use common::{assert_invariants, init_tracing};
use fibheap::fibonacci::FibonacciHeap;
use fibheap::Key;

/// Tiny deterministic generator so runs are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

#[test]
fn massive_insert_then_drain() {
    init_tracing();
    let mut heap = FibonacciHeap::with_capacity(10_000);
    for i in (0..10_000).rev() {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.extract_min(), Ok(i));
        if i % 1_000 == 0 {
            assert_invariants(&heap);
        }
    }
    assert!(heap.is_empty());
}

#[test]
fn many_decrease_keys() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..2_000).map(|i| heap.insert(100_000 + i)).collect();
    heap.insert(-1);
    heap.extract_min().unwrap();

    for (i, handle) in handles.iter().enumerate() {
        heap.decrease_key(handle, i as Key).unwrap();
    }
    assert_invariants(&heap);

    for i in 0..2_000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
}

#[test]
fn alternating_insert_extract() {
    let mut heap = FibonacciHeap::new();
    for i in 0..2_000 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert!(heap.extract_min().is_ok());
    }
    assert_eq!(heap.len(), 2_000);
    assert_invariants(&heap);

    let sorted = heap.into_sorted_vec();
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn random_mix_with_deletes() {
    init_tracing();
    let mut rng = Lcg(0x5eed);
    let mut heap = FibonacciHeap::new();
    let mut live = Vec::new();

    for step in 0..20_000 {
        match rng.next() % 10 {
            0..=3 => {
                let key = (rng.next() % 100_000) as Key;
                live.push((heap.insert(key), key));
            }
            4..=5 => {
                if let Ok(key) = heap.extract_min() {
                    let pos = live
                        .iter()
                        .position(|(h, k)| *k == key && !heap.contains(h))
                        .unwrap();
                    live.swap_remove(pos);
                }
            }
            6..=8 if !live.is_empty() => {
                let i = rng.next() as usize % live.len();
                let new_key = live[i].1 - (rng.next() % 1_000) as Key;
                heap.decrease_key(&live[i].0, new_key).unwrap();
                live[i].1 = new_key;
            }
            9 if !live.is_empty() => {
                let i = rng.next() as usize % live.len();
                let (handle, key) = live.swap_remove(i);
                assert_eq!(heap.delete(&handle), Ok(key));
            }
            _ => {}
        }

        assert_eq!(heap.len(), live.len());
        if step % 2_000 == 0 {
            assert_invariants(&heap);
        }
    }

    assert_invariants(&heap);
    let mut expected: Vec<Key> = live.iter().map(|&(_, k)| k).collect();
    expected.sort_unstable();
    assert_eq!(heap.into_sorted_vec(), expected);
}

#[test]
fn long_cut_chain() {
    // One binomial tree of degree 12, cut apart from the largest key down;
    // parents get marked by their first loss and cut by their second
    let mut heap = FibonacciHeap::new();
    let n: Key = 1 << 12;
    let handles: Vec<_> = (0..n).map(|k| heap.insert(k)).collect();
    heap.insert(-1);
    heap.extract_min().unwrap();
    assert_eq!(heap.root_count(), 1);

    for handle in handles.iter().rev() {
        let key = heap.key(handle).unwrap();
        heap.decrease_key(handle, key - n).unwrap();
    }
    assert_invariants(&heap);
    assert_eq!(heap.marked_count(), 0);
    assert_eq!(heap.find_min(), Ok(-n));

    let expected: Vec<Key> = (0..n).map(|k| k - n).collect();
    assert_eq!(heap.into_sorted_vec(), expected);
}

#[test]
fn all_duplicates() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..1_000).map(|_| heap.insert(42)).collect();
    heap.extract_min().unwrap();

    for handle in handles.iter().skip(1).step_by(3) {
        assert_eq!(heap.delete(handle), Ok(42));
    }
    assert_invariants(&heap);
    while let Ok(key) = heap.extract_min() {
        assert_eq!(key, 42);
    }
}

#[test]
fn repeated_merges() {
    let mut total = FibonacciHeap::new();
    let mut expected = Vec::new();

    for round in 0..50 {
        let keys: Vec<Key> = (0..40).map(|i| (i * 7 + round * 13) % 500).collect();
        let mut part: FibonacciHeap = keys.iter().copied().collect();
        if round % 2 == 0 {
            let k = part.extract_min().unwrap();
            part.insert(k);
        }
        expected.extend(keys);
        total.merge(part);

        if round % 5 == 0 {
            total.extract_min().unwrap();
            expected.sort_unstable();
            expected.remove(0);
        }
    }

    assert_invariants(&total);
    expected.sort_unstable();
    assert_eq!(total.into_sorted_vec(), expected);
}
