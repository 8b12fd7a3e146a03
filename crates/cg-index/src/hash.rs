//! Open-addressing hash index with double hashing.
//!
//! # Probe sequence
//!
//! The seed hash `h0` sums the character codes of (at most) the last three
//! characters of the key, each weighted by `27^j` where `j` is that
//! character's own index in the key:
//!
//! ```text
//! key = "Girona"          j = 3, 4, 5
//! h0  = 'o'·27³ + 'n'·27⁴ + 'a'·27⁵      (saturating at i32::MAX)
//! ```
//!
//! Probe `i` lands on
//!
//! ```text
//! slot(i) = (h0 + i · (8681 − h0 / 8681))  mod capacity
//! ```
//!
//! evaluated in 64-bit signed arithmetic with a Euclidean modulus, so a
//! negative step (large `h0`) still yields a valid slot.  A step that is a
//! multiple of the capacity would pin every probe to one slot; it is
//! replaced by 1.
//!
//! # Deletion
//!
//! `delete` empties the slot outright (no tombstone).  A key inserted after
//! a colliding key that is later deleted may become unreachable, so the
//! index is meant for append-mostly workloads such as name → slot maps.
//!
//! # Growth
//!
//! Capacity grows by a fixed increment under [`GrowthPolicy`].  Every entry
//! is re-hashed into the larger array: the modulus changes with capacity,
//! so copying slots positionally would strand them.

use cg_core::GrowthPolicy;

/// Secondary-hash modulus source.
const STEP_BASE: i64 = 8681;

/// Positional weight base.
const RADIX: u64 = 27;

/// String-keyed open-addressing map.
#[derive(Clone, Debug)]
pub struct OpenAddressingIndex<V> {
    slots:  Vec<Option<(String, V)>>,
    len:    usize,
    policy: GrowthPolicy,
}

impl<V> OpenAddressingIndex<V> {
    /// An empty index with `capacity` slots and the default growth policy.
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, GrowthPolicy::default())
    }

    pub fn with_policy(capacity: usize, policy: GrowthPolicy) -> Self {
        Self {
            slots: empty_slots(capacity.max(1)),
            len: 0,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots.  Callers must not rely on specific values;
    /// it changes whenever the growth policy fires.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Insert `value` under `key`, overwriting any existing value for the
    /// same key.  Returns the previous value, if any.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        loop {
            match self.probe(&key) {
                Probe::Found(slot) => {
                    if let Some((_, existing)) = self.slots[slot].as_mut() {
                        return Some(std::mem::replace(existing, value));
                    }
                }
                Probe::Vacant(slot) => {
                    self.slots[slot] = Some((key, value));
                    self.len += 1;
                    if self.policy.should_grow(self.len, self.capacity()) {
                        self.grow();
                    }
                    return None;
                }
                Probe::Exhausted => {
                    log::debug!(
                        "probe sequence for {key:?} exhausted at capacity {}",
                        self.capacity()
                    );
                    self.grow();
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key) {
            Probe::Found(slot) => self.slots[slot].as_ref().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Found(slot) => self.slots[slot].as_mut().map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Remove `key`, returning its value.  Leaves an empty slot behind.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let Probe::Found(slot) = self.probe(key) else {
            return None;
        };
        let (_, value) = self.slots[slot].take()?;
        self.len -= 1;
        Some(value)
    }

    /// Iterator over `(key, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref().map(|(k, v)| (k.as_str(), v)))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Walk the probe sequence for `key` until it hits the key, an empty
    /// slot, or `capacity` probes.
    fn probe(&self, key: &str) -> Probe {
        let capacity = self.capacity();
        let h0 = seed_hash(key);
        for i in 0..capacity {
            let slot = probe_slot(h0, i, capacity);
            match &self.slots[slot] {
                None => return Probe::Vacant(slot),
                Some((k, _)) if k == key => return Probe::Found(slot),
                Some(_) => {}
            }
        }
        Probe::Exhausted
    }

    fn grow(&mut self) {
        let mut capacity = self.policy.grown(self.capacity());
        let entries: Vec<(String, V)> = std::mem::take(&mut self.slots)
            .into_iter()
            .flatten()
            .collect();

        // Plan every placement first; a probe sequence that cannot reach a
        // free slot at this capacity bumps the capacity and replans.
        let placement = loop {
            match plan_placement(&entries, capacity) {
                Some(p) => break p,
                None => capacity = self.policy.grown(capacity),
            }
        };
        log::debug!(
            "grew hash index to {} slots ({} entries)",
            capacity,
            entries.len()
        );

        let mut slots = empty_slots(capacity);
        for (entry, slot) in entries.into_iter().zip(placement) {
            slots[slot] = Some(entry);
        }
        self.slots = slots;
    }
}

/// Target slot for each entry when re-hashed into `capacity` slots, or
/// `None` if some entry's probe sequence finds no free slot.
fn plan_placement<V>(entries: &[(String, V)], capacity: usize) -> Option<Vec<usize>> {
    let mut taken = vec![false; capacity];
    let mut placement = Vec::with_capacity(entries.len());
    for (key, _) in entries {
        let h0 = seed_hash(key);
        let slot = (0..capacity)
            .map(|i| probe_slot(h0, i, capacity))
            .find(|&s| !taken[s])?;
        taken[slot] = true;
        placement.push(slot);
    }
    Some(placement)
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Exhausted,
}

fn empty_slots<V>(capacity: usize) -> Vec<Option<(String, V)>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

/// Seed hash over the last (up to) three characters of `key`.
pub(crate) fn seed_hash(key: &str) -> i64 {
    let chars: Vec<char> = key.chars().collect();
    let start = chars.len().saturating_sub(3);
    let mut hash: u64 = 0;
    for (j, c) in chars.iter().enumerate().skip(start) {
        let weight = u32::try_from(j)
            .ok()
            .and_then(|e| RADIX.checked_pow(e))
            .unwrap_or(u64::MAX);
        hash = hash.saturating_add((*c as u64).saturating_mul(weight));
    }
    hash.min(i32::MAX as u64) as i64
}

/// Slot visited on probe `i` of the sequence seeded by `h0`.
pub(crate) fn probe_slot(h0: i64, i: usize, capacity: usize) -> usize {
    let cap = capacity as i64;
    let mut step = STEP_BASE - h0 / STEP_BASE;
    if step.rem_euclid(cap) == 0 {
        step = 1;
    }
    (h0 + i as i64 * step).rem_euclid(cap) as usize
}
