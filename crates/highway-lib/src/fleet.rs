//! Bounded max-heap of vehicle autonomies held by a single station.

use crate::station::Autonomy;

/// Vehicles parked at a station, ordered so the longest range is on top.
///
/// The fleet is a multiset: several vehicles may share the same autonomy.
/// Only the maximum is observable in O(1); iteration order is unspecified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleFleet {
    capacity: usize,
    heap: Vec<Autonomy>,
}

impl VehicleFleet {
    /// Create an empty fleet able to hold `capacity` vehicles.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Autonomy of the longest-range vehicle, or 0 when the fleet is empty.
    pub fn max_autonomy(&self) -> Autonomy {
        self.heap.first().copied().unwrap_or(0)
    }

    /// Park a vehicle. Returns `false` without changes when the fleet is full.
    pub fn insert(&mut self, autonomy: Autonomy) -> bool {
        if self.is_full() {
            return false;
        }
        self.heap.push(autonomy);
        self.sift_up(self.heap.len() - 1);
        true
    }

    /// Scrap one vehicle with the given autonomy.
    ///
    /// Returns `false` when no such vehicle is parked here. When several
    /// vehicles share the autonomy, any one of them is removed.
    pub fn remove(&mut self, autonomy: Autonomy) -> bool {
        let Some(slot) = self.heap.iter().position(|&value| value == autonomy) else {
            return false;
        };
        self.heap.swap_remove(slot);
        if slot < self.heap.len() {
            // The element moved into `slot` came from the bottom of the heap
            // and may belong above or below its new position.
            self.sift_down(slot);
            self.sift_up(slot);
        }
        true
    }

    /// Autonomies of all parked vehicles, in heap order.
    pub fn iter(&self) -> std::slice::Iter<'_, Autonomy> {
        self.heap.iter()
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[parent] >= self.heap[slot] {
                break;
            }
            self.heap.swap(parent, slot);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut largest = slot;
            if left < len && self.heap[left] > self.heap[largest] {
                largest = left;
            }
            if right < len && self.heap[right] > self.heap[largest] {
                largest = right;
            }
            if largest == slot {
                break;
            }
            self.heap.swap(slot, largest);
            slot = largest;
        }
    }
}

impl<'a> IntoIterator for &'a VehicleFleet {
    type Item = &'a Autonomy;
    type IntoIter = std::slice::Iter<'a, Autonomy>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
