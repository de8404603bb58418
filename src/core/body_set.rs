use serde::{Deserialize, Serialize};

use super::rigidbody::RigidBody;

/// Stable identifier for a body stored in a [`BodySet`].
///
/// The generation is bumped each time a slot is vacated, so a handle to a
/// removed body never aliases a body inserted later into the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Placeholder carried by bodies that have not been inserted yet.
    pub const INVALID: BodyHandle = BodyHandle {
        index: u32::MAX,
        generation: 0,
    };

    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_valid(&self) -> bool {
        self.index != u32::MAX
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Generational arena owning every body of a world.
///
/// Iteration visits occupied slots in index order, which is the order the
/// integrator and the broad phase see bodies in.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `body`, stamping it with the handle it can be retrieved by.
    pub fn insert(&mut self, mut body: RigidBody) -> BodyHandle {
        let handle = match self.free.pop() {
            Some(index) => BodyHandle {
                index,
                generation: self.slots[index as usize].generation,
            },
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    body: None,
                });
                BodyHandle {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        body.id = handle;
        self.slots[handle.index()].body = Some(body);
        self.len += 1;
        handle
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let slot = self.slot_mut(handle)?;
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(body)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.slot_mut(handle).and_then(|slot| slot.body.as_mut())
    }

    /// Mutable access to two distinct bodies at once.
    pub fn get2_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (low, high) = if a.index < b.index { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(high.index());
        let low_body = head[low.index()].body.as_mut()?;
        let high_body = tail[0].body.as_mut()?;
        if a.index < b.index {
            Some((low_body, high_body))
        } else {
            Some((high_body, low_body))
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &RigidBody> + '_ {
        self.slots.iter().filter_map(|slot| slot.body.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RigidBody> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.body.as_mut())
    }

    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.iter().map(|body| body.id)
    }

    /// Removes every body for which `keep` returns false, returning the
    /// handles that were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&RigidBody) -> bool) -> Vec<BodyHandle> {
        let doomed: Vec<BodyHandle> = self
            .iter()
            .filter(|body| !keep(body))
            .map(|body| body.id)
            .collect();
        for &handle in &doomed {
            self.remove(handle);
        }
        doomed
    }

    fn slot_mut(&mut self, handle: BodyHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
    }
}
