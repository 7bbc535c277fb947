use std::fmt;

/// A generational node handle. A handle kept after its node is despawned never
/// resolves to whatever later reuses the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Hands out node slots and bumps a slot's generation when it is freed.
#[derive(Debug, Default)]
pub(crate) struct NodeAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    len: usize,
}

impl NodeAllocator {
    /// Allocate a handle, reusing a freed slot if available.
    pub fn allocate(&mut self) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free_list.pop() {
            self.alive[index as usize] = true;
            NodeId {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.alive.push(true);
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Free a handle. Returns `true` if it was alive.
    pub fn deallocate(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index as usize;
        self.alive[idx] = false;
        self.generations[idx] += 1;
        self.free_list.push(id.index);
        self.len -= 1;
        true
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        let idx = id.index as usize;
        idx < self.alive.len() && self.alive[idx] && self.generations[idx] == id.generation
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Current generation of a slot (the generation the live handle carries).
    pub fn generation(&self, index: usize) -> u32 {
        self.generations.get(index).copied().unwrap_or(0)
    }
}
