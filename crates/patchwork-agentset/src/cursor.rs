//! Bidirectional traversal over an [`OrderedAgentSet`].

use crate::set::{AgentKey, OrderedAgentSet};

/// Where a cursor sits relative to the members of its set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pos {
    /// Unpositioned: before the first member and after the last.
    Fresh,
    /// Ran off the front.
    Before,
    At(usize),
    /// Ran off the back.
    After,
}

/// A movable position within an agent set.
///
/// Each cursor owns its position, so several cursors over one set do not
/// interfere. A new cursor sits before the first member: the first call
/// to [`next`](Iterator::next) yields the first member and the first call
/// to [`previous`](Self::previous) yields the last. Running off either end
/// parks the cursor there, and stepping back in turns it around.
#[derive(Clone, Debug)]
pub struct Cursor<'a, K: AgentKey> {
    set: &'a OrderedAgentSet<K>,
    pos: Pos,
}

impl<'a, K: AgentKey> Cursor<'a, K> {
    pub(crate) fn new(set: &'a OrderedAgentSet<K>) -> Self {
        Self { set, pos: Pos::Fresh }
    }

    /// Move to the first member and return it.
    pub fn first(&mut self) -> Option<K> {
        self.seek(0, Pos::After)
    }

    /// Move to the last member and return it.
    pub fn last(&mut self) -> Option<K> {
        match self.set.len() {
            0 => self.seek(0, Pos::Before),
            n => self.seek(n - 1, Pos::Before),
        }
    }

    /// Step backwards and return the member there.
    ///
    /// From the first member this runs off the front and returns `None`;
    /// the following [`next`](Iterator::next) yields the first member again.
    pub fn previous(&mut self) -> Option<K> {
        match self.pos {
            Pos::Fresh | Pos::After => self.last(),
            Pos::Before | Pos::At(0) => {
                self.pos = Pos::Before;
                None
            }
            Pos::At(i) => self.seek(i - 1, Pos::Before),
        }
    }

    /// The member at the current position.
    pub fn current(&self) -> Option<K> {
        match self.pos {
            Pos::At(i) => self.set.get(i),
            _ => None,
        }
    }

    /// Return to the unpositioned state.
    pub fn reset(&mut self) {
        self.pos = Pos::Fresh;
    }

    fn seek(&mut self, index: usize, off_end: Pos) -> Option<K> {
        let found = self.set.get(index);
        self.pos = if found.is_some() { Pos::At(index) } else { off_end };
        found
    }
}

impl<K: AgentKey> Iterator for Cursor<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        match self.pos {
            Pos::Fresh | Pos::Before => self.first(),
            Pos::After => None,
            Pos::At(i) => self.seek(i + 1, Pos::After),
        }
    }
}
