use std::collections::HashMap;

mod markdown;
mod node;

pub use node::{
    Block, BlockId, BlockKind, BlockPatch, CalloutVariant, HeadingLevel, ListStyle,
    numbered_ordinals,
};

/// Where a sibling insertion lands relative to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

#[derive(Clone, Debug)]
struct Slot {
    kind: BlockKind,
    content: String,
    collapsed: bool,
    parent: Option<BlockId>,
    children: Vec<BlockId>,
}

/// The outline tree for one editing session.
///
/// Nodes live in an arena keyed by id with a separate parent/children index,
/// so every mutation is a handful of index updates instead of a recursive
/// rebuild of the whole tree. Cloning the store yields an independent
/// snapshot. The nested `Block` shape is only the interchange format at the
/// seed/export boundary.
///
/// Every operation is total: an id that is absent from the tree makes the
/// call a silent no-op (`false`/`None`), never an error. The surrounding UI
/// fires mutations against potentially stale ids and must not crash.
#[derive(Clone, Debug)]
pub struct Outline {
    arena: HashMap<BlockId, Slot>,
    roots: Vec<BlockId>,
}

impl Outline {
    /// An outline holding a single default empty heading.
    pub fn new() -> Self {
        Self::seed(Vec::new())
    }

    /// Build a session from the block tree handed over by the application.
    /// A duplicate id in a malformed seed keeps the first occurrence and
    /// drops the rest; an empty seed gets the default heading.
    pub fn seed(blocks: Vec<Block>) -> Self {
        let mut outline = Self {
            arena: HashMap::new(),
            roots: Vec::new(),
        };
        for block in blocks {
            if let Some(id) = outline.adopt(block, None) {
                outline.roots.push(id);
            }
        }
        outline.ensure_initialized();
        outline
    }

    fn ensure_initialized(&mut self) {
        if self.roots.is_empty() {
            if let Some(id) = self.adopt(Block::default(), None) {
                self.roots.push(id);
            }
        }
    }

    /// Move a block and its subtree into the arena. Returns `None` if the
    /// block's own id is already taken (first occurrence wins); duplicate
    /// descendants are dropped individually.
    fn adopt(&mut self, block: Block, parent: Option<BlockId>) -> Option<BlockId> {
        if self.arena.contains_key(&block.id) {
            return None;
        }
        let Block {
            id,
            kind,
            content,
            collapsed,
            children,
        } = block;
        self.arena.insert(
            id,
            Slot {
                kind,
                content,
                collapsed,
                parent,
                children: Vec::new(),
            },
        );
        for child in children {
            if let Some(child_id) = self.adopt(child, Some(id)) {
                if let Some(slot) = self.arena.get_mut(&id) {
                    slot.children.push(child_id);
                }
            }
        }
        Some(id)
    }

    fn sibling_list(&self, parent: Option<BlockId>) -> Option<&[BlockId]> {
        match parent {
            Some(pid) => self.arena.get(&pid).map(|slot| slot.children.as_slice()),
            None => Some(&self.roots),
        }
    }

    fn sibling_list_mut(&mut self, parent: Option<BlockId>) -> Option<&mut Vec<BlockId>> {
        match parent {
            Some(pid) => self.arena.get_mut(&pid).map(|slot| &mut slot.children),
            None => Some(&mut self.roots),
        }
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.arena.contains_key(&id)
    }

    /// Total number of nodes in the tree. Never zero.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn root_ids(&self) -> &[BlockId] {
        &self.roots
    }

    pub fn parent_of(&self, id: BlockId) -> Option<BlockId> {
        self.arena.get(&id).and_then(|slot| slot.parent)
    }

    /// Snapshot of one node and its subtree in the interchange shape.
    pub fn block(&self, id: BlockId) -> Option<Block> {
        let slot = self.arena.get(&id)?;
        Some(Block {
            id,
            kind: slot.kind.clone(),
            content: slot.content.clone(),
            collapsed: slot.collapsed,
            children: slot
                .children
                .iter()
                .filter_map(|&child| self.block(child))
                .collect(),
        })
    }

    /// Snapshot of the whole tree for the presentation layer.
    pub fn blocks(&self) -> Vec<Block> {
        self.roots
            .iter()
            .filter_map(|&id| self.block(id))
            .collect()
    }

    /// Merge the patch into the node with the given id. `None` patch fields
    /// preserve the node's values, `Some` fields overwrite. Patch fields
    /// that do not apply to the node's kind are ignored.
    pub fn update(&mut self, id: BlockId, patch: BlockPatch) -> bool {
        let Some(slot) = self.arena.get_mut(&id) else {
            return false;
        };
        if let Some(kind) = patch.kind {
            slot.kind = kind;
        }
        if let Some(content) = patch.content {
            slot.content = content;
        }
        if let Some(collapsed) = patch.collapsed {
            slot.collapsed = collapsed;
        }
        if let Some(value) = patch.checked {
            if let BlockKind::ListItem { checked, .. } = &mut slot.kind {
                *checked = value;
            }
        }
        if let Some(value) = patch.list_style {
            if let BlockKind::ListItem { style, .. } = &mut slot.kind {
                *style = value;
            }
        }
        true
    }

    /// Splice `block` (with its subtree) immediately before or after the
    /// target, in whichever sibling list holds it. Refused when the target
    /// is unknown or any incoming id already exists in the tree, so id
    /// uniqueness survives every call sequence.
    pub fn insert_sibling(&mut self, target: BlockId, block: Block, placement: Placement) -> bool {
        let Some(parent) = self.arena.get(&target).map(|slot| slot.parent) else {
            return false;
        };
        let mut incoming = Vec::new();
        subtree_ids(&block, &mut incoming);
        if incoming.iter().any(|id| self.arena.contains_key(id)) {
            return false;
        }
        let position = match self
            .sibling_list(parent)
            .and_then(|list| list.iter().position(|&id| id == target))
        {
            Some(index) => index,
            None => return false,
        };
        let Some(new_id) = self.adopt(block, parent) else {
            return false;
        };
        let at = match placement {
            Placement::Before => position,
            Placement::After => position + 1,
        };
        if let Some(list) = self.sibling_list_mut(parent) {
            list.insert(at, new_id);
        }
        true
    }

    /// Append a fresh node (new id, given kind, empty content, no children)
    /// to the parent's children and unfold the parent. Returns the new id so
    /// the caller can move focus to it.
    pub fn insert_child(&mut self, parent: BlockId, kind: BlockKind) -> Option<BlockId> {
        if !self.arena.contains_key(&parent) {
            return None;
        }
        let child = Block::new(kind);
        let child_id = self.adopt(child, Some(parent))?;
        if let Some(slot) = self.arena.get_mut(&parent) {
            slot.children.push(child_id);
            slot.collapsed = false;
        }
        Some(child_id)
    }

    /// Remove the node and its entire subtree. When this empties the root
    /// sequence, a fresh default heading takes its place so the document is
    /// never structurally empty.
    pub fn remove(&mut self, id: BlockId) -> bool {
        let Some(parent) = self.arena.get(&id).map(|slot| slot.parent) else {
            return false;
        };
        match self.sibling_list_mut(parent) {
            Some(list) => list.retain(|&entry| entry != id),
            None => return false,
        }
        self.discard_subtree(id);
        self.ensure_initialized();
        true
    }

    fn discard_subtree(&mut self, id: BlockId) {
        if let Some(slot) = self.arena.remove(&id) {
            for child in slot.children {
                self.discard_subtree(child);
            }
        }
    }

    /// Flatten the tree into the markdown-like publish dialect.
    pub fn to_markdown(&self) -> String {
        markdown::render(self)
    }
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

fn subtree_ids(block: &Block, out: &mut Vec<BlockId>) {
    out.push(block.id);
    for child in &block.children {
        subtree_ids(child, out);
    }
}

#[cfg(test)]
#[path = "outline_tests.rs"]
mod outline_tests;
