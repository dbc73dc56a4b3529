//! Menu hierarchy: levels, items and the arena that owns them.
//!
//! Levels live in a [`Hierarchy`] arena and refer to each other through
//! [`LevelId`]s, so a child keeps an O(1) link to its parent without shared
//! ownership. A level exclusively owns its items; an item owns its label.

use crate::error::BuildError;
use crate::ui::model::ActionMenu;
use std::fmt;
use std::sync::Arc;

/// Callback run when a leaf item is selected.
pub type PerformAction<T, C> = Arc<dyn Fn(&mut ActionMenu<T, C>, &Item<T, C>) + Send + Sync>;

/// Wraps a closure as a [`PerformAction`], letting the compiler infer its argument types.
pub fn perform_action<T, C, F>(f: F) -> PerformAction<T, C>
where
    F: Fn(&mut ActionMenu<T, C>, &Item<T, C>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Stable handle to a level slot in a [`Hierarchy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(u32);

impl LevelId {
    pub fn from_index(index: u32) -> Self {
        LevelId(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Address of an item: the level holding it and its row in that level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemId {
    pub level: LevelId,
    pub index: u16,
}

/// How a level lays out its items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Each item gets its own row.
    #[default]
    Wide,
    /// Grid view: several items per row.
    Thin,
}

pub struct Item<T, C> {
    pub(crate) label: Option<String>,
    pub(crate) action_data: Option<T>,
    pub(crate) callback: Option<PerformAction<T, C>>,
    pub(crate) child: Option<LevelId>,
}

impl<T, C> Item<T, C> {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn action_data(&self) -> Option<&T> {
        self.action_data.as_ref()
    }

    /// Hands the payload back to the application, typically from a destroy visitor.
    pub fn take_action_data(&mut self) -> Option<T> {
        self.action_data.take()
    }

    pub fn callback(&self) -> Option<&PerformAction<T, C>> {
        self.callback.as_ref()
    }

    pub fn child(&self) -> Option<LevelId> {
        self.child
    }

    /// An item with a child is a submenu even when a callback is also set.
    pub fn is_submenu(&self) -> bool {
        self.child.is_some()
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Item<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("label", &self.label)
            .field("action_data", &self.action_data)
            .field("has_callback", &self.callback.is_some())
            .field("child", &self.child)
            .finish()
    }
}

pub struct Level<T, C> {
    capacity: u16,
    items: Vec<Item<T, C>>,
    display_mode: DisplayMode,
    depth: u16,
    parent: Option<LevelId>,
}

impl<T, C> Level<T, C> {
    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn is_full(&self) -> bool {
        self.items.len() >= usize::from(self.capacity)
    }

    pub fn items(&self) -> &[Item<T, C>] {
        &self.items
    }

    pub fn item(&self, row: usize) -> Option<&Item<T, C>> {
        self.items.get(row)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// 1 for a root level, parent depth + 1 below it.
    pub fn depth(&self) -> u16 {
        self.depth
    }

    pub fn parent(&self) -> Option<LevelId> {
        self.parent
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Level<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .field("display_mode", &self.display_mode)
            .field("depth", &self.depth)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Arena owning every level of one or more menu trees.
///
/// Slots of destroyed levels stay vacant and are never reused, so a stale
/// [`LevelId`] resolves to nothing instead of aliasing another level.
pub struct Hierarchy<T = (), C = ()> {
    levels: Vec<Option<Level<T, C>>>,
}

impl<T, C> Default for Hierarchy<T, C> {
    fn default() -> Self {
        Hierarchy { levels: Vec::new() }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Hierarchy<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hierarchy").field("levels", &self.levels).finish()
    }
}

// copy a label into a buffer whose allocation failure is reported instead of aborting
fn copy_label(label: Option<&str>) -> Result<Option<String>, BuildError> {
    let Some(label) = label else {
        return Ok(None);
    };
    let mut owned = String::new();
    owned
        .try_reserve_exact(label.len())
        .map_err(|_| BuildError::OutOfMemory)?;
    owned.push_str(label);
    Ok(Some(owned))
}

impl<T, C> Hierarchy<T, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: LevelId) -> Option<&Level<T, C>> {
        self.levels.get(id.index()).and_then(Option::as_ref)
    }

    fn level_mut(&mut self, id: LevelId) -> Option<&mut Level<T, C>> {
        self.levels.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item<T, C>> {
        self.level(id.level)?.item(usize::from(id.index))
    }

    /// Number of live levels.
    pub fn level_count(&self) -> usize {
        self.levels.iter().filter(|slot| slot.is_some()).count()
    }

    /// Allocates an empty root level able to hold `capacity` items.
    pub fn create_level(&mut self, capacity: u16) -> Result<LevelId, BuildError> {
        let id = u32::try_from(self.levels.len()).map_err(|_| BuildError::OutOfMemory)?;
        let mut items = Vec::new();
        items
            .try_reserve_exact(usize::from(capacity))
            .map_err(|_| BuildError::OutOfMemory)?;
        self.levels
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory)?;
        self.levels.push(Some(Level {
            capacity,
            items,
            display_mode: DisplayMode::Wide,
            depth: 1,
            parent: None,
        }));
        Ok(LevelId(id))
    }

    /// No-op when `level` does not resolve.
    pub fn set_display_mode(&mut self, level: LevelId, mode: DisplayMode) {
        if let Some(level) = self.level_mut(level) {
            level.display_mode = mode;
        }
    }

    // validity and capacity preconditions shared by both add operations
    fn check_room(&self, level: LevelId) -> Result<&Level<T, C>, BuildError> {
        let found = self.level(level).ok_or(BuildError::InvalidLevel(level))?;
        if found.is_full() {
            return Err(BuildError::LevelFull {
                capacity: found.capacity,
            });
        }
        Ok(found)
    }

    fn push_item(&mut self, level: LevelId, item: Item<T, C>) -> Result<ItemId, BuildError> {
        let target = self
            .level_mut(level)
            .ok_or(BuildError::InvalidLevel(level))?;
        let index = u16::try_from(target.items.len()).map_err(|_| BuildError::LevelFull {
            capacity: target.capacity,
        })?;
        target.items.push(item);
        Ok(ItemId { level, index })
    }

    /// Appends a leaf item that runs `callback` when selected.
    pub fn add_action(
        &mut self,
        level: LevelId,
        label: Option<&str>,
        callback: Option<PerformAction<T, C>>,
        action_data: Option<T>,
    ) -> Result<ItemId, BuildError> {
        self.check_room(level)?;
        let label = copy_label(label)?;
        self.push_item(
            level,
            Item {
                label,
                action_data,
                callback,
                child: None,
            },
        )
    }

    /// Appends an item that opens `child`, linking `child` under `level`.
    ///
    /// A level can only be attached once, and never below itself or one of
    /// its descendants. Depth is recomputed for the whole child subtree, so
    /// trees may be assembled bottom-up.
    pub fn add_child(
        &mut self,
        level: LevelId,
        child: LevelId,
        label: Option<&str>,
    ) -> Result<ItemId, BuildError> {
        let parent_depth = self.check_room(level)?.depth;
        let existing = self
            .level(child)
            .ok_or(BuildError::InvalidLevel(child))?
            .parent;
        if let Some(parent) = existing {
            return Err(BuildError::AlreadyAttached { child, parent });
        }
        if self.ancestors(level).any(|ancestor| ancestor == child) {
            return Err(BuildError::WouldCycle { level, child });
        }
        let label = copy_label(label)?;

        let id = self.push_item(
            level,
            Item {
                label,
                action_data: None,
                callback: None,
                child: Some(child),
            },
        )?;
        if let Some(linked) = self.level_mut(child) {
            linked.parent = Some(level);
        }
        self.propagate_depth(child, parent_depth.saturating_add(1));
        Ok(id)
    }

    /// `level` itself followed by each enclosing level up to the root.
    pub fn ancestors(&self, level: LevelId) -> impl Iterator<Item = LevelId> + '_ {
        std::iter::successors(self.level(level).map(|_| level), move |id| {
            self.level(*id).and_then(Level::parent)
        })
    }

    fn propagate_depth(&mut self, root: LevelId, depth: u16) {
        let mut pending = vec![(root, depth)];
        while let Some((id, depth)) = pending.pop() {
            if let Some(level) = self.level_mut(id) {
                level.depth = depth;
                let below = depth.saturating_add(1);
                pending.extend(
                    level
                        .items
                        .iter()
                        .filter_map(|item| item.child)
                        .map(|child| (child, below)),
                );
            }
        }
    }

    /// Tears down `root` and everything below it, post-order.
    ///
    /// For each item in row order: its child subtree is destroyed first, then
    /// its label is released, then `visit` sees the item (so the application
    /// can reclaim `action_data`), then the item is dropped. The level goes
    /// last. Returns how many items were visited; an unknown root visits none.
    pub fn destroy_hierarchy<F>(&mut self, root: LevelId, mut visit: F) -> usize
    where
        F: FnMut(&mut Item<T, C>),
    {
        let visited = self.destroy_level(root, &mut visit);
        tracing::debug!(root = %root, visited, "hierarchy destroyed");
        visited
    }

    fn destroy_level(&mut self, id: LevelId, visit: &mut dyn FnMut(&mut Item<T, C>)) -> usize {
        // vacate the slot first so nothing below can reach this level again
        let Some(level) = self.levels.get_mut(id.index()).and_then(Option::take) else {
            return 0;
        };
        let mut visited = 0;
        for mut item in level.items {
            if let Some(child) = item.child {
                visited += self.destroy_level(child, visit);
            }
            item.label = None;
            visit(&mut item);
            visited += 1;
        }
        visited
    }
}
