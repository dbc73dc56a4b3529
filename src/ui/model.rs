use crate::error::MenuError;
use crate::hierarchy::{Hierarchy, Item, ItemId, Level, LevelId};
use crate::host::{Host, ResultWindow, SlideDirection};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Notification fired around closing, with the performed action if any.
pub type CloseCallback<T, C> = Arc<dyn Fn(&ActionMenu<T, C>, Option<&Item<T, C>>) + Send + Sync>;

pub fn on_close<T, C, F>(f: F) -> CloseCallback<T, C>
where
    F: Fn(&ActionMenu<T, C>, Option<&Item<T, C>>) + Send + Sync + 'static,
{
    Arc::new(f)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuColors {
    /// Fill of the crumb column.
    pub background: Rgb,
    /// Crumbs marking the depth of the visible level.
    pub foreground: Rgb,
}

impl Default for MenuColors {
    fn default() -> Self {
        MenuColors {
            background: Rgb(95, 95, 95),
            foreground: Rgb(255, 255, 255),
        }
    }
}

/// Vertical placement of the rows when they do not fill the screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Top,
    Center,
}

pub struct MenuConfig<T, C> {
    pub hierarchy: Arc<Hierarchy<T, C>>,
    pub root_level: LevelId,
    /// Application state reachable from callbacks through [`ActionMenu::context_mut`].
    pub context: C,
    pub colors: MenuColors,
    /// Called immediately before the menu goes away.
    pub will_close: Option<CloseCallback<T, C>>,
    /// Called once the menu is gone, so application memory may be freed.
    pub did_close: Option<CloseCallback<T, C>>,
    pub align: Align,
}

impl<T, C> MenuConfig<T, C> {
    pub fn new(hierarchy: Arc<Hierarchy<T, C>>, root_level: LevelId, context: C) -> Self {
        MenuConfig {
            hierarchy,
            root_level,
            context,
            colors: MenuColors::default(),
            will_close: None,
            did_close: None,
            align: Align::default(),
        }
    }
}

impl<T, C: fmt::Debug> fmt::Debug for MenuConfig<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuConfig")
            .field("root_level", &self.root_level)
            .field("context", &self.context)
            .field("colors", &self.colors)
            .field("will_close", &self.will_close.is_some())
            .field("did_close", &self.did_close.is_some())
            .field("align", &self.align)
            .finish()
    }
}

/// Navigation state: either settled on the current level or mid-slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Nav {
    #[default]
    Idle,
    Transitioning { to: LevelId, phase: SlideDirection },
}

/// One open action menu session.
pub struct ActionMenu<T, C> {
    pub(crate) tree: Arc<Hierarchy<T, C>>,
    pub(crate) root_level: LevelId,
    pub(crate) current_level: LevelId,
    pub(crate) nav: Nav,
    pub(crate) performed_action: Option<ItemId>,
    pub(crate) frozen: bool,
    pub(crate) closed: bool,
    // released at the end of `close`
    pub(crate) config: Option<MenuConfig<T, C>>,
    pub(crate) result_window: Option<ResultWindow>,
    pub(crate) host: Box<dyn Host>,
}

impl<T, C> ActionMenu<T, C> {
    /// Takes over `config` and asks the host to present the root level.
    pub fn open(config: MenuConfig<T, C>, mut host: Box<dyn Host>) -> Result<Self, MenuError> {
        let root = config.root_level;
        if config.hierarchy.level(root).is_none() {
            return Err(MenuError::InvalidRoot(root));
        }
        host.set_selected_row(0);
        host.present_menu(true);
        info!(root = %root, "action menu opened");
        Ok(ActionMenu {
            tree: Arc::clone(&config.hierarchy),
            root_level: root,
            current_level: root,
            nav: Nav::Idle,
            performed_action: None,
            frozen: false,
            closed: false,
            config: Some(config),
            result_window: None,
            host,
        })
    }

    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) {
        crate::ui::update::handle_update(self, msg);
    }

    /// Stop reacting to input, e.g. while waiting for an asynchronous result.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Window shown after closing; the last call before close wins, `None` clears it.
    pub fn set_result_window(&mut self, window: Option<ResultWindow>) {
        self.result_window = window;
    }

    pub fn result_window(&self) -> Option<&ResultWindow> {
        self.result_window.as_ref()
    }

    /// Closes the menu whether frozen or not.
    ///
    /// `will_close` fires first, then the host dismisses the menu and shows the
    /// result window if one was set, then `did_close` fires and the config is
    /// released. The hierarchy is left to the application. Closing an
    /// already closed menu does nothing.
    pub fn close(&mut self, animated: bool) {
        if self.closed {
            debug!("close requested on a closed action menu");
            return;
        }
        self.closed = true;
        self.nav = Nav::Idle;

        let tree = Arc::clone(&self.tree);
        let performed = self.performed_action.and_then(|id| tree.item(id));
        let (will_close, did_close) = match &self.config {
            Some(config) => (config.will_close.clone(), config.did_close.clone()),
            None => (None, None),
        };

        if let Some(notify) = will_close {
            notify(&*self, performed);
        }
        self.host.dismiss_menu(animated);
        if let Some(window) = self.result_window.take() {
            self.host.present_result(window);
        }
        if let Some(notify) = did_close {
            notify(&*self, performed);
        }
        self.config = None;
        info!(
            performed = ?performed.and_then(Item::label),
            "action menu closed"
        );
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Context from the config; `None` once the menu has closed.
    pub fn context(&self) -> Option<&C> {
        self.config.as_ref().map(|config| &config.context)
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.config.as_mut().map(|config| &mut config.context)
    }

    pub fn config(&self) -> Option<&MenuConfig<T, C>> {
        self.config.as_ref()
    }

    pub fn hierarchy(&self) -> &Arc<Hierarchy<T, C>> {
        &self.tree
    }

    pub fn root_level(&self) -> LevelId {
        self.root_level
    }

    pub fn current_level(&self) -> LevelId {
        self.current_level
    }

    pub fn level(&self) -> Option<&Level<T, C>> {
        self.tree.level(self.current_level)
    }

    /// Target of the transition in flight, if any.
    pub fn pending_level(&self) -> Option<LevelId> {
        match self.nav {
            Nav::Idle => None,
            Nav::Transitioning { to, .. } => Some(to),
        }
    }

    pub fn nav(&self) -> Nav {
        self.nav
    }

    pub fn is_transitioning(&self) -> bool {
        self.nav != Nav::Idle
    }

    /// Number of crumbs to draw for the visible level.
    pub fn depth(&self) -> u16 {
        self.level().map_or(0, Level::depth)
    }

    pub fn performed_action(&self) -> Option<&Item<T, C>> {
        self.tree.item(self.performed_action?)
    }

    pub fn performed_action_id(&self) -> Option<ItemId> {
        self.performed_action
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn selected_row(&self) -> usize {
        self.host.selected_row()
    }
}

impl<T, C> fmt::Debug for ActionMenu<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionMenu")
            .field("root_level", &self.root_level)
            .field("current_level", &self.current_level)
            .field("nav", &self.nav)
            .field("performed_action", &self.performed_action)
            .field("frozen", &self.frozen)
            .field("closed", &self.closed)
            .field("result_window", &self.result_window)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::perform_action;
    use crate::host::testing::{Event, RecordingHost};
    use std::sync::Mutex;

    fn single_level() -> (Arc<Hierarchy<u32, Vec<u32>>>, LevelId) {
        let mut tree = Hierarchy::new();
        let root = tree.create_level(1).unwrap();
        tree.add_action(root, Some("only"), Some(perform_action(|_, _| {})), Some(1))
            .unwrap();
        (Arc::new(tree), root)
    }

    #[test]
    fn open_presents_root_and_starts_idle() {
        let (tree, root) = single_level();
        let host = RecordingHost::new();
        let menu = ActionMenu::open(MenuConfig::new(tree, root, vec![]), host.boxed()).unwrap();
        assert_eq!(menu.current_level(), root);
        assert_eq!(menu.root_level(), root);
        assert_eq!(menu.nav(), Nav::Idle);
        assert_eq!(menu.pending_level(), None);
        assert!(!menu.is_frozen());
        assert!(menu.performed_action().is_none());
        assert_eq!(menu.depth(), 1);
        assert_eq!(host.events(), vec![Event::Select(0), Event::Present]);
    }

    #[test]
    fn open_rejects_unknown_root() {
        let (tree, _) = single_level();
        let ghost = LevelId::from_index(9);
        let host = RecordingHost::new();
        let err = ActionMenu::open(MenuConfig::new(tree, ghost, vec![]), host.boxed()).unwrap_err();
        assert_eq!(err, MenuError::InvalidRoot(ghost));
        assert!(host.events().is_empty());
    }

    #[test]
    fn freeze_and_unfreeze_are_idempotent() {
        let (tree, root) = single_level();
        let mut menu =
            ActionMenu::open(MenuConfig::new(tree, root, vec![]), RecordingHost::new().boxed())
                .unwrap();
        menu.freeze();
        menu.freeze();
        assert!(menu.is_frozen());
        menu.unfreeze();
        menu.unfreeze();
        assert!(!menu.is_frozen());
    }

    #[test]
    fn close_orders_notifications_and_presents_last_result_window() {
        let (tree, root) = single_level();
        let host = RecordingHost::new();
        let mut config = MenuConfig::new(tree, root, vec![]);
        let will = host.clone();
        config.will_close = Some(on_close(move |menu, performed| {
            assert!(performed.is_none());
            assert!(menu.context().is_some());
            will.note("will_close");
        }));
        let did = host.clone();
        config.did_close = Some(on_close(move |_, performed| {
            assert!(performed.is_none());
            did.note("did_close");
        }));
        let mut menu = ActionMenu::open(config, host.boxed()).unwrap();

        menu.set_result_window(Some(ResultWindow::new("first", "")));
        menu.set_result_window(Some(ResultWindow::new("second", "done")));
        menu.close(true);

        assert_eq!(
            host.events(),
            vec![
                Event::Select(0),
                Event::Present,
                Event::Note("will_close"),
                Event::Dismiss,
                Event::Result(ResultWindow::new("second", "done")),
                Event::Note("did_close"),
            ]
        );
        assert!(menu.is_closed());
        assert!(menu.context().is_none(), "config released after close");
    }

    #[test]
    fn clearing_the_result_window_skips_it_on_close() {
        let (tree, root) = single_level();
        let host = RecordingHost::new();
        let mut menu = ActionMenu::open(MenuConfig::new(tree, root, vec![]), host.boxed()).unwrap();
        menu.set_result_window(Some(ResultWindow::new("gone", "")));
        menu.set_result_window(None);
        menu.close(false);
        assert!(!host
            .events()
            .iter()
            .any(|e| matches!(e, Event::Result(_))));
    }

    #[test]
    fn second_close_is_ignored() {
        let (tree, root) = single_level();
        let host = RecordingHost::new();
        let closes = Arc::new(Mutex::new(0));
        let mut config = MenuConfig::new(tree, root, vec![]);
        let counter = Arc::clone(&closes);
        config.did_close = Some(on_close(move |_, _| *counter.lock().unwrap() += 1));
        let mut menu = ActionMenu::open(config, host.boxed()).unwrap();
        menu.close(true);
        menu.close(true);
        assert_eq!(*closes.lock().unwrap(), 1);
        assert_eq!(
            host.events().iter().filter(|e| **e == Event::Dismiss).count(),
            1
        );
    }

    #[test]
    fn closing_leaves_the_hierarchy_to_the_application() {
        let (tree, root) = single_level();
        let mut menu = ActionMenu::open(
            MenuConfig::new(Arc::clone(&tree), root, vec![]),
            RecordingHost::new().boxed(),
        )
        .unwrap();
        menu.close(true);
        drop(menu);

        let mut tree = Arc::try_unwrap(tree).ok().expect("session released its handle");
        assert_eq!(tree.destroy_hierarchy(root, |_| {}), 1);
    }
}
