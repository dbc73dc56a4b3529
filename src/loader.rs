//! Menu descriptions: JSON on disk, turned into a [`Hierarchy`] of commands.

use crate::error::{BuildError, LoadError};
use crate::hierarchy::{DisplayMode, Hierarchy, LevelId, PerformAction, perform_action};
use crate::ui::model::{ActionMenu, Align, MenuColors, Rgb};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Program picked from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
    /// Run in the background and show its output instead of handing it to the caller.
    pub capture: bool,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Application state reachable from the menu callbacks.
#[derive(Debug, Default)]
pub struct LaunchContext {
    /// Captured command waiting to be started by the runner.
    pub capture: Option<Command>,
}

pub type Menu = ActionMenu<Command, LaunchContext>;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuFile {
    #[serde(default)]
    pub align: AlignSpec,
    #[serde(default)]
    pub colors: ColorsSpec,
    pub menu: MenuSpec,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignSpec {
    #[default]
    Top,
    Center,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorsSpec {
    #[serde(default)]
    pub background: Option<[u8; 3]>,
    #[serde(default)]
    pub foreground: Option<[u8; 3]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub display: DisplaySpec,
    #[serde(default)]
    pub items: Vec<EntrySpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySpec {
    #[default]
    Wide,
    Thin,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    pub label: String,
    #[serde(default)]
    pub run: Option<Vec<String>>,
    #[serde(default)]
    pub capture: bool,
    #[serde(default)]
    pub submenu: Option<MenuSpec>,
}

/// A built menu ready to be shown.
pub struct LoadedMenu {
    pub hierarchy: Arc<Hierarchy<Command, LaunchContext>>,
    pub root: LevelId,
    pub title: String,
    pub colors: MenuColors,
    pub align: Align,
}

impl fmt::Debug for LoadedMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedMenu")
            .field("root", &self.root)
            .field("levels", &self.hierarchy.level_count())
            .field("title", &self.title)
            .finish()
    }
}

const DEMO_MENU: &str = r#"{
  "align": "top",
  "menu": {
    "title": "actmenu",
    "items": [
      { "label": "System", "submenu": {
          "items": [
            { "label": "Uptime", "run": ["uptime"], "capture": true },
            { "label": "Kernel", "run": ["uname", "-a"], "capture": true },
            { "label": "Disk usage", "run": ["df", "-h"], "capture": true },
            { "label": "Who is logged in", "run": ["who"], "capture": true }
          ] } },
      { "label": "Files", "submenu": {
          "display": "thin",
          "items": [
            { "label": "ls", "run": ["ls", "-la"] },
            { "label": "pwd", "run": ["pwd"], "capture": true },
            { "label": "du", "run": ["du", "-sh", "."], "capture": true },
            { "label": "top", "run": ["top"] },
            { "label": "htop", "run": ["htop"] }
          ] } },
      { "label": "Date", "run": ["date"], "capture": true },
      { "label": "Shell", "run": ["sh"] }
    ]
  }
}"#;

pub fn parse(text: &str) -> Result<MenuFile, LoadError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_file(path: &Path) -> Result<MenuFile, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Built-in menu used when no file is given.
pub fn demo() -> Result<MenuFile, LoadError> {
    parse(DEMO_MENU)
}

pub fn on_path(program: &str) -> bool {
    which::which(program).is_ok()
}

// an item that survived filtering, waiting for its level to be created
enum Entry {
    Run(String, Command),
    Submenu(String, LevelId),
}

struct Builder<'a, F> {
    tree: Hierarchy<Command, LaunchContext>,
    available: &'a F,
    run: PerformAction<Command, LaunchContext>,
    capture: PerformAction<Command, LaunchContext>,
}

impl<F: Fn(&str) -> bool> Builder<'_, F> {
    // children first, so every level is created with its exact item count
    fn level(&mut self, menu: &MenuSpec) -> Result<Option<LevelId>, LoadError> {
        let mut entries = Vec::new();
        for entry in &menu.items {
            if let Some(sub) = &entry.submenu {
                if entry.run.is_some() {
                    warn!(label = %entry.label, "item has both run and submenu, using the submenu");
                }
                match self.level(sub)? {
                    Some(child) => entries.push(Entry::Submenu(entry.label.clone(), child)),
                    None => warn!(label = %entry.label, "dropping empty submenu"),
                }
                continue;
            }
            let Some(argv) = &entry.run else {
                warn!(label = %entry.label, "item has neither run nor submenu");
                continue;
            };
            let Some((program, args)) = argv.split_first() else {
                warn!(label = %entry.label, "item has an empty run list");
                continue;
            };
            if !(self.available)(program.as_str()) {
                warn!(label = %entry.label, %program, "skipping item, program not found");
                continue;
            }
            entries.push(Entry::Run(
                entry.label.clone(),
                Command {
                    program: program.clone(),
                    args: args.to_vec(),
                    capture: entry.capture,
                },
            ));
        }
        if entries.is_empty() {
            return Ok(None);
        }

        let capacity =
            u16::try_from(entries.len()).map_err(|_| BuildError::LevelFull { capacity: u16::MAX })?;
        let level = self.tree.create_level(capacity)?;
        let mode = match menu.display {
            DisplaySpec::Wide => DisplayMode::Wide,
            DisplaySpec::Thin => DisplayMode::Thin,
        };
        self.tree.set_display_mode(level, mode);
        for entry in entries {
            match entry {
                Entry::Run(label, command) => {
                    let callback = if command.capture {
                        Arc::clone(&self.capture)
                    } else {
                        Arc::clone(&self.run)
                    };
                    self.tree
                        .add_action(level, Some(&label), Some(callback), Some(command))?;
                }
                Entry::Submenu(label, child) => {
                    self.tree.add_child(level, child, Some(&label))?;
                }
            }
        }
        Ok(Some(level))
    }
}

fn run_action() -> PerformAction<Command, LaunchContext> {
    perform_action(|_: &mut Menu, item| {
        debug!(label = ?item.label(), "command chosen");
    })
}

// freezes the menu and leaves the command for the runner to start
fn capture_action() -> PerformAction<Command, LaunchContext> {
    perform_action(|menu: &mut Menu, item| {
        menu.freeze();
        let command = item.action_data().cloned();
        if let Some(context) = menu.context_mut() {
            context.capture = command;
        }
    })
}

fn rgb(value: Option<[u8; 3]>, fallback: Rgb) -> Rgb {
    value.map_or(fallback, |[r, g, b]| Rgb(r, g, b))
}

/// Builds the hierarchy for `file`, keeping only commands `available` accepts.
///
/// Unusable items and empty submenus are skipped with a warning; a root
/// left without items is [`LoadError::EmptyMenu`].
pub fn build<F>(file: &MenuFile, available: F) -> Result<LoadedMenu, LoadError>
where
    F: Fn(&str) -> bool,
{
    let mut builder = Builder {
        tree: Hierarchy::new(),
        available: &available,
        run: run_action(),
        capture: capture_action(),
    };
    let root = builder.level(&file.menu)?.ok_or(LoadError::EmptyMenu)?;
    let defaults = MenuColors::default();
    let loaded = LoadedMenu {
        hierarchy: Arc::new(builder.tree),
        root,
        title: file.menu.title.clone().unwrap_or_else(|| "menu".to_string()),
        colors: MenuColors {
            background: rgb(file.colors.background, defaults.background),
            foreground: rgb(file.colors.foreground, defaults.foreground),
        },
        align: match file.align {
            AlignSpec::Top => Align::Top,
            AlignSpec::Center => Align::Center,
        },
    };
    debug!(levels = loaded.hierarchy.level_count(), "menu built");
    Ok(loaded)
}
