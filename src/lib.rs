//! actmenu - hierarchical, animated action menu
//!
//! A [`Hierarchy`](hierarchy::Hierarchy) of levels holds labeled items that
//! either run an action or descend into a child level. An
//! [`ActionMenu`](ui::ActionMenu) session walks that tree in step with the
//! slide transitions of a [`Host`](host::Host); the terminal host in
//! `ui::run` shows it with bubbletea-rs.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod error;
pub mod hierarchy;
pub mod host;
pub mod loader;

pub mod ui;
