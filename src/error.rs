//! Error types shared by the hierarchy builder, the session and the loader.

use crate::hierarchy::LevelId;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a level or item could not be created.
///
/// A failed call never leaves partial state behind: no item is appended and
/// no parent link or depth is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("level {0} does not exist")]
    InvalidLevel(LevelId),

    #[error("level is full ({capacity} items)")]
    LevelFull { capacity: u16 },

    #[error("level {child} is already attached under level {parent}")]
    AlreadyAttached { child: LevelId, parent: LevelId },

    #[error("attaching level {child} under level {level} would create a cycle")]
    WouldCycle { level: LevelId, child: LevelId },

    #[error("out of memory")]
    OutOfMemory,
}

/// Errors raised when opening an action menu.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("root level {0} does not exist")]
    InvalidRoot(LevelId),
}

/// Errors raised while turning a menu description into a hierarchy.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid menu description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("menu has no usable items")]
    EmptyMenu,

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Errors raised by the interactive terminal runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("an action menu is already running in this process")]
    AlreadyRunning,

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error("program error: {0}")]
    Program(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_messages_name_the_levels() {
        let err = BuildError::AlreadyAttached {
            child: LevelId::from_index(3),
            parent: LevelId::from_index(1),
        };
        assert_eq!(err.to_string(), "level #3 is already attached under level #1");
        assert_eq!(
            BuildError::LevelFull { capacity: 2 }.to_string(),
            "level is full (2 items)"
        );
    }

    #[test]
    fn load_error_wraps_build_error_transparently() {
        let err: LoadError = BuildError::OutOfMemory.into();
        assert_eq!(err.to_string(), "out of memory");
    }
}
