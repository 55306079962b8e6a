//! The `viewer` crate contains everything related to displaying a shoring and its cut list.

mod file_watcher;
mod gui;
mod scene;
mod update;
mod window;

pub use file_watcher::{Error, FileWatcher};
pub use update::{Update, Updater};
pub use window::Window;
