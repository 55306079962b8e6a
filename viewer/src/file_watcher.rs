use std::{
    io,
    path::{Path, PathBuf},
};

use config::Config;
use model::Calculator;
use notify::{
    event::{AccessKind::Close, AccessMode::Write, ModifyKind::Name, RenameMode},
    recommended_watcher, Event,
    EventKind::{Access, Create, Modify},
    RecommendedWatcher, RecursiveMode, Watcher,
};

use crate::update::{Update, Updater};

/// A file watcher recalculating the shoring upon change of the form file.
pub struct FileWatcher {
    config_path: PathBuf,
    calculator: Calculator,
    updater: Updater,
}

impl FileWatcher {
    /// Creates a new file watcher for the given form file path.
    ///
    /// Upon file change, the outcome of the recalculation is sent via the given updater.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the file path could not be canonicalized.
    pub fn try_new(config_path: &Path, updater: Updater) -> Result<Self, Error> {
        let config_path = config_path.canonicalize()?;

        Ok(Self {
            config_path,
            calculator: Calculator::new(),
            updater,
        })
    }

    /// Calculates the shoring once and starts watching the form file in a different thread.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if watching the file was unsuccessful.
    pub fn watch(mut self) -> Result<RecommendedWatcher, Error> {
        self.recalculate();

        let config_path_parent = self
            .config_path
            .parent()
            .ok_or(Error::NoParentDirectory)?
            .to_path_buf();

        let mut watcher = recommended_watcher(move |result: notify::Result<Event>| match result {
            Ok(event) => {
                if is_saved(&event, &self.config_path) {
                    self.recalculate();
                }
            }
            Err(error) => tracing::error!("file watcher failed: {error}"),
        })?;

        watcher.watch(&config_path_parent, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %config_path_parent.display(), "watching form file directory");

        Ok(watcher)
    }

    /// Parses the form file and passes the form through the pipeline.
    fn recalculate(&mut self) {
        let update = match Config::try_from_path(&self.config_path) {
            Ok(config) => {
                let state = self.calculator.calculate(&config.form);
                Update::calculated(state, config.colors)
            }
            Err(error) => {
                self.calculator.reset();
                tracing::error!("failed to read {}: {error}", self.config_path.display());
                Update::Unreadable(format!("{error}: {}", self.config_path.display()))
            }
        };

        self.updater.send_update(update);
    }
}

/// Returns true if the event finishes writing the file at the given path.
///
/// Editors saving through a temporary file replace the form file by renaming or creating it.
fn is_saved(event: &Event, path: &Path) -> bool {
    matches!(
        event.kind,
        Access(Close(Write)) | Modify(Name(RenameMode::To | RenameMode::Both)) | Create(_)
    ) && event.paths.iter().any(|other| other == path)
}

/// The error type for errors regarding watching the form file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to canonicalize file path.
    #[error("failed to canonicalize file path")]
    Canonicalize(#[from] io::Error),
    /// The form file has no parent directory to watch.
    #[error("form file has no parent directory")]
    NoParentDirectory,
    /// Failed to initialize file watcher.
    #[error("failed to initialize file watcher")]
    Notify(#[from] notify::Error),
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use model::State;
    use notify::{
        event::{AccessKind, CreateKind, DataChange, ModifyKind},
        EventKind,
    };

    use super::*;

    fn temporary_file(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("shoring-{}-{name}.toml", process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_is_an_error() {
        let (updater, _receiver) = Updater::channel();

        assert!(matches!(
            FileWatcher::try_new(Path::new("does/not/exist.toml"), updater),
            Err(Error::Canonicalize(_))
        ));
    }

    #[test]
    fn recalculating_sends_the_state() {
        let path = temporary_file(
            "wall",
            "[form]\narchetype = \"wall\"\n\n[form.fields]\nlength = \"150\"\n",
        );
        let (updater, receiver) = Updater::channel();
        let mut file_watcher = FileWatcher::try_new(&path, updater).unwrap();

        file_watcher.recalculate();
        fs::remove_file(&path).unwrap();

        let Ok(Update::Calculated {
            state: State::Rendered(calculation),
            cut_list: Some(_),
            ..
        }) = receiver.try_recv()
        else {
            panic!("expected a rendered update");
        };
        assert_eq!(calculation.warnings.len(), 1);
    }

    #[test]
    fn unparsable_file_is_reported() {
        let path = temporary_file("broken", "[form\narchetype = ");
        let (updater, receiver) = Updater::channel();
        let mut file_watcher = FileWatcher::try_new(&path, updater).unwrap();

        file_watcher.recalculate();
        fs::remove_file(&path).unwrap();

        assert!(matches!(receiver.try_recv(), Ok(Update::Unreadable(_))));
        assert_eq!(file_watcher.calculator.state(), &State::Idle);
    }

    #[test]
    fn saving_through_a_temporary_file_counts_as_saved() {
        let path = Path::new("/forms/shoring.toml");
        let temporary = Path::new("/forms/.shoring.toml.swp");

        let closed = Event::new(Access(Close(Write))).add_path(path.to_path_buf());
        let created = Event::new(Create(CreateKind::File)).add_path(path.to_path_buf());
        let renamed = Event::new(Modify(Name(RenameMode::Both)))
            .add_path(temporary.to_path_buf())
            .add_path(path.to_path_buf());

        assert!(is_saved(&closed, path));
        assert!(is_saved(&created, path));
        assert!(is_saved(&renamed, path));
    }

    #[test]
    fn other_events_and_files_are_ignored() {
        let path = Path::new("/forms/shoring.toml");

        let modified = Event::new(Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(path.to_path_buf());
        let opened = Event::new(EventKind::Access(AccessKind::Read)).add_path(path.to_path_buf());
        let other = Event::new(Create(CreateKind::File)).add_path(PathBuf::from("/forms/a.toml"));
        let renamed_away = Event::new(Modify(Name(RenameMode::From))).add_path(path.to_path_buf());

        assert!(!is_saved(&modified, path));
        assert!(!is_saved(&opened, path));
        assert!(!is_saved(&other, path));
        assert!(!is_saved(&renamed_away, path));
    }
}
