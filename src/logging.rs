//! Log output configuration.
//!
//! Resolves where diagnostic output goes (stdout, or a timestamped file in a
//! configured directory) and installs the tracing subscriber. Filesystem
//! access goes through [`SystemCalls`] so every failure path can be
//! exercised without touching the real filesystem.

use crate::error::{ConfigError, ConfigResult};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Map a configured level name to a tracing level.
///
/// Accepts the logrus-style names the CLI has always used; `panic` and
/// `fatal` collapse into `error`.
pub fn parse_log_level(level: &str) -> Option<Level> {
    match level.trim().to_lowercase().as_str() {
        "panic" | "fatal" | "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// What a path on disk turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
}

/// Filesystem and process calls needed to open the log sink.
pub trait SystemCalls {
    fn current_dir(&self) -> io::Result<PathBuf>;
    fn stat(&self, path: &Path) -> io::Result<PathKind>;
    fn is_not_exist(&self, err: &io::Error) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;
}

/// [`SystemCalls`] backed by the real process and filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSystemCalls;

impl SystemCalls for OsSystemCalls {
    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn stat(&self, path: &Path) -> io::Result<PathKind> {
        let metadata = std::fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            PathKind::Directory
        } else {
            PathKind::File
        })
    }

    fn is_not_exist(&self, err: &io::Error) -> bool {
        err.kind() == io::ErrorKind::NotFound
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Box::new(file))
    }
}

/// Where log output is written.
pub enum LogSink {
    Stdout,
    File {
        path: PathBuf,
        writer: Box<dyn Write + Send>,
    },
}

impl LogSink {
    /// Path of the log file, if logging to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LogSink::Stdout => None,
            LogSink::File { path, .. } => Some(path),
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::Stdout => write!(f, "LogSink::Stdout"),
            LogSink::File { path, .. } => {
                f.debug_struct("LogSink::File").field("path", path).finish()
            }
        }
    }
}

/// Name of a new log file, unique per second.
pub fn log_file_name() -> String {
    format!(
        "horusec-{}.log",
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Resolve the log sink for `log_dir`.
///
/// An empty `log_dir` means stdout. Otherwise the directory (relative paths
/// are taken from the working directory) is created when missing and a new
/// log file is opened inside it. A path naming an existing regular file is
/// rejected. Nothing is redirected on failure.
pub fn configure_log_sink(log_dir: &str, sys: &dyn SystemCalls) -> ConfigResult<LogSink> {
    if log_dir.is_empty() {
        return Ok(LogSink::Stdout);
    }

    let working_dir = sys
        .current_dir()
        .map_err(ConfigError::WorkingDirectoryUnavailable)?;
    let dir = working_dir.join(log_dir);

    match sys.stat(&dir) {
        Ok(PathKind::Directory) => {}
        Ok(PathKind::File) => return Err(ConfigError::NotADirectory(dir)),
        Err(e) if sys.is_not_exist(&e) => {
            sys.create_dir_all(&dir)
                .map_err(|e| ConfigError::io(format!("creating {}", dir.display()), e))?;
        }
        Err(e) => return Err(ConfigError::io(format!("inspecting {}", dir.display()), e)),
    }

    let path = dir.join(log_file_name());
    let writer = sys
        .create_file(&path)
        .map_err(|e| ConfigError::io(format!("creating {}", path.display()), e))?;

    Ok(LogSink::File { path, writer })
}

/// Run `f` with a scoped subscriber writing to `writer` at `level`.
///
/// Covers the window before the configured sink exists, so events emitted
/// while configuration is still loading are not dropped.
pub fn with_bootstrap_subscriber<W, T>(level: Level, writer: W, f: impl FnOnce() -> T) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Install the global subscriber writing to `sink` at `level`.
pub fn init_subscriber(level: Level, sink: LogSink) -> anyhow::Result<()> {
    match sink {
        LogSink::Stdout => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogSink::File { writer, .. } => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(Mutex::new(writer))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Stub with a scripted answer per call; records directories created.
    struct StubSystemCalls {
        current_dir: Option<PathBuf>,
        stat: Result<PathKind, io::ErrorKind>,
        create_dir_fails: bool,
        create_file_fails: bool,
        created_dirs: RefCell<Vec<PathBuf>>,
    }

    impl StubSystemCalls {
        fn new() -> Self {
            Self {
                current_dir: Some(PathBuf::from("/work")),
                stat: Ok(PathKind::Directory),
                create_dir_fails: false,
                create_file_fails: false,
                created_dirs: RefCell::new(Vec::new()),
            }
        }
    }

    impl SystemCalls for StubSystemCalls {
        fn current_dir(&self) -> io::Result<PathBuf> {
            self.current_dir
                .clone()
                .ok_or_else(|| io::Error::other("error getting working directory"))
        }

        fn stat(&self, _path: &Path) -> io::Result<PathKind> {
            self.stat
                .map_err(|kind| io::Error::new(kind, "error checking path"))
        }

        fn is_not_exist(&self, err: &io::Error) -> bool {
            err.kind() == io::ErrorKind::NotFound
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            if self.create_dir_fails {
                return Err(io::Error::other("error making directory"));
            }
            self.created_dirs.borrow_mut().push(path.to_path_buf());
            Ok(())
        }

        fn create_file(&self, _path: &Path) -> io::Result<Box<dyn Write + Send>> {
            if self.create_file_fails {
                return Err(io::Error::other("error creating file"));
            }
            Ok(Box::new(io::sink()))
        }
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("info"), Some(Level::INFO));
        assert_eq!(parse_log_level("WARNING"), Some(Level::WARN));
        assert_eq!(parse_log_level("fatal"), Some(Level::ERROR));
        assert_eq!(parse_log_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_empty_path_is_stdout() {
        let sink = configure_log_sink("", &StubSystemCalls::new()).unwrap();
        assert!(matches!(sink, LogSink::Stdout));
        assert!(sink.path().is_none());
    }

    #[test]
    fn test_working_directory_failure() {
        let mut sys = StubSystemCalls::new();
        sys.current_dir = None;
        let err = configure_log_sink("logs", &sys).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WorkingDirectoryUnavailable);
        assert!(err.to_string().contains("error getting working directory"));
    }

    #[test]
    fn test_missing_directory_is_created() {
        let mut sys = StubSystemCalls::new();
        sys.stat = Err(io::ErrorKind::NotFound);
        let sink = configure_log_sink("logs", &sys).unwrap();
        assert_eq!(*sys.created_dirs.borrow(), vec![PathBuf::from("/work/logs")]);
        assert!(sink.path().unwrap().starts_with("/work/logs"));
    }

    #[test]
    fn test_stat_failure_is_propagated() {
        let mut sys = StubSystemCalls::new();
        sys.stat = Err(io::ErrorKind::PermissionDenied);
        let err = configure_log_sink("logs", &sys).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("error checking path"));
        assert!(sys.created_dirs.borrow().is_empty());
    }

    #[test]
    fn test_make_directory_failure() {
        let mut sys = StubSystemCalls::new();
        sys.stat = Err(io::ErrorKind::NotFound);
        sys.create_dir_fails = true;
        let err = configure_log_sink("logs", &sys).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("error making directory"));
    }

    #[test]
    fn test_create_file_failure() {
        let mut sys = StubSystemCalls::new();
        sys.create_file_fails = true;
        let err = configure_log_sink("logs", &sys).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("error creating file"));
    }

    #[test]
    fn test_existing_file_is_not_a_directory() {
        let mut sys = StubSystemCalls::new();
        sys.stat = Ok(PathKind::File);
        let err = configure_log_sink("test.txt", &sys).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_real_file_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("test.txt");
        std::fs::write(&file, "").unwrap();

        let err = configure_log_sink(file.to_str().unwrap(), &OsSystemCalls).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_create_file_appends_to_existing_log() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("horusec.log");
        std::fs::write(&path, "first run\n").unwrap();

        let mut writer = OsSystemCalls.create_file(&path).unwrap();
        writer.write_all(b"second run\n").unwrap();
        drop(writer);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "first run\nsecond run\n"
        );
    }

    #[test]
    fn test_real_new_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("logs").join("horusec");

        let sink = configure_log_sink(dir.to_str().unwrap(), &OsSystemCalls).unwrap();
        let path = sink.path().unwrap().to_path_buf();
        assert!(dir.is_dir());
        assert!(path.is_file());
        assert_eq!(path.parent(), Some(dir.as_path()));
    }
}
