use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures from `Ring::create`.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("cannot create ring file {path}: {source}")]
    CannotCreateFile { path: PathBuf, source: io::Error },
    #[error("cannot size ring file {path}: {source}")]
    CannotSizeFile { path: PathBuf, source: io::Error },
    #[error("cannot map ring file {path}: {source}")]
    CannotMap { path: PathBuf, source: io::Error },
    #[error("cannot flush ring file {path}: {source}")]
    CannotFlush { path: PathBuf, source: io::Error },
}

/// Failures from `Ring::open`.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("cannot open ring file {path}: {source}")]
    CannotOpen { path: PathBuf, source: io::Error },
    #[error("ring file {path} has size {actual}, expected {expected}")]
    SizeMismatch {
        path: PathBuf,
        actual: u64,
        expected: u64,
    },
    #[error("ring file {path} has bad magic {found:#010x}, expected {expected:#010x}")]
    BadMagic {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("ring file {path} has capacity {found}, expected {expected}")]
    CapacityMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("cannot map ring file {path}: {source}")]
    CannotMap { path: PathBuf, source: io::Error },
}

/// Ring-attach failures collapse either kind into one fatal-at-startup error.
#[derive(Debug, Error)]
pub enum AttachError {
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Open(#[from] OpenError),
}
