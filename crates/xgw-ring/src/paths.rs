use std::path::{Path, PathBuf};

use crate::boundary::names;

/// File paths for the three rings, all living under one shared spool
/// directory. Each ring additionally has a reserved `<name>_status` sibling
/// path that this crate never creates or writes to (§9 open question —
/// status rings are left for a future consumer to define).
#[derive(Debug, Clone)]
pub struct RingPaths {
    pub incoming_orders: PathBuf,
    pub cancel_orders: PathBuf,
    pub queries: PathBuf,
}

impl RingPaths {
    /// Builds the conventional paths under `spool_dir`.
    pub fn under(spool_dir: impl AsRef<Path>) -> Self {
        let dir = spool_dir.as_ref();
        Self {
            incoming_orders: dir.join(names::INCOMING_ORDERS),
            cancel_orders: dir.join(names::CANCEL_ORDERS),
            queries: dir.join(names::QUERIES),
        }
    }

    /// The reserved, unwritten status sibling for a given ring path.
    pub fn status_sibling(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push("_status");
        path.with_file_name(name)
    }
}
