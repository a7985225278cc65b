use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Initialises an empty git repository at `root`.
pub fn init_repository<P: AsRef<Path>>(root: P) -> Result<()> {
    let root = root.as_ref();
    debug!("Initialising git repository in '{}'.", root.display());

    git2::Repository::init(root)
        .map(|_| ())
        .map_err(|source| Error::RepositoryError { path: root.to_path_buf(), source })
}
