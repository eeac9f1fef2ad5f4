//! Import path to package identifier resolution.
//!
//! The declared package name of a Go import path routinely diverges from
//! the path's last segment (`golang.org/x/tools/present` need not declare
//! `package present`), so the only source of truth is build metadata. The
//! lookup is injected as a capability so tests can pin a fixed mapping and
//! the production path can shell out to the Go toolchain.

use std::collections::HashMap;
use std::process::Command;

use rayon::prelude::*;
use tracing::{debug, warn};

/// Mapping from import path to the package identifier used to qualify
/// references in generated code. Built fresh per generation pass; only
/// paths that resolved successfully have entries.
pub type PackageMap = HashMap<String, String>;

/// Build-metadata lookup capability.
///
/// Implementations must be deterministic for a given path at a given point
/// in time, and safe to query concurrently for independent paths.
pub trait PackageLoader: Sync {
    /// The declared package identifier for `import_path`, or `None` when
    /// the path resolves to no known compilable unit.
    fn load(&self, import_path: &str) -> Option<String>;
}

/// Resolve every import path in `import_paths` through `loader`.
///
/// Unresolvable paths are omitted from the result and logged; whether that
/// is grounds to skip the import or fail the whole generation run is the
/// caller's call. Lookups are I/O-bound in the production loader, so
/// independent paths fan out across the rayon pool; the map's semantics do
/// not depend on completion order.
pub fn create_package_map<L: PackageLoader + ?Sized>(
    import_paths: &[String],
    loader: &L,
) -> PackageMap {
    let packages: PackageMap = import_paths
        .par_iter()
        .filter_map(|path| match loader.load(path) {
            Some(ident) => Some((path.clone(), ident)),
            None => {
                warn!(import_path = %path, "Import path did not resolve to a package; omitting.");
                None
            }
        })
        .collect();
    debug!(
        requested = import_paths.len(),
        resolved = packages.len(),
        "Resolved import paths to package identifiers."
    );
    packages
}

/// Production loader backed by `go list`.
///
/// `go list -f {{.Name}} <path>` prints the declared package name; a spawn
/// failure or non-zero exit means the path is unknown to the toolchain.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoListLoader;

impl PackageLoader for GoListLoader {
    fn load(&self, import_path: &str) -> Option<String> {
        let output = Command::new("go")
            .args(["list", "-f", "{{.Name}}", "--", import_path])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some(name)
    }
}
