//! Write a rendered package to a directory.

use crate::domain::ModulePlan;
use crate::render::{render_mod_rs, render_module, GENERATED_PACKAGE_NOTICE, RUNTIME_SUPPORT};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write `<module>.rs` per plan, `util.rs`, `mod.rs` and `README.md` into `out_dir`.
///
/// The directory is created if missing; existing files with the same names are
/// overwritten. Returns the written paths in write order.
pub fn write_package(out_dir: &Path, modules: &[ModulePlan]) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(modules.len() + 3);
    for m in modules {
        let path = out_dir.join(format!("{}.rs", m.module));
        info!("Writing module {} to {}", m.domain, path.display());
        fs::write(&path, render_module(m))?;
        written.push(path);
    }
    let support = [
        ("util.rs", RUNTIME_SUPPORT.to_string()),
        ("mod.rs", render_mod_rs(modules)),
        ("README.md", GENERATED_PACKAGE_NOTICE.to_string()),
    ];
    for (name, contents) in support {
        let path = out_dir.join(name);
        debug!("Writing {}", path.display());
        fs::write(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}
