//! Build-time staging of companion assets (shader files mostly) next to the
//! executables. Symlinks are preferred so that edits to the sources show up
//! without a rebuild; when the privilege level doesn't allow creating them
//! the files are copied instead.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{Error, Result};

/// How staged assets are placed into the destination directory.
///
/// The strategy is selected once at startup with [`LinkStrategy::probe`]
/// instead of probing on every file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    Symlink,
    Copy,
}

impl LinkStrategy {
    /// Checks whether the current privilege level can create symbolic links
    /// by creating one in `scratch_dir` and removing it again.
    pub fn probe(scratch_dir: &Path) -> Self {
        let target = scratch_dir.join(".link_probe_target");
        let link = scratch_dir.join(".link_probe");
        let _ = fs::remove_file(&link);
        let result = fs::write(&target, b"probe").and_then(|()| symlink_file(&target, &link));
        let _ = fs::remove_file(&link);
        let _ = fs::remove_file(&target);
        match result {
            Ok(()) => LinkStrategy::Symlink,
            Err(err) => {
                info!("Symbolic links are unavailable ({err}), staging will copy files");
                LinkStrategy::Copy
            }
        }
    }

    fn apply(&self, source: &Path, destination: &Path) -> io::Result<()> {
        // Replace whatever a previous run left behind.
        match fs::remove_file(destination) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
        match self {
            LinkStrategy::Symlink => match symlink_file(source, destination) {
                Ok(()) => Ok(()),
                Err(err) => {
                    warn!("Failed to symlink {source:?} to {destination:?} ({err}), falling back to copy");
                    fs::copy(source, destination).map(|_| ())
                }
            },
            LinkStrategy::Copy => fs::copy(source, destination).map(|_| ()),
        }
    }
}

/// Stages every file matching `pattern` into `destination`, creating the
/// destination directory when it doesn't exist.
///
/// `pattern` has the shape `<directory>/<file-glob>` where the file component
/// may contain `*` and `?` wildcards; matching is not recursive. Returns the
/// number of staged files. Re-running overwrites previously staged files.
pub fn stage_assets(pattern: &str, destination: &Path, strategy: LinkStrategy) -> Result<usize> {
    let pattern_path = Path::new(pattern);
    let file_pattern = pattern_path
        .file_name()
        .and_then(|file_name| file_name.to_str())
        .ok_or_else(|| Error::InvalidPath(pattern_path.to_owned()))?;
    let source_dir = match pattern_path.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(destination)?;

    // Sorted so that repeated runs behave the same regardless of readdir order.
    let mut paths = fs::read_dir(source_dir)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .collect::<Vec<PathBuf>>();
    paths.sort();

    let mut staged = 0;
    for path in paths {
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|file_name| file_name.to_str()) else {
            continue;
        };
        if !wildcard_match(file_pattern, file_name) {
            continue;
        }
        info!("Staging {path:?} into {destination:?}");
        strategy.apply(&path, &destination.join(file_name))?;
        staged += 1;
    }
    Ok(staged)
}

/// Matches a file name against a pattern where `*` matches any run of
/// characters and `?` matches exactly one.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern = pattern.chars().collect::<Vec<_>>();
    let name = name.chars().collect::<Vec<_>>();
    let (mut p, mut n) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(unix)]
fn symlink_file(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn symlink_file(source: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, link)
}
