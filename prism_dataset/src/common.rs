use std::{io, path::PathBuf, result};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing image list: {0}")]
    MissingImageList(PathBuf),
    #[error("Missing input file: {0}")]
    MissingInputFile(PathBuf),
    #[error("Invalid clipping planes line in {path}: \"{line}\"")]
    InvalidClippingPlanes { path: PathBuf, line: String },
    #[error("Attempting to load an unknown settings key ('{0}')")]
    UnknownSettingsKey(String),
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
}

/// Build variant of the companion executables that accompany a scene bundle.
///
/// The reshaping itself is identical for both variants; the variant only
/// selects which executable name the pipeline-node descriptor binds to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutableVariant {
    #[default]
    Release,
    ReleaseWithDebugInfo,
}

impl ExecutableVariant {
    /// Suffix appended to the names of the companion executables.
    pub fn suffix(&self) -> &'static str {
        match self {
            ExecutableVariant::Release => "",
            ExecutableVariant::ReleaseWithDebugInfo => "_rwdi",
        }
    }
}

/// Strips any run of trailing line terminators. Input lines may end in `\n`,
/// `\r\n` or nothing at all depending on which tool wrote them.
pub fn trim_line_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Splits a line on the first whitespace run into a leading token and the
/// optional remainder. The remainder keeps its internal whitespace.
pub fn split_first_token(line: &str) -> (&str, Option<&str>) {
    match line.split_once(|c: char| c.is_whitespace()) {
        Some((first, rest)) => {
            let rest = rest.trim_start();
            (first, (!rest.is_empty()).then_some(rest))
        }
        None => (line, None),
    }
}
