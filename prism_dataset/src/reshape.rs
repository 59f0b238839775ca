use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{
    common::{split_first_token, trim_line_terminator, ExecutableVariant},
    manifest::{ClippingMode, ClippingPlanes, SceneManifest},
    Error, Result,
};

pub const IMAGE_LIST_FILE_NAME: &str = "list_images.txt";
pub const CLIPPING_PLANES_FILE_NAME: &str = "clipping_planes.txt";
pub const CAMERA_BUNDLE_FILE_NAME: &str = "bundle.out";
pub const SCENE_METADATA_FILE_NAME: &str = "scene_metadata.txt";

/// Location of the reconstructed mesh inside the legacy directory.
const RECONSTRUCTED_MESH_SOURCE: &str = "pmvs/models/pmvs_recon.ply";

/// Name the mesh gets inside the bundle.
const RECONSTRUCTED_MESH_NAME: &str = "recon.ply";

const BUNDLE_SUBDIRECTORIES: [&str; 4] = ["images", "cameras", "meshes", "textures"];

/// Configuration for one reshape run.
#[derive(Debug, Clone)]
pub struct ReshapeConfig {
    /// Legacy reconstruction-output directory. Read-only input.
    pub source: PathBuf,
    /// Where the scene bundle is written. Defaults to the source directory.
    pub destination: Option<PathBuf>,
    pub clipping_mode: ClippingMode,
    /// Carried for interface compatibility with the companion executables;
    /// has no effect on the reshaping itself.
    pub executable_variant: ExecutableVariant,
}

impl ReshapeConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: None,
            clipping_mode: ClippingMode::default(),
            executable_variant: ExecutableVariant::default(),
        }
    }
}

/// Summary of a completed reshape run.
#[derive(Debug)]
pub struct ReshapeReport {
    /// Absolute path of the written scene bundle.
    pub destination: PathBuf,
    /// Number of images listed in the manifest.
    pub image_count: usize,
}

/// Reshapes a legacy reconstruction output into a scene bundle.
///
/// The run is a single synchronous pass: parse the image list and the
/// optional clipping planes, copy every referenced file into the bundle
/// subdirectories and write `scene_metadata.txt` last. A missing input file
/// aborts the run before the manifest is written, so a manifest on disk only
/// ever references files that were copied successfully. Re-running on the
/// same source/destination pair is idempotent.
pub fn reshape(config: &ReshapeConfig) -> Result<ReshapeReport> {
    let source = absolute_dir(&config.source)?;
    let destination = match &config.destination {
        Some(destination) => {
            fs::create_dir_all(destination)?;
            absolute_dir(destination)?
        }
        None => source.clone(),
    };
    info!("Reshaping dataset {source:?} into scene bundle {destination:?}");

    for subdirectory in BUNDLE_SUBDIRECTORIES {
        fs::create_dir_all(destination.join(subdirectory))?;
    }

    let source_images = source.join("images");
    let image_list_path = source_images.join(IMAGE_LIST_FILE_NAME);
    if !image_list_path.is_file() {
        return Err(Error::MissingImageList(image_list_path));
    }
    let image_lines = read_lines(&image_list_path)?;

    let clipping_planes_path = source.join(CLIPPING_PLANES_FILE_NAME);
    let clipping_planes = if clipping_planes_path.is_file() {
        parse_clipping_planes(&clipping_planes_path, config.clipping_mode)?
    } else {
        info!("No {CLIPPING_PLANES_FILE_NAME} found, using default clipping planes");
        Vec::new()
    };

    let destination_images = destination.join("images");
    let mut manifest = SceneManifest::new();
    for line in &image_lines {
        let line = trim_line_terminator(line);
        if line.trim().is_empty() {
            warn!("Skipping empty line in {IMAGE_LIST_FILE_NAME}");
            continue;
        }
        let (filename, _metadata) = split_first_token(line);
        info!("Copying image: {filename}");
        copy_file(&source_images.join(filename), &destination_images.join(filename))?;
        let planes = config.clipping_mode.planes_for(manifest.entry_count(), &clipping_planes);
        manifest.push_image(line, planes);
    }

    copy_file(&image_list_path, &destination_images.join(IMAGE_LIST_FILE_NAME))?;
    copy_file(
        &source.join(CAMERA_BUNDLE_FILE_NAME),
        &destination.join("cameras").join(CAMERA_BUNDLE_FILE_NAME),
    )?;
    copy_file(
        &source.join(RECONSTRUCTED_MESH_SOURCE),
        &destination.join("meshes").join(RECONSTRUCTED_MESH_NAME),
    )?;

    let manifest_path = destination.join(SCENE_METADATA_FILE_NAME);
    fs::write(&manifest_path, manifest.compose())?;
    info!(
        "Wrote scene manifest with {} entries to {manifest_path:?}",
        manifest.entry_count()
    );

    Ok(ReshapeReport {
        destination,
        image_count: manifest.entry_count(),
    })
}

fn absolute_dir(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|_| Error::InvalidPath(path.to_owned()))
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(fs::read_to_string(path)?.lines().map(str::to_owned).collect())
}

/// Parses the consulted lines of the clipping-planes file. In broadcast mode
/// only the first line is ever read, so later lines are left unparsed just
/// like the legacy toolchain left them unread.
fn parse_clipping_planes(path: &Path, mode: ClippingMode) -> Result<Vec<ClippingPlanes>> {
    let lines = read_lines(path)?;
    let consulted = match mode {
        ClippingMode::BroadcastFirst => &lines[..lines.len().min(1)],
        ClippingMode::PerImage => &lines[..],
    };
    consulted
        .iter()
        .map(|line| {
            ClippingPlanes::parse(line).ok_or_else(|| Error::InvalidClippingPlanes {
                path: path.to_owned(),
                line: line.clone(),
            })
        })
        .collect()
}

/// Copies a single input file to its place in the bundle. Copying a file onto
/// the identical path is skipped so that in-place runs (destination equal to
/// source) don't truncate their own inputs.
fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if !source.is_file() {
        return Err(Error::MissingInputFile(source.to_owned()));
    }
    if source == destination {
        return Ok(());
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)?;
    Ok(())
}
