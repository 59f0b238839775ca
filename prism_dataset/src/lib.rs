//! # Overview
//!
//! Crate for reshaping the output of a photogrammetry reconstruction pipeline
//! into a scene bundle that the Prism renderer can load directly.
//!
//! The reshaper reads a legacy reconstruction directory and produces a
//! normalized directory tree next to a textual scene manifest. The legacy
//! directory is treated as read-only input; the bundle is owned by this crate.
//!
//! ## Example:
//!
//! **Legacy Directory:**
//!
//! ```text
//! dataset/
//! ├─ images/
//! │  ├─ list_images.txt
//! │  ├─ 0001.jpg
//! │  ├─ 0002.jpg
//! ├─ clipping_planes.txt
//! ├─ bundle.out
//! ├─ pmvs/
//! │  ├─ models/
//! │  │  ├─ pmvs_recon.ply
//! ```
//!
//! **Scene Bundle:**
//!
//! ```text
//! bundle/
//! ├─ images/
//! │  ├─ list_images.txt
//! │  ├─ 0001.jpg
//! │  ├─ 0002.jpg
//! ├─ cameras/
//! │  ├─ bundle.out
//! ├─ meshes/
//! │  ├─ recon.ply
//! ├─ textures/
//! ├─ scene_metadata.txt
//! ```
//!
//! # Components
//!
//! The main entry point is [`reshape()`] which performs the whole conversion in
//! one pass. The surrounding modules cover the companion concerns of the
//! pipeline: [`Settings`] reads the `[key]: value` settings files that the
//! renderer tooling shares, [`stage_assets`](staging::stage_assets) is the
//! build-time helper that links or copies shader files next to the
//! executables, and [`pipeline_node`] declares the renderer executable as a
//! node for the host visual-pipeline editor.

mod common;
mod manifest;
mod reshape;
mod settings;

pub mod pipeline_node;
pub mod staging;

pub use common::{split_first_token, trim_line_terminator, Error, ExecutableVariant, Result};
pub use manifest::{ClippingMode, ClippingPlanes, SceneManifest};
pub use reshape::{
    reshape, ReshapeConfig, ReshapeReport, CAMERA_BUNDLE_FILE_NAME, CLIPPING_PLANES_FILE_NAME,
    IMAGE_LIST_FILE_NAME, SCENE_METADATA_FILE_NAME,
};
pub use settings::Settings;
