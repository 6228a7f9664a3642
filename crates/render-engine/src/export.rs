//! Export job management: the async decode barrier, the deterministic paint
//! pass, and PNG encoding.

use std::collections::HashMap;

use image::RgbaImage;
use tokio::task::JoinSet;

use collage_common::{ComposeError, ComposeResult, ExportDefaults, StageDefaults};
use collage_scene_model::{ElementId, Payload, SceneSnapshot};

use crate::compositor::paint_scene;
use crate::text::FontCatalog;

/// Stage dimensions in CSS px, as measured by the host layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSize {
    pub width: u32,
    pub height: u32,
}

impl StageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<StageDefaults> for StageSize {
    fn from(defaults: StageDefaults) -> Self {
        Self::new(defaults.width, defaults.height)
    }
}

/// An export request, pinned to the snapshot taken when the user asked.
///
/// Scene mutations made after the job was built are invisible to it: the job
/// owns its snapshot by value.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// The scene to flatten.
    pub snapshot: SceneSnapshot,

    /// Measured stage size, or `None` when the stage could not be located.
    pub stage: Option<StageSize>,

    /// Supersampling factor (values below 1 are treated as 1).
    pub supersample: u32,
}

impl ExportJob {
    /// Build a job with the stock export settings (supersample 2).
    pub fn new(snapshot: SceneSnapshot, stage: Option<StageSize>) -> Self {
        Self::from_defaults(&ExportDefaults::default(), snapshot, stage)
    }

    /// Build a job from configured export settings. The suggested output
    /// filename stays on `defaults`; callers pair it with the returned bytes
    /// when saving.
    pub fn from_defaults(
        defaults: &ExportDefaults,
        snapshot: SceneSnapshot,
        stage: Option<StageSize>,
    ) -> Self {
        Self {
            snapshot,
            stage,
            supersample: defaults.supersample,
        }
    }

    pub fn with_supersample(mut self, supersample: u32) -> Self {
        self.supersample = supersample;
        self
    }
}

/// Flatten the job's snapshot into PNG bytes.
///
/// This is the main entry point for export. Per-element image decode
/// failures degrade gracefully (the element is omitted); a missing or
/// zero-sized stage aborts with [`ComposeError::ExportTargetMissing`].
pub async fn export_scene(job: ExportJob, fonts: &FontCatalog) -> ComposeResult<Vec<u8>> {
    let stage = job.stage.ok_or_else(|| {
        ComposeError::export_target_missing("stage element could not be located")
    })?;
    if stage.width == 0 || stage.height == 0 {
        return Err(ComposeError::export_target_missing(format!(
            "stage has zero area ({}x{})",
            stage.width, stage.height
        )));
    }

    let supersample = job.supersample.max(1);
    tracing::info!(
        width = stage.width,
        height = stage.height,
        supersample,
        elements = job.snapshot.len(),
        "Starting export"
    );

    // Every decode completes (or fails and is dropped) before any paint:
    // the join below is the barrier between the concurrent decode phase and
    // the sequential z-ordered paint phase.
    let decoded = decode_images(&job.snapshot).await;

    let mut canvas = RgbaImage::from_pixel(
        stage.width * supersample,
        stage.height * supersample,
        crate::raster::WHITE,
    );
    paint_scene(&mut canvas, &job.snapshot, &decoded, fonts, supersample);

    let bytes = encode_png(&canvas)?;
    tracing::info!(
        output_width = canvas.width(),
        output_height = canvas.height(),
        bytes = bytes.len(),
        "Export complete"
    );
    Ok(bytes)
}

/// Decode all image sources concurrently, one blocking task per element,
/// joined to completion. Failed decodes are logged and omitted.
async fn decode_images(snapshot: &SceneSnapshot) -> HashMap<ElementId, RgbaImage> {
    let mut tasks = JoinSet::new();
    for element in &snapshot.elements {
        if let Payload::Image { source, name } = &element.payload {
            let id = element.id;
            let name = name.clone();
            let bytes = source.shared();
            tasks.spawn_blocking(move || {
                let result = image::load_from_memory(&bytes).map(|img| img.to_rgba8());
                (id, name, result)
            });
        }
    }

    let mut decoded = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((id, _, Ok(pixels))) => {
                decoded.insert(id, pixels);
            }
            Ok((id, name, Err(err))) => {
                tracing::warn!(id, name = %name, error = %err, "Image decode failed; element omitted");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Decode task failed; element omitted");
            }
        }
    }
    decoded
}

fn encode_png(canvas: &RgbaImage) -> ComposeResult<Vec<u8>> {
    let mut bytes = Vec::new();
    canvas
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| ComposeError::render(format!("PNG encode failed: {e}")))?;
    Ok(bytes)
}
