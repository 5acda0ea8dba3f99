use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::AssemblyError;

// @module: Scene planning - images onto display windows

/// Time range during which one image is displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneWindow {
    /// Identifier of the image to display (typically a file path)
    pub image_ref: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl SceneWindow {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Map the narration duration and image set onto scene windows.
///
/// The total duration is divided evenly across the images, producing
/// contiguous, non-overlapping windows that partition [0, total_duration]
/// exactly. When a minimum display duration is given and an even split would
/// undercut it, images are dropped from the tail (order preserved) rather
/// than windows shrunk below the minimum.
///
/// An empty image list yields an empty window sequence, not an error.
pub fn plan_scenes(
    total_duration: f64,
    images: &[String],
    min_display_secs: Option<f64>,
) -> Result<Vec<SceneWindow>, AssemblyError> {
    if images.is_empty() {
        return Ok(Vec::new());
    }
    if !(total_duration > 0.0) {
        return Err(AssemblyError::InvalidConfiguration(format!(
            "total duration must be positive, got {}",
            total_duration
        )));
    }
    if let Some(min) = min_display_secs {
        if !(min > 0.0) {
            return Err(AssemblyError::InvalidConfiguration(format!(
                "minimum display duration must be positive, got {}",
                min
            )));
        }
    }

    let mut count = images.len();
    if let Some(min) = min_display_secs {
        let fitting = (total_duration / min).floor() as usize;
        // When not even one image meets the minimum, a single full-duration
        // window is still emitted - the run always shows something.
        count = count.min(fitting.max(1));
    }

    if count < images.len() {
        warn!(
            "Dropping {} trailing image(s): only {} fit {:.2}s at the minimum display duration",
            images.len() - count,
            count,
            total_duration
        );
    }

    let windows: Vec<SceneWindow> = images[..count]
        .iter()
        .enumerate()
        .map(|(i, image_ref)| SceneWindow {
            image_ref: image_ref.clone(),
            // Ratio form keeps the last boundary exactly at total_duration
            start: total_duration * (i as f64 / count as f64),
            end: total_duration * ((i + 1) as f64 / count as f64),
        })
        .collect();

    debug!(
        "Planned {} scene window(s) over {:.2}s",
        windows.len(),
        total_duration
    );

    Ok(windows)
}
