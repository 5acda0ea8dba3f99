use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use log::{debug, error, info};
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::assembly::CompositionTimeline;

// @module: External renderer invocation (ffmpeg/ffprobe)

/// Probe the duration of a media file in seconds using ffprobe
pub async fn probe_duration<P: AsRef<Path>>(path: P) -> Result<f64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(anyhow!("Media file not found: {:?}", path));
    }

    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            path.to_str().unwrap_or_default(),
        ])
        .output();

    let timeout_duration = Duration::from_secs(60);
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffprobe command timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: Value =
        serde_json::from_str(&stdout).context("Failed to parse ffprobe JSON output")?;

    let duration = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| anyhow!("ffprobe output contained no duration for {:?}", path))?;

    Ok(duration)
}

/// Transcode audio to the format the transcription provider handles best
/// (16kHz mono AAC)
pub async fn optimize_audio_for_transcription<P: AsRef<Path>>(
    input_path: P,
    output_path: P,
) -> Result<PathBuf> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let args = [
        "-y",
        "-i",
        input_path.to_str().unwrap_or_default(),
        "-ar",
        "16000",
        "-ac",
        "1",
        "-c:a",
        "aac",
        output_path.to_str().unwrap_or_default(),
    ];

    run_ffmpeg(&args, Duration::from_secs(120)).await?;
    debug!("Audio optimized for transcription: {}", output_path.display());

    Ok(output_path.to_path_buf())
}

/// Renders the composition timeline into the final vertical video
#[derive(Debug, Clone)]
pub struct FfmpegRenderer {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Output frame rate
    pub fps: u32,
}

impl Default for FfmpegRenderer {
    fn default() -> Self {
        // Vertical short-form video
        FfmpegRenderer {
            width: 1080,
            height: 1920,
            fps: 30,
        }
    }
}

impl FfmpegRenderer {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        FfmpegRenderer { width, height, fps }
    }

    /// Render the timeline: image cuts sequenced via a concat list, narration
    /// audio muxed in, captions burned from the SRT file.
    pub async fn render(
        &self,
        timeline: &CompositionTimeline,
        audio_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<PathBuf> {
        if timeline.scene_cuts().next().is_none() {
            return Err(anyhow!("Timeline contains no scene windows to render"));
        }
        if !audio_path.exists() {
            return Err(anyhow!("Audio file not found: {:?}", audio_path));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let concat_file = self.write_concat_list(timeline)?;

        // Scale and pad each image into the vertical frame, then burn captions
        let mut filter = format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1",
            w = self.width,
            h = self.height
        );
        if subtitle_path.exists() {
            filter.push_str(&format!(
                ",subtitles={}",
                escape_filter_path(subtitle_path)
            ));
        }

        let fps = self.fps.to_string();
        let args = [
            "-y",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
            concat_file.path().to_str().unwrap_or_default(),
            "-i",
            audio_path.to_str().unwrap_or_default(),
            "-vf",
            &filter,
            "-r",
            &fps,
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-c:a",
            "aac",
            "-shortest",
            output_path.to_str().unwrap_or_default(),
        ];

        run_ffmpeg(&args, Duration::from_secs(600)).await?;
        info!("Video rendered: {}", output_path.display());

        Ok(output_path.to_path_buf())
    }

    /// Write the ffconcat list describing how long each image stays on screen
    fn write_concat_list(&self, timeline: &CompositionTimeline) -> Result<NamedTempFile> {
        let mut concat_file =
            NamedTempFile::new().context("Failed to create concat list file")?;

        writeln!(concat_file, "ffconcat version 1.0")?;
        let mut last_image = None;
        for window in timeline.scene_cuts() {
            writeln!(concat_file, "file '{}'", window.image_ref)?;
            writeln!(concat_file, "duration {:.3}", window.duration())?;
            last_image = Some(window.image_ref.clone());
        }
        // concat demuxer ignores the final duration unless the last file repeats
        if let Some(image) = last_image {
            writeln!(concat_file, "file '{}'", image)?;
        }
        concat_file.flush()?;

        Ok(concat_file)
    }
}

/// Escape a path for use inside an ffmpeg filter argument
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Execute ffmpeg with a timeout, surfacing a filtered stderr on failure
async fn run_ffmpeg(args: &[&str], timeout_duration: Duration) -> Result<()> {
    debug!("Running ffmpeg {}", args.join(" "));

    let ffmpeg_future = Command::new("ffmpeg").args(args).output();

    let result = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!(
                "ffmpeg command timed out after {} seconds",
                timeout_duration.as_secs()
            ));
        }
    };

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("ffmpeg failed: {}", filtered);
        return Err(anyhow!("ffmpeg failed: {}", filtered));
    }

    Ok(())
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Output #",
        "Metadata:",
        "Duration:",
        "Stream #",
        "Stream mapping:",
        "Press [q]",
        "frame=",
        "size=",
        "video:",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !noise_prefixes.iter().any(|p| trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
