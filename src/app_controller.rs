use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::{AssemblyConfig, Config};
use crate::assembly::{
    CaptionSegment, CompositionTimeline, build_timeline, captions, plan_scenes, segment_words,
};
use crate::file_utils::FileManager;
use crate::image_generator::ImageGenerator;
use crate::providers::elevenlabs::ElevenLabs;
use crate::providers::fal::Fal;
use crate::providers::groq::GroqWhisper;
use crate::providers::mistral::Mistral;
use crate::render::{self, FfmpegRenderer};
use crate::script_writer::{ScriptWriter, segment_script};
use crate::voice_generator::VoiceGenerator;
use crate::voice_timing::{TimingData, VoiceTiming};

// @module: Application controller - sequential pipeline orchestration

/// Stages of the generation pipeline, used for progress reporting
const GENERATE_STAGES: u64 = 8;

/// Composition artifacts handed to the renderer
#[derive(Debug)]
pub struct Composition {
    /// Caption track (also written out as SRT)
    pub captions: Vec<CaptionSegment>,
    /// Merged timeline descriptor
    pub timeline: CompositionTimeline,
}

/// Build the composition from timed artifacts: word timings in, caption and
/// scene tracks merged into one ordered timeline out. Pure apart from the
/// inputs; the renderer never sees the raw artifacts.
pub fn assemble_composition(
    timing: &TimingData,
    image_refs: &[String],
    total_duration: f64,
    assembly: &AssemblyConfig,
) -> Result<Composition> {
    let captions = segment_words(&timing.word_timings, &assembly.caption_limits())?;
    let scenes = plan_scenes(total_duration, image_refs, assembly.min_image_display_secs)?;
    let timeline = build_timeline(&captions, &scenes, assembly.timing_tolerance_secs)?;

    Ok(Composition { captions, timeline })
}

/// Main application controller for video generation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full pipeline: paper text in, rendered video out
    pub async fn run_generate(&self, paper_path: &Path, output_path: &Path) -> Result<PathBuf> {
        self.config.validate_api_keys()?;

        let progress = stage_progress(GENERATE_STAGES);
        let dirs = FileManager::create_run_dirs(&self.config.assets_dir)?;
        info!("Run assets: {}", dirs.root.display());

        // 1. Paper text
        progress.set_message("reading paper");
        let paper_text = FileManager::read_text_file(paper_path)?;
        if paper_text.trim().is_empty() {
            return Err(anyhow!("Paper file is empty: {:?}", paper_path));
        }
        progress.inc(1);

        // 2-3. Key points and script
        let script_writer = ScriptWriter::new(Mistral::new(
            self.config.script.resolved_api_key(),
            self.config.script.endpoint.clone(),
            self.config.script.model.clone(),
            self.config.script.temperature,
        ));
        progress.set_message("extracting key points");
        let key_points = script_writer.extract_key_points(&paper_text).await?;
        progress.inc(1);

        progress.set_message("writing script");
        let script = script_writer.generate_script(&key_points).await?;
        let script_segments = segment_script(&script, self.config.script.segment_count);
        if script_segments.is_empty() {
            return Err(anyhow!("Script generation produced no usable text"));
        }
        progress.inc(1);

        // 4. Narration
        progress.set_message("synthesizing narration");
        let voice_generator = VoiceGenerator::new(ElevenLabs::new(
            self.config.voice.resolved_api_key(),
            self.config.voice.endpoint.clone(),
            &self.config.voice.voice,
            self.config.voice.model.clone(),
        ));
        let narration_path = dirs.audio.join("narration.mp3");
        voice_generator
            .generate_narration(&script, &narration_path)
            .await?;
        let transcribe_path = dirs.audio.join("narration_optimized.mp4");
        render::optimize_audio_for_transcription(&narration_path, &transcribe_path).await?;
        progress.inc(1);

        // 5. Word timing
        progress.set_message("extracting word timing");
        let voice_timing = VoiceTiming::new(GroqWhisper::new(
            self.config.timing.resolved_api_key(),
            self.config.timing.endpoint.clone(),
            self.config.timing.model.clone(),
            self.config.timing.language.clone(),
        ));
        let timing = voice_timing.extract_timing(&transcribe_path).await?;
        timing.save(dirs.audio.join("timing.json"))?;
        progress.inc(1);

        // 6. Images
        progress.set_message("generating images");
        let image_generator = ImageGenerator::new(Fal::new(
            self.config.image.resolved_api_key(),
            self.config.image.endpoint.clone(),
            self.config.image.model.clone(),
            self.config.image.image_size.clone(),
        ));
        let image_paths = image_generator
            .generate_images(&script_segments, &dirs.images)
            .await?;
        progress.inc(1);

        // 7. Assemble
        progress.set_message("assembling timeline");
        let total_duration = render::probe_duration(&narration_path).await?;
        progress.inc(1);

        // 8. Render
        progress.set_message("rendering video");
        let video = self
            .assemble_and_render(
                &timing,
                &image_paths,
                total_duration,
                &narration_path,
                &dirs.subtitles,
                output_path,
            )
            .await?;
        progress.inc(1);
        progress.finish_with_message("done");

        Ok(video)
    }

    /// Assemble a video from pre-existing artifacts: narration audio, a
    /// timing JSON file, and a directory of ordered scene images
    pub async fn run_assemble(
        &self,
        audio_path: &Path,
        timing_path: &Path,
        images_dir: &Path,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let timing = TimingData::load(timing_path)?;

        let mut image_paths = FileManager::find_files(images_dir, "png")?;
        if image_paths.is_empty() {
            image_paths = FileManager::find_files(images_dir, "jpg")?;
        }
        if image_paths.is_empty() {
            warn!("No images found in {:?}; rendering will fail", images_dir);
        }

        let total_duration = render::probe_duration(audio_path).await?;
        let subtitles_dir = output_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        self.assemble_and_render(
            &timing,
            &image_paths,
            total_duration,
            audio_path,
            &subtitles_dir,
            output_path,
        )
        .await
    }

    async fn assemble_and_render(
        &self,
        timing: &TimingData,
        image_paths: &[PathBuf],
        total_duration: f64,
        audio_path: &Path,
        artifacts_dir: &Path,
        output_path: &Path,
    ) -> Result<PathBuf> {
        let image_refs: Vec<String> = image_paths
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        let composition =
            assemble_composition(timing, &image_refs, total_duration, &self.config.assembly)
                .context("Timeline assembly failed")?;

        let srt_path = artifacts_dir.join("captions.srt");
        captions::write_srt(&composition.captions, &srt_path)?;
        let timeline_path = artifacts_dir.join("timeline.json");
        composition.timeline.write_json(&timeline_path)?;
        info!(
            "Composition: {} event(s), descriptor at {}",
            composition.timeline.len(),
            timeline_path.display()
        );

        let renderer = FfmpegRenderer::new(
            self.config.assembly.width,
            self.config.assembly.height,
            self.config.assembly.fps,
        );

        renderer
            .render(&composition.timeline, audio_path, &srt_path, output_path)
            .await
    }
}

fn stage_progress(stages: u64) -> ProgressBar {
    let progress = ProgressBar::new(stages);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress
}
