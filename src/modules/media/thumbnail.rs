use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use uuid::Uuid;

use crate::api::error;

/// Thumbnail extraction configuration
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Thumbnail root, relative to the base directory.
    pub thumbnail_dir: String,
    pub width: u32,
    pub height: u32,
    /// ffmpeg executable; resolved from PATH by default.
    pub ffmpeg_path: String,
    pub timeout: Duration,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            thumbnail_dir: "uploads/thumbnails".to_string(),
            width: 256,
            height: 256,
            ffmpeg_path: "ffmpeg".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Record of one child-process invocation, kept for diagnostics only.
#[derive(Debug)]
pub struct ProcessExecution {
    pub program: String,
    pub args: Vec<String>,
    pub exit_code: Option<i32>,
    pub stderr: String,
    pub elapsed: Duration,
    pub timed_out: bool,
}

impl ProcessExecution {
    pub fn succeeded(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Extracts a single downsized frame from a stored video via ffmpeg. Every
/// failure short of the placeholder itself failing degrades to a synthesized
/// placeholder image, so callers only see an error when no image at all could
/// be produced.
#[derive(Debug, Clone)]
pub struct ThumbnailService {
    base_dir: PathBuf,
    config: ThumbnailConfig,
}

impl ThumbnailService {
    pub fn new(base_dir: impl Into<PathBuf>, config: ThumbnailConfig) -> Self {
        Self { base_dir: base_dir.into(), config }
    }

    /// Absolute thumbnail root, for the HTTP layer to serve static files from.
    pub fn thumbnail_directory(&self) -> PathBuf {
        self.base_dir.join(&self.config.thumbnail_dir)
    }

    /// Generates a thumbnail for a stored video and returns its path relative
    /// to the base directory. Errors only when both extraction and the
    /// placeholder fallback fail; a valid image exists at the returned path
    /// on every Ok return.
    pub async fn generate(&self, video_path: &str) -> Result<String, error::SystemError> {
        let video_full_path = self.absolute(video_path);

        if tokio::fs::metadata(&video_full_path).await.is_err() {
            log::error!("Video file not found: {}", video_full_path.display());
            return Err(error::SystemError::not_found("Video file not found"));
        }

        let thumbnail_dir = self.thumbnail_directory();
        tokio::fs::create_dir_all(&thumbnail_dir).await?;

        let thumbnail_file_name = format!("{}.jpg", Uuid::now_v7());
        let thumbnail_full_path = thumbnail_dir.join(&thumbnail_file_name);
        let relative_path = format!("{}/{}", self.config.thumbnail_dir, thumbnail_file_name);

        let extracted = match self.extract_frame(&video_full_path, &thumbnail_full_path).await {
            Ok(execution) => {
                if execution.timed_out {
                    log::warn!(
                        "ffmpeg timed out after {:?}, creating placeholder",
                        self.config.timeout
                    );
                    false
                } else {
                    log::debug!(
                        "{} finished in {:?} ({} args)",
                        execution.program,
                        execution.elapsed,
                        execution.args.len()
                    );
                    if execution.exit_code != Some(0) {
                        log::warn!(
                            "ffmpeg exited with code {:?}. Error: {}",
                            execution.exit_code,
                            execution.stderr
                        );
                    }
                    // The decisive signal is the output file, not the exit code.
                    tokio::fs::metadata(&thumbnail_full_path).await.is_ok()
                }
            }
            Err(err) => {
                log::warn!("Failed to run {}: {}", self.config.ffmpeg_path, err);
                false
            }
        };

        if !extracted {
            log::warn!("ffmpeg did not generate thumbnail, creating placeholder");
            self.create_placeholder(&thumbnail_full_path).await?;
        }

        log::info!("Thumbnail generated: {}", relative_path);
        Ok(relative_path)
    }

    /// Seek one second in, grab a single frame, scale and pad it to the
    /// configured dimensions with black letterboxing.
    async fn extract_frame(
        &self,
        video_path: &Path,
        output_path: &Path,
    ) -> std::io::Result<ProcessExecution> {
        let (width, height) = (self.config.width, self.config.height);
        let filter = format!(
            "scale={width}:{height}:force_original_aspect_ratio=decrease,\
             pad={width}:{height}:(ow-iw)/2:(oh-ih)/2:black"
        );
        let args = vec![
            "-i".to_string(),
            video_path.to_string_lossy().into_owned(),
            "-ss".to_string(),
            "00:00:01".to_string(),
            "-vframes".to_string(),
            "1".to_string(),
            "-vf".to_string(),
            filter,
            "-y".to_string(),
            output_path.to_string_lossy().into_owned(),
        ];
        self.run_ffmpeg(args).await
    }

    /// Synthesizes a flat-color frame at the destination path. This is the
    /// last line of defense; its failure is the only error `generate`
    /// propagates.
    async fn create_placeholder(&self, output_path: &Path) -> Result<(), error::SystemError> {
        let args = vec![
            "-f".to_string(),
            "lavfi".to_string(),
            "-i".to_string(),
            format!("color=c=404040:s={}x{}:d=1", self.config.width, self.config.height),
            "-vframes".to_string(),
            "1".to_string(),
            "-y".to_string(),
            output_path.to_string_lossy().into_owned(),
        ];

        let execution = self.run_ffmpeg(args).await.map_err(|err| {
            log::error!("Failed to create placeholder with ffmpeg: {}", err);
            error::SystemError::thumbnail("ffmpeg failed to create placeholder image")
        })?;

        if !execution.succeeded() || tokio::fs::metadata(output_path).await.is_err() {
            log::error!(
                "Placeholder generation failed (exit {:?}, timed_out {}). Error: {}",
                execution.exit_code,
                execution.timed_out,
                execution.stderr
            );
            return Err(error::SystemError::thumbnail(
                "ffmpeg failed to create placeholder image",
            ));
        }

        Ok(())
    }

    /// Runs ffmpeg with stderr captured, bounded by the configured timeout.
    /// On expiry the process is force-killed and the execution is reported as
    /// timed out rather than failed.
    async fn run_ffmpeg(&self, args: Vec<String>) -> std::io::Result<ProcessExecution> {
        log::debug!("Executing ffmpeg: {} {}", self.config.ffmpeg_path, args.join(" "));

        let started = Instant::now();
        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stderr_pipe = child.stderr.take();

        let outcome = tokio::time::timeout(self.config.timeout, async {
            let mut stderr = String::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                let _ = pipe.read_to_string(&mut stderr).await;
            }
            let status = child.wait().await;
            (status, stderr)
        })
        .await;

        match outcome {
            Ok((status, stderr)) => {
                let status = status?;
                Ok(ProcessExecution {
                    program: self.config.ffmpeg_path.clone(),
                    args,
                    exit_code: status.code(),
                    stderr,
                    elapsed: started.elapsed(),
                    timed_out: false,
                })
            }
            Err(_) => {
                let _ = child.kill().await;
                let _ = child.wait().await;
                Ok(ProcessExecution {
                    program: self.config.ffmpeg_path.clone(),
                    args,
                    exit_code: None,
                    stderr: String::new(),
                    elapsed: started.elapsed(),
                    timed_out: true,
                })
            }
        }
    }

    fn absolute(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
