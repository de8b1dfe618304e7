use crate::capture::adapter::CaptureAdapter;
use crate::capture::ensure_parent_dir;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{LinesError, LinesResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegCapture`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegCaptureOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Background used to flatten alpha.
    pub background: Rgba8,
    /// Frame size.
    pub canvas: Canvas,
    /// Input frame rate.
    pub fps: u32,
}

impl FfmpegCaptureOpts {
    /// Options for a `canvas`-sized MP4 at `fps`, written to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>, canvas: Canvas, fps: u32) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(0, 0, 0),
            canvas,
            fps,
        }
    }
}

/// Streams captured frames into the system `ffmpeg` as raw RGBA and encodes H.264.
pub struct FfmpegCapture {
    opts: FfmpegCaptureOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    frames: u64,
    finished: bool,
}

impl FfmpegCapture {
    /// Create an adapter; nothing is spawned until `start`.
    pub fn new(opts: FfmpegCaptureOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            frames: 0,
            finished: false,
        }
    }

    fn validate(&self) -> LinesResult<()> {
        let Canvas { width, height } = self.opts.canvas;
        if self.opts.fps == 0 {
            return Err(LinesError::validation("capture fps must be non-zero"));
        }
        if width == 0 || height == 0 {
            return Err(LinesError::validation(
                "ffmpeg capture width/height must be non-zero",
            ));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(LinesError::validation(
                "ffmpeg capture width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

impl CaptureAdapter for FfmpegCapture {
    fn start(&mut self) -> LinesResult<()> {
        self.validate()?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(LinesError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(LinesError::capture(
                "ffmpeg is required for MP4 capture, but was not found on PATH",
            ));
        }

        let Canvas { width, height } = self.opts.canvas;
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{width}x{height}"),
            "-r",
            &self.opts.fps.to_string(),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            LinesError::capture(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| LinesError::capture("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| LinesError::capture("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        self.scratch = vec![0u8; (width as usize) * (height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.frames = 0;
        self.finished = false;
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg spawned");
        Ok(())
    }

    fn capture(&mut self, frame: &FrameRGBA) -> LinesResult<()> {
        let Canvas { width, height } = self.opts.canvas;
        if frame.width != width || frame.height != height {
            return Err(LinesError::validation(format!(
                "frame size mismatch: got {}x{}, expected {width}x{height}",
                frame.width, frame.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(LinesError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        if frame.premultiplied {
            flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.background)?;
        } else {
            self.scratch.copy_from_slice(&frame.data);
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(LinesError::capture("ffmpeg capture is not running"));
        };
        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            LinesError::capture(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames += 1;
        Ok(())
    }

    fn stop(&mut self) -> LinesResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| LinesError::capture("ffmpeg capture not started"))?;

        let status = child
            .wait()
            .map_err(|e| LinesError::capture(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| LinesError::capture("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| LinesError::capture(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(LinesError::capture(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }
        self.finished = true;
        Ok(())
    }

    fn save(&mut self) -> LinesResult<()> {
        if !self.finished {
            return Err(LinesError::capture("ffmpeg capture saved before stop"));
        }
        tracing::info!(
            frames = self.frames,
            out = %self.opts.out_path.display(),
            "mp4 written"
        );
        Ok(())
    }
}

pub(crate) fn flatten_premul_over_bg(
    dst: &mut [u8],
    src_premul: &[u8],
    bg: Rgba8,
) -> LinesResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(LinesError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/ffmpeg.rs"]
mod tests;
