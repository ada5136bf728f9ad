//! Seeking frame-sequence assets from scroll progress.

/// A frame-sequence asset that can be positioned on any frame.
pub trait FrameSeek {
    fn total_frames(&self) -> usize;
    fn seek(&mut self, frame: usize);
}

/// Frame index for a progress fraction: `round(progress * (total - 1))`.
pub fn frame_for_progress(progress: f32, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let last = (total - 1) as f32;
    (progress.clamp(0.0, 1.0) * last).round() as usize
}

/// Seeks an asset only when the frame actually changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameScrubber {
    last: Option<usize>,
}

impl FrameScrubber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<usize> {
        self.last
    }

    pub fn scrub<S: FrameSeek + ?Sized>(&mut self, asset: &mut S, progress: f32) -> usize {
        let frame = frame_for_progress(progress, asset.total_frames());
        if self.last != Some(frame) {
            asset.seek(frame);
            self.last = Some(frame);
        }
        frame
    }
}
