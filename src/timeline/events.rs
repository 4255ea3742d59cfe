/// Input delivered to the timeline controller. Pointer coordinates are in
/// display pixels with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimelineEvent {
    ToggleRecord,
    PointerPress { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerRelease,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Frame index under pointer `x` on a strip spanning
/// `[margin, width - margin]`, clamped into `[0, frames - 1]`.
pub fn frame_from_pointer(x: f32, width: f32, margin: f32, frames: usize) -> usize {
    if frames <= 1 {
        return 0;
    }
    let per_frame = (width - 2.0 * margin) / (frames - 1) as f32;
    if per_frame.is_nan() || per_frame <= 0.0 {
        return 0;
    }
    let f = ((x - margin) / per_frame).round();
    if f.is_nan() || f <= 0.0 {
        0
    } else {
        (f as usize).min(frames - 1)
    }
}

/// Whether a press at height `y` lands in the strip reserved for scrubbing.
pub fn in_scrub_strip(y: f32, height: f32, margin: f32) -> bool {
    y + 2.0 * margin > height
}
