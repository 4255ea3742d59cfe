use egui::{Align2, Color32, FontId, Painter, Rect, Stroke, pos2};

use crate::timeline::Progress;

const LINE_WIDTH: f32 = 4.0;
const RECORDING: Color32 = Color32::from_rgb(204, 26, 26);
const IDLE: Color32 = Color32::from_rgb(26, 77, 204);
const TRACK: Color32 = Color32::from_gray(40);

/// Position bar along the bottom of `rect`: played part coloured by mode,
/// the rest dark, with a knob at `position` in `[0, 1]`.
pub fn draw(
    painter: &Painter,
    rect: Rect,
    margin: f32,
    position: f32,
    recording: bool,
    progress: Option<&Progress>,
) {
    let y = rect.bottom() - margin;
    let left = rect.left() + margin;
    let right = (rect.right() - margin).max(left);
    let knob = pos2(left + (right - left) * position.clamp(0.0, 1.0), y);
    let color = if recording { RECORDING } else { IDLE };

    painter.line_segment([pos2(left, y), knob], Stroke::new(LINE_WIDTH, color));
    painter.line_segment([knob, pos2(right, y)], Stroke::new(LINE_WIDTH, TRACK));
    painter.circle_filled(knob, LINE_WIDTH * 1.25, color);

    if let Some(p) = progress {
        painter.text(
            pos2(left, y - LINE_WIDTH * 2.0),
            Align2::LEFT_BOTTOM,
            p.to_string(),
            FontId::monospace(12.0),
            Color32::WHITE,
        );
    }
}
