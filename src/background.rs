//! Background surface behind the graph.
//!
//! The default background is a `grid_size` square centered on the origin,
//! filled with the pattern named by `background_fill_id`. Slint has no SVG
//! patterns, so [`grid_commands`] produces the grid lines for the visible
//! region directly.

use crate::events::PointerEvent;
use crate::geometry::Point;
use crate::hooks::BackgroundMouseDownFn;
use slint::SharedString;
use std::fmt::Write;

/// Spacing under which grid lines are not drawn.
const MIN_VISIBLE_SPACING: f32 = 4.0;

/// Arguments of the background renderer.
#[derive(Clone)]
pub struct BackgroundContext {
    pub grid_size: f32,
    pub background_fill_id: SharedString,
    pub on_mouse_down: Option<BackgroundMouseDownFn>,
}

impl BackgroundContext {
    /// Forward a pointer-down on the background to the host.
    pub fn mouse_down(&self, event: &PointerEvent) {
        if let Some(f) = &self.on_mouse_down {
            f(event);
        }
    }
}

/// Drawn background rectangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Background {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// `"url(#<fill id>)"`
    pub fill: SharedString,
}

impl Background {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The background drawn when no `render_background` strategy is set.
pub fn default_background(ctx: &BackgroundContext) -> Background {
    let origin = -ctx.grid_size / 4.0;
    Background {
        x: origin,
        y: origin,
        width: ctx.grid_size,
        height: ctx.grid_size,
        fill: SharedString::from(format!("url(#{})", ctx.background_fill_id)),
    }
}

/// Grid line path commands covering a `width` x `height` viewport.
///
/// Lines follow the pan offset so the grid appears infinite. Nothing is
/// drawn once zoomed-out spacing drops below a few pixels.
pub fn grid_commands(width: f32, height: f32, zoom: f32, pan: Point, spacing: f32) -> String {
    let step = spacing * zoom;
    if !step.is_finite() || step < MIN_VISIBLE_SPACING {
        return String::new();
    }

    let mut commands = String::new();
    let mut x = pan.x.rem_euclid(step);
    while x < width + step {
        let _ = write!(commands, "M {} 0 L {} {} ", x, x, height);
        x += step;
    }
    let mut y = pan.y.rem_euclid(step);
    while y < height + step {
        let _ = write!(commands, "M 0 {} L {} {} ", y, width, y);
        y += step;
    }

    commands.truncate(commands.trim_end().len());
    commands
}
