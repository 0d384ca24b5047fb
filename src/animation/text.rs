use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::Text;
use embedded_graphics::Drawable;

use crate::canvas::FrameCanvas;
use crate::playlist::Direction;
use crate::sprite::Frame;

/// Row the icon's top edge is drawn on.
pub const ICON_TOP: i32 = 3;

/// Pixels between the icon and the first glyph.
pub const ICON_GAP: i32 = 2;

/// Draws a line of text onto a canvas.
pub trait TextPainter {
    /// Draws `text` with its top left corner at `position` and returns how many
    /// pixels wide the drawn text is.
    fn paint(&self, canvas: &mut FrameCanvas, text: &str, position: Point) -> i32;
}

pub struct MonoTextPainter {
    style: MonoTextStyle<'static, Rgb888>,
}

impl MonoTextPainter {
    pub fn new(font: &'static MonoFont<'static>, color: Rgb888) -> Self {
        Self {
            style: MonoTextStyle::new(font, color),
        }
    }
}

impl TextPainter for MonoTextPainter {
    fn paint(&self, canvas: &mut FrameCanvas, text: &str, position: Point) -> i32 {
        let next = Text::with_baseline(text, position, self.style, Baseline::Top)
            .draw(canvas)
            .unwrap_or_else(|never| match never {});

        next.x - position.x
    }
}

/// A line of text entering on the right edge and scrolling out on the left.
pub struct PlainText<'a> {
    message: String,
    painter: &'a dyn TextPainter,
    sleep: std::time::Duration,
    left: i32,
}

impl<'a> PlainText<'a> {
    pub fn new(message: String, painter: &'a dyn TextPainter, sleep: std::time::Duration) -> Self {
        Self {
            message,
            painter,
            sleep,
            left: 0,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Draws the message starting at column `x`, returns the drawn width.
    fn draw_at(&self, canvas: &mut FrameCanvas, x: i32) -> i32 {
        self.painter.paint(canvas, &self.message, Point::new(x, 0))
    }
}

impl super::Animate for PlainText<'_> {
    fn initialize(&mut self, size: Size) {
        self.left = size.width as i32;
    }

    fn sleep(&self) -> std::time::Duration {
        self.sleep
    }

    fn render(&mut self, canvas: &mut FrameCanvas) -> bool {
        let width = self.draw_at(canvas, self.left);
        self.left -= 1;
        tracing::trace!(left = self.left, width, "Rendered text frame");
        self.left + width < 0
    }
}

/// A line of text led by a small icon, the text being drawn by the wrapped
/// [`PlainText`].
pub struct IconText<'a> {
    icon: &'a Frame,
    direction: Direction,
    text: PlainText<'a>,
    left: i32,
}

impl<'a> IconText<'a> {
    pub fn new(icon: &'a Frame, direction: Direction, text: PlainText<'a>) -> Self {
        Self {
            icon,
            direction,
            text,
            left: 0,
        }
    }

    pub fn message(&self) -> &str {
        self.text.message()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn icon(&self) -> &Frame {
        self.icon
    }
}

impl super::Animate for IconText<'_> {
    fn initialize(&mut self, size: Size) {
        self.left = size.width as i32;
    }

    fn sleep(&self) -> std::time::Duration {
        self.text.sleep
    }

    fn render(&mut self, canvas: &mut FrameCanvas) -> bool {
        self.icon.draw(canvas, Point::new(self.left, ICON_TOP));

        let text_left = self.left + i32::from(self.icon.width()) + ICON_GAP;
        let width = self.text.draw_at(canvas, text_left);

        self.left -= 1;
        tracing::trace!(left = self.left, width, "Rendered icon text frame");
        self.left + i32::from(self.icon.width()) + ICON_GAP + width < 0
    }
}
