use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::Size;
use rgb::RGB8;

use crate::canvas::FrameCanvas;
use crate::sprite::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelTravel {
    pub start_tick: u32,
    pub start: Point,
    pub end: Point,
}

impl PixelTravel {
    /// Horizontal position `elapsed` ticks after the pixel started moving.
    fn x_after(&self, elapsed: u32) -> i32 {
        let elapsed = elapsed.min(i32::MAX as u32) as i32;
        if self.end.x > self.start.x {
            (self.start.x.saturating_add(elapsed)).min(self.end.x)
        } else {
            (self.start.x.saturating_sub(elapsed)).max(self.end.x)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Assemble,
    Pause,
    Scroll,
}

#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Distance in pixels every pixel travels while assembling.
    pub offset: u32,
    /// Ticks between two consecutive pixels of one scan starting to move.
    pub delay: u32,
    pub assemble_sleep: std::time::Duration,
    pub pause_sleep: std::time::Duration,
    pub scroll_sleep: std::time::Duration,
}

/// The logo animation.
///
/// Two frames of the same logo are scanned into pixels that fly in
/// horizontally, one frame from the left and one from the right. Once every
/// pixel has arrived the logo is held for a moment and then scrolled off to the
/// left.
#[derive(Debug)]
pub struct SynergyAnimation {
    timing: Timing,
    color: RGB8,
    pixels: Vec<PixelTravel>,
    state: State,
    tick: u32,
}

impl SynergyAnimation {
    pub fn new(left_approach: &Frame, right_approach: &Frame, timing: Timing, color: RGB8) -> Self {
        let mut pixels = Vec::new();
        let offset = timing.offset.min(i32::MAX as u32) as i32;

        // right to left, top to bottom
        let mut start_tick = 0;
        for x in (0..left_approach.width()).rev() {
            for y in 0..left_approach.height() {
                if left_approach.is_lit(x, y) {
                    let end = Point::new(x.into(), y.into());
                    pixels.push(PixelTravel {
                        start_tick,
                        start: end - Point::new(offset, 0),
                        end,
                    });
                    start_tick = start_tick.saturating_add(timing.delay);
                }
            }
        }

        // left to right, bottom to top
        let mut start_tick = 0;
        for x in 0..right_approach.width() {
            for y in (0..right_approach.height()).rev() {
                if right_approach.is_lit(x, y) {
                    let end = Point::new(x.into(), y.into());
                    pixels.push(PixelTravel {
                        start_tick,
                        start: Point::new(end.x.saturating_add(offset), end.y),
                        end,
                    });
                    start_tick = start_tick.saturating_add(timing.delay);
                }
            }
        }

        tracing::debug!(pixels = pixels.len(), "Scanned logo frames");

        Self {
            timing,
            color,
            pixels,
            state: State::Assemble,
            tick: 0,
        }
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[PixelTravel] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn state(&self) -> State {
        self.state
    }

    #[cfg(test)]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// The tick on which assembling ends: the last pixel that starts moving
    /// needs `offset` ticks to arrive.
    fn assembled_at(&self) -> u32 {
        self.pixels
            .last()
            .map_or(0, |p| p.start_tick)
            .saturating_add(self.timing.offset)
    }

    fn render_assemble(&self, canvas: &mut FrameCanvas) {
        for p in self.pixels.iter().filter(|p| p.start_tick <= self.tick) {
            let x = p.x_after(self.tick - p.start_tick);
            canvas.set_pixel(Point::new(x, p.start.y), self.color);
        }
    }

    fn render_shifted(&self, canvas: &mut FrameCanvas) {
        let shift = self.tick.min(i32::MAX as u32) as i32;
        for p in &self.pixels {
            canvas.set_pixel(Point::new(p.end.x - shift, p.start.y), self.color);
        }
    }

    fn transition(&mut self, state: State) {
        tracing::debug!(from = ?self.state, to = ?state, "Logo animation state change");
        self.state = state;
    }
}

impl super::Animate for SynergyAnimation {
    fn initialize(&mut self, _size: Size) {
        self.tick = 0;
        self.state = State::Assemble;
    }

    fn sleep(&self) -> std::time::Duration {
        match self.state {
            State::Assemble => self.timing.assemble_sleep,
            State::Pause => self.timing.pause_sleep,
            State::Scroll => self.timing.scroll_sleep,
        }
    }

    fn render(&mut self, canvas: &mut FrameCanvas) -> bool {
        match self.state {
            State::Assemble => {
                self.render_assemble(canvas);
                if self.tick == self.assembled_at() {
                    self.tick = 0;
                    self.transition(State::Pause);
                } else {
                    self.tick += 1;
                }
                false
            }

            State::Pause => {
                self.render_shifted(canvas);
                self.transition(State::Scroll);
                false
            }

            State::Scroll => {
                self.render_shifted(canvas);
                // Scrolls by the canvas width, regardless of how wide the logo is.
                if i64::from(self.tick) == i64::from(canvas.width()) {
                    return true;
                }
                self.tick += 1;
                false
            }
        }
    }
}
