pub mod synergy;
pub mod text;

use embedded_graphics::prelude::Size;

use crate::canvas::FrameCanvas;

/// A frame-by-frame animation the sequencer can play.
pub trait Animate {
    /// Prepares the animation for a fresh run on a canvas of the given size.
    fn initialize(&mut self, size: Size);

    /// How long the frame that was just rendered stays on screen.
    fn sleep(&self) -> std::time::Duration;

    /// Draws the next frame and returns `true` once the animation is complete.
    fn render(&mut self, canvas: &mut FrameCanvas) -> bool;
}

/// Everything that can be part of a pass.
///
/// The logo animation lives for the whole process and is only borrowed, the
/// text animations are rebuilt for every pass.
pub enum Animation<'a> {
    Synergy(&'a mut synergy::SynergyAnimation),
    Plain(text::PlainText<'a>),
    Icon(text::IconText<'a>),
}

impl Animate for Animation<'_> {
    fn initialize(&mut self, size: Size) {
        match self {
            Animation::Synergy(synergy) => synergy.initialize(size),
            Animation::Plain(plain) => plain.initialize(size),
            Animation::Icon(icon) => icon.initialize(size),
        }
    }

    fn sleep(&self) -> std::time::Duration {
        match self {
            Animation::Synergy(synergy) => synergy.sleep(),
            Animation::Plain(plain) => plain.sleep(),
            Animation::Icon(icon) => icon.sleep(),
        }
    }

    fn render(&mut self, canvas: &mut FrameCanvas) -> bool {
        match self {
            Animation::Synergy(synergy) => synergy.render(canvas),
            Animation::Plain(plain) => plain.render(canvas),
            Animation::Icon(icon) => icon.render(canvas),
        }
    }
}

impl std::fmt::Debug for Animation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Animation::Synergy(_) => f.write_str("Synergy"),
            Animation::Plain(plain) => f.debug_tuple("Plain").field(&plain.message()).finish(),
            Animation::Icon(icon) => f
                .debug_tuple("Icon")
                .field(&icon.direction())
                .field(&icon.message())
                .finish(),
        }
    }
}
