use ddp_rs::connection::DDPConnection;
use embedded_graphics::prelude::DrawTarget;
use embedded_graphics::prelude::Size;
use rgb::RGB8;
use smart_leds_matrix::layout::invert_axis::NoInvert;
use smart_leds_matrix::layout::Rectangular;
use smart_leds_matrix::SmartLedMatrix;

use crate::canvas::FrameCanvas;

pub const NUM_LEDS_X: u32 = 32;

pub const NUM_LEDS_Y: u32 = 16;

pub const NUM_LEDS: usize = (NUM_LEDS_X * NUM_LEDS_Y) as usize;

/// A double buffered pixel display.
///
/// The caller draws into a [`FrameCanvas`] it owns, hands it over with
/// [`Panel::swap_on_vsync`] and gets the canvas that was visible until then back
/// to draw the next frame into.
pub trait Panel {
    fn size(&self) -> Size;

    fn create_frame_canvas(&self) -> FrameCanvas {
        FrameCanvas::new(self.size())
    }

    fn swap_on_vsync(&mut self, canvas: FrameCanvas) -> Result<FrameCanvas, crate::error::Error>;

    /// Turns every pixel off.
    fn blank(&mut self) -> Result<(), crate::error::Error> {
        let canvas = self.create_frame_canvas();
        self.swap_on_vsync(canvas).map(drop)
    }
}

/// Streams RGB data to a WLED style controller using DDP.
pub struct DdpWriter {
    connection: DDPConnection,
    buf: Vec<u8>,
}

impl DdpWriter {
    pub fn new(connection: DDPConnection) -> Self {
        Self {
            connection,
            buf: Vec::with_capacity(NUM_LEDS * 3),
        }
    }
}

impl smart_leds_trait::SmartLedsWrite for DdpWriter {
    type Error = ddp_rs::error::DDPError;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        self.buf.clear();
        self.buf.extend(
            iterator
                .into_iter()
                .map(Into::into)
                .flat_map(|rgb: RGB8| [rgb.r, rgb.g, rgb.b]),
        );

        let sent = self.connection.write(&self.buf)?;
        tracing::trace!(sent, "Pushed frame to controller");
        Ok(())
    }
}

/// The 32x16 LED matrix.
pub struct LedPanel {
    matrix: SmartLedMatrix<DdpWriter, Rectangular<NoInvert>, NUM_LEDS>,
    visible: FrameCanvas,
}

impl LedPanel {
    pub fn new(writer: DdpWriter, brightness: u8) -> Result<Self, crate::error::Error> {
        let mut matrix = SmartLedMatrix::<_, _, NUM_LEDS>::new(
            writer,
            Rectangular::new(NUM_LEDS_X, NUM_LEDS_Y),
        );
        matrix.set_brightness(brightness.min(100));

        let mut panel = Self {
            matrix,
            visible: FrameCanvas::new(Size::new(NUM_LEDS_X, NUM_LEDS_Y)),
        };
        panel.blank()?;
        Ok(panel)
    }
}

impl Panel for LedPanel {
    fn size(&self) -> Size {
        Size::new(NUM_LEDS_X, NUM_LEDS_Y)
    }

    fn swap_on_vsync(&mut self, canvas: FrameCanvas) -> Result<FrameCanvas, crate::error::Error> {
        self.matrix.draw_iter(canvas.pixels())?;
        self.matrix.flush()?;
        Ok(std::mem::replace(&mut self.visible, canvas))
    }

    fn blank(&mut self) -> Result<(), crate::error::Error> {
        self.matrix
            .clear(embedded_graphics::pixelcolor::Rgb888::default())?;
        self.matrix.flush()?;
        self.visible.blank();
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use embedded_graphics::prelude::Size;

    use crate::canvas::FrameCanvas;

    /// Keeps every frame that was swapped onto it.
    #[derive(Debug)]
    pub struct RecordingPanel {
        size: Size,
        visible: FrameCanvas,
        pub shown: Vec<String>,
    }

    impl RecordingPanel {
        pub fn new(size: Size) -> Self {
            Self {
                size,
                visible: FrameCanvas::new(size),
                shown: Vec::new(),
            }
        }
    }

    impl super::Panel for RecordingPanel {
        fn size(&self) -> Size {
            self.size
        }

        fn swap_on_vsync(
            &mut self,
            canvas: FrameCanvas,
        ) -> Result<FrameCanvas, crate::error::Error> {
            self.shown.push(canvas.to_ascii());
            Ok(std::mem::replace(&mut self.visible, canvas))
        }
    }
}
