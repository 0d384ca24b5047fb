use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::OriginDimensions;
use embedded_graphics::prelude::Point;
use embedded_graphics::prelude::RgbColor;
use embedded_graphics::prelude::Size;
use rgb::RGB8;

/// Off-screen frame buffer that animations draw into before it is swapped onto
/// the panel.
///
/// Writes outside of the canvas are dropped, so callers may draw at any
/// coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCanvas {
    size: Size,
    buf: Vec<RGB8>,
}

impl FrameCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            buf: vec![RGB8::default(); (size.width * size.height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.size.width as i32
    }

    pub fn blank(&mut self) {
        self.buf.fill(RGB8::default());
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let in_bounds = point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.size.width
            && (point.y as u32) < self.size.height;

        in_bounds.then(|| point.y as usize * self.size.width as usize + point.x as usize)
    }

    #[inline]
    pub fn set_pixel(&mut self, point: Point, color: RGB8) {
        if let Some(idx) = self.index_of(point) {
            self.buf[idx] = color;
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, point: Point) -> Option<RGB8> {
        self.index_of(point).map(|idx| self.buf[idx])
    }

    /// All pixels of the canvas in row-major order, ready to be drawn onto a
    /// display.
    pub fn pixels(&self) -> impl Iterator<Item = embedded_graphics::Pixel<Rgb888>> + '_ {
        let width = self.size.width as usize;
        self.buf.iter().enumerate().map(move |(idx, rgb)| {
            let point = Point::new((idx % width) as i32, (idx / width) as i32);
            embedded_graphics::Pixel(point, Rgb888::new(rgb.r, rgb.g, rgb.b))
        })
    }

    /// Renders lit pixels as `#` and dark ones as `.`, one line per row.
    #[cfg(test)]
    pub fn to_ascii(&self) -> String {
        use crate::sprite::Lit;

        self.buf
            .chunks(self.size.width as usize)
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_lit() { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OriginDimensions for FrameCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl embedded_graphics::prelude::DrawTarget for FrameCanvas {
    type Color = Rgb888;

    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for embedded_graphics::Pixel(point, color) in pixels {
            self.set_pixel(point, RGB8::new(color.r(), color.g(), color.b()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::Point;
    use embedded_graphics::prelude::Size;
    use rgb::RGB8;

    use super::FrameCanvas;

    const WHITE: RGB8 = RGB8::new(255, 255, 255);

    #[test]
    fn test_out_of_bounds_writes_are_clipped() {
        let mut canvas = FrameCanvas::new(Size::new(3, 2));
        canvas.set_pixel(Point::new(-1, 0), WHITE);
        canvas.set_pixel(Point::new(3, 0), WHITE);
        canvas.set_pixel(Point::new(0, 2), WHITE);
        canvas.set_pixel(Point::new(0, -5), WHITE);
        canvas.set_pixel(Point::new(2, 1), WHITE);

        insta::assert_snapshot!(canvas.to_ascii(), @r"
        ...
        ..#
        ");
        assert_eq!(canvas.pixel(Point::new(3, 0)), None);
    }

    #[test]
    fn test_blank_clears_everything() {
        let mut canvas = FrameCanvas::new(Size::new(2, 2));
        canvas.set_pixel(Point::new(1, 1), WHITE);
        canvas.blank();
        assert_eq!(canvas, FrameCanvas::new(Size::new(2, 2)));
    }

    #[test]
    fn test_pixels_are_row_major() {
        let mut canvas = FrameCanvas::new(Size::new(2, 2));
        canvas.set_pixel(Point::new(1, 0), WHITE);

        let points = canvas
            .pixels()
            .map(|pixel| (pixel.0.x, pixel.0.y))
            .collect::<Vec<_>>();
        assert_eq!(points, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
