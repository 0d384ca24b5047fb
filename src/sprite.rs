use embedded_graphics::prelude::Point;
use rgb::RGB8;

use crate::canvas::FrameCanvas;

pub trait Lit {
    fn is_lit(&self) -> bool;
}

impl Lit for RGB8 {
    #[inline]
    fn is_lit(&self) -> bool {
        self.r > 0 || self.g > 0 || self.b > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u8,
    height: u8,
    pixels: Vec<RGB8>,
}

impl Frame {
    /// Returns `None` if `pixels` does not hold exactly `width * height` colors.
    #[cfg(test)]
    pub fn new(width: u8, height: u8, pixels: Vec<RGB8>) -> Option<Self> {
        (pixels.len() == usize::from(width) * usize::from(height)).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    #[cfg(test)]
    pub fn pixels(&self) -> &[RGB8] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: u8, y: u8) -> RGB8 {
        self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    #[inline]
    pub fn is_lit(&self, x: u8, y: u8) -> bool {
        self.pixel(x, y).is_lit()
    }

    /// Copies every pixel of the frame onto the canvas, dark ones included.
    pub fn draw(&self, canvas: &mut FrameCanvas, top_left: Point) {
        for y in 0..self.height {
            for x in 0..self.width {
                let position = top_left + Point::new(i32::from(x), i32::from(y));
                canvas.set_pixel(position, self.pixel(x, y));
            }
        }
    }
}

/// A list of frames as produced by the asset converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    frames: Vec<Frame>,
}

impl Sprite {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Result<&Frame, AssetError> {
        self.frames.get(index).ok_or(AssetError::MissingFrame {
            index,
            available: self.frames.len(),
        })
    }

    /// The data has no header: one byte frame count, then per frame one byte
    /// width, one byte height and `width * height` RGB triples in row-major
    /// order.
    pub fn decode(bytes: &[u8]) -> Result<Self, AssetError> {
        let mut reader = ByteReader::new(bytes);

        let frame_count = reader.byte("frame count")?;
        let frames = (0..frame_count)
            .map(|_| -> Result<Frame, AssetError> {
                let width = reader.byte("frame width")?;
                let height = reader.byte("frame height")?;
                let pixels = (0..usize::from(width) * usize::from(height))
                    .map(|_| -> Result<RGB8, AssetError> {
                        Ok(RGB8::new(
                            reader.byte("pixel color")?,
                            reader.byte("pixel color")?,
                            reader.byte("pixel color")?,
                        ))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Frame {
                    width,
                    height,
                    pixels,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if reader.remaining() > 0 {
            return Err(AssetError::TrailingBytes {
                count: reader.remaining(),
            });
        }

        Ok(Self { frames })
    }

    pub async fn load(path: &camino::Utf8Path) -> Result<Self, crate::error::Error> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| crate::error::Error::ReadingAsset {
                path: path.to_path_buf(),
                source,
            })?;

        let sprite = Self::decode(&bytes).map_err(|source| crate::error::Error::DecodingAsset {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            %path,
            frames = sprite.frames().len(),
            "Loaded sprite"
        );
        Ok(sprite)
    }

    #[cfg(test)]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = vec![self.frames.len() as u8];
        for frame in &self.frames {
            bytes.push(frame.width);
            bytes.push(frame.height);
            bytes.extend(frame.pixels.iter().flat_map(|c| [c.r, c.g, c.b]));
        }
        bytes
    }
}

#[cfg(test)]
impl FromIterator<Frame> for Sprite {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

struct ByteReader<'b> {
    bytes: &'b [u8],
    offset: usize,
}

impl<'b> ByteReader<'b> {
    fn new(bytes: &'b [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn byte(&mut self, expected: &'static str) -> Result<u8, AssetError> {
        let byte = *self
            .bytes
            .get(self.offset)
            .ok_or(AssetError::Truncated {
                offset: self.offset,
                expected,
            })?;
        self.offset += 1;
        Ok(byte)
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("Sprite data ends at byte {offset}, expected {expected}")]
    Truncated {
        offset: usize,
        expected: &'static str,
    },

    #[error("{count} trailing bytes after the last frame")]
    TrailingBytes { count: usize },

    #[error("Sprite has {available} frames, frame {index} is required")]
    MissingFrame { index: usize, available: usize },
}

#[cfg(test)]
mod tests {
    use rgb::RGB8;

    use super::AssetError;
    use super::Frame;
    use super::Lit;
    use super::Sprite;

    const RED: RGB8 = RGB8::new(255, 0, 0);
    const DARK: RGB8 = RGB8::new(0, 0, 0);

    #[test]
    fn test_lit_needs_one_channel() {
        assert!(!DARK.is_lit());
        assert!(RGB8::new(0, 0, 1).is_lit());
        assert!(RGB8::new(0, 7, 0).is_lit());
    }

    #[test]
    fn test_decode_two_frames_of_different_size() {
        #[rustfmt::skip]
        let bytes = [
            2,
            2, 1, 255, 0, 0, 0, 0, 0,
            1, 2, 0, 0, 9, 1, 2, 3,
        ];

        let sprite = Sprite::decode(&bytes).unwrap();
        assert_eq!(sprite.frames().len(), 2);

        let first = sprite.frame(0).unwrap();
        assert_eq!((first.width(), first.height()), (2, 1));
        assert!(first.is_lit(0, 0));
        assert!(!first.is_lit(1, 0));

        let second = sprite.frame(1).unwrap();
        assert_eq!((second.width(), second.height()), (1, 2));
        assert_eq!(second.pixel(0, 0), RGB8::new(0, 0, 9));
        assert_eq!(second.pixel(0, 1), RGB8::new(1, 2, 3));
    }

    #[test]
    fn test_decoded_frames_hold_width_times_height_pixels() {
        let bytes = [3, 0, 0, 3, 0, 1, 1, 5, 5, 5];
        let sprite = Sprite::decode(&bytes).unwrap();

        for frame in sprite.frames() {
            assert_eq!(
                frame.pixels().len(),
                usize::from(frame.width()) * usize::from(frame.height())
            );
        }
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(
            Sprite::decode(&[]),
            Err(AssetError::Truncated {
                offset: 0,
                expected: "frame count"
            })
        );
    }

    #[test]
    fn test_decode_truncated_pixels() {
        // 2x1 frame with only one and a half pixels present
        let bytes = [1, 2, 1, 255, 0, 0, 7];
        assert_eq!(
            Sprite::decode(&bytes),
            Err(AssetError::Truncated {
                offset: 7,
                expected: "pixel color"
            })
        );
    }

    #[test]
    fn test_decode_missing_frame_header() {
        let bytes = [2, 1, 1, 1, 1, 1, 4];
        assert_eq!(
            Sprite::decode(&bytes),
            Err(AssetError::Truncated {
                offset: 7,
                expected: "frame height"
            })
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let bytes = [1, 1, 1, 1, 1, 1, 0, 0];
        assert_eq!(
            Sprite::decode(&bytes),
            Err(AssetError::TrailingBytes { count: 2 })
        );
    }

    #[test]
    fn test_missing_frame() {
        let sprite = Sprite::decode(&[1, 0, 0]).unwrap();
        assert_eq!(
            sprite.frame(1),
            Err(AssetError::MissingFrame {
                index: 1,
                available: 1
            })
        );
    }

    #[test]
    fn test_encode_then_decode_keeps_frames() {
        let sprite: Sprite = [
            Frame::new(3, 1, vec![RED, DARK, RGB8::new(1, 2, 3)]).unwrap(),
            Frame::new(1, 2, vec![DARK, RGB8::new(200, 100, 50)]).unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(Sprite::decode(&sprite.encode()).unwrap(), sprite);
    }

    #[test]
    fn test_frame_new_checks_pixel_count() {
        assert!(Frame::new(2, 2, vec![RED; 3]).is_none());
        assert!(Frame::new(2, 2, vec![RED; 4]).is_some());
    }
}
