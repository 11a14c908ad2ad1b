use image::{DynamicImage, ImageBuffer, Pixel};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Read access to the colour channels of a 2D image.
///
/// Channel magnitudes are 16 bit; 8 bit sources are scaled by 257 so that
/// `0xff` becomes `0xffff`.
pub trait PixelSource: Sync {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn channels_at(&self, x: u32, y: u32) -> (u16, u16, u16);
}

pub trait Channel: Copy {
    fn to_u16(self) -> u16;
}

impl Channel for u8 {
    #[inline]
    fn to_u16(self) -> u16 {
        self as u16 * 257
    }
}

impl Channel for u16 {
    #[inline]
    fn to_u16(self) -> u16 {
        self
    }
}

/// Adapter over an `image` buffer of Luma, Rgb or Rgba pixels. Alpha is ignored.
pub struct ImageSource<'a, P: Pixel + 'static> {
    image: &'a ImageBuffer<P, Vec<P::Subpixel>>,
}

impl<'a, P: Pixel + 'static> ImageSource<'a, P> {
    pub fn new(image: &'a ImageBuffer<P, Vec<P::Subpixel>>) -> Self {
        ImageSource { image }
    }
}

impl<'a, P> PixelSource for ImageSource<'a, P>
where
    P: Pixel + Sync + 'static,
    P::Subpixel: Channel + Sync,
{
    fn width(&self) -> u32 {
        self.image.width()
    }
    fn height(&self) -> u32 {
        self.image.height()
    }
    #[inline]
    fn channels_at(&self, x: u32, y: u32) -> (u16, u16, u16) {
        let rgb = self.image.get_pixel(x, y).to_rgb();
        (rgb[0].to_u16(), rgb[1].to_u16(), rgb[2].to_u16())
    }
}

/// Tightly packed 8 bit grayscale frame.
pub struct LumaVec<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> LumaVec<'a> {
    /// Fails when `data` does not hold exactly `width * height` bytes.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidConfiguration(format!(
                "{}x{} frame needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(LumaVec { data, width, height })
    }
}

impl<'a> PixelSource for LumaVec<'a> {
    fn width(&self) -> u32 {
        self.width
    }
    fn height(&self) -> u32 {
        self.height
    }
    #[inline]
    fn channels_at(&self, x: u32, y: u32) -> (u16, u16, u16) {
        let l = self.data[(y * self.width + x) as usize].to_u16();
        (l, l, l)
    }
}

/// Picks the adapter for a decoded image. Formats with no adapter are
/// rejected here rather than inside the voting loop.
pub fn from_dynamic(image: &DynamicImage) -> Result<Box<dyn PixelSource + '_>> {
    match image {
        DynamicImage::ImageLuma8(i) => Ok(Box::new(ImageSource::new(i))),
        DynamicImage::ImageRgb8(i) => Ok(Box::new(ImageSource::new(i))),
        DynamicImage::ImageRgba8(i) => Ok(Box::new(ImageSource::new(i))),
        DynamicImage::ImageLuma16(i) => Ok(Box::new(ImageSource::new(i))),
        DynamicImage::ImageRgb16(i) => Ok(Box::new(ImageSource::new(i))),
        DynamicImage::ImageRgba16(i) => Ok(Box::new(ImageSource::new(i))),
        other => Err(Error::UnsupportedPixelFormat(format!("{:?}", other.color()))),
    }
}

/// Decides which pixels vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Foreground {
    /// `r & g & b == 0`. Catches black, but also any colour whose channels
    /// share no set bit, e.g. pure red.
    ChannelAnd,
    /// Mean channel value strictly below `intensity`.
    Threshold { intensity: u16 },
}

impl Default for Foreground {
    fn default() -> Self {
        Foreground::ChannelAnd
    }
}

impl Foreground {
    #[inline]
    pub fn is_foreground(&self, (r, g, b): (u16, u16, u16)) -> bool {
        match *self {
            Foreground::ChannelAnd => r & g & b == 0,
            Foreground::Threshold { intensity } => {
                let mean = (r as u32 + g as u32 + b as u32) / 3;
                mean < intensity as u32
            }
        }
    }
}
