//! Path-level operations used by the CLI: read a carrier PNG, run one codec
//! operation, write the result. Carrier output is always encoded as PNG no
//! matter what extension the caller picked, since a lossy format would
//! destroy the bit plane.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Pixel, PixelWithColorType, RgbImage, RgbaImage};
use log::{debug, info};

use crate::carrier::Carrier;
use crate::payload::{Content, CompressionLevel, Payload, COLOR_CHANNELS};
use crate::result::Result;
use crate::StowawayError;

/// Where the data to hide comes from.
#[derive(Debug)]
pub enum PayloadSource {
    /// A text message given on the command line
    Message(String),
    /// A file whose bytes are hidden as text content
    TextFile(PathBuf),
    /// A grayscale or color image hidden as image content
    ImageFile(PathBuf),
}

pub fn hide(
    carrier_file: &Path,
    write_to_file: &Path,
    source: PayloadSource,
    level: CompressionLevel,
    override_existing: bool,
) -> Result<()> {
    let carrier = read_carrier(carrier_file)?;
    let content = match source {
        PayloadSource::Message(text) => Content::text(text.into_bytes()),
        PayloadSource::TextFile(path) => Content::text(fs::read(path)?),
        PayloadSource::ImageFile(path) => read_payload_content(&path)?,
    };

    let payload = Payload::from_content(content, level)?;
    debug!(
        "envelope is {} bytes, carrier capacity is {} bytes",
        payload.envelope().len(),
        carrier.capacity()
    );

    let embedded = carrier.embed(&payload, override_existing)?;
    save_png(&embedded, write_to_file)?;
    info!("embedded payload into {}", write_to_file.display());

    Ok(())
}

pub fn unveil(secret_file: &Path, output_file: &Path) -> Result<()> {
    let payload = read_carrier(secret_file)?.extract()?;

    match payload.content() {
        Content::Text(bytes) => {
            fs::write(output_file, bytes).map_err(|e| StowawayError::WriteError { source: e })?;
        }
        Content::Gray {
            height,
            width,
            pixels,
        } => {
            let img = GrayImage::from_raw(*width as u32, *height as u32, pixels.clone())
                .ok_or(StowawayError::ImageEncodingError)?;
            save_png(&img, output_file)?;
        }
        Content::Color {
            height,
            width,
            pixels,
        } => {
            let img = RgbImage::from_raw(*width as u32, *height as u32, pixels.clone())
                .ok_or(StowawayError::ImageEncodingError)?;
            save_png(&img, output_file)?;
        }
    }
    info!("unveiled payload into {}", output_file.display());

    Ok(())
}

pub fn clean(secret_file: &Path, write_to_file: &Path) -> Result<()> {
    let scrubbed = read_carrier(secret_file)?.clean();
    save_png(&scrubbed, write_to_file)?;
    info!("scrubbed bit plane into {}", write_to_file.display());

    Ok(())
}

pub fn inspect(secret_file: &Path) -> Result<bool> {
    Ok(read_carrier(secret_file)?.detect())
}

fn read_carrier(path: &Path) -> Result<Carrier> {
    let img: RgbaImage = image::open(path)
        .map_err(|_e| StowawayError::InvalidImageMedia)?
        .to_rgba8();

    Ok(Carrier::new(img))
}

/// Classifies a payload image file as gray or color content. Alpha-bearing
/// images cannot be represented in the envelope and are rejected rather
/// than silently flattened.
fn read_payload_content(path: &Path) -> Result<Content> {
    let img = image::open(path).map_err(|_e| StowawayError::InvalidImageMedia)?;
    if img.color().has_alpha() {
        return Err(StowawayError::UnsupportedChannelCount(
            img.color().channel_count() as usize,
        ));
    }

    match img {
        DynamicImage::ImageLuma8(gray) => {
            let (width, height) = gray.dimensions();
            Content::gray(height as usize, width as usize, gray.into_raw())
        }
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            Content::color(
                height as usize,
                width as usize,
                COLOR_CHANNELS,
                rgb.into_raw(),
            )
        }
    }
}

fn save_png<P>(image: &ImageBuffer<P, Vec<u8>>, path: &Path) -> Result<()>
where
    P: Pixel<Subpixel = u8> + PixelWithColorType,
{
    let mut file =
        File::create(path).map_err(|e| StowawayError::WriteError { source: e })?;
    image
        .write_to(&mut file, ImageFormat::Png)
        .map_err(|_e| StowawayError::ImageEncodingError)
}
