//! The RGBA cover image and its 2-bit LSB substitution codec.
//!
//! Each pixel stores one payload byte: the byte is split into four 2-bit
//! groups, least significant first, and each group replaces the 2 low bits
//! of one channel (channel 0 gets the lowest bits, alpha the highest). The
//! 6 high bits of every channel are visual content and are never touched
//! outside of [`Carrier::clean`].

use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::payload::Payload;
use crate::result::Result;
use crate::StowawayError;

/// The envelope prefix used to probabilistically recognize an embedded payload.
pub const DETECTION_SIGNATURE: &str = "{\"type\"";

/// The two bytes that terminate every envelope: `"` then `}`.
const ENVELOPE_TERMINATOR: [u8; 2] = [b'"', b'}'];

const CHANNEL_MASK: u8 = 0b0000_0011;

/// The cover image. Owns its buffer and never mutates it: embedding and
/// cleaning hand back fresh buffers for the caller to wrap as needed.
#[derive(Debug, Clone)]
pub struct Carrier {
    img: RgbaImage,
}

impl Carrier {
    pub fn new(img: RgbaImage) -> Self {
        Self { img }
    }

    /// Creates a carrier from a flat row-major buffer, which must be exactly
    /// `width * height * 4` bytes. Legacy tooling accepted any ">= 4 channel"
    /// layout here while the bit math silently assumed 4; this constructor
    /// closes that gap.
    pub fn from_raw(width: u32, height: u32, buf: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if buf.len() != expected {
            return Err(StowawayError::InvalidCarrierBuffer {
                width,
                height,
                expected,
                actual: buf.len(),
            });
        }

        // length was checked above, so the buffer always fits
        let img = RgbaImage::from_raw(width, height, buf)
            .ok_or(StowawayError::InvalidImageMedia)?;

        Ok(Self { img })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    /// The maximum envelope length in bytes: one byte per pixel.
    pub fn capacity(&self) -> usize {
        self.img.width() as usize * self.img.height() as usize
    }

    /// Reports whether the first pixels of row 0 spell out the envelope
    /// signature. This is a 7-byte heuristic, not a proof: random low bits
    /// can collide with it, and only the start of the image is inspected.
    /// Any failure to decode is treated as "no payload".
    pub fn detect(&self) -> bool {
        let signature = DETECTION_SIGNATURE.as_bytes();
        if self.img.height() == 0 || (self.img.width() as usize) < signature.len() {
            return false;
        }

        let mut prefix = [0u8; 7];
        for (w, byte) in prefix.iter_mut().enumerate() {
            *byte = assemble_byte(self.img.get_pixel(w as u32, 0));
        }

        match std::str::from_utf8(&prefix) {
            Ok(text) => text == DETECTION_SIGNATURE,
            Err(_) => false,
        }
    }

    /// Writes the payload's envelope bytes into the low bit plane and
    /// returns the resulting buffer. Pixels past the envelope keep their
    /// low bits as they were; nothing is randomized.
    pub fn embed(&self, payload: &Payload, override_existing: bool) -> Result<RgbaImage> {
        let envelope = payload.envelope().as_bytes();
        let capacity = self.capacity();
        if envelope.len() > capacity {
            return Err(StowawayError::PayloadTooLarge {
                needed: envelope.len(),
                capacity,
            });
        }
        if self.detect() && !override_existing {
            return Err(StowawayError::PayloadAlreadyPresent);
        }

        let mut out = self.img.clone();
        let width = self.img.width() as usize;
        for (i, byte) in envelope.iter().enumerate() {
            let (x, y) = ((i % width) as u32, (i / width) as u32);
            scatter_byte(out.get_pixel_mut(x, y), *byte);
        }

        Ok(out)
    }

    /// Reads the whole bit plane back, truncates at the envelope terminator
    /// and deserializes the result into a payload.
    pub fn extract(&self) -> Result<Payload> {
        let mut stream = Vec::with_capacity(self.capacity());
        for pixel in self.img.pixels() {
            stream.push(assemble_byte(pixel));
        }

        let end = stream
            .windows(2)
            .position(|pair| pair == ENVELOPE_TERMINATOR)
            .ok_or(StowawayError::TerminatorNotFound)?;
        stream.truncate(end + ENVELOPE_TERMINATOR.len());

        let envelope = String::from_utf8(stream)?;
        Payload::from_envelope(envelope)
    }

    /// Scrubs the whole bit plane by XOR-ing every channel's low 2 bits with
    /// an independent uniform 2-bit draw, and returns the resulting buffer.
    /// The scrub covers the full image whether or not a payload is present.
    pub fn clean(&self) -> RgbaImage {
        let mut rng = rand::thread_rng();
        let mut out = self.img.clone();
        for pixel in out.pixels_mut() {
            for channel in pixel.0.iter_mut() {
                *channel ^= rng.gen_range(0..=CHANNEL_MASK);
            }
        }

        out
    }
}

impl From<RgbaImage> for Carrier {
    fn from(img: RgbaImage) -> Self {
        Self::new(img)
    }
}

/// Reassembles one payload byte from the 2 low bits of each channel,
/// channel 0 contributing the least significant bits.
#[inline]
fn assemble_byte(pixel: &Rgba<u8>) -> u8 {
    pixel
        .0
        .iter()
        .enumerate()
        .fold(0u8, |byte, (c, channel)| {
            byte | ((channel & CHANNEL_MASK) << (2 * c as u32))
        })
}

/// Spreads one payload byte over the 2 low bits of each channel, keeping
/// the 6 high bits of every channel unchanged.
#[inline]
fn scatter_byte(pixel: &mut Rgba<u8>, byte: u8) {
    for (c, channel) in pixel.0.iter_mut().enumerate() {
        *channel = (*channel & !CHANNEL_MASK) | ((byte >> (2 * c as u32)) & CHANNEL_MASK);
    }
}
