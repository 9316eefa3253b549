//! # Stowaway Core
//!
//! Hides an arbitrary payload (text, grayscale image or RGB color image)
//! inside the two least significant bits of every channel of an RGBA
//! carrier image, and later detects, extracts or erases it again.
//!
//! Two value types make up the codec:
//! - [`Payload`]: raw content plus its canonical single-line envelope text
//! - [`Carrier`]: the cover image with `detect` / `embed` / `extract` /
//!   `clean` over its low bit plane
//!
//! Both are immutable: every operation returns a fresh buffer or payload
//! instead of mutating shared state.
//!
//! ## In-memory round trip
//!
//! ```rust
//! use stowaway_core::{Carrier, CompressionLevel, Content, Payload};
//!
//! let payload = Payload::from_content(Content::text("hi"), CompressionLevel::NONE)
//!     .expect("Failed to build payload");
//!
//! let carrier = Carrier::new(image::RgbaImage::new(16, 16));
//! let embedded = Carrier::new(carrier.embed(&payload, false).expect("Failed to embed"));
//! assert!(embedded.detect());
//!
//! let unveiled = embedded.extract().expect("Failed to extract");
//! assert_eq!(unveiled.content(), &Content::text("hi"));
//! ```

pub mod carrier;
pub mod commands;
pub mod error;
pub mod payload;
pub mod result;

pub use crate::carrier::{Carrier, DETECTION_SIGNATURE};
pub use crate::error::StowawayError;
pub use crate::payload::{CompressionLevel, Content, Payload};
pub use crate::result::Result;
