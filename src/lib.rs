//! # qrforge
//!
//! Encodes text into ISO 18004 QR Code symbols: automatic mode and version selection,
//! Reed-Solomon error correction with block interleaving, and penalty scored masking.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrforge::{encode, EncodeOptions, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = encode("HELLO WORLD", Some(ECLevel::Q), None, None, &EncodeOptions::default())?;
//! assert_eq!(qr.width(), 21);
//!
//! let img = qr.to_image(4)?; // 4 pixels per module
//! assert_eq!(img.width(), (21 + 2 * 4) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Builder
//!
//! ```rust
//! use qrforge::{CharacterSet, ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Grüße, 世界")
//!     .version(Version::new(3)?)          // Minimum version, grows when the content needs more
//!     .ec_level(ECLevel::M)               // Defaults to L
//!     .character_set(CharacterSet::Utf8)  // Defaults to ISO-8859-1, announced through ECI
//!     .mask(MaskPattern::new(3)?)         // Defaults to the lowest penalty mask
//!     .build()?;
//!
//! let canvas = qr.render(200, 200, 4)?;
//! assert_eq!(canvas.width(), 200);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% recovery
//! - **M (Medium)**: ~15% recovery
//! - **Q (Quartile)**: ~25% recovery
//! - **H (High)**: ~30% recovery

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{encode, EncodeOptions, Module, QRBuilder, DEFAULT_EC_LEVEL, DEFAULT_MARGIN, QR};
pub use common::bit_matrix::BitMatrix;
pub use common::bitstream::BitStream;
pub use common::codec::{CharacterSet, Mode};
pub use common::ec::ReedSolomonEncoder;
pub use common::error::{QRError, QRResult};
pub use common::galois::{
    GaloisField, AZTEC_DATA_10, AZTEC_DATA_12, AZTEC_DATA_6, AZTEC_DATA_8, AZTEC_PARAM,
    DATA_MATRIX_FIELD_256, MAXICODE_FIELD_64, QR_CODE_FIELD_256,
};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, FormatInfo, Version};
pub use common::poly::Polynomial;
