//! QR code encoder

use crate::error::Result;
use crate::qr::QrPayload;
use image::{DynamicImage, Luma};
use qrcode::{EcLevel, QrCode};

/// Width of the standard quiet zone, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Rendering parameters for generated QR images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Error correction level
    pub ecc_level: EcLevel,
    /// Pixels per module along each axis
    pub box_size: u32,
    /// Surround the symbol with the 4-module quiet zone
    pub quiet_zone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ecc_level: EcLevel::M,
            box_size: 10,
            quiet_zone: true,
        }
    }
}

/// QR code encoder
#[derive(Debug, Clone, Default)]
pub struct QrEncoder {
    options: RenderOptions,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, 10px boxes, quiet zone)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new QR encoder with explicit render options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self::with_options(RenderOptions {
            ecc_level,
            ..RenderOptions::default()
        })
    }

    /// The options this encoder renders with
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Encode data into a QR code image
    ///
    /// The smallest QR version that fits the payload is chosen automatically.
    pub fn encode(&self, payload: &QrPayload) -> Result<DynamicImage> {
        let code = QrCode::with_error_correction_level(&payload.data, self.options.ecc_level)?;

        let box_size = self.options.box_size.max(1);
        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(self.options.quiet_zone)
            .module_dimensions(box_size, box_size)
            .dark_color(Luma([0u8]))
            .light_color(Luma([255u8]))
            .build();

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            width = image.width(),
            "Rendered QR code"
        );

        Ok(DynamicImage::ImageLuma8(image))
    }

    /// Encode a string into a QR code image
    pub fn encode_string(&self, data: &str) -> Result<DynamicImage> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload)
    }

    /// Encode bytes into a QR code image
    pub fn encode_bytes(&self, data: &[u8]) -> Result<DynamicImage> {
        let payload = QrPayload::from_bytes(data.to_vec());
        self.encode(&payload)
    }
}
