//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Reads QR codes back out of rendered images
#[derive(Debug, Clone, Default)]
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Open an image file and decode the QR code in it
    pub fn decode_file(&self, path: &Path) -> Result<QrPayload> {
        let img = image::open(path)?;
        self.decode(&img)
    }

    /// Decode the QR code in an image of any color type
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        self.decode_gray(&img.to_luma8())
    }

    /// Decode the first QR code grid found in a grayscale image
    pub fn decode_gray(&self, img: &GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());
        let grids = prepared.detect_grids();
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        let (meta, content) = grid
            .decode()
            .map_err(|e| Error::QrDecode(format!("{e:?}")))?;

        tracing::debug!(
            version = meta.version.0,
            ecc_level = meta.ecc_level,
            bytes = content.len(),
            "QR grid decoded"
        );

        Ok(QrPayload::from_bytes(content.into_bytes()))
    }
}
