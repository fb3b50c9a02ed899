//! Writes the local server URL as a QR code PNG

use crate::error::Result;
use crate::qr::QrEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// URL of the development server on the local network.
pub const LOCAL_URL: &str = "http://192.168.100.70:8000";

/// File the QR code is written to, relative to the output directory.
pub const OUTPUT_FILE: &str = "qrcode_local.png";

/// Line printed once the image has been saved.
pub const CONFIRMATION: &str = "QRコード画像を保存しました: qrcode_local.png";

/// Renders [`LOCAL_URL`] and saves it as [`OUTPUT_FILE`]
#[derive(Debug, Clone, Default)]
pub struct QrEmitter {
    encoder: QrEncoder,
}

impl QrEmitter {
    /// Emitter using the default encoder settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitter using a custom encoder
    pub fn with_encoder(encoder: QrEncoder) -> Self {
        Self { encoder }
    }

    /// Render the QR code for [`LOCAL_URL`]
    pub fn render(&self) -> Result<DynamicImage> {
        self.encoder.encode_string(LOCAL_URL)
    }

    /// Write [`OUTPUT_FILE`] into the current working directory.
    pub fn emit(&self) -> Result<PathBuf> {
        self.emit_in(Path::new("."))
    }

    /// Write [`OUTPUT_FILE`] into `dir`, replacing any existing file.
    pub fn emit_in(&self, dir: &Path) -> Result<PathBuf> {
        let image = self.render()?;
        let path = if dir == Path::new(".") {
            PathBuf::from(OUTPUT_FILE)
        } else {
            dir.join(OUTPUT_FILE)
        };

        let png = encode_png(&image)?;
        write_output(&path, &png)?;

        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Saved QR code for {LOCAL_URL}"
        );

        Ok(path)
    }
}

/// Encode `image` as PNG bytes in memory.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Write `bytes` to `path` and sync it to disk. A partially written file is removed.
fn write_output(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let result = File::create(path).and_then(|mut file| {
        write_flushed(&mut file, bytes)?;
        file.sync_all()
    });

    if let Err(err) = result {
        if path.is_file() {
            if let Err(remove_err) = fs::remove_file(path) {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to remove partial output: {remove_err}"
                );
            }
        }
        return Err(err);
    }
    Ok(())
}

fn write_flushed<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    writer.write_all(bytes)?;
    writer.flush()
}

/// The confirmation line shown after a successful [`QrEmitter::emit`].
pub fn confirmation() -> &'static str {
    CONFIRMATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::qr::QrDecoder;

    #[test]
    fn test_render_decodes_to_local_url() {
        let image = QrEmitter::new().render().unwrap();
        let decoded = QrDecoder::new().decode(&image).unwrap();
        assert_eq!(decoded.as_str(), Some(LOCAL_URL));
    }

    #[test]
    fn test_emit_in_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = QrEmitter::new().emit_in(dir.path()).unwrap();

        assert_eq!(path, dir.path().join(OUTPUT_FILE));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_emit_in_missing_directory_fails_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = QrEmitter::new().emit_in(&missing);
        assert!(matches!(result, Err(Error::Io(_))), "got {result:?}");
        assert!(!missing.join(OUTPUT_FILE).exists());
    }

    /// Accepts writes into a buffer but fails when asked to flush, like a
    /// buffered writer whose deferred write hits a full disk.
    struct FullOnFlush(Vec<u8>);

    impl Write for FullOnFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn test_flush_failure_is_reported() {
        let png = encode_png(&QrEmitter::new().render().unwrap()).unwrap();
        let mut writer = FullOnFlush(Vec::new());

        let err = write_flushed(&mut writer, &png).unwrap_err();
        assert_eq!(err.to_string(), "no space left on device");
        assert_eq!(writer.0.len(), png.len());
    }

    #[test]
    fn test_encode_png_produces_png_bytes() {
        let png = encode_png(&QrEmitter::new().render().unwrap()).unwrap();
        assert_eq!(image::guess_format(&png).unwrap(), ImageFormat::Png);
        let decoded = QrDecoder::new()
            .decode(&image::load_from_memory(&png).unwrap())
            .unwrap();
        assert_eq!(decoded.as_str(), Some(LOCAL_URL));
    }

    #[test]
    fn test_emit_in_fails_when_output_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join(OUTPUT_FILE);
        std::fs::create_dir(&blocker).unwrap();

        let result = QrEmitter::new().emit_in(dir.path());
        assert!(matches!(result, Err(Error::Io(_))), "got {result:?}");
        assert!(blocker.is_dir());
    }

    #[test]
    fn test_emit_in_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OUTPUT_FILE);
        std::fs::write(&path, vec![0u8; 64 * 1024]).unwrap();

        QrEmitter::new().emit_in(dir.path()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() < 64 * 1024);
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_confirmation_names_output_file() {
        assert!(confirmation().ends_with(OUTPUT_FILE));
        assert_eq!(confirmation(), "QRコード画像を保存しました: qrcode_local.png");
    }
}
