use anyhow::Result;
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use qrcode::{types::Color, QrCode};
use std::io::Cursor;

/// Pixels per QR module.
const SCALE: u32 = 8;
/// Quiet zone around the code, in modules.
const MARGIN: u32 = 4;

/// Encode a check-in payload as a PNG for the attendee's personal QR code.
pub fn render_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(data.as_bytes())?;
    let module_count = code.width() as u32;
    let image_size = (module_count + MARGIN * 2) * SCALE;
    let mut img = ImageBuffer::from_pixel(image_size, image_size, Luma([255u8]));
    let colors = code.to_colors();

    for y in 0..module_count {
        for x in 0..module_count {
            let index = (y * module_count + x) as usize;
            if colors[index] == Color::Dark {
                let x0 = (x + MARGIN) * SCALE;
                let y0 = (y + MARGIN) * SCALE;
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        img.put_pixel(x0 + dx, y0 + dy, Luma([0u8]));
                    }
                }
            }
        }
    }

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img).write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_png() {
        let png = render_png("emas://checkin/4b8c5ad4").unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_png("emas://checkin/4b8c5ad4").unwrap();
        let b = render_png("emas://checkin/4b8c5ad4").unwrap();
        assert_eq!(a, b);
    }
}
