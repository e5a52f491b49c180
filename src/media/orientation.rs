// SPDX-License-Identifier: MPL-2.0
//! EXIF orientation handling for JPEG inputs.

use image_rs::DynamicImage;
use std::io::Cursor;

/// Reads the EXIF orientation tag (1..=8) from encoded bytes.
pub fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0).filter(|value| (1..=8).contains(value))
}

/// Rotates and flips the image so it displays upright.
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{GenericImageView, Rgb, RgbImage};

    fn marked() -> DynamicImage {
        // 2x1: red on the left, blue on the right
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn upright_is_untouched() {
        let img = apply_orientation(marked(), 1);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn mirrored_flips_horizontally() {
        let img = apply_orientation(marked(), 2);
        assert_eq!(img.get_pixel(0, 0).0[2], 255);
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        assert_eq!(apply_orientation(marked(), 6).dimensions(), (1, 2));
        assert_eq!(apply_orientation(marked(), 8).dimensions(), (1, 2));
        assert_eq!(apply_orientation(marked(), 5).dimensions(), (1, 2));
    }

    #[test]
    fn bytes_without_exif_have_no_orientation() {
        assert_eq!(read_orientation(b"plain bytes"), None);
    }
}
