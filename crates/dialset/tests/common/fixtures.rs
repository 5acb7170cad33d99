//! Image fixtures

use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Encode a gradient image of the given size
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
	let img = RgbaImage::from_fn(width, height, |x, y| {
		Rgba([(x % 256) as u8, (y % 256) as u8, 0x40, 0xff])
	});
	let img = if format == ImageFormat::Jpeg {
		DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8())
	} else {
		DynamicImage::ImageRgba8(img)
	};
	let mut out = Cursor::new(Vec::new());
	img.write_to(&mut out, format).expect("Failed to encode fixture");
	out.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
	image_bytes(width, height, ImageFormat::Png)
}

/// Decoded (width, height) and format of an encoded image
pub fn image_info(bytes: &[u8]) -> ((u32, u32), ImageFormat) {
	let format = image::guess_format(bytes).expect("Unknown image format");
	let img = image::load_from_memory(bytes).expect("Failed to decode image");
	(img.dimensions(), format)
}

// vim: ts=4
