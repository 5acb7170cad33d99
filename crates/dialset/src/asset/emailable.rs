//! Emailable variant of an image asset
//!
//! Mail clients render inline PNGs reliably and large images poorly, so an
//! image is re-encoded as PNG and downscaled to fit a bounding box when needed.

use image::{ImageFormat, ImageReader, imageops::FilterType};
use std::io::Cursor;

use crate::prelude::*;

pub const EMAILABLE_FORMAT: ImageFormat = ImageFormat::Png;
pub const EMAILABLE_MIME_TYPE: &str = "image/png";

fn image_reader(bytes: &[u8]) -> DsResult<ImageReader<Cursor<&[u8]>>> {
	Ok(ImageReader::new(Cursor::new(bytes)).with_guessed_format()?)
}

/// Return `handle` unchanged when it is already a PNG within `max_dim` on both
/// sides. Otherwise return a new PNG handle, downscaled with Lanczos3 to fit
/// `max_dim` (aspect ratio preserved, never upscaled).
pub fn resolve_emailable_asset(handle: &AssetHandle, max_dim: u32) -> DsResult<AssetHandle> {
	if max_dim == 0 {
		return Err(Error::ValidationError("emailable max dimension must be positive".into()));
	}

	let reader = image_reader(&handle.bytes)?;
	let format = reader.format();
	let (width, height) = reader.into_dimensions()?;
	let oversized = width > max_dim || height > max_dim;

	if !oversized && format == Some(EMAILABLE_FORMAT) {
		return Ok(handle.clone());
	}

	let now = std::time::Instant::now();
	let mut image = image_reader(&handle.bytes)?.decode()?;
	if oversized {
		image = image.resize(max_dim, max_dim, FilterType::Lanczos3);
	}

	let mut output = Cursor::new(Vec::new());
	image.write_to(&mut output, EMAILABLE_FORMAT)?;
	debug!(
		"Emailable variant {:?} {}x{} -> png {}x{} [{:.2}ms]",
		format,
		width,
		height,
		image.width(),
		image.height(),
		now.elapsed().as_secs_f64() * 1000.0
	);

	Ok(AssetHandle::new(output.into_inner(), EMAILABLE_MIME_TYPE))
}


// vim: ts=4
