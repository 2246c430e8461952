//! Extraction of the `parameters` text chunk that image generators embed in
//! the PNGs they write.

use ::png::{Decoder, DecodingError, Info};
use thiserror::Error;

pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
pub const PARAMETERS_KEYWORD: &str = "parameters";

/// Upper bound on the inflated size of a compressed text chunk.
pub const MAX_TEXT_BYTES: usize = 1 << 20;

#[derive(Error, Debug)]
pub enum PngError {
    #[error("input is not a PNG image")]
    NotPng,
    #[error("failed to decode PNG: {0}")]
    Decode(#[from] DecodingError),
    #[error("could not inflate {keyword} text chunk within {limit} bytes")]
    TextDecompress { keyword: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, PngError>;

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(PNG_SIGNATURE)
}

/// Returns the generation metadata stored under the `parameters` keyword, if any.
///
/// Text chunks ahead of the image data are checked first; the rest of the
/// file is only read when none of them match.
pub fn read_parameters(bytes: &[u8]) -> Result<Option<String>> {
    if !is_png(bytes) {
        return Err(PngError::NotPng);
    }

    let mut reader = Decoder::new(bytes).read_info()?;
    if let Some(text) = find_parameters(reader.info())? {
        return Ok(Some(text));
    }

    reader.finish()?;
    find_parameters(reader.info())
}

/// True when the image carries a readable `parameters` chunk.
pub fn has_parameters(bytes: &[u8]) -> bool {
    matches!(read_parameters(bytes), Ok(Some(_)))
}

fn find_parameters(info: &Info<'_>) -> Result<Option<String>> {
    tracing::trace!(
        text = info.uncompressed_latin1_text.len(),
        ztxt = info.compressed_latin1_text.len(),
        itxt = info.utf8_text.len(),
        "png text chunks"
    );

    if let Some(chunk) = info
        .uncompressed_latin1_text
        .iter()
        .find(|chunk| chunk.keyword == PARAMETERS_KEYWORD)
    {
        return Ok(Some(chunk.text.clone()));
    }

    if let Some(chunk) = info
        .compressed_latin1_text
        .iter()
        .find(|chunk| chunk.keyword == PARAMETERS_KEYWORD)
    {
        let mut chunk = chunk.clone();
        chunk
            .decompress_text_with_limit(MAX_TEXT_BYTES)
            .map_err(|_| decompress_failed())?;
        return Ok(Some(chunk.get_text()?));
    }

    if let Some(chunk) = info
        .utf8_text
        .iter()
        .find(|chunk| chunk.keyword == PARAMETERS_KEYWORD)
    {
        let mut chunk = chunk.clone();
        chunk
            .decompress_text_with_limit(MAX_TEXT_BYTES)
            .map_err(|_| decompress_failed())?;
        return Ok(Some(chunk.get_text()?));
    }

    Ok(None)
}

fn decompress_failed() -> PngError {
    PngError::TextDecompress {
        keyword: PARAMETERS_KEYWORD.to_string(),
        limit: MAX_TEXT_BYTES,
    }
}
