//! Format-specific extraction to text. Binary formats without an
//! extractor fail with [`UmafError::UnsupportedExtraction`].

pub mod html;
pub mod ocr;
pub mod pdf;
pub mod rtf;

use crate::error::{Result, UmafError};
use crate::normalize::decode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    Text,
    Html,
    Pdf,
    Docx,
    Rtf,
    Ocr,
}

impl Adapter {
    pub fn extract(self, bytes: &[u8]) -> Result<String> {
        match self {
            Adapter::Text => Ok(decode(bytes)),
            Adapter::Html => Ok(html::html_to_markdownish(&decode(bytes))),
            Adapter::Rtf => Ok(rtf::extract_text(&decode(bytes))),
            Adapter::Pdf => pdf::extract_markdownish(bytes),
            Adapter::Docx => Err(unsupported(
                "docx",
                "no Word document extractor is built in; convert to text or RTF first",
            )),
            Adapter::Ocr => Err(unsupported(
                "image",
                "OCR is not available on this platform; pass recognized lines to ocr::join_ocr_lines",
            )),
        }
    }
}

fn unsupported(format: &str, reason: &str) -> UmafError {
    UmafError::UnsupportedExtraction {
        format: format.to_string(),
        reason: reason.to_string(),
    }
}
