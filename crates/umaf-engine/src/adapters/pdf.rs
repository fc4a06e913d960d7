use crate::error::{Result, UmafError};

/// Extracts text page by page and lays it out with [`pages_to_markdownish`].
pub fn extract_markdownish(bytes: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|err| {
        UmafError::Extraction {
            format: "pdf".to_string(),
            reason: err.to_string(),
        }
    })?;
    Ok(pages_to_markdownish(&pages))
}

/// Lays out already-extracted PDF page text as one `# Page N` section per page.
pub fn pages_to_markdownish<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("# Page {}\n\n{}", i + 1, page.as_ref().trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
