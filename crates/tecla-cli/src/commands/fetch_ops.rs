use std::fs;

use tecla_core::LayoutDocument;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP: {0}")]
    Http(String),
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("layout: {0}")]
    Layout(#[from] tecla_core::LayoutError),
}

/// Download a layout document as text.
pub fn download(url: &str) -> Result<String, FetchError> {
    ureq::get(url)
        .call()
        .map_err(|e| FetchError::Http(format!("{url}: {e}")))?
        .into_body()
        .read_to_string()
        .map_err(|e| FetchError::Http(format!("{url}: {e}")))
}

/// Parse downloaded text and, when it loads, optionally save it.
pub fn check_and_save(body: &str, output: Option<&str>) -> Result<LayoutDocument, FetchError> {
    let doc = LayoutDocument::from_json_str(body)?;
    if let Some(path) = output {
        fs::write(path, body)?;
    }
    Ok(doc)
}

pub fn fetch(url: &str, output: Option<&str>) {
    eprintln!("Downloading {url}...");
    let body = die!(download(url), "Error: {}");
    let doc = die!(check_and_save(&body, output), "Error: {}");
    let keys: usize = doc.designs().iter().map(|d| d.keys.len()).sum();
    println!(
        "OK: {} bytes, {} designs, {} keys",
        body.len(),
        doc.designs().len(),
        keys
    );
    if let Some(path) = output {
        println!("Saved to {path}");
    }
}
