//! Reading the files picked in an `<input type="file">`

use crate::api::FileUpload;
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// Accept list for evidence pickers.
pub const EVIDENCE_ACCEPT: &str = "image/*,video/*,.pdf,.doc,.docx";

pub async fn selected_files(input: &HtmlInputElement) -> Result<Vec<FileUpload>, String> {
    let Some(list) = input.files() else {
        return Ok(Vec::new());
    };

    let mut files = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        let Some(file) = list.get(i) else {
            continue;
        };
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| format!("could not read {}: {:?}", file.name(), e))?;
        files.push(FileUpload {
            name: file.name(),
            content_type: file.type_(),
            bytes: Uint8Array::new(&buffer).to_vec(),
        });
    }
    Ok(files)
}
