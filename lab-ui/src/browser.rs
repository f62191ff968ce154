//! Browser interop: the stored session token and file downloads.
//!
//! Each call touches `window` only when invoked. Nothing here caches the
//! token; the caller builds a `Session` once and passes it on.

use js_sys::{Array, Uint8Array};
use lab_core::config::Session;
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// localStorage key the login page writes the bearer token under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Session built from the token in localStorage, or an anonymous one.
pub fn stored_session() -> Session {
    let token = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(TOKEN_STORAGE_KEY).ok().flatten());
    if token.is_none() {
        warn!("[LAB] no token under '{}' in localStorage", TOKEN_STORAGE_KEY);
    }
    Session::from_optional(token)
}

/// Hand `bytes` to the browser as a file download.
pub fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes).buffer());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    Url::revoke_object_url(&url)
}
