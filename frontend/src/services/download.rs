//! Téléchargement de l'image QRIS
//!
//! Un `<a download>` vers une autre origine est ignoré par le navigateur :
//! on récupère l'image en blob, on la sauvegarde via une URL objet, et en cas
//! d'échec (CORS, réseau) on retombe sur le lien direct.

use gloo_net::http::Request;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlAnchorElement, Url};

/// Libellé du bouton de téléchargement
pub fn download_label(downloading: bool) -> &'static str {
    if downloading {
        "DOWNLOADING..."
    } else {
        "download_buffer(.jpg)"
    }
}

/// Libellé du bouton de copie
pub fn copy_label(copied: bool) -> &'static str {
    if copied {
        "COPIED"
    } else {
        "COPY"
    }
}

/// Sauvegarde `url` sous `file_name`, avec repli sur le lien direct
pub async fn download_image(url: &str, file_name: &str) {
    match save_remote(url, file_name).await {
        Ok(()) => log::info!("📥 Saved {} as {}", url, file_name),
        Err(e) => {
            log::warn!("⚠️ Download failed, falling back to direct link: {}", e);
            if let Err(e) = click_link(url, file_name, true) {
                log::error!("❌ Direct link failed: {:?}", e);
            }
        }
    }
}

async fn save_remote(url: &str, file_name: &str) -> Result<(), String> {
    let response = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(fetch_error(response.status(), &response.status_text()));
    }
    let bytes = response.binary().await.map_err(|e| e.to_string())?;
    save_bytes(&bytes, file_name).map_err(|e| format!("{:?}", e))
}

fn save_bytes(bytes: &[u8], file_name: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&parts)?;
    let href = Url::create_object_url_with_blob(&blob)?;
    let clicked = click_link(&href, file_name, false);
    Url::revoke_object_url(&href)?;
    clicked
}

fn click_link(href: &str, file_name: &str, new_tab: bool) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
    link.set_href(href);
    link.set_download(file_name);
    if new_tab {
        link.set_target("_blank");
    }
    link.click();
    Ok(())
}

fn fetch_error(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {} {}", status, status_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_labels() {
        assert_eq!(download_label(false), "download_buffer(.jpg)");
        assert_eq!(download_label(true), "DOWNLOADING...");
        assert_eq!(copy_label(false), "COPY");
        assert_eq!(copy_label(true), "COPIED");
    }

    #[test]
    fn test_fetch_error() {
        assert_eq!(fetch_error(404, "Not Found"), "HTTP 404 Not Found");
        assert_eq!(fetch_error(0, ""), "HTTP 0");
    }
}
