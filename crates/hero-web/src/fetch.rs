use anyhow::anyhow;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch a resource as raw bytes. Callers own cancellation: results arriving
/// after teardown are checked against the lifetime flag and discarded.
pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch {url}: {e:?}"))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow!("fetch {url}: not a Response: {e:?}"))?;
    if !resp.ok() {
        return Err(anyhow!("fetch {url}: http {}", resp.status()));
    }
    let buf = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| anyhow!("fetch {url}: {e:?}"))?,
    )
    .await
    .map_err(|e| anyhow!("fetch {url}: {e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
