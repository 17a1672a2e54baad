use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;

    fn read_key(global: &str, keys: &[&str]) -> Option<String> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &global.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .and_then(|v| v.as_string())
        })
    }

    // window.__ACCOUNTS_ENV = { API_BASE_URL: "..." } wins over window.__ACCOUNTS_CONFIG.
    pub fn snapshot() -> Option<String> {
        read_key("__ACCOUNTS_ENV", &["API_BASE_URL", "api_base_url"])
            .or_else(|| read_key("__ACCOUNTS_CONFIG", &["api_base_url", "API_BASE_URL"]))
    }

    pub fn write(cfg: &RuntimeConfig) {
        let Some(url) = &cfg.api_base_url else {
            return;
        };
        let Some(w) = web_sys::window() else {
            return;
        };
        let obj = js_sys::Object::new();
        let _ = js_sys::Reflect::set(
            &obj,
            &"api_base_url".into(),
            &wasm_bindgen::JsValue::from_str(url),
        );
        let _ = js_sys::Reflect::set(&w, &"__ACCOUNTS_CONFIG".into(), &obj);
    }

    pub fn origin() -> Option<String> {
        web_sys::window()?.location().origin().ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> Option<String> {
        None
    }

    pub fn write(_cfg: &RuntimeConfig) {}

    pub fn origin() -> Option<String> {
        None
    }
}

fn cache_base_url(value: &str) -> String {
    let _ = API_BASE_URL.set(value.to_string());
    API_BASE_URL.get().cloned().unwrap_or_else(|| value.to_string())
}

async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    let origin = globals::origin().context("no window origin")?;
    let resp = reqwest::get(format!("{}/config.json", origin))
        .await
        .context("config.json request failed")?;
    if !resp.status().is_success() {
        anyhow::bail!("config.json returned {}", resp.status());
    }
    resp.json::<RuntimeConfig>()
        .await
        .context("config.json is not valid runtime config")
}

pub fn resolve_base_url(config: &RuntimeConfig) -> String {
    config
        .api_base_url
        .as_deref()
        .map(|url| url.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = globals::snapshot() {
        let cfg = RuntimeConfig {
            api_base_url: Some(existing),
        };
        return cache_base_url(&resolve_base_url(&cfg));
    }
    match fetch_runtime_config().await {
        Ok(cfg) => {
            globals::write(&cfg);
            cache_base_url(&resolve_base_url(&cfg))
        }
        Err(err) => {
            log::debug!("runtime config unavailable, using default: {:#}", err);
            cache_base_url(DEFAULT_API_BASE_URL)
        }
    }
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("API base URL: {}", url);
}
