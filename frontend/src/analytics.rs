use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

static TRACKING_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").unwrap());

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = gtag)]
    fn gtag(command: &str, target: &str, params: &JsValue) -> Result<(), JsValue>;
}

/// Thin wrapper over the hosted gtag SDK. Without a tracking id every call is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct Analytics {
    tracking_id: Option<String>,
}

impl Analytics {
    pub fn new(tracking_id: Option<String>) -> Self {
        let tracking_id = tracking_id.filter(|id| {
            let ok = TRACKING_ID_RE.is_match(id);
            if !ok {
                warn!("Ignoring malformed analytics id");
            }
            ok
        });
        Self { tracking_id }
    }

    pub fn is_enabled(&self) -> bool {
        self.tracking_id.is_some()
    }

    /// Loads the SDK script and configures it. Page views are sent manually on route change.
    pub fn init(&self) {
        let Some(id) = &self.tracking_id else {
            debug!("Analytics disabled");
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(head) = document.head() else {
            return;
        };

        let loader = document.create_element("script").and_then(|script| {
            script.set_attribute("async", "")?;
            script.set_attribute("src", &format!("https://www.googletagmanager.com/gtag/js?id={}", id))?;
            head.append_child(&script)?;
            Ok(())
        });
        let bootstrap = document.create_element("script").and_then(|script| {
            script.set_text_content(Some(&format!(
                "window.dataLayer = window.dataLayer || [];\
                 function gtag(){{dataLayer.push(arguments);}}\
                 gtag('js', new Date());\
                 gtag('config', '{}', {{ send_page_view: false }});",
                id
            )));
            head.append_child(&script)?;
            Ok(())
        });
        if loader.is_err() || bootstrap.is_err() {
            warn!("Failed to inject analytics scripts");
        }
    }

    pub fn page_view(&self, path: &str) {
        self.event("page_view", json!({ "page_path": path }));
    }

    pub fn event(&self, name: &str, params: Value) {
        if !self.is_enabled() {
            return;
        }
        let params = match params.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(v) => v,
            Err(e) => {
                warn!("Could not encode analytics params: {}", e);
                return;
            }
        };
        if let Err(e) = gtag("event", name, &params) {
            debug!("gtag unavailable: {:?}", e);
        }
    }
}
