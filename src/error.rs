use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("element has the wrong type: {0}")]
    UnexpectedElement(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("invalid interaction config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SetupError::Js(message)
    }
}
