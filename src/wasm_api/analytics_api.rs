use wasm_bindgen::prelude::*;

use crate::data_loading::DataLoaderFactory;
use crate::engine::{AnalysisEngine, AnalysisOperation, AnalysisParameters};
use crate::error::AnalysisError;

/// WASM boundary analytického enginu. Jediné miesto, kde sa pracuje
/// s JsValue a časom - enginy pod ním ostávajú čisté a deterministické.
#[wasm_bindgen]
pub struct WasmAnalyticsEngine;

#[wasm_bindgen]
impl WasmAnalyticsEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmAnalyticsEngine {
        console_error_panic_hook::set_once();
        WasmAnalyticsEngine
    }

    /// Spustí analýzu nad textovými dátami.
    /// Odpoveď: `{ success, data, analysis_type, timestamp }`,
    /// chyba: `{ success: false, error, message }`.
    #[wasm_bindgen(js_name = analyze)]
    pub fn analyze(
        &self,
        data: &str,
        format: &str,
        analysis_type: &str,
        params: JsValue,
    ) -> Result<JsValue, JsValue> {
        let loader = DataLoaderFactory::create(format).map_err(error_to_js)?;
        let table = loader.load_from_string(data).map_err(error_to_js)?;

        let operation = AnalysisOperation::parse(analysis_type).map_err(error_to_js)?;
        let parameters: AnalysisParameters = if params.is_undefined() || params.is_null() {
            AnalysisParameters::default()
        } else {
            serde_wasm_bindgen::from_value(params).map_err(|e| {
                error_to_js(AnalysisError::Validation(format!(
                    "Nevalidné parametre analýzy: {}",
                    e
                )))
            })?
        };

        let output =
            AnalysisEngine::analyze(&table, operation, &parameters).map_err(error_to_js)?;

        let response = serde_json::json!({
            "success": true,
            "data": output,
            "analysis_type": operation.name(),
            "timestamp": now_millis(),
        });
        serde_wasm_bindgen::to_value(&response).map_err(|e| {
            error_to_js(AnalysisError::Analysis(format!(
                "Serializácia odpovede zlyhala: {}",
                e
            )))
        })
    }

    /// Zoznam stĺpcov bez spustenia analýzy
    #[wasm_bindgen(js_name = availableColumns)]
    pub fn available_columns(&self, data: &str, format: &str) -> Result<JsValue, JsValue> {
        let loader = DataLoaderFactory::create(format).map_err(error_to_js)?;
        let columns = loader.get_available_columns(data).map_err(error_to_js)?;
        serde_wasm_bindgen::to_value(&columns)
            .map_err(|e| JsValue::from_str(&format!("Serializácia zlyhala: {}", e)))
    }

    /// Katalóg operácií pre UI
    #[wasm_bindgen(js_name = availableOperations)]
    pub fn available_operations(&self) -> JsValue {
        let operations: Vec<_> = AnalysisOperation::available()
            .into_iter()
            .map(|(name, description)| {
                serde_json::json!({ "name": name, "description": description })
            })
            .collect();
        serde_wasm_bindgen::to_value(&operations).unwrap_or(JsValue::NULL)
    }

    /// Podporované vstupné formáty
    #[wasm_bindgen(js_name = availableFormats)]
    pub fn available_formats(&self) -> JsValue {
        let formats: Vec<_> = DataLoaderFactory::available_formats()
            .into_iter()
            .map(|format| {
                serde_json::json!({
                    "name": format,
                    "description": DataLoaderFactory::get_format_description(format),
                })
            })
            .collect();
        serde_wasm_bindgen::to_value(&formats).unwrap_or(JsValue::NULL)
    }
}

impl Default for WasmAnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Typovaná chyba → `{ success: false, error, message }`
fn error_to_js(err: AnalysisError) -> JsValue {
    let payload = serde_json::json!({
        "success": false,
        "error": err.code(),
        "message": err.message(),
    });
    serde_wasm_bindgen::to_value(&payload)
        .unwrap_or_else(|_| JsValue::from_str(&err.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
