use crate::data::{AvailabilityRow, EventConfig, EventWindow, ValidationError};
use crate::heatmap::calculate_heatmap;
use crate::intensity::intensity_bucket;
use wasm_bindgen::prelude::*;

fn js_error(error: ValidationError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// `config` is `{ startDate, endDate, dailyStartTime, dailyEndTime, timezone? }`
#[wasm_bindgen(js_name = generateTimeSlots)]
pub fn generate_time_slots(config: JsValue) -> Result<JsValue, JsValue> {
    let config: EventConfig = serde_wasm_bindgen::from_value(config)?;
    let window = EventWindow::try_from(&config).map_err(js_error)?;

    Ok(serde_wasm_bindgen::to_value(&window.time_slots())?)
}

/// `rows` is `[{ slotStart, participantName }]`
#[wasm_bindgen(js_name = calculateHeatmap)]
pub fn heatmap(rows: JsValue) -> Result<JsValue, JsValue> {
    let rows: Vec<AvailabilityRow> = serde_wasm_bindgen::from_value(rows)?;
    let heatmap = calculate_heatmap(&rows);

    Ok(serde_wasm_bindgen::to_value(&heatmap)?)
}

#[wasm_bindgen(js_name = heatmapColor)]
pub fn heatmap_color(count: u32, max_count: u32) -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(
        &intensity_bucket(count, max_count).palette(),
    )?)
}
