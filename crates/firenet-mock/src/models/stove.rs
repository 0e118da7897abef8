use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status document of one stove, as served by `/api/client/:stoveId/status`.
///
/// Only the identifier and the `controls` block are interpreted. Everything
/// else from the template (sensors, features, revision...) rides along in
/// `status` and is returned untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoveDocument {
    #[serde(rename = "stoveID")]
    pub stove_id: String,

    #[serde(default)]
    pub controls: Map<String, Value>,

    #[serde(flatten)]
    pub status: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_opaque_fields_are_preserved() {
        let raw = json!({
            "name": "Stove 12345",
            "stoveID": "12345",
            "controls": { "onOff": true },
            "sensors": { "inputRoomTemperature": "19.6" }
        });

        let doc: StoveDocument = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.stove_id, "12345");
        assert_eq!(doc.controls["onOff"], json!(true));
        assert_eq!(doc.status["sensors"]["inputRoomTemperature"], "19.6");

        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn test_missing_controls_default_to_empty() {
        let doc: StoveDocument = serde_json::from_value(json!({ "stoveID": "1" })).unwrap();
        assert!(doc.controls.is_empty());
    }
}
