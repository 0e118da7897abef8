use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

pub const ON_OFF: &str = "onOff";
pub const OPERATING_MODE: &str = "operatingMode";
pub const HEATING_POWER: &str = "heatingPower";
pub const TARGET_TEMPERATURE: &str = "targetTemperature";
pub const SET_BACK_TEMPERATURE: &str = "setBackTemperature";
pub const HEATING_TIMES_ACTIVE_FOR_COMFORT: &str = "heatingTimesActiveForComfort";

/// Two heating slots per weekday.
pub const HEATING_TIME_FIELDS: [&str; 14] = [
    "heatingTimeMon1",
    "heatingTimeMon2",
    "heatingTimeTue1",
    "heatingTimeTue2",
    "heatingTimeWed1",
    "heatingTimeWed2",
    "heatingTimeThu1",
    "heatingTimeThu2",
    "heatingTimeFri1",
    "heatingTimeFri2",
    "heatingTimeSat1",
    "heatingTimeSat2",
    "heatingTimeSun1",
    "heatingTimeSun2",
];

/// Partial update of a stove's `controls`, one optional slot per recognized field.
///
/// `None` means "leave as is". Booleans keep an explicit `Some(false)`; the
/// other fields never hold an empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlUpdate {
    pub on_off: Option<bool>,
    pub operating_mode: Option<i64>,
    pub heating_power: Option<i64>,
    pub target_temperature: Option<String>,
    pub set_back_temperature: Option<String>,
    pub heating_times_active_for_comfort: Option<bool>,
    /// (field name, value) for the submitted heating-time slots
    pub heating_times: Vec<(&'static str, String)>,
}

impl ControlUpdate {
    /// Build an update from url-encoded form fields. Unknown keys are dropped.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let text = |name: &str| {
            form.get(name)
                .filter(|value| !value.is_empty())
                .cloned()
        };

        let heating_times = HEATING_TIME_FIELDS
            .iter()
            .filter_map(|&name| text(name).map(|value| (name, value)))
            .collect();

        Self {
            on_off: form.get(ON_OFF).and_then(|v| parse_flag(ON_OFF, v)),
            operating_mode: text(OPERATING_MODE).and_then(|v| parse_int(OPERATING_MODE, &v)),
            heating_power: text(HEATING_POWER).and_then(|v| parse_int(HEATING_POWER, &v)),
            target_temperature: text(TARGET_TEMPERATURE),
            set_back_temperature: text(SET_BACK_TEMPERATURE),
            heating_times_active_for_comfort: form
                .get(HEATING_TIMES_ACTIVE_FOR_COMFORT)
                .and_then(|v| parse_flag(HEATING_TIMES_ACTIVE_FOR_COMFORT, v)),
            heating_times,
        }
    }

    /// Overwrite the submitted keys in `controls`, keeping every other key.
    pub fn apply_to(&self, controls: &mut Map<String, Value>) {
        if let Some(on_off) = self.on_off {
            controls.insert(ON_OFF.to_string(), Value::Bool(on_off));
        }
        if let Some(mode) = self.operating_mode {
            controls.insert(OPERATING_MODE.to_string(), Value::from(mode));
        }
        if let Some(power) = self.heating_power {
            controls.insert(HEATING_POWER.to_string(), Value::from(power));
        }
        if let Some(target) = &self.target_temperature {
            controls.insert(TARGET_TEMPERATURE.to_string(), Value::String(target.clone()));
        }
        if let Some(set_back) = &self.set_back_temperature {
            controls.insert(SET_BACK_TEMPERATURE.to_string(), Value::String(set_back.clone()));
        }
        if let Some(active) = self.heating_times_active_for_comfort {
            controls.insert(
                HEATING_TIMES_ACTIVE_FOR_COMFORT.to_string(),
                Value::Bool(active),
            );
        }
        for (name, value) in &self.heating_times {
            controls.insert(name.to_string(), Value::String(value.clone()));
        }
    }
}

fn parse_flag(field: &str, raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        other => {
            warn!("Ignoring non-boolean {}={:?}", field, other);
            None
        }
    }
}

fn parse_int(field: &str, raw: &str) -> Option<i64> {
    let parsed = leading_int(raw);
    if parsed.is_none() {
        warn!("Ignoring non-numeric {}={:?}", field, raw);
    }
    parsed
}

/// Integer prefix of `raw`: leading whitespace and an optional sign are
/// accepted, anything after the digits is ignored ("3.7" -> 3, "12abc" -> 12).
/// Digit runs beyond the `i64` range saturate at `i64::MAX` / `i64::MIN`.
fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut digits = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|digit| i64::from(digit - b'0'))
        .peekable();
    digits.peek()?;

    // Accumulate on the negative side so i64::MIN stays reachable
    let value = digits.fold(0i64, |acc, digit| acc.saturating_mul(10).saturating_sub(digit));
    Some(if negative { value } else { value.saturating_neg() })
}
