use crate::prelude::{FormatError, FormatResult, Validate};
use log::{debug, warn};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const BACK_AZIMUTH_KEY: &str = "BackAzimuth";
pub const SLOWNESS_KEY: &str = "Slowness";
pub const POWER_RATIO_KEY: &str = "PowerRatio";
pub const BACK_AZIMUTH_ERROR_KEY: &str = "BackAzimuthError";
pub const SLOWNESS_ERROR_KEY: &str = "SlownessError";
pub const POWER_RATIO_ERROR_KEY: &str = "PowerRatioError";

/// Wire shape of a beam. Required members are plain numbers so serde rejects
/// documents that omit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BeamWire {
    back_azimuth: f64,
    slowness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    back_azimuth_error: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slowness_error: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power_ratio_error: Option<f64>,
}

/// Beam measurement carried inside pick and detection messages.
///
/// Every field is optional in memory so a freshly constructed record can be
/// populated later; `BackAzimuth` and `Slowness` are required on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BeamWire")]
pub struct Beam {
    pub back_azimuth: Option<f64>,
    pub slowness: Option<f64>,
    pub power_ratio: Option<f64>,
    pub back_azimuth_error: Option<f64>,
    pub slowness_error: Option<f64>,
    pub power_ratio_error: Option<f64>,
}

#[allow(clippy::wrong_self_convention)]
impl Beam {
    /// Builds a beam from whichever fields are supplied. No validation happens here.
    pub fn new(
        back_azimuth: Option<f64>,
        slowness: Option<f64>,
        power_ratio: Option<f64>,
        back_azimuth_error: Option<f64>,
        slowness_error: Option<f64>,
        power_ratio_error: Option<f64>,
    ) -> Self {
        Self {
            back_azimuth,
            slowness,
            power_ratio,
            back_azimuth_error,
            slowness_error,
            power_ratio_error,
        }
    }

    pub fn with_required(back_azimuth: f64, slowness: f64) -> Self {
        Self {
            back_azimuth: Some(back_azimuth),
            slowness: Some(slowness),
            ..Default::default()
        }
    }

    pub fn with_power_ratio(mut self, power_ratio: f64) -> Self {
        self.power_ratio = Some(power_ratio);
        self
    }

    pub fn with_back_azimuth_error(mut self, back_azimuth_error: f64) -> Self {
        self.back_azimuth_error = Some(back_azimuth_error);
        self
    }

    pub fn with_slowness_error(mut self, slowness_error: f64) -> Self {
        self.slowness_error = Some(slowness_error);
        self
    }

    pub fn with_power_ratio_error(mut self, power_ratio_error: f64) -> Self {
        self.power_ratio_error = Some(power_ratio_error);
        self
    }

    /// True for a beam that has not been populated with any field yet.
    pub fn is_empty(&self) -> bool {
        self.required_fields()
            .iter()
            .chain(self.optional_fields().iter())
            .all(|(_, value)| value.is_none())
    }

    /// Parses a JSON document into a new beam.
    pub fn parse(text: &str) -> FormatResult<Self> {
        let mut beam = Self::default();
        beam.from_json_str(text)?;
        Ok(beam)
    }

    /// Populates the beam from JSON text, see [`Beam::from_dict`].
    pub fn from_json_str(&mut self, text: &str) -> FormatResult<()> {
        let value: Value = serde_json::from_str(text).map_err(FormatError::Parse)?;
        self.from_value(&value)
    }

    pub fn from_value(&mut self, value: &Value) -> FormatResult<()> {
        match value {
            Value::Object(dict) => self.from_dict(dict),
            other => {
                warn!("rejecting beam: expected a JSON object, found {}", other);
                Err(FormatError::Format(format!(
                    "expected a JSON object, found {}",
                    other
                )))
            }
        }
    }

    /// Populates the beam from a string-keyed mapping.
    ///
    /// Required fields are overwritten. Optional fields are only replaced when
    /// their key is present. On error the beam is left untouched.
    pub fn from_dict(&mut self, dict: &Map<String, Value>) -> FormatResult<()> {
        let wire: BeamWire =
            serde_json::from_value(Value::Object(dict.clone())).map_err(|err| {
                warn!("rejecting beam mapping: {}", err);
                FormatError::Format(err.to_string())
            })?;

        self.back_azimuth = Some(wire.back_azimuth);
        self.slowness = Some(wire.slowness);
        self.power_ratio = wire.power_ratio.or(self.power_ratio);
        self.back_azimuth_error = wire.back_azimuth_error.or(self.back_azimuth_error);
        self.slowness_error = wire.slowness_error.or(self.slowness_error);
        self.power_ratio_error = wire.power_ratio_error.or(self.power_ratio_error);

        debug!(
            "populated beam back_azimuth={} slowness={}",
            wire.back_azimuth, wire.slowness
        );
        Ok(())
    }

    /// Converts the beam into a mapping holding exactly its present fields.
    pub fn to_dict(&self) -> FormatResult<Map<String, Value>> {
        let mut dict = Map::new();
        for (key, value) in self.required_fields() {
            let value = value.ok_or(FormatError::MissingField(key))?;
            dict.insert(key.to_string(), Value::from(value));
        }
        self.check_finite()?;
        for (key, value) in self.optional_fields() {
            if let Some(value) = value {
                dict.insert(key.to_string(), Value::from(value));
            }
        }
        Ok(dict)
    }

    /// Compact JSON text of the beam. Non-ASCII text is written unescaped.
    pub fn to_json_string(&self) -> FormatResult<String> {
        let wire = self.to_wire()?;
        let text =
            serde_json::to_string(&wire).map_err(|err| FormatError::Format(err.to_string()))?;
        debug!("serialized beam ({} bytes)", text.len());
        Ok(text)
    }

    fn to_wire(&self) -> FormatResult<BeamWire> {
        let wire = BeamWire {
            back_azimuth: self
                .back_azimuth
                .ok_or(FormatError::MissingField(BACK_AZIMUTH_KEY))?,
            slowness: self.slowness.ok_or(FormatError::MissingField(SLOWNESS_KEY))?,
            power_ratio: self.power_ratio,
            back_azimuth_error: self.back_azimuth_error,
            slowness_error: self.slowness_error,
            power_ratio_error: self.power_ratio_error,
        };
        self.check_finite()?;
        Ok(wire)
    }

    /// JSON has no encoding for NaN or infinity.
    fn check_finite(&self) -> FormatResult<()> {
        for (key, value) in self.required_fields().into_iter().chain(self.optional_fields()) {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                warn!("refusing to serialize beam: {} is {}", key, value);
                return Err(FormatError::Format(format!(
                    "{} must be a finite number, found {}",
                    key, value
                )));
            }
        }
        Ok(())
    }

    fn required_fields(&self) -> [(&'static str, Option<f64>); 2] {
        [
            (BACK_AZIMUTH_KEY, self.back_azimuth),
            (SLOWNESS_KEY, self.slowness),
        ]
    }

    fn optional_fields(&self) -> [(&'static str, Option<f64>); 4] {
        [
            (POWER_RATIO_KEY, self.power_ratio),
            (BACK_AZIMUTH_ERROR_KEY, self.back_azimuth_error),
            (SLOWNESS_ERROR_KEY, self.slowness_error),
            (POWER_RATIO_ERROR_KEY, self.power_ratio_error),
        ]
    }
}

impl From<BeamWire> for Beam {
    fn from(wire: BeamWire) -> Self {
        Self {
            back_azimuth: Some(wire.back_azimuth),
            slowness: Some(wire.slowness),
            power_ratio: wire.power_ratio,
            back_azimuth_error: wire.back_azimuth_error,
            slowness_error: wire.slowness_error,
            power_ratio_error: wire.power_ratio_error,
        }
    }
}

impl Serialize for Beam {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl Validate for Beam {
    fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, value) in self.required_fields() {
            match value {
                None => errors.push(format!("No {} in Beam Class.", key)),
                Some(v) if v < 0.0 => errors.push(format!("Invalid {} in Beam Class.", key)),
                Some(_) => {}
            }
        }

        // absent optional fields are fine
        for (key, value) in self.optional_fields() {
            if matches!(value, Some(v) if v < 0.0) {
                errors.push(format!("Invalid {} in Beam Class.", key));
            }
        }

        errors
    }
}
