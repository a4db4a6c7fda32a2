//! Label encoder with an immutable vocabulary; the code of a label is its index in `classes`.

use super::Encode;
use crate::error::{GatewayError, GatewayResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "LabelEncoderRepr", into = "LabelEncoderRepr")]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, i64>,
}

#[derive(Serialize, Deserialize)]
struct LabelEncoderRepr {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new<I, S>(classes: I) -> GatewayResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(classes.len());
        for (i, label) in classes.iter().enumerate() {
            if index.insert(label.clone(), i as i64).is_some() {
                return Err(GatewayError::Encoding(format!("duplicate class `{}`", label)));
            }
        }
        Ok(Self { classes, index })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TryFrom<LabelEncoderRepr> for LabelEncoder {
    type Error = GatewayError;

    fn try_from(repr: LabelEncoderRepr) -> Result<Self, Self::Error> {
        Self::new(repr.classes)
    }
}

impl From<LabelEncoder> for LabelEncoderRepr {
    fn from(enc: LabelEncoder) -> Self {
        Self { classes: enc.classes }
    }
}

impl Encode for LabelEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn encode(&self, label: &str) -> GatewayResult<i64> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| GatewayError::Encoding(format!("unknown label `{}`", label)))
    }
}

/// Fitted encoders keyed by field name (e.g. `Category`, `Payment Method`).
#[derive(Default)]
pub struct EncoderSet {
    encoders: BTreeMap<String, Box<dyn Encode>>,
}

impl fmt::Debug for EncoderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.encoders.iter().map(|(field, enc)| (field, enc.classes())))
            .finish()
    }
}

impl EncoderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, encoder: impl Encode + 'static) -> Self {
        self.insert(field, encoder);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, encoder: impl Encode + 'static) {
        self.encoders.insert(field.into(), Box::new(encoder));
    }

    pub fn get(&self, field: &str) -> GatewayResult<&dyn Encode> {
        self.encoders
            .get(field)
            .map(|e| e.as_ref())
            .ok_or_else(|| GatewayError::Encoding(format!("no encoder for field `{}`", field)))
    }

    pub fn encode(&self, field: &str, label: &str) -> GatewayResult<i64> {
        self.get(field)?
            .encode(label)
            .map_err(|e| match e {
                GatewayError::Encoding(msg) => GatewayError::Encoding(format!("{}: {}", field, msg)),
                other => other,
            })
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    /// Parse `{ "<field>": { "classes": [...] }, ... }`.
    pub fn from_json(data: &str) -> GatewayResult<Self> {
        let parsed: BTreeMap<String, LabelEncoder> = serde_json::from_str(data)?;
        let mut set = Self::new();
        for (field, enc) in parsed {
            set.insert(field, enc);
        }
        Ok(set)
    }
}
