use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number};

/// Removes `key` from `map` and parses it. `null` counts as absent.
fn take_field<T, E>(map: &mut Map<String, serde_json::Value>, key: &str) -> Result<Option<T>, E>
where
    T: DeserializeOwned,
    E: serde::de::Error,
{
    match map.remove(key) {
        None => Ok(None),
        Some(serde_json::Value::Null) => {
            tracing::warn!("Dropping `{}: null`; it will be missing from the output", key);
            Ok(None)
        }
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| E::custom(format!("invalid `{key}`: {e}"))),
    }
}

fn field_value<T, E>(field: &Option<T>) -> Result<Option<serde_json::Value>, E>
where
    T: Serialize,
    E: serde::ser::Error,
{
    field
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(E::custom)
}

/// Writes modelled and pass-through fields back in source key order.
///
/// Keys missing from `key_order` (fields set after parsing) follow at the end.
fn serialize_ordered<S>(
    serializer: S,
    key_order: &[String],
    named: Vec<(&'static str, Option<serde_json::Value>)>,
    extra: &Map<String, serde_json::Value>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut named = named;
    let mut out = Map::new();
    for key in key_order {
        if let Some(slot) = named.iter_mut().find(|slot| slot.0 == key.as_str()) {
            if let Some(v) = slot.1.take() {
                out.insert(key.clone(), v);
            }
        } else if let Some(v) = extra.get(key) {
            out.insert(key.clone(), v.clone());
        }
    }
    for (name, value) in named {
        if let Some(v) = value {
            out.insert(name.to_string(), v);
        }
    }
    for (key, v) in extra {
        if !out.contains_key(key) {
            out.insert(key.clone(), v.clone());
        }
    }
    out.serialize(serializer)
}

fn key_order(map: &Map<String, serde_json::Value>) -> Vec<String> {
    map.keys().cloned().collect()
}

/// Root of a Lottie document.
///
/// Only the canvas height and the layer list are modelled; every other root
/// field (`v`, `fr`, `w`, `assets`, `markers`, ...) is kept in `extra` and
/// written back untouched, in its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LottieJson {
    pub h: Option<Number>, // Canvas height
    pub layers: Option<Vec<Layer>>,
    pub extra: Map<String, serde_json::Value>,
    key_order: Vec<String>,
}

impl<'de> Deserialize<'de> for LottieJson {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;
        let key_order = key_order(&map);
        Ok(LottieJson {
            h: take_field(&mut map, "h")?,
            layers: take_field(&mut map, "layers")?,
            extra: map,
            key_order,
        })
    }
}

impl Serialize for LottieJson {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let named = vec![
            ("h", field_value(&self.h)?),
            ("layers", field_value(&self.layers)?),
        ];
        serialize_ordered(serializer, &self.key_order, named, &self.extra)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    pub ks: Option<Transform>,
    pub extra: Map<String, serde_json::Value>,
    key_order: Vec<String>,
}

impl Layer {
    /// Layer name, if the document gives one.
    pub fn name(&self) -> Option<&str> {
        self.extra.get("nm").and_then(|nm| nm.as_str())
    }

    /// Mutable access to the position value, when the full `ks.p.k` chain is present.
    pub fn position_mut(&mut self) -> Option<&mut PositionValue> {
        self.ks.as_mut()?.p.as_mut()?.k.as_mut()
    }
}

impl<'de> Deserialize<'de> for Layer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;
        let key_order = key_order(&map);
        Ok(Layer {
            ks: take_field(&mut map, "ks")?,
            extra: map,
            key_order,
        })
    }
}

impl Serialize for Layer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let named = vec![("ks", field_value(&self.ks)?)];
        serialize_ordered(serializer, &self.key_order, named, &self.extra)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transform {
    pub p: Option<PositionProperty>, // Position
    pub extra: Map<String, serde_json::Value>, // Anchor, scale, rotation, opacity, ...
    key_order: Vec<String>,
}

impl<'de> Deserialize<'de> for Transform {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;
        let key_order = key_order(&map);
        Ok(Transform {
            p: take_field(&mut map, "p")?,
            extra: map,
            key_order,
        })
    }
}

impl Serialize for Transform {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let named = vec![("p", field_value(&self.p)?)];
        serialize_ordered(serializer, &self.key_order, named, &self.extra)
    }
}

/// Animatable position. Split positions (`"s": true` with `x`/`y`) carry no
/// `k` and land entirely in `extra`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionProperty {
    pub k: Option<PositionValue>,
    pub extra: Map<String, serde_json::Value>,
    key_order: Vec<String>,
}

impl<'de> Deserialize<'de> for PositionProperty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;
        let key_order = key_order(&map);
        Ok(PositionProperty {
            k: take_field(&mut map, "k")?,
            extra: map,
            key_order,
        })
    }
}

impl Serialize for PositionProperty {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let named = vec![("k", field_value(&self.k)?)];
        serialize_ordered(serializer, &self.key_order, named, &self.extra)
    }
}

/// Shape of a position's `k` value, decided from its first element.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionValue {
    /// `[x, y]` or `[x, y, z]`.
    Static(Vec<Number>),
    /// A list of keyframe records.
    Animated(Vec<Keyframe>),
    /// Anything else; carried through as-is.
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for PositionValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;

        let items = match v {
            serde_json::Value::Array(items) => items,
            other => return Ok(PositionValue::Other(other)),
        };

        match items.first() {
            None => Ok(PositionValue::Static(Vec::new())),
            Some(serde_json::Value::Object(_)) => {
                serde_json::from_value::<Vec<Keyframe>>(serde_json::Value::Array(items))
                    .map(PositionValue::Animated)
                    .map_err(|e| D::Error::custom(format!("invalid position keyframes: {e}")))
            }
            Some(serde_json::Value::Number(_)) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::Number(n) => Ok(n),
                    other => Err(D::Error::custom(format!(
                        "static position must contain only numbers, found {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(PositionValue::Static),
            Some(_) => Ok(PositionValue::Other(serde_json::Value::Array(items))),
        }
    }
}

impl Serialize for PositionValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PositionValue::Static(values) => values.serialize(serializer),
            PositionValue::Animated(keyframes) => keyframes.serialize(serializer),
            PositionValue::Other(value) => value.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keyframe {
    pub s: Option<Vec<Number>>, // Start value
    pub e: Option<Vec<Number>>, // End value (pre-5.5 exports)
    pub extra: Map<String, serde_json::Value>, // t, i, o, to, ti, h
    key_order: Vec<String>,
}

impl<'de> Deserialize<'de> for Keyframe {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;
        let key_order = key_order(&map);
        Ok(Keyframe {
            s: take_field(&mut map, "s")?,
            e: take_field(&mut map, "e")?,
            extra: map,
            key_order,
        })
    }
}

impl Serialize for Keyframe {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let named = vec![("s", field_value(&self.s)?), ("e", field_value(&self.e)?)];
        serialize_ordered(serializer, &self.key_order, named, &self.extra)
    }
}
