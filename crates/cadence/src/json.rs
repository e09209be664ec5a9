//! Serde adapters for blob fields, which travel through JSON as base64 text.

use std::collections::BTreeMap;

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;
use wirerpc::Binary;

fn decode<E: serde::de::Error>(text: &str) -> Result<Binary, E> {
    STANDARD.decode(text).map(Binary).map_err(E::custom)
}

/// `Option<Binary>` as an optional base64 string.
pub mod base64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Binary>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(b) => s.serialize_some(&STANDARD.encode(b.as_bytes())),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Binary>, D::Error> {
        Option::<String>::deserialize(d)?.map(|t| decode(&t)).transpose()
    }
}

/// `Option<BTreeMap<String, Binary>>` with base64 values.
pub mod base64_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<BTreeMap<String, Binary>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(map) => {
                let text: BTreeMap<&str, String> = map
                    .iter()
                    .map(|(k, v)| (k.as_str(), STANDARD.encode(v.as_bytes())))
                    .collect();
                s.serialize_some(&text)
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<BTreeMap<String, Binary>>, D::Error> {
        let Some(text) = Option::<BTreeMap<String, String>>::deserialize(d)? else {
            return Ok(None);
        };
        let mut map = BTreeMap::new();
        for (k, v) in text {
            map.insert(k, decode(&v)?);
        }
        Ok(Some(map))
    }
}
