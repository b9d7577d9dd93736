use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Mutation response body: `{ "message": "...", "<entity>": { ... } }`.
///
/// An empty body reads as an envelope with nothing in it and a plain-text
/// body becomes the message.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "EnvelopeWire")]
pub struct Envelope {
    pub message: Option<String>,
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct EnvelopeBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnvelopeWire {
    Body(EnvelopeBody),
    Text(String),
    Empty(()),
}

impl From<EnvelopeWire> for Envelope {
    fn from(wire: EnvelopeWire) -> Self {
        match wire {
            EnvelopeWire::Body(body) => Envelope {
                message: body.message,
                fields: body.fields,
            },
            EnvelopeWire::Text(text) => Envelope {
                message: (!text.is_empty()).then_some(text),
                fields: Map::new(),
            },
            EnvelopeWire::Empty(()) => Envelope::default(),
        }
    }
}

impl Envelope {
    /// Removes and decodes the entity stored under `key`.
    ///
    /// A missing or null entry yields `Ok(None)`.
    pub fn take<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.fields.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Device;

    #[test]
    fn test_take_entity_and_message() {
        let mut envelope: Envelope = serde_json::from_str(
            r#"{"message":"Device Added","device":{"_id":"d1","name":"Laptop"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.message.as_deref(), Some("Device Added"));
        let device: Option<Device> = envelope.take("device").unwrap();
        assert_eq!(device.unwrap().id, "d1");
        let again: Option<Device> = envelope.take("device").unwrap();
        assert!(again.is_none());
    }

    #[test]
    fn test_take_null_is_none() {
        let mut envelope: Envelope =
            serde_json::from_str(r#"{"message":"ok","borrowing":null}"#).unwrap();
        let taken: Option<Device> = envelope.take("borrowing").unwrap();
        assert!(taken.is_none());
    }

    #[test]
    fn test_null_and_text_bodies() {
        let mut empty: Envelope = serde_json::from_value(Value::Null).unwrap();
        assert!(empty.message.is_none());
        let taken: Option<Device> = empty.take("device").unwrap();
        assert!(taken.is_none());

        let text: Envelope = serde_json::from_value(Value::from("Device deleted")).unwrap();
        assert_eq!(text.message.as_deref(), Some("Device deleted"));
    }
}
