use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw bytes serialized as a standard base64 string, the wire form of
/// Kubernetes `[]byte` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteString(pub Vec<u8>);

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl Serialize for ByteString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for ByteString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map(ByteString)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_base64() {
        let json = serde_json::to_string(&ByteString::from("s3cr3t")).unwrap();
        assert_eq!(json, "\"czNjcjN0\"");
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = serde_json::from_str::<ByteString>("\"not base64!\"").unwrap_err();
        assert!(err.to_string().contains("Invalid"), "{err}");
    }

    #[test]
    fn rejects_non_string() {
        assert!(serde_json::from_str::<ByteString>("8080").is_err());
    }
}
