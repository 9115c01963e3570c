use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier for a video
///
/// Serializes as a bare JSON string, which is what the wire format uses when
/// rendering recommendation lists. Ordering is plain string ordering and is
/// used as the tie-break between equally scored recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_serializes_as_plain_string() {
        let ids = vec![VideoId::from("B"), VideoId::from("C")];
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["B","C"]"#);
    }

    #[test]
    fn test_video_id_ordering_is_lexicographic() {
        let mut ids = vec![VideoId::from("b"), VideoId::from("a10"), VideoId::from("a2")];
        ids.sort();
        assert_eq!(ids, vec![VideoId::from("a10"), VideoId::from("a2"), VideoId::from("b")]);
    }
}
