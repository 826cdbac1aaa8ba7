use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One ranked detection result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub language: CompactString,
    pub probability: f64,
}

impl Language {
    #[inline]
    pub fn new(language: impl Into<CompactString>, probability: f64) -> Self {
        Self {
            language: language.into(),
            probability,
        }
    }
}

/// Wire envelope for a detection response:
/// `{"languages":[{"language":"de","probability":0.99}]}`, with a leading
/// `"profile"` when a non-default profile set is active.
#[derive(Clone, Debug, Serialize)]
pub struct Detections<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a str>,
    pub languages: &'a [Language],
}

#[cfg(test)]
mod tests {
    use super::{Detections, Language};

    #[test]
    fn test_wire_shape() {
        let languages = vec![Language::new("de", 0.75), Language::new("en", 0.25)];

        let body = serde_json::to_string(&Detections {
            profile: None,
            languages: &languages,
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"languages":[{"language":"de","probability":0.75},{"language":"en","probability":0.25}]}"#
        );

        let body = serde_json::to_string(&Detections {
            profile: Some("short-text"),
            languages: &languages[..1],
        })
        .unwrap();
        assert_eq!(
            body,
            r#"{"profile":"short-text","languages":[{"language":"de","probability":0.75}]}"#
        );
    }
}
