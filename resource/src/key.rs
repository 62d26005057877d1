use serde::Serialize;
use std::fmt;

/// Identity of "what to fetch".
///
/// Two keys are equal iff their JSON serializations are equal, so a filter
/// struct rebuilt on every render compares equal to the previous one as long
/// as its values did not change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    fingerprint: String,
}

impl FetchKey {
    pub fn of<K: Serialize + fmt::Debug>(key: &K) -> Self {
        let fingerprint = match serde_json::to_string(key) {
            Ok(json) => json,
            Err(e) => {
                // e.g. maps with non-string keys
                tracing::warn!(
                    "Fetch key {:?} is not serializable ({}), comparing by \
                     debug output",
                    key,
                    e
                );
                format!("{key:?}")
            }
        };
        Self { fingerprint }
    }

    pub fn as_str(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Display for FetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::FetchKey;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Debug, Serialize)]
    struct Filter {
        brand_id: Option<i64>,
        page: u32,
    }

    #[test]
    fn equal_values_are_equal_keys() {
        let a = FetchKey::of(&Filter {
            brand_id: Some(42),
            page: 1,
        });
        let b = FetchKey::of(&Filter {
            brand_id: Some(42),
            page: 1,
        });
        assert_eq!(a, b);
        assert_eq!(a.as_str(), r#"{"brand_id":42,"page":1}"#);
    }

    #[test]
    fn different_values_are_different_keys() {
        let a = FetchKey::of(&Filter {
            brand_id: Some(42),
            page: 1,
        });
        let b = FetchKey::of(&Filter {
            brand_id: None,
            page: 1,
        });
        assert_ne!(a, b);
        assert_ne!(FetchKey::of(&1_i64), FetchKey::of(&"1"));
    }

    #[test]
    fn unserializable_key_falls_back_to_debug() {
        let mut map = HashMap::new();
        map.insert((1, 2), "x");
        let key = FetchKey::of(&map);
        assert_eq!(key.as_str(), format!("{map:?}"));
    }
}
