//! Dotted field paths into serialized form data.
//!
//! Paths use the camelCase JSON keys of the form structs, with list indices
//! as plain numbers: `permanentAddress.city`, `educationHistory.1.board`.
//! Paths only address existing fields; they never create new keys.

use serde_json::Value;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CoreError::Validation("Field path must not be empty".into()));
        }

        let segments = raw
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "Field path '{raw}' contains an empty segment"
                    )));
                }
                Ok(match part.parse::<usize>() {
                    Ok(index) => PathSegment::Index(index),
                    Err(_) => PathSegment::Key(part.to_string()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if matches!(segments.first(), Some(PathSegment::Index(_))) {
            return Err(CoreError::Validation(format!(
                "Field path '{raw}' must start with a field name"
            )));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Top-level field name.
    pub fn root(&self) -> &str {
        match self.segments.first() {
            Some(PathSegment::Key(key)) => key,
            _ => "",
        }
    }

    pub fn get<'v>(&self, doc: &'v Value) -> Option<&'v Value> {
        self.segments.iter().try_fold(doc, |node, segment| match segment {
            PathSegment::Key(key) => node.as_object()?.get(key),
            PathSegment::Index(index) => node.as_array()?.get(*index),
        })
    }

    pub fn get_mut<'v>(&self, doc: &'v mut Value) -> Option<&'v mut Value> {
        let mut node = doc;
        for segment in &self.segments {
            node = match segment {
                PathSegment::Key(key) => node.as_object_mut()?.get_mut(key)?,
                PathSegment::Index(index) => node.as_array_mut()?.get_mut(*index)?,
            };
        }
        Some(node)
    }

    /// Replace the value at this path.
    pub fn set(&self, doc: &mut Value, value: Value) -> Result<(), CoreError> {
        let slot = self
            .get_mut(doc)
            .ok_or_else(|| CoreError::Validation(format!("Unknown field '{self}'")))?;
        *slot = value;
        Ok(())
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Value {
        json!({
            "name": "Asha",
            "permanentAddress": { "city": "Surat" },
            "educationHistory": [
                { "schoolName": "A" },
                { "schoolName": "B" }
            ]
        })
    }

    #[test]
    fn parse_and_display_round_trip() {
        let path = FieldPath::parse("educationHistory.1.schoolName").unwrap();
        assert_eq!(path.to_string(), "educationHistory.1.schoolName");
        assert_eq!(path.root(), "educationHistory");
        assert_eq!(path.segments()[1], PathSegment::Index(1));
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse("0.name").is_err());
    }

    #[test]
    fn get_walks_objects_and_arrays() {
        let d = doc();
        let path = FieldPath::parse("educationHistory.1.schoolName").unwrap();
        assert_eq!(path.get(&d), Some(&json!("B")));
        let missing = FieldPath::parse("educationHistory.5.schoolName").unwrap();
        assert_eq!(missing.get(&d), None);
    }

    #[test]
    fn set_replaces_existing_values_only() {
        let mut d = doc();
        FieldPath::parse("permanentAddress.city")
            .unwrap()
            .set(&mut d, json!("Vadodara"))
            .unwrap();
        assert_eq!(d["permanentAddress"]["city"], "Vadodara");

        let err = FieldPath::parse("permanentAddress.planet")
            .unwrap()
            .set(&mut d, json!("Mars"));
        assert!(err.is_err());
        assert!(d["permanentAddress"].get("planet").is_none());
    }
}
