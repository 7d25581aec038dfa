use serde::{Deserialize, Serialize};

/// A class label as declared by the model artifact.
///
/// Artifacts exported from a string-labelled dataset carry names
/// (`"setosa"`); integer-encoded targets carry numbers. The service passes
/// either through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Integer(v) => write!(f, "{}", v),
            Label::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Integer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization() {
        assert_eq!(serde_json::to_string(&Label::from("setosa")).unwrap(), r#""setosa""#);
        assert_eq!(serde_json::to_string(&Label::from(2)).unwrap(), "2");

        let labels: Vec<Label> = serde_json::from_str(r#"[0, "virginica"]"#).unwrap();
        assert_eq!(labels, vec![Label::Integer(0), Label::Text("virginica".into())]);
    }
}
