//! Annotation types (study / collection event metadata fields) and the
//! values recorded against them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

/// Kind of value an annotation type collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationValueType {
    Text,
    Number,
    DateTime,
    Select,
}

/// A user-defined field attached to a study, collection event type or
/// participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value_type: AnnotationValueType,
    /// Only meaningful for `select`: 1 = single select, 2 = multiple select.
    #[serde(default)]
    pub max_value_count: Option<u8>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

impl AnnotationType {
    pub fn new(name: impl Into<String>, value_type: AnnotationValueType) -> Self {
        Self {
            id: None,
            slug: String::new(),
            name: name.into(),
            description: None,
            value_type,
            max_value_count: None,
            options: Vec::new(),
            required: false,
        }
    }

    pub fn is_single_select(&self) -> bool {
        self.value_type == AnnotationValueType::Select && self.max_value_count == Some(1)
    }

    pub fn is_multiple_select(&self) -> bool {
        self.value_type == AnnotationValueType::Select && self.max_value_count == Some(2)
    }

    /// Check the local invariants before sending to the server.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "annotation type name is required".to_string(),
            ));
        }
        match self.value_type {
            AnnotationValueType::Select => {
                if !matches!(self.max_value_count, Some(1) | Some(2)) {
                    return Err(CoreError::Validation(format!(
                        "select annotation type '{}' requires max value count of 1 or 2",
                        self.name
                    )));
                }
                if self.options.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "select annotation type '{}' requires options",
                        self.name
                    )));
                }
            }
            _ => {
                if self.max_value_count.is_some() || !self.options.is_empty() {
                    return Err(CoreError::Validation(format!(
                        "only select annotation types take options: '{}'",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A value recorded against an annotation type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub annotation_type_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_values: Vec<String>,
}

impl Annotation {
    /// Check the value against its annotation type.
    pub fn validate_against(&self, annotation_type: &AnnotationType) -> Result<(), CoreError> {
        let has_value = match annotation_type.value_type {
            AnnotationValueType::Text | AnnotationValueType::DateTime => self.string_value.is_some(),
            AnnotationValueType::Number => match &self.number_value {
                Some(n) => {
                    n.parse::<f64>().map_err(|_| {
                        CoreError::Validation(format!("'{n}' is not a number"))
                    })?;
                    true
                }
                None => false,
            },
            AnnotationValueType::Select => {
                if let Some(bad) = self
                    .selected_values
                    .iter()
                    .find(|v| !annotation_type.options.contains(v))
                {
                    return Err(CoreError::Validation(format!(
                        "'{bad}' is not an option of '{}'",
                        annotation_type.name
                    )));
                }
                if annotation_type.is_single_select() && self.selected_values.len() > 1 {
                    return Err(CoreError::Validation(format!(
                        "'{}' accepts a single value",
                        annotation_type.name
                    )));
                }
                !self.selected_values.is_empty()
            }
        };

        if annotation_type.required && !has_value {
            return Err(CoreError::Validation(format!(
                "a value for '{}' is required",
                annotation_type.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(count: u8) -> AnnotationType {
        AnnotationType {
            max_value_count: Some(count),
            options: vec!["a".to_string(), "b".to_string()],
            ..AnnotationType::new("colour", AnnotationValueType::Select)
        }
    }

    #[test]
    fn text_type_is_valid() {
        assert!(AnnotationType::new("notes", AnnotationValueType::Text)
            .validate()
            .is_ok());
    }

    #[test]
    fn select_requires_max_value_count() {
        let mut at = select(1);
        at.max_value_count = None;
        assert!(at.validate().is_err());
        assert!(select(2).validate().is_ok());
        assert!(select(3).validate().is_err());
    }

    #[test]
    fn select_requires_options() {
        let mut at = select(1);
        at.options.clear();
        assert!(at.validate().is_err());
    }

    #[test]
    fn non_select_rejects_options() {
        let mut at = AnnotationType::new("n", AnnotationValueType::Number);
        at.options.push("x".to_string());
        assert!(at.validate().is_err());
    }

    #[test]
    fn value_type_serializes_lowercase() {
        let json = serde_json::to_string(&AnnotationValueType::DateTime).unwrap();
        assert_eq!(json, "\"datetime\"");
    }

    #[test]
    fn single_select_rejects_two_values() {
        let annotation = Annotation {
            annotation_type_id: "at1".to_string(),
            selected_values: vec!["a".to_string(), "b".to_string()],
            ..Annotation::default()
        };
        assert!(annotation.validate_against(&select(1)).is_err());
        assert!(annotation.validate_against(&select(2)).is_ok());
    }

    #[test]
    fn unknown_option_rejected() {
        let annotation = Annotation {
            annotation_type_id: "at1".to_string(),
            selected_values: vec!["z".to_string()],
            ..Annotation::default()
        };
        assert!(annotation.validate_against(&select(2)).is_err());
    }

    #[test]
    fn required_value_missing() {
        let mut at = AnnotationType::new("weight", AnnotationValueType::Number);
        at.required = true;
        let annotation = Annotation {
            annotation_type_id: "at1".to_string(),
            ..Annotation::default()
        };
        assert!(annotation.validate_against(&at).is_err());
    }

    #[test]
    fn number_value_must_parse() {
        let at = AnnotationType::new("weight", AnnotationValueType::Number);
        let annotation = Annotation {
            annotation_type_id: "at1".to_string(),
            number_value: Some("abc".to_string()),
            ..Annotation::default()
        };
        assert!(annotation.validate_against(&at).is_err());
    }
}
