use serde::{Deserialize, Serialize};

/// The declared type of a body row. The declared type always wins over the
/// syntactic shape of the row's text.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}
impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Null => "null",
        };
        f.write_str(name)
    }
}

/// One row of the structured body editor.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TypedField {
    pub key: String,
    pub field_type: FieldType,
    pub raw_value: String,
}
impl TypedField {
    pub fn new(key: impl Into<String>, field_type: FieldType, raw_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field_type,
            raw_value: raw_value.into(),
        }
    }

    /// The row used when a body cannot be shown as a form.
    pub fn placeholder() -> Self {
        Self::new("key", FieldType::String, "value")
    }

    /// Switching the type of a row clears its text; the editor for the new type
    /// starts empty.
    pub fn set_type(&mut self, field_type: FieldType) {
        if self.field_type != field_type {
            self.field_type = field_type;
            self.raw_value.clear();
        }
    }
}
impl Default for TypedField {
    fn default() -> Self {
        Self::new("", FieldType::String, "")
    }
}
