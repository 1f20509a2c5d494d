/// Kind of a value living in an engine stack slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Number,
    Boolean,
    String,
    Function,
    Nil,
    Other,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Function => "function",
            Self::Nil => "nil",
            Self::Other => "other",
        }
    }

    /// Tags that can cross the boundary as call arguments or return values.
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Number | Self::Boolean | Self::String)
    }
}

/// A host-side value heading to or coming back from the engine stack.
///
/// Strings are raw byte vectors with explicit length; embedded NUL bytes
/// are legal and round-trip byte-exact.
#[derive(Debug, Clone, PartialEq)]
pub enum CallValue {
    Number(f64),
    Boolean(bool),
    String(Vec<u8>),
    Nil,
}

impl CallValue {
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Number(_) => TypeTag::Number,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::String(_) => TypeTag::String,
            Self::Nil => TypeTag::Nil,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }
}

impl From<f64> for CallValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for CallValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for CallValue {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for CallValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::String(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tags_are_the_marshallable_ones() {
        assert!(TypeTag::Number.is_scalar());
        assert!(TypeTag::Boolean.is_scalar());
        assert!(TypeTag::String.is_scalar());
        assert!(!TypeTag::Function.is_scalar());
        assert!(!TypeTag::Nil.is_scalar());
        assert!(!TypeTag::Other.is_scalar());
    }

    #[test]
    fn call_value_reports_its_tag() {
        assert_eq!(CallValue::from(1.5).tag(), TypeTag::Number);
        assert_eq!(CallValue::from(true).tag(), TypeTag::Boolean);
        assert_eq!(CallValue::from("hi").tag(), TypeTag::String);
        assert_eq!(CallValue::Nil.tag(), TypeTag::Nil);
    }

    #[test]
    fn accessors_reject_other_tags() {
        let value = CallValue::from("abc");
        assert_eq!(value.as_bytes(), Some(b"abc".as_slice()));
        assert_eq!(value.as_number(), None);
        assert_eq!(value.as_boolean(), None);
        assert_eq!(CallValue::from(2.0).as_number(), Some(2.0));
        assert_eq!(CallValue::from(false).as_boolean(), Some(false));
    }
}
