//! Column type declarations for CREATE TABLE and CAST.

/// A declared column type, e.g. `VARCHAR(255)` or `DECIMAL(10, 2)`.
///
/// The name is kept exactly as written; SQL type names are free-form and
/// their interpretation (affinity) is left to later stages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TypeName {
    name: String,
    signed_numbers: Vec<f64>,
}

impl TypeName {
    /// The maximum number of numeric parameters a type name accepts.
    pub const MAX_SIGNED_NUMBERS: usize = 2;

    /// The type given to columns declared without one.
    pub const DEFAULT_NAME: &'static str = "BLOB";

    /// Creates a type name.
    ///
    /// # Panics
    ///
    /// Panics if more than [`TypeName::MAX_SIGNED_NUMBERS`] parameters are given.
    #[must_use]
    pub fn new(name: impl Into<String>, signed_numbers: Vec<f64>) -> Self {
        assert!(
            signed_numbers.len() <= Self::MAX_SIGNED_NUMBERS,
            "a type name takes at most {} numeric parameters, got {}",
            Self::MAX_SIGNED_NUMBERS,
            signed_numbers.len()
        );
        Self {
            name: name.into(),
            signed_numbers,
        }
    }

    /// The type used for a column without an explicit type.
    #[must_use]
    pub fn blob() -> Self {
        Self::new(Self::DEFAULT_NAME, vec![])
    }

    /// The type name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The numeric parameters, e.g. `[255.0]` for `VARCHAR(255)`.
    #[must_use]
    pub fn signed_numbers(&self) -> &[f64] {
        &self.signed_numbers
    }
}

/// A column definition for CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDefinition {
    name: String,
    type_name: TypeName,
}

impl ColumnDefinition {
    /// Creates a new column definition.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: TypeName) -> Self {
        Self {
            name: name.into(),
            type_name,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type ([`TypeName::blob`] when omitted).
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_accessors() {
        let type_name = TypeName::new("varchar", vec![255.0, -123.0]);
        assert_eq!(type_name.name(), "varchar");
        assert_eq!(type_name.signed_numbers(), &[255.0, -123.0]);
    }

    #[test]
    fn test_default_type_is_blob() {
        let column = ColumnDefinition::new("column1", TypeName::blob());
        assert_eq!(column.name(), "column1");
        assert_eq!(column.type_name().name(), "BLOB");
        assert!(column.type_name().signed_numbers().is_empty());
    }

    #[test]
    #[should_panic(expected = "at most 2 numeric parameters")]
    fn test_type_name_rejects_three_parameters() {
        let _ = TypeName::new("decimal", vec![1.0, 2.0, 3.0]);
    }
}
