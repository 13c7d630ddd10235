//! Client-side constraint checks
//!
//! Shapes accept anything through their setters. Requests that carry
//! service constraints implement [`Validate`], built from the helpers here,
//! and the client runs it before dispatch when validation is enabled.
//! Every helper treats an unset optional field as valid; use [`require`]
//! for mandatory ones.

use crate::ValidationError;

/// Checks a shape against the service's documented constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Implemented by wire enums so validation can reject unrecognized values.
pub trait KnownValue {
    fn is_unknown(&self) -> bool;
    fn wire_value(&self) -> &str;
}

/// Fails with `RequiredFieldMissing` when the field is unset.
pub fn require<T>(field: &str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::RequiredFieldMissing {
        field: field.to_string(),
    })
}

/// Length in characters must fall within `min..=max`.
pub fn check_length(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::LengthOutOfRange {
            field: field.to_string(),
            len,
            min,
            max,
        });
    }
    Ok(())
}

pub fn check_range(
    field: &str,
    value: Option<i64>,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if value < min || value > max => Err(ValidationError::ValueOutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        }),
        _ => Ok(()),
    }
}

pub fn check_max_items<T>(
    field: &str,
    items: Option<&[T]>,
    max: usize,
) -> Result<(), ValidationError> {
    match items {
        Some(items) if items.len() > max => Err(ValidationError::TooManyItems {
            field: field.to_string(),
            count: items.len(),
            max,
        }),
        _ => Ok(()),
    }
}

/// Validates a nested shape, reporting failures under `field`.
pub fn check_nested<T: Validate>(field: &str, value: Option<&T>) -> Result<(), ValidationError> {
    match value {
        Some(value) => value.validate().map_err(|e| e.within(field)),
        None => Ok(()),
    }
}

/// Validates every element of a list, reporting failures as `field[i]`.
pub fn check_each<T: Validate>(field: &str, items: Option<&[T]>) -> Result<(), ValidationError> {
    for (index, item) in items.unwrap_or_default().iter().enumerate() {
        item.validate()
            .map_err(|e| e.within(&format!("{}[{}]", field, index)))?;
    }
    Ok(())
}

/// Rejects enum values the service would not accept.
pub fn check_known<E: KnownValue>(field: &str, value: Option<&E>) -> Result<(), ValidationError> {
    match value {
        Some(value) if value.is_unknown() => Err(ValidationError::invalid(
            field,
            format!("unrecognized value '{}'", value.wire_value()),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf(Option<String>);

    impl Validate for Leaf {
        fn validate(&self) -> Result<(), ValidationError> {
            require("Name", self.0.as_deref())?;
            Ok(())
        }
    }

    #[test]
    fn test_require_reports_field() {
        let err = require::<&str>("InstanceId", None).unwrap_err();
        assert_eq!(err.field(), "InstanceId");
        assert_eq!(require("InstanceId", Some("abc")).unwrap(), "abc");
    }

    #[test]
    fn test_length_counts_chars_and_skips_unset() {
        assert!(check_length("Id", None, 1, 3).is_ok());
        assert!(check_length("Id", Some("äöü"), 1, 3).is_ok());
        assert!(matches!(
            check_length("Id", Some(""), 1, 3),
            Err(ValidationError::LengthOutOfRange { len: 0, .. })
        ));
        assert!(check_length("Id", Some("abcd"), 1, 3).is_err());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        assert!(check_range("MaxResults", Some(1), 1, 100).is_ok());
        assert!(check_range("MaxResults", Some(100), 1, 100).is_ok());
        assert!(check_range("MaxResults", Some(0), 1, 100).is_err());
        assert!(check_range("MaxResults", Some(101), 1, 100).is_err());
    }

    #[test]
    fn test_max_items() {
        let items = [1, 2, 3];
        assert!(check_max_items("Groupings", Some(&items[..]), 3).is_ok());
        assert!(matches!(
            check_max_items("Groupings", Some(&items[..]), 2),
            Err(ValidationError::TooManyItems { count: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_each_prefixes_index() {
        let items = [Leaf(Some("a".into())), Leaf(None)];
        let err = check_each("Items", Some(&items[..])).unwrap_err();
        assert_eq!(err.field(), "Items[1].Name");
    }

    #[test]
    fn test_nested_prefixes_field() {
        let err = check_nested("Leaf", Some(&Leaf(None))).unwrap_err();
        assert_eq!(err.field(), "Leaf.Name");
        assert!(check_nested::<Leaf>("Leaf", None).is_ok());
    }
}
