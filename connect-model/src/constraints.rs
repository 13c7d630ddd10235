//! Constraints shared by many requests

use std::collections::BTreeMap;

use connect_core::validation::{check_length, check_range, require};
use connect_core::{Timestamp, ValidationError};

pub const INSTANCE_ID_MAX_LEN: usize = 100;
pub const CLIENT_TOKEN_MAX_LEN: usize = 500;

pub const TAG_KEY_MAX_LEN: usize = 128;
pub const TAG_VALUE_MAX_LEN: usize = 256;
pub const MAX_TAGS: usize = 50;

/// `EndTime - StartTime` must stay strictly below this.
pub const MAX_RANGE_MILLIS: i64 = 24 * 60 * 60 * 1000;
const RESERVED_TAG_PREFIX: &str = "aws:";

pub(crate) fn check_instance_id(value: Option<&str>) -> Result<(), ValidationError> {
    check_required_id("InstanceId", value, INSTANCE_ID_MAX_LEN)
}

/// A mandatory identifier of bounded length.
pub(crate) fn check_required_id(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    let value = require(field, value)?;
    check_length(field, Some(value), 1, max)
}

pub(crate) fn check_client_token(value: Option<&str>) -> Result<(), ValidationError> {
    check_length("ClientToken", value, 0, CLIENT_TOKEN_MAX_LEN)
}

pub(crate) fn check_max_results(value: Option<i32>, max: i64) -> Result<(), ValidationError> {
    check_range("MaxResults", value.map(i64::from), 1, max)
}

/// [`check_time_range`], plus a span strictly under 24 hours.
pub(crate) fn check_day_range(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(Timestamp, Timestamp), ValidationError> {
    let (start, end) = check_time_range(start, end)?;
    if end.epoch_millis() - start.epoch_millis() >= MAX_RANGE_MILLIS {
        return Err(ValidationError::invalid(
            "EndTime",
            "range between StartTime and EndTime must be less than 24 hours",
        ));
    }
    Ok((start, end))
}

/// Both ends required and `start < end`.
pub(crate) fn check_time_range(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(Timestamp, Timestamp), ValidationError> {
    let start = require("StartTime", start)?;
    let end = require("EndTime", end)?;
    if start >= end {
        return Err(ValidationError::invalid(
            "EndTime",
            format!("must be later than StartTime ({})", start),
        ));
    }
    Ok((start, end))
}

/// Resource tags: bounded key and value lengths, no reserved prefix.
pub fn check_tags(
    field: &str,
    tags: Option<&BTreeMap<String, String>>,
) -> Result<(), ValidationError> {
    let Some(tags) = tags else {
        return Ok(());
    };
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooManyItems {
            field: field.to_string(),
            count: tags.len(),
            max: MAX_TAGS,
        });
    }
    for (key, value) in tags {
        let key_field = format!("{}.{}", field, key);
        check_length(&key_field, Some(key), 1, TAG_KEY_MAX_LEN)?;
        check_length(&key_field, Some(value), 0, TAG_VALUE_MAX_LEN)?;
        if key.starts_with(RESERVED_TAG_PREFIX) {
            return Err(ValidationError::invalid(
                key_field,
                format!("keys may not start with '{}'", RESERVED_TAG_PREFIX),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_required_and_bounded() {
        assert!(matches!(
            check_instance_id(None),
            Err(ValidationError::RequiredFieldMissing { .. })
        ));
        assert!(check_instance_id(Some("")).is_err());
        assert!(check_instance_id(Some(&"x".repeat(100))).is_ok());
        assert!(check_instance_id(Some(&"x".repeat(101))).is_err());
    }

    #[test]
    fn test_time_range_order() {
        let a = Timestamp::from_epoch_seconds(600).unwrap();
        let b = Timestamp::from_epoch_seconds(900).unwrap();
        assert!(check_time_range(Some(a), Some(b)).is_ok());
        assert!(check_time_range(Some(b), Some(a)).is_err());
        assert!(check_time_range(Some(a), Some(a)).is_err());
        assert_eq!(
            check_time_range(Some(a), None).unwrap_err().field(),
            "EndTime"
        );
    }

    #[test]
    fn test_tags_rules() {
        let mut tags = BTreeMap::new();
        tags.insert("team".to_string(), "ops".to_string());
        assert!(check_tags("Tags", Some(&tags)).is_ok());

        tags.insert("aws:owner".to_string(), "x".to_string());
        let err = check_tags("Tags", Some(&tags)).unwrap_err();
        assert_eq!(err.field(), "Tags.aws:owner");

        let many: BTreeMap<String, String> =
            (0..51).map(|i| (format!("k{}", i), String::new())).collect();
        assert!(matches!(
            check_tags("Tags", Some(&many)),
            Err(ValidationError::TooManyItems { count: 51, .. })
        ));
    }
}
