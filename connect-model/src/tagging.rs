//! Resource tagging
//!
//! The tagging operations use camel-case member names on the wire
//! (`resourceArn`, `tags`, `tagKeys`), unlike the rest of the API.

use connect_core::validation::{check_length, check_max_items, require};
use connect_core::{shape, Validate, ValidationError};

use crate::constraints::{check_tags, MAX_TAGS, TAG_KEY_MAX_LEN};
use crate::operation::impl_operation;

shape! {
    pub struct TagResourceRequest {
        string resource_arn(set_resource_arn, with_resource_arn) => "resourceArn";
        map tags(set_tags, with_tags, add_tags_entry, clear_tags_entries): String => "tags";
    }
}

impl Validate for TagResourceRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("resourceArn", self.resource_arn())?;
        let tags = require("tags", self.tags())?;
        if tags.is_empty() {
            return Err(ValidationError::invalid("tags", "at least one tag is required"));
        }
        check_tags("tags", Some(tags))
    }
}

shape! {
    pub struct TagResourceResult {}
}

shape! {
    pub struct UntagResourceRequest {
        string resource_arn(set_resource_arn, with_resource_arn) => "resourceArn";
        list tag_keys(set_tag_keys, with_tag_keys, add_tag_key): String => "tagKeys";
    }
}

impl Validate for UntagResourceRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("resourceArn", self.resource_arn())?;
        let keys = require("tagKeys", self.tag_keys())?;
        check_max_items("tagKeys", Some(keys), MAX_TAGS)?;
        for (index, key) in keys.iter().enumerate() {
            check_length(&format!("tagKeys[{}]", index), Some(key), 1, TAG_KEY_MAX_LEN)?;
        }
        Ok(())
    }
}

shape! {
    pub struct UntagResourceResult {}
}

shape! {
    pub struct ListTagsForResourceRequest {
        string resource_arn(set_resource_arn, with_resource_arn) => "resourceArn";
    }
}

impl Validate for ListTagsForResourceRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("resourceArn", self.resource_arn())?;
        Ok(())
    }
}

shape! {
    pub struct ListTagsForResourceResult {
        map tags(set_tags, with_tags, add_tags_entry, clear_tags_entries): String => "tags";
    }
}

impl_operation!(TagResourceRequest => TagResourceResult, "TagResource");
impl_operation!(UntagResourceRequest => UntagResourceResult, "UntagResource");
impl_operation!(ListTagsForResourceRequest => ListTagsForResourceResult, "ListTagsForResource");

#[cfg(test)]
mod tests {
    use super::*;
    use connect_core::ModelError;

    const ARN: &str = "arn:aws:connect:us-west-2:123456789012:instance/inst-1";

    #[test]
    fn test_add_tags_entry_guards_duplicates() {
        let mut request = TagResourceRequest::new().with_resource_arn(ARN);
        request.add_tags_entry("team", "ops").unwrap();
        let before = request.clone();

        let err = request.add_tags_entry("team", "billing").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateMapKey { field: "tags", .. }));
        assert_eq!(request, before);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let request = TagResourceRequest::new()
            .with_resource_arn(ARN)
            .with_tags([("team", "ops")]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "resourceArn": ARN, "tags": { "team": "ops" } }));
        assert_eq!(request.to_string(), format!("{{resourceArn: {},tags: {{team=ops}}}}", ARN));
    }

    #[test]
    fn test_tag_request_needs_tags() {
        let request = TagResourceRequest::new().with_resource_arn(ARN);
        assert_eq!(request.validate().unwrap_err().field(), "tags");

        let request = request.with_tags(Vec::<(String, String)>::new());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_untag_key_length() {
        let request = UntagResourceRequest::new()
            .with_resource_arn(ARN)
            .with_tag_keys(["ok", ""]);
        assert_eq!(request.validate().unwrap_err().field(), "tagKeys[1]");
    }

    #[test]
    fn test_clear_tags_entries() {
        let mut result: ListTagsForResourceResult =
            serde_json::from_str(r#"{"tags":{"a":"1","b":"2"}}"#).unwrap();
        assert_eq!(result.tags().map(|tags| tags.len()), Some(2));
        result.clear_tags_entries();
        assert_eq!(result, ListTagsForResourceResult::new());
    }
}
