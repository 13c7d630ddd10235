//! Contacts: outbound calls, persistent chat associations, attributes

use std::collections::BTreeMap;

use connect_core::validation::{check_known, check_length, require};
use connect_core::{shape, wire_enum, Validate, ValidationError};

use crate::constraints::{check_client_token, check_instance_id, check_required_id};
use crate::operation::{impl_idempotent, impl_operation};

pub const CONTACT_ID_MAX_LEN: usize = 256;
pub const CONTACT_FLOW_ID_MAX_LEN: usize = 500;
pub const ATTRIBUTE_KEY_MAX_LEN: usize = 32_767;
pub const ATTRIBUTE_VALUE_MAX_LEN: usize = 32_767;

wire_enum! {
    /// How much of the source contact's transcript carries over.
    pub enum RehydrationType {
        EntirePastSession => "ENTIRE_PAST_SESSION",
        FromSegment => "FROM_SEGMENT",
    }
}

fn check_attributes(attributes: Option<&BTreeMap<String, String>>) -> Result<(), ValidationError> {
    for (key, value) in attributes.into_iter().flatten() {
        let field = format!("Attributes.{}", key);
        check_length(&field, Some(key), 1, ATTRIBUTE_KEY_MAX_LEN)?;
        check_length(&field, Some(value), 0, ATTRIBUTE_VALUE_MAX_LEN)?;
    }
    Ok(())
}

// ============================================================================
// PERSISTENT CHAT
// ============================================================================

shape! {
    /// Links a new chat to a past one so the transcript carries over.
    pub struct CreatePersistentContactAssociationRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        /// The chat contact being rehydrated into.
        string initial_contact_id(set_initial_contact_id, with_initial_contact_id) => "InitialContactId";
        nested rehydration_type(set_rehydration_type, with_rehydration_type): RehydrationType => "RehydrationType";
        /// The past chat to rehydrate from.
        string source_contact_id(set_source_contact_id, with_source_contact_id) => "SourceContactId";
        string client_token(set_client_token, with_client_token) => "ClientToken";
    }
}

impl Validate for CreatePersistentContactAssociationRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_required_id("InitialContactId", self.initial_contact_id(), CONTACT_ID_MAX_LEN)?;
        check_known("RehydrationType", Some(require("RehydrationType", self.rehydration_type())?))?;
        check_required_id("SourceContactId", self.source_contact_id(), CONTACT_ID_MAX_LEN)?;
        check_client_token(self.client_token())
    }
}

shape! {
    pub struct CreatePersistentContactAssociationResult {
        string continued_from_contact_id(set_continued_from_contact_id, with_continued_from_contact_id) => "ContinuedFromContactId";
    }
}

// ============================================================================
// OUTBOUND VOICE
// ============================================================================

shape! {
    pub struct StartOutboundVoiceContactRequest {
        /// E.164 phone number of the customer.
        string destination_phone_number(set_destination_phone_number, with_destination_phone_number) => "DestinationPhoneNumber";
        string contact_flow_id(set_contact_flow_id, with_contact_flow_id) => "ContactFlowId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string client_token(set_client_token, with_client_token) => "ClientToken";
        string source_phone_number(set_source_phone_number, with_source_phone_number) => "SourcePhoneNumber";
        string queue_id(set_queue_id, with_queue_id) => "QueueId";
        map attributes(set_attributes, with_attributes, add_attributes_entry, clear_attributes_entries): String => "Attributes";
    }
}

impl Validate for StartOutboundVoiceContactRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        let destination = require("DestinationPhoneNumber", self.destination_phone_number())?;
        check_phone_number("DestinationPhoneNumber", destination)?;
        check_required_id("ContactFlowId", self.contact_flow_id(), CONTACT_FLOW_ID_MAX_LEN)?;
        check_instance_id(self.instance_id())?;
        check_client_token(self.client_token())?;
        if let Some(source) = self.source_phone_number() {
            check_phone_number("SourcePhoneNumber", source)?;
        }
        check_attributes(self.attributes())
    }
}

/// E.164: a leading `+` and up to 15 digits.
fn check_phone_number(field: &str, value: &str) -> Result<(), ValidationError> {
    let digits = value.strip_prefix('+').unwrap_or_default();
    if digits.is_empty() || digits.len() > 15 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid(
            field,
            format!("'{}' is not an E.164 phone number", value),
        ));
    }
    Ok(())
}

shape! {
    pub struct StartOutboundVoiceContactResult {
        string contact_id(set_contact_id, with_contact_id) => "ContactId";
    }
}

// ============================================================================
// STOP / ATTRIBUTES
// ============================================================================

shape! {
    pub struct StopContactRequest {
        string contact_id(set_contact_id, with_contact_id) => "ContactId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for StopContactRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required_id("ContactId", self.contact_id(), CONTACT_ID_MAX_LEN)?;
        check_instance_id(self.instance_id())
    }
}

shape! {
    pub struct StopContactResult {}
}

shape! {
    pub struct GetContactAttributesRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string initial_contact_id(set_initial_contact_id, with_initial_contact_id) => "InitialContactId";
    }
}

impl Validate for GetContactAttributesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_required_id("InitialContactId", self.initial_contact_id(), CONTACT_ID_MAX_LEN)
    }
}

shape! {
    pub struct GetContactAttributesResult {
        map attributes(set_attributes, with_attributes, add_attributes_entry, clear_attributes_entries): String => "Attributes";
    }
}

shape! {
    /// Adds or overwrites attributes; an empty value clears the attribute.
    pub struct UpdateContactAttributesRequest {
        string initial_contact_id(set_initial_contact_id, with_initial_contact_id) => "InitialContactId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        map attributes(set_attributes, with_attributes, add_attributes_entry, clear_attributes_entries): String => "Attributes";
    }
}

impl Validate for UpdateContactAttributesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required_id("InitialContactId", self.initial_contact_id(), CONTACT_ID_MAX_LEN)?;
        check_instance_id(self.instance_id())?;
        check_attributes(Some(require("Attributes", self.attributes())?))
    }
}

shape! {
    pub struct UpdateContactAttributesResult {}
}

impl_operation!(CreatePersistentContactAssociationRequest => CreatePersistentContactAssociationResult, "CreatePersistentContactAssociation");
impl_idempotent!(CreatePersistentContactAssociationRequest);
impl_operation!(StartOutboundVoiceContactRequest => StartOutboundVoiceContactResult, "StartOutboundVoiceContact");
impl_idempotent!(StartOutboundVoiceContactRequest);
impl_operation!(StopContactRequest => StopContactResult, "StopContact");
impl_operation!(GetContactAttributesRequest => GetContactAttributesResult, "GetContactAttributes");
impl_operation!(UpdateContactAttributesRequest => UpdateContactAttributesResult, "UpdateContactAttributes");

#[cfg(test)]
mod tests {
    use super::*;
    use connect_core::ModelError;

    fn association() -> CreatePersistentContactAssociationRequest {
        CreatePersistentContactAssociationRequest::new()
            .with_instance_id("inst-1")
            .with_initial_contact_id("c-new")
            .with_rehydration_type(RehydrationType::EntirePastSession)
            .with_source_contact_id("c-old")
    }

    #[test]
    fn test_association_display_has_no_trailing_comma() {
        assert_eq!(
            association().to_string(),
            "{InstanceId: inst-1,InitialContactId: c-new,RehydrationType: ENTIRE_PAST_SESSION,SourceContactId: c-old}"
        );
    }

    #[test]
    fn test_association_constraints() {
        association().validate().unwrap();

        let request = association().with_rehydration_type("PARTIAL");
        assert_eq!(request.validate().unwrap_err().field(), "RehydrationType");

        let request = association().with_source_contact_id("c".repeat(257));
        assert!(matches!(
            request.validate(),
            Err(ValidationError::LengthOutOfRange { max: 256, .. })
        ));

        let request = association().with_client_token("t".repeat(501));
        assert_eq!(request.validate().unwrap_err().field(), "ClientToken");
    }

    #[test]
    fn test_outbound_attributes_reject_duplicates() {
        let mut request = StartOutboundVoiceContactRequest::new()
            .with_destination_phone_number("+15555550100")
            .with_contact_flow_id("flow-1")
            .with_instance_id("inst-1");
        request
            .add_attributes_entry("order", "42")
            .unwrap()
            .add_attributes_entry("tier", "gold")
            .unwrap();
        let err = request.add_attributes_entry("order", "43").unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateMapKey {
                field: "Attributes",
                key: "order".to_string()
            }
        );
        assert_eq!(request.attributes().unwrap()["order"], "42");
        request.validate().unwrap();
    }

    #[test]
    fn test_outbound_phone_number_format() {
        let request = StartOutboundVoiceContactRequest::new()
            .with_destination_phone_number("555-0100")
            .with_contact_flow_id("flow-1")
            .with_instance_id("inst-1");
        assert_eq!(request.validate().unwrap_err().field(), "DestinationPhoneNumber");
    }

    #[test]
    fn test_update_attributes_requires_map() {
        let request = UpdateContactAttributesRequest::new()
            .with_initial_contact_id("c-1")
            .with_instance_id("inst-1");
        assert_eq!(request.validate().unwrap_err().field(), "Attributes");
        assert!(request.with_attributes([("k", "")]).validate().is_ok());
    }

    #[test]
    fn test_empty_result_round_trips() {
        let result: StopContactResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, StopContactResult::new());
        assert_eq!(serde_json::to_string(&result).unwrap(), "{}");
    }
}
