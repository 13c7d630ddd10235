//! Instance resource listings
//!
//! Contact flows, hours of operation, phone numbers, routing profiles and
//! security profiles. Each listing takes an instance, a page token and a
//! page size of at most 1000.

use connect_core::validation::{check_known, check_length, check_max_items};
use connect_core::{shape, wire_enum, Validate, ValidationError};

use crate::constraints::{check_instance_id, check_max_results};
use crate::operation::{impl_operation, impl_paginated};

pub const LIST_MAX_RESULTS: i64 = 1000;
pub const MAX_CONTACT_FLOW_TYPES: usize = 10;
pub const MAX_PHONE_NUMBER_TYPES: usize = 2;
pub const MAX_COUNTRY_CODES: usize = 10;

wire_enum! {
    pub enum ContactFlowType {
        ContactFlow => "CONTACT_FLOW",
        CustomerQueue => "CUSTOMER_QUEUE",
        CustomerHold => "CUSTOMER_HOLD",
        CustomerWhisper => "CUSTOMER_WHISPER",
        AgentHold => "AGENT_HOLD",
        AgentWhisper => "AGENT_WHISPER",
        OutboundWhisper => "OUTBOUND_WHISPER",
        AgentTransfer => "AGENT_TRANSFER",
        QueueTransfer => "QUEUE_TRANSFER",
    }
}

wire_enum! {
    pub enum PhoneNumberType {
        TollFree => "TOLL_FREE",
        Did => "DID",
    }
}

fn check_known_each<E: connect_core::KnownValue>(field: &str, values: Option<&[E]>) -> Result<(), ValidationError> {
    for (index, value) in values.unwrap_or_default().iter().enumerate() {
        check_known(&format!("{}[{}]", field, index), Some(value))?;
    }
    Ok(())
}

/// Declares a listing request with only `InstanceId`, `NextToken` and
/// `MaxResults`, and its validation.
macro_rules! plain_listing {
    ($Request:ident) => {
        shape! {
            pub struct $Request {
                string instance_id(set_instance_id, with_instance_id) => "InstanceId";
                string next_token(set_next_token, with_next_token) => "NextToken";
                copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
            }
        }

        impl Validate for $Request {
            fn validate(&self) -> Result<(), ValidationError> {
                check_instance_id(self.instance_id())?;
                check_max_results(self.max_results(), LIST_MAX_RESULTS)
            }
        }
    };
}

// ============================================================================
// CONTACT FLOWS
// ============================================================================

shape! {
    pub struct ContactFlowSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
        nested contact_flow_type(set_contact_flow_type, with_contact_flow_type): ContactFlowType => "ContactFlowType";
    }
}

shape! {
    pub struct ListContactFlowsRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        list contact_flow_types(set_contact_flow_types, with_contact_flow_types, add_contact_flow_type): ContactFlowType => "ContactFlowTypes";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for ListContactFlowsRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_max_items("ContactFlowTypes", self.contact_flow_types(), MAX_CONTACT_FLOW_TYPES)?;
        check_known_each("ContactFlowTypes", self.contact_flow_types())?;
        check_max_results(self.max_results(), LIST_MAX_RESULTS)
    }
}

shape! {
    pub struct ListContactFlowsResult {
        list contact_flow_summary_list(set_contact_flow_summary_list, with_contact_flow_summary_list, add_contact_flow_summary): ContactFlowSummary => "ContactFlowSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

// ============================================================================
// HOURS OF OPERATION
// ============================================================================

shape! {
    pub struct HoursOfOperationSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
    }
}

plain_listing!(ListHoursOfOperationsRequest);

shape! {
    pub struct ListHoursOfOperationsResult {
        list hours_of_operation_summary_list(set_hours_of_operation_summary_list, with_hours_of_operation_summary_list, add_hours_of_operation_summary): HoursOfOperationSummary => "HoursOfOperationSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

// ============================================================================
// PHONE NUMBERS
// ============================================================================

shape! {
    pub struct PhoneNumberSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        /// E.164 form.
        string phone_number(set_phone_number, with_phone_number) => "PhoneNumber";
        nested phone_number_type(set_phone_number_type, with_phone_number_type): PhoneNumberType => "PhoneNumberType";
        /// ISO 3166-1 alpha-2, e.g. `US`.
        string phone_number_country_code(set_phone_number_country_code, with_phone_number_country_code) => "PhoneNumberCountryCode";
    }
}

shape! {
    pub struct ListPhoneNumbersRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        list phone_number_types(set_phone_number_types, with_phone_number_types, add_phone_number_type): PhoneNumberType => "PhoneNumberTypes";
        list phone_number_country_codes(set_phone_number_country_codes, with_phone_number_country_codes, add_phone_number_country_code): String => "PhoneNumberCountryCodes";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for ListPhoneNumbersRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_max_items("PhoneNumberTypes", self.phone_number_types(), MAX_PHONE_NUMBER_TYPES)?;
        check_known_each("PhoneNumberTypes", self.phone_number_types())?;
        check_max_items("PhoneNumberCountryCodes", self.phone_number_country_codes(), MAX_COUNTRY_CODES)?;
        for (index, code) in self.phone_number_country_codes().unwrap_or_default().iter().enumerate() {
            let field = format!("PhoneNumberCountryCodes[{}]", index);
            check_length(&field, Some(code.as_str()), 2, 2)?;
            if !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ValidationError::invalid(field, format!("'{}' is not a country code", code)));
            }
        }
        check_max_results(self.max_results(), LIST_MAX_RESULTS)
    }
}

shape! {
    pub struct ListPhoneNumbersResult {
        list phone_number_summary_list(set_phone_number_summary_list, with_phone_number_summary_list, add_phone_number_summary): PhoneNumberSummary => "PhoneNumberSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

// ============================================================================
// ROUTING AND SECURITY PROFILES
// ============================================================================

shape! {
    pub struct RoutingProfileSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
    }
}

plain_listing!(ListRoutingProfilesRequest);

shape! {
    pub struct ListRoutingProfilesResult {
        list routing_profile_summary_list(set_routing_profile_summary_list, with_routing_profile_summary_list, add_routing_profile_summary): RoutingProfileSummary => "RoutingProfileSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

shape! {
    pub struct SecurityProfileSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
    }
}

plain_listing!(ListSecurityProfilesRequest);

shape! {
    pub struct ListSecurityProfilesResult {
        list security_profile_summary_list(set_security_profile_summary_list, with_security_profile_summary_list, add_security_profile_summary): SecurityProfileSummary => "SecurityProfileSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

impl_operation!(ListContactFlowsRequest => ListContactFlowsResult, "ListContactFlows");
impl_paginated!(ListContactFlowsRequest => ListContactFlowsResult, contact_flow_summary_list: ContactFlowSummary);
impl_operation!(ListHoursOfOperationsRequest => ListHoursOfOperationsResult, "ListHoursOfOperations");
impl_paginated!(ListHoursOfOperationsRequest => ListHoursOfOperationsResult, hours_of_operation_summary_list: HoursOfOperationSummary);
impl_operation!(ListPhoneNumbersRequest => ListPhoneNumbersResult, "ListPhoneNumbers");
impl_paginated!(ListPhoneNumbersRequest => ListPhoneNumbersResult, phone_number_summary_list: PhoneNumberSummary);
impl_operation!(ListRoutingProfilesRequest => ListRoutingProfilesResult, "ListRoutingProfiles");
impl_paginated!(ListRoutingProfilesRequest => ListRoutingProfilesResult, routing_profile_summary_list: RoutingProfileSummary);
impl_operation!(ListSecurityProfilesRequest => ListSecurityProfilesResult, "ListSecurityProfiles");
impl_paginated!(ListSecurityProfilesRequest => ListSecurityProfilesResult, security_profile_summary_list: SecurityProfileSummary);
