//! Users

use connect_core::validation::{check_known, check_length, check_nested, check_range, require};
use connect_core::{shape, wire_enum, Timestamp, Validate, ValidationError};

use crate::constraints::{check_instance_id, check_max_results, check_required_id, check_tags};
use crate::operation::{impl_operation, impl_paginated};

pub const USERNAME_MAX_LEN: usize = 100;
pub const NAME_MAX_LEN: usize = 100;
pub const MAX_SECURITY_PROFILES: usize = 10;

wire_enum! {
    pub enum PhoneType {
        SoftPhone => "SOFT_PHONE",
        DeskPhone => "DESK_PHONE",
    }
}

shape! {
    pub struct UserIdentityInfo {
        string first_name(set_first_name, with_first_name) => "FirstName";
        string last_name(set_last_name, with_last_name) => "LastName";
        string email(set_email, with_email) => "Email";
    }
}

impl Validate for UserIdentityInfo {
    fn validate(&self) -> Result<(), ValidationError> {
        check_length("FirstName", self.first_name(), 1, NAME_MAX_LEN)?;
        check_length("LastName", self.last_name(), 1, NAME_MAX_LEN)?;
        if let Some(email) = self.email() {
            if !email.contains('@') {
                return Err(ValidationError::invalid("Email", format!("'{}' is not an email address", email)));
            }
        }
        Ok(())
    }
}

shape! {
    pub struct UserPhoneConfig {
        nested phone_type(set_phone_type, with_phone_type): PhoneType => "PhoneType";
        copy auto_accept(set_auto_accept, with_auto_accept): bool => "AutoAccept";
        /// Seconds of after-contact work before the agent becomes available.
        copy after_contact_work_time_limit(set_after_contact_work_time_limit, with_after_contact_work_time_limit): i32 => "AfterContactWorkTimeLimit";
        string desk_phone_number(set_desk_phone_number, with_desk_phone_number) => "DeskPhoneNumber";
    }
}

impl Validate for UserPhoneConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let phone_type = require("PhoneType", self.phone_type())?;
        check_known("PhoneType", Some(phone_type))?;
        check_range(
            "AfterContactWorkTimeLimit",
            self.after_contact_work_time_limit().map(i64::from),
            0,
            i64::from(i32::MAX),
        )?;
        if *phone_type == PhoneType::DeskPhone {
            require("DeskPhoneNumber", self.desk_phone_number())?;
        }
        Ok(())
    }
}

shape! {
    pub struct User {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string username(set_username, with_username) => "Username";
        nested identity_info(set_identity_info, with_identity_info): UserIdentityInfo => "IdentityInfo";
        nested phone_config(set_phone_config, with_phone_config): UserPhoneConfig => "PhoneConfig";
        string directory_user_id(set_directory_user_id, with_directory_user_id) => "DirectoryUserId";
        list security_profile_ids(set_security_profile_ids, with_security_profile_ids, add_security_profile_id): String => "SecurityProfileIds";
        string routing_profile_id(set_routing_profile_id, with_routing_profile_id) => "RoutingProfileId";
        string hierarchy_group_id(set_hierarchy_group_id, with_hierarchy_group_id) => "HierarchyGroupId";
        map tags(set_tags, with_tags, add_tags_entry, clear_tags_entries): String => "Tags";
    }
}

shape! {
    pub struct UserSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string username(set_username, with_username) => "Username";
    }
}

/// Between 1 and [`MAX_SECURITY_PROFILES`] ids.
fn check_security_profile_ids(ids: Option<&[String]>) -> Result<(), ValidationError> {
    let ids = require("SecurityProfileIds", ids)?;
    if ids.is_empty() || ids.len() > MAX_SECURITY_PROFILES {
        return Err(ValidationError::LengthOutOfRange {
            field: "SecurityProfileIds".to_string(),
            len: ids.len(),
            min: 1,
            max: MAX_SECURITY_PROFILES,
        });
    }
    Ok(())
}

/// The user and instance every user update names.
fn check_user_target(user_id: Option<&str>, instance_id: Option<&str>) -> Result<(), ValidationError> {
    require("UserId", user_id)?;
    check_instance_id(instance_id)
}

// ============================================================================
// OPERATIONS
// ============================================================================

shape! {
    pub struct CreateUserRequest {
        string username(set_username, with_username) => "Username";
        /// Required only when the instance manages identities itself.
        secret password(set_password, with_password) => "Password";
        nested identity_info(set_identity_info, with_identity_info): UserIdentityInfo => "IdentityInfo";
        nested phone_config(set_phone_config, with_phone_config): UserPhoneConfig => "PhoneConfig";
        string directory_user_id(set_directory_user_id, with_directory_user_id) => "DirectoryUserId";
        list security_profile_ids(set_security_profile_ids, with_security_profile_ids, add_security_profile_id): String => "SecurityProfileIds";
        string routing_profile_id(set_routing_profile_id, with_routing_profile_id) => "RoutingProfileId";
        string hierarchy_group_id(set_hierarchy_group_id, with_hierarchy_group_id) => "HierarchyGroupId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        map tags(set_tags, with_tags, add_tags_entry, clear_tags_entries): String => "Tags";
    }
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required_id("Username", self.username(), USERNAME_MAX_LEN)?;
        check_nested("IdentityInfo", self.identity_info())?;
        check_nested("PhoneConfig", Some(require("PhoneConfig", self.phone_config())?))?;
        check_security_profile_ids(self.security_profile_ids())?;
        require("RoutingProfileId", self.routing_profile_id())?;
        check_instance_id(self.instance_id())?;
        check_tags("Tags", self.tags())
    }
}

shape! {
    pub struct CreateUserResult {
        string user_id(set_user_id, with_user_id) => "UserId";
        string user_arn(set_user_arn, with_user_arn) => "UserArn";
    }
}

shape! {
    pub struct DescribeUserRequest {
        string user_id(set_user_id, with_user_id) => "UserId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for DescribeUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("UserId", self.user_id())?;
        check_instance_id(self.instance_id())
    }
}

shape! {
    pub struct DescribeUserResult {
        nested user(set_user, with_user): User => "User";
    }
}

shape! {
    pub struct DeleteUserRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string user_id(set_user_id, with_user_id) => "UserId";
    }
}

impl Validate for DeleteUserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        require("UserId", self.user_id())?;
        Ok(())
    }
}

shape! {
    pub struct DeleteUserResult {}
}

shape! {
    pub struct ListUsersRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for ListUsersRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_max_results(self.max_results(), 1000)
    }
}

shape! {
    pub struct ListUsersResult {
        list user_summary_list(set_user_summary_list, with_user_summary_list, add_user_summary): UserSummary => "UserSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

shape! {
    pub struct UpdateUserIdentityInfoRequest {
        nested identity_info(set_identity_info, with_identity_info): UserIdentityInfo => "IdentityInfo";
        string user_id(set_user_id, with_user_id) => "UserId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for UpdateUserIdentityInfoRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_nested("IdentityInfo", Some(require("IdentityInfo", self.identity_info())?))?;
        check_user_target(self.user_id(), self.instance_id())
    }
}

shape! {
    pub struct UpdateUserIdentityInfoResult {}
}

shape! {
    pub struct UpdateUserPhoneConfigRequest {
        nested phone_config(set_phone_config, with_phone_config): UserPhoneConfig => "PhoneConfig";
        string user_id(set_user_id, with_user_id) => "UserId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for UpdateUserPhoneConfigRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_nested("PhoneConfig", Some(require("PhoneConfig", self.phone_config())?))?;
        check_user_target(self.user_id(), self.instance_id())
    }
}

shape! {
    pub struct UpdateUserPhoneConfigResult {}
}

shape! {
    pub struct UpdateUserRoutingProfileRequest {
        string routing_profile_id(set_routing_profile_id, with_routing_profile_id) => "RoutingProfileId";
        string user_id(set_user_id, with_user_id) => "UserId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for UpdateUserRoutingProfileRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("RoutingProfileId", self.routing_profile_id())?;
        check_user_target(self.user_id(), self.instance_id())
    }
}

shape! {
    pub struct UpdateUserRoutingProfileResult {}
}

shape! {
    pub struct UpdateUserSecurityProfilesRequest {
        list security_profile_ids(set_security_profile_ids, with_security_profile_ids, add_security_profile_id): String => "SecurityProfileIds";
        string user_id(set_user_id, with_user_id) => "UserId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for UpdateUserSecurityProfilesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_security_profile_ids(self.security_profile_ids())?;
        check_user_target(self.user_id(), self.instance_id())
    }
}

shape! {
    pub struct UpdateUserSecurityProfilesResult {}
}

shape! {
    pub struct UpdateUserHierarchyRequest {
        /// Unset removes the user from any hierarchy group.
        string hierarchy_group_id(set_hierarchy_group_id, with_hierarchy_group_id) => "HierarchyGroupId";
        string user_id(set_user_id, with_user_id) => "UserId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for UpdateUserHierarchyRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_user_target(self.user_id(), self.instance_id())
    }
}

shape! {
    pub struct UpdateUserHierarchyResult {}
}

shape! {
    /// Short-lived tokens for signing in to the agent application.
    pub struct Credentials {
        secret access_token(set_access_token, with_access_token) => "AccessToken";
        copy access_token_expiration(set_access_token_expiration, with_access_token_expiration): Timestamp => "AccessTokenExpiration";
        secret refresh_token(set_refresh_token, with_refresh_token) => "RefreshToken";
        copy refresh_token_expiration(set_refresh_token_expiration, with_refresh_token_expiration): Timestamp => "RefreshTokenExpiration";
    }
}

shape! {
    pub struct GetFederationTokenRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for GetFederationTokenRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())
    }
}

shape! {
    pub struct GetFederationTokenResult {
        nested credentials(set_credentials, with_credentials): Credentials => "Credentials";
    }
}

impl_operation!(CreateUserRequest => CreateUserResult, "CreateUser");
impl_operation!(DescribeUserRequest => DescribeUserResult, "DescribeUser");
impl_operation!(DeleteUserRequest => DeleteUserResult, "DeleteUser");
impl_operation!(ListUsersRequest => ListUsersResult, "ListUsers");
impl_paginated!(ListUsersRequest => ListUsersResult, user_summary_list: UserSummary);
impl_operation!(UpdateUserIdentityInfoRequest => UpdateUserIdentityInfoResult, "UpdateUserIdentityInfo");
impl_operation!(UpdateUserPhoneConfigRequest => UpdateUserPhoneConfigResult, "UpdateUserPhoneConfig");
impl_operation!(UpdateUserRoutingProfileRequest => UpdateUserRoutingProfileResult, "UpdateUserRoutingProfile");
impl_operation!(UpdateUserSecurityProfilesRequest => UpdateUserSecurityProfilesResult, "UpdateUserSecurityProfiles");
impl_operation!(UpdateUserHierarchyRequest => UpdateUserHierarchyResult, "UpdateUserHierarchy");
impl_operation!(GetFederationTokenRequest => GetFederationTokenResult, "GetFederationToken");

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateUserRequest {
        CreateUserRequest::new()
            .with_username("jdoe")
            .with_identity_info(UserIdentityInfo::new().with_first_name("J").with_last_name("Doe"))
            .with_phone_config(
                UserPhoneConfig::new()
                    .with_phone_type(PhoneType::SoftPhone)
                    .with_auto_accept(false)
                    .with_after_contact_work_time_limit(30),
            )
            .add_security_profile_id("sp-1")
            .with_routing_profile_id("rp-1")
            .with_instance_id("inst-1")
    }

    #[test]
    fn test_valid_create_user() {
        create_request().validate().unwrap();
    }

    #[test]
    fn test_password_never_rendered() {
        let request = create_request().with_password("S3cret-pass");
        assert_eq!(request.password(), Some("S3cret-pass"));
        assert!(!request.to_string().contains("S3cret-pass"));
        assert!(request.to_string().contains("Password: *** Sensitive Data Redacted ***"));
        assert!(!format!("{:?}", request).contains("S3cret-pass"));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["Password"], "S3cret-pass");
    }

    #[test]
    fn test_desk_phone_needs_number() {
        let request = create_request().with_phone_config(
            UserPhoneConfig::new().with_phone_type(PhoneType::DeskPhone),
        );
        assert_eq!(request.validate().unwrap_err().field(), "PhoneConfig.DeskPhoneNumber");
    }

    #[test]
    fn test_security_profile_bounds() {
        let mut request = create_request();
        request.set_security_profile_ids(Some(Vec::new()));
        assert_eq!(request.validate().unwrap_err().field(), "SecurityProfileIds");

        let request = create_request().with_security_profile_ids((0..11).map(|i| format!("sp-{}", i)));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_set_list_takes_ownership() {
        let mut ids = vec!["sp-1".to_string()];
        let mut request = CreateUserRequest::new();
        request.set_security_profile_ids(Some(ids.clone()));
        ids.push("sp-2".to_string());
        assert_eq!(request.security_profile_ids(), Some(&["sp-1".to_string()][..]));
    }

    #[test]
    fn test_user_updates_name_user_and_instance() {
        let request = UpdateUserRoutingProfileRequest::new()
            .with_routing_profile_id("rp-2")
            .with_instance_id("inst-1");
        assert_eq!(request.validate().unwrap_err().field(), "UserId");
        assert!(request.with_user_id("u-1").validate().is_ok());

        let request = UpdateUserHierarchyRequest::new().with_user_id("u-1");
        assert_eq!(request.validate().unwrap_err().field(), "InstanceId");
        assert!(request.with_instance_id("inst-1").validate().is_ok());
    }

    #[test]
    fn test_update_identity_info_validates_nested() {
        let request = UpdateUserIdentityInfoRequest::new()
            .with_user_id("u-1")
            .with_instance_id("inst-1");
        assert_eq!(request.validate().unwrap_err().field(), "IdentityInfo");

        let request = request.with_identity_info(UserIdentityInfo::new().with_email("nobody"));
        assert_eq!(request.validate().unwrap_err().field(), "IdentityInfo.Email");
    }

    #[test]
    fn test_update_phone_config_requires_number_for_desk_phone() {
        let request = UpdateUserPhoneConfigRequest::new()
            .with_phone_config(UserPhoneConfig::new().with_phone_type(PhoneType::DeskPhone))
            .with_user_id("u-1")
            .with_instance_id("inst-1");
        assert_eq!(request.validate().unwrap_err().field(), "PhoneConfig.DeskPhoneNumber");
    }

    #[test]
    fn test_update_security_profiles_bounds() {
        let request = UpdateUserSecurityProfilesRequest::new()
            .with_user_id("u-1")
            .with_instance_id("inst-1");
        assert_eq!(request.validate().unwrap_err().field(), "SecurityProfileIds");
        assert!(request.clone().add_security_profile_id("sp-1").validate().is_ok());
        let request = request.with_security_profile_ids((0..11).map(|i| format!("sp-{}", i)));
        assert_eq!(request.validate().unwrap_err().field(), "SecurityProfileIds");
    }

    #[test]
    fn test_federation_tokens_redacted() {
        let result: GetFederationTokenResult = serde_json::from_str(
            r#"{"Credentials":{"AccessToken":"abc","AccessTokenExpiration":1700000000,"RefreshToken":"def"}}"#,
        )
        .unwrap();
        let credentials = result.credentials().unwrap();
        assert_eq!(credentials.access_token(), Some("abc"));
        assert_eq!(credentials.refresh_token(), Some("def"));
        assert_eq!(
            result.to_string(),
            "{Credentials: {AccessToken: *** Sensitive Data Redacted ***,\
             AccessTokenExpiration: 2023-11-14T22:13:20Z,\
             RefreshToken: *** Sensitive Data Redacted ***}}"
        );
    }

    #[test]
    fn test_list_users_max_results() {
        let request = ListUsersRequest::new().with_instance_id("inst-1").with_max_results(1000);
        assert!(request.validate().is_ok());
        let request = request.with_max_results(1001);
        assert_eq!(request.validate().unwrap_err().field(), "MaxResults");
    }
}
