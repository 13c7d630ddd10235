//! Operation client

use connect_core::{decode_fault, SdkConfig, ValidationMode, ERROR_TYPE_HEADER};
use connect_model::contact::{
    CreatePersistentContactAssociationRequest, GetContactAttributesRequest,
    StartOutboundVoiceContactRequest, StopContactRequest, UpdateContactAttributesRequest,
};
use connect_model::evaluation::{
    ActivateEvaluationFormRequest, CreateEvaluationFormRequest, DeleteEvaluationFormRequest,
    DescribeEvaluationFormRequest, ListEvaluationFormsRequest,
};
use connect_model::hierarchy::{
    DescribeUserHierarchyGroupRequest, DescribeUserHierarchyStructureRequest,
    ListUserHierarchyGroupsRequest,
};
use connect_model::metrics::{GetCurrentMetricDataRequest, GetMetricDataRequest, GetMetricDataV2Request};
use connect_model::queue::ListQueuesRequest;
use connect_model::resources::{
    ListContactFlowsRequest, ListHoursOfOperationsRequest, ListPhoneNumbersRequest,
    ListRoutingProfilesRequest, ListSecurityProfilesRequest,
};
use connect_model::tagging::{ListTagsForResourceRequest, TagResourceRequest, UntagResourceRequest};
use connect_model::user::{
    CreateUserRequest, DeleteUserRequest, DescribeUserRequest, GetFederationTokenRequest,
    ListUsersRequest, UpdateUserHierarchyRequest, UpdateUserIdentityInfoRequest,
    UpdateUserPhoneConfigRequest, UpdateUserRoutingProfileRequest,
    UpdateUserSecurityProfilesRequest,
};
use connect_model::{IdempotentOperation, Operation, PaginatedOperation};
use tracing::Instrument;

use crate::error::ConnectResult;
use crate::transport::{header_value, OperationCall, Transport, TransportResponse};

/// Sends operations through a [`Transport`].
///
/// Holds no mutable state; share it freely when the transport is shareable.
#[derive(Debug, Clone)]
pub struct ConnectClient<T> {
    transport: T,
    config: SdkConfig,
    endpoint: String,
}

impl<T: Transport> ConnectClient<T> {
    pub fn new(transport: T, config: SdkConfig) -> ConnectResult<Self> {
        config.validate()?;
        let endpoint = config.endpoint();
        Ok(Self {
            transport,
            config,
            endpoint,
        })
    }

    /// Builds a client from `CONNECT_SDK_CONFIG` plus environment overrides.
    pub fn from_env(transport: T) -> ConnectResult<Self> {
        let config = SdkConfig::load()?;
        Self::new(transport, config)
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validates (in strict mode), serializes and dispatches one request.
    pub async fn send<O: Operation>(&self, request: &O) -> ConnectResult<O::Output> {
        let span = tracing::debug_span!("connect_operation", operation = O::NAME);
        self.dispatch(request).instrument(span).await
    }

    async fn dispatch<O: Operation>(&self, request: &O) -> ConnectResult<O::Output> {
        if self.config.validation_mode == ValidationMode::Strict {
            if let Err(err) = request.validate() {
                tracing::debug!(field = err.field(), error = %err, "request failed validation");
                return Err(err.into());
            }
        }

        let call = OperationCall {
            operation: O::NAME,
            endpoint: self.endpoint.clone(),
            body: serde_json::to_value(request)?,
        };
        tracing::debug!(endpoint = %call.endpoint, "dispatching operation");

        match self.transport.invoke(call).await? {
            TransportResponse::Success { body } => {
                let body: &[u8] = if body.is_empty() { b"{}" } else { &body };
                let output: O::Output = serde_json::from_slice(body)?;
                tracing::debug!(result = %output, "operation succeeded");
                Ok(output)
            }
            TransportResponse::Error {
                status,
                headers,
                body,
            } => {
                let fault = decode_fault(status, header_value(&headers, ERROR_TYPE_HEADER), &body);
                tracing::debug!(status, code = fault.code(), "operation failed");
                Err(fault.into())
            }
        }
    }

    /// Sends a request that carries a client token.
    ///
    /// With `auto_client_token` on and no token set, a fresh UUID is stored
    /// on the request before sending, so resending the same request value
    /// reuses the token.
    pub async fn send_idempotent<O: IdempotentOperation>(
        &self,
        request: &mut O,
    ) -> ConnectResult<O::Output> {
        if self.config.auto_client_token && request.client_token().is_none() {
            let token = uuid::Uuid::new_v4().to_string();
            tracing::debug!(operation = O::NAME, client_token = %token, "generated client token");
            request.set_client_token(Some(token));
        }
        self.send(&*request).await
    }

    /// Follows `NextToken` and returns every item across pages, in order.
    ///
    /// Stops after `max_pages` pages even if the service reports more.
    pub async fn collect_pages<O: PaginatedOperation>(&self, request: &O) -> ConnectResult<Vec<O::Item>> {
        let mut request = request.clone();
        let mut items = Vec::new();
        let mut pages: u32 = 0;

        loop {
            let output = self.send(&request).await?;
            pages += 1;
            let next_token = O::output_next_token(&output)
                .filter(|token| !token.is_empty())
                .map(str::to_owned);
            items.extend(O::output_items(output));
            tracing::debug!(operation = O::NAME, page = pages, items = items.len(), "fetched page");

            let Some(next_token) = next_token else {
                break;
            };
            if pages >= self.config.max_pages {
                tracing::warn!(
                    operation = O::NAME,
                    max_pages = self.config.max_pages,
                    "page limit reached, remaining results not fetched"
                );
                break;
            }
            if request.next_token() == Some(next_token.as_str()) {
                tracing::warn!(operation = O::NAME, "service repeated the same NextToken");
                break;
            }
            request.set_next_token(Some(next_token));
        }

        Ok(items)
    }
}

/// One async method per plain operation.
macro_rules! operation_methods {
    ($( $(#[$doc:meta])* $method:ident($Request:ty); )*) => {
        impl<T: Transport> ConnectClient<T> {
            $(
                $(#[$doc])*
                pub async fn $method(
                    &self,
                    request: &$Request,
                ) -> ConnectResult<<$Request as Operation>::Output> {
                    self.send(request).await
                }
            )*
        }
    };
}

/// One async method per operation that carries a client token.
macro_rules! idempotent_methods {
    ($( $(#[$doc:meta])* $method:ident($Request:ty); )*) => {
        impl<T: Transport> ConnectClient<T> {
            $(
                $(#[$doc])*
                pub async fn $method(
                    &self,
                    request: &mut $Request,
                ) -> ConnectResult<<$Request as Operation>::Output> {
                    self.send_idempotent(request).await
                }
            )*
        }
    };
}

operation_methods! {
    get_current_metric_data(GetCurrentMetricDataRequest);
    get_metric_data(GetMetricDataRequest);
    get_metric_data_v2(GetMetricDataV2Request);
    describe_evaluation_form(DescribeEvaluationFormRequest);
    activate_evaluation_form(ActivateEvaluationFormRequest);
    delete_evaluation_form(DeleteEvaluationFormRequest);
    list_evaluation_forms(ListEvaluationFormsRequest);
    stop_contact(StopContactRequest);
    get_contact_attributes(GetContactAttributesRequest);
    update_contact_attributes(UpdateContactAttributesRequest);
    tag_resource(TagResourceRequest);
    untag_resource(UntagResourceRequest);
    list_tags_for_resource(ListTagsForResourceRequest);
    create_user(CreateUserRequest);
    describe_user(DescribeUserRequest);
    delete_user(DeleteUserRequest);
    list_users(ListUsersRequest);
    update_user_identity_info(UpdateUserIdentityInfoRequest);
    update_user_phone_config(UpdateUserPhoneConfigRequest);
    update_user_routing_profile(UpdateUserRoutingProfileRequest);
    update_user_security_profiles(UpdateUserSecurityProfilesRequest);
    /// Moves the user to a hierarchy group, or out of any when the group id is unset.
    update_user_hierarchy(UpdateUserHierarchyRequest);
    /// Returns short-lived agent credentials; tokens are redacted when logged.
    get_federation_token(GetFederationTokenRequest);
    describe_user_hierarchy_group(DescribeUserHierarchyGroupRequest);
    describe_user_hierarchy_structure(DescribeUserHierarchyStructureRequest);
    list_user_hierarchy_groups(ListUserHierarchyGroupsRequest);
    list_queues(ListQueuesRequest);
    list_contact_flows(ListContactFlowsRequest);
    list_hours_of_operations(ListHoursOfOperationsRequest);
    list_phone_numbers(ListPhoneNumbersRequest);
    list_routing_profiles(ListRoutingProfilesRequest);
    list_security_profiles(ListSecurityProfilesRequest);
}

idempotent_methods! {
    create_evaluation_form(CreateEvaluationFormRequest);
    create_persistent_contact_association(CreatePersistentContactAssociationRequest);
    /// Places an outbound call. Fails with `DestinationNotAllowed` when the
    /// instance may not call the destination number.
    start_outbound_voice_contact(StartOutboundVoiceContactRequest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnectError;
    use crate::transport::TransportError;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl Transport for Unreachable {
        async fn invoke(&self, _call: OperationCall) -> Result<TransportResponse, TransportError> {
            Err(TransportError::new("unreachable"))
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = SdkConfig::for_region("us-east-1");
        config.max_pages = 0;
        assert!(matches!(
            ConnectClient::new(Unreachable, config),
            Err(ConnectError::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_from_region() {
        let client = ConnectClient::new(Unreachable, SdkConfig::for_region("eu-west-2")).unwrap();
        assert_eq!(client.endpoint(), "https://connect.eu-west-2.amazonaws.com");
    }
}
