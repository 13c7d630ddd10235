//! Connect SDK Test Utilities
//!
//! Shared test infrastructure for the workspace:
//! - Proptest generators for model shapes and wire enums
//! - A scripted mock transport
//! - Fixtures for valid requests and canned service responses
//! - Custom assertions for validation errors and faults

pub use connect_client::{
    ConnectClient, ConnectError, ConnectResult, OperationCall, Transport, TransportError,
    TransportResponse,
};
pub use connect_core::{
    ConnectFault, Double, SdkConfig, Timestamp, Validate, ValidationError, ValidationMode,
    ERROR_TYPE_HEADER,
};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

// ============================================================================
// MOCK TRANSPORT
// ============================================================================

/// Transport that replays scripted responses in order and records every call.
///
/// Running out of scripted responses yields a `TransportError`.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    calls: Mutex<Vec<OperationCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response; builder form.
    pub fn respond_with(self, response: TransportResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Queue a transport failure; builder form.
    pub fn fail_with(self, reason: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Err(TransportError::new(reason)));
        self
    }

    pub fn push_response(&self, response: TransportResponse) {
        lock(&self.responses).push_back(Ok(response));
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<OperationCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn remaining_responses(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn invoke(&self, call: OperationCall) -> Result<TransportResponse, TransportError> {
        let operation = call.operation;
        lock(&self.calls).push(call);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new(format!("no scripted response for {}", operation))))
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for model shapes.

    use super::*;
    use connect_model::contact::StartOutboundVoiceContactRequest;
    use connect_model::metrics::{
        Channel, CurrentMetric, CurrentMetricName, Dimensions, Filters, FilterV2,
        GetCurrentMetricDataRequest, Grouping, IntervalPeriod, MetricNameV2, MetricV2,
        QueueReference, Unit,
    };
    use connect_model::tagging::TagResourceRequest;
    use connect_model::user::{PhoneType, UserIdentityInfo, UserPhoneConfig};
    use proptest::collection::{btree_map, vec};
    use proptest::option;
    use proptest::prelude::*;
    use proptest::sample::select;
    use std::collections::BTreeMap;

    // === Scalars ===

    /// Identifier-like strings.
    pub fn arb_id() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9-]{0,35}"
    }

    /// Free text, including spaces and punctuation.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ,.!?_-]{0,40}"
    }

    /// Millisecond timestamps between 2020 and 2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1_577_836_800_000i64..1_893_456_000_000i64).prop_filter_map("out of range", Timestamp::from_epoch_millis)
    }

    /// Any double, NaN and signed zero included.
    pub fn arb_double() -> impl Strategy<Value = Double> {
        any::<f64>().prop_map(Double::new)
    }

    /// Finite measurement-like doubles with two decimals; these survive a
    /// JSON round trip exactly.
    pub fn arb_finite_double() -> impl Strategy<Value = Double> {
        (-100_000_000i64..100_000_000i64).prop_map(|hundredths| Double::new(hundredths as f64 / 100.0))
    }

    pub fn arb_e164() -> impl Strategy<Value = String> {
        "\\+[1-9][0-9]{6,13}"
    }

    // === Wire enums ===

    /// One of `values`, through the enum's `From<&str>`.
    pub fn arb_known<E>(values: &'static [&'static str]) -> impl Strategy<Value = E>
    where
        E: From<&'static str> + std::fmt::Debug,
    {
        select(values).prop_map(E::from)
    }

    /// Mostly known values, sometimes a value no variant matches.
    pub fn arb_open<E>(values: &'static [&'static str]) -> impl Strategy<Value = E>
    where
        E: From<&'static str> + From<String> + std::fmt::Debug,
    {
        prop_oneof![
            4 => arb_known::<E>(values),
            1 => "X_[A-Z]{1,10}".prop_map(|value: String| E::from(value)),
        ]
    }

    pub fn arb_channel() -> impl Strategy<Value = Channel> {
        arb_known(Channel::known_values())
    }

    pub fn arb_grouping() -> impl Strategy<Value = Grouping> {
        arb_known(Grouping::known_values())
    }

    pub fn arb_unit() -> impl Strategy<Value = Unit> {
        arb_open(Unit::known_values())
    }

    pub fn arb_current_metric_name() -> impl Strategy<Value = CurrentMetricName> {
        arb_known(CurrentMetricName::known_values())
    }

    pub fn arb_metric_name_v2() -> impl Strategy<Value = MetricNameV2> {
        arb_known(MetricNameV2::known_values())
    }

    pub fn arb_interval_period() -> impl Strategy<Value = IntervalPeriod> {
        arb_open(IntervalPeriod::known_values())
    }

    // === Maps ===

    /// Tag maps that pass tag validation: plain keys, short values, at most 10 entries.
    pub fn arb_tags() -> impl Strategy<Value = BTreeMap<String, String>> {
        btree_map("[a-z][a-z0-9_.-]{0,40}", "[a-zA-Z0-9 _.-]{0,64}", 0..=10)
    }

    pub fn arb_attributes() -> impl Strategy<Value = BTreeMap<String, String>> {
        btree_map("[a-zA-Z][a-zA-Z0-9_]{0,20}", arb_text(), 0..=5)
    }

    // === Shapes ===

    pub fn arb_queue_reference() -> impl Strategy<Value = QueueReference> {
        (option::of(arb_id()), option::of(arb_id())).prop_map(|(id, arn)| {
            let mut queue = QueueReference::new();
            queue.set_id(id);
            queue.set_arn(arn.map(|arn| format!("arn:aws:connect:us-east-1:123456789012:queue/{}", arn)));
            queue
        })
    }

    pub fn arb_dimensions() -> impl Strategy<Value = Dimensions> {
        (
            option::of(arb_queue_reference()),
            option::of(arb_channel()),
            option::of(arb_text()),
        )
            .prop_map(|(queue, channel, expression)| {
                let mut dimensions = Dimensions::new();
                dimensions.set_queue(queue);
                dimensions.set_channel(channel);
                dimensions.set_routing_step_expression(expression);
                dimensions
            })
    }

    pub fn arb_filters() -> impl Strategy<Value = Filters> {
        (
            option::of(vec(arb_id(), 0..5)),
            option::of(vec(arb_channel(), 0..4)),
            option::of(vec(arb_id(), 0..5)),
        )
            .prop_map(|(queues, channels, routing_profiles)| {
                let mut filters = Filters::new();
                filters.set_queues(queues);
                filters.set_channels(channels);
                filters.set_routing_profiles(routing_profiles);
                filters
            })
    }

    pub fn arb_current_metric() -> impl Strategy<Value = CurrentMetric> {
        (arb_current_metric_name(), option::of(arb_known::<Unit>(Unit::known_values()))).prop_map(|(name, unit)| {
            let mut metric = CurrentMetric::new().with_name(name);
            metric.set_unit(unit);
            metric
        })
    }

    /// Requests that pass validation.
    pub fn arb_get_current_metric_data_request() -> impl Strategy<Value = GetCurrentMetricDataRequest> {
        (
            arb_id(),
            arb_filters(),
            option::of(vec(arb_grouping(), 0..=2)),
            vec(arb_current_metric(), 1..5),
            option::of(1i32..=100),
        )
            .prop_map(|(instance_id, filters, groupings, metrics, max_results)| {
                let mut request = GetCurrentMetricDataRequest::new()
                    .with_instance_id(instance_id)
                    .with_filters(filters)
                    .with_current_metrics(metrics);
                request.set_groupings(groupings);
                request.set_max_results(max_results);
                request
            })
    }

    pub fn arb_filter_v2() -> impl Strategy<Value = FilterV2> {
        ("[A-Z_]{1,20}", vec(arb_id(), 0..5))
            .prop_map(|(key, values)| FilterV2::new().with_filter_key(key).with_filter_values(values))
    }

    pub fn arb_metric_v2() -> impl Strategy<Value = MetricV2> {
        arb_metric_name_v2().prop_map(|name| MetricV2::new().with_name(name))
    }

    pub fn arb_start_outbound_voice_contact_request() -> impl Strategy<Value = StartOutboundVoiceContactRequest> {
        (
            arb_e164(),
            arb_id(),
            arb_id(),
            option::of(arb_id()),
            option::of(arb_attributes()),
        )
            .prop_map(|(destination, flow, instance_id, queue_id, attributes)| {
                let mut request = StartOutboundVoiceContactRequest::new()
                    .with_destination_phone_number(destination)
                    .with_contact_flow_id(flow)
                    .with_instance_id(instance_id);
                request.set_queue_id(queue_id);
                request.set_attributes(attributes);
                request
            })
    }

    pub fn arb_tag_resource_request() -> impl Strategy<Value = TagResourceRequest> {
        (arb_id(), arb_tags().prop_filter("non-empty", |tags| !tags.is_empty())).prop_map(
            |(resource, tags)| {
                TagResourceRequest::new()
                    .with_resource_arn(format!("arn:aws:connect:us-east-1:123456789012:instance/{}", resource))
                    .with_tags(tags)
            },
        )
    }

    pub fn arb_user_identity_info() -> impl Strategy<Value = UserIdentityInfo> {
        (
            option::of("[A-Z][a-z]{0,15}"),
            option::of("[A-Z][a-z]{0,15}"),
            option::of("[a-z]{1,10}@[a-z]{1,10}\\.com"),
        )
            .prop_map(|(first, last, email)| {
                let mut info = UserIdentityInfo::new();
                info.set_first_name(first);
                info.set_last_name(last);
                info.set_email(email);
                info
            })
    }

    pub fn arb_user_phone_config() -> impl Strategy<Value = UserPhoneConfig> {
        (
            arb_open::<PhoneType>(PhoneType::known_values()),
            option::of(any::<bool>()),
            option::of(0i32..3600),
            option::of(arb_e164()),
        )
            .prop_map(|(phone_type, auto_accept, acw, desk)| {
                let mut config = UserPhoneConfig::new().with_phone_type(phone_type);
                config.set_auto_accept(auto_accept);
                config.set_after_contact_work_time_limit(acw);
                config.set_desk_phone_number(desk);
                config
            })
    }

    /// A valid SDK configuration.
    pub fn arb_valid_config() -> impl Strategy<Value = SdkConfig> {
        (
            "[a-z]{2}-[a-z]{4,9}-[1-3]",
            any::<bool>(),
            1u32..500,
        )
            .prop_map(|(region, auto_client_token, max_pages)| {
                let mut config = SdkConfig::for_region(region);
                config.auto_client_token = auto_client_token;
                config.max_pages = max_pages;
                config
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built requests and canned responses.

    use super::*;
    use connect_model::contact::StartOutboundVoiceContactRequest;
    use connect_model::evaluation::{
        CreateEvaluationFormRequest, EvaluationFormQuestion, EvaluationFormQuestionType,
        EvaluationFormSection,
    };
    use connect_model::metrics::{
        Channel, CurrentMetric, CurrentMetricName, Filters, FilterV2, GetCurrentMetricDataRequest,
        GetMetricDataV2Request, Grouping, MetricNameV2, MetricV2,
    };
    use connect_model::queue::ListQueuesRequest;
    use connect_model::resources::{ListPhoneNumbersRequest, PhoneNumberType};
    use connect_model::tagging::TagResourceRequest;
    use connect_model::user::{ListUsersRequest, UpdateUserSecurityProfilesRequest};

    pub const INSTANCE_ID: &str = "7c78bd60-4a9f-40e5-b461-b7a0dfaad848";
    pub const INSTANCE_ARN: &str =
        "arn:aws:connect:us-west-2:123456789012:instance/7c78bd60-4a9f-40e5-b461-b7a0dfaad848";

    /// Strict validation, automatic client tokens, a small page cap.
    pub fn test_config() -> SdkConfig {
        let mut config = SdkConfig::for_region("us-west-2");
        config.endpoint_url = Some("http://localhost:4566".to_string());
        config.max_pages = 10;
        config
    }

    pub fn client(transport: MockTransport) -> ConnectClient<MockTransport> {
        // test_config() always validates
        match ConnectClient::new(transport, test_config()) {
            Ok(client) => client,
            Err(err) => panic!("test config rejected: {}", err),
        }
    }

    /// 2024-03-01T10:00:00Z
    pub fn window_start() -> Timestamp {
        Timestamp::from_epoch_seconds(1_709_287_200).expect("fixed window start is in range")
    }

    /// One hour after [`window_start`].
    pub fn window_end() -> Timestamp {
        Timestamp::from_epoch_seconds(1_709_290_800).expect("fixed window end is in range")
    }

    pub fn current_metric_data_request() -> GetCurrentMetricDataRequest {
        GetCurrentMetricDataRequest::new()
            .with_instance_id(INSTANCE_ID)
            .with_filters(
                Filters::new()
                    .add_queue("queue-1")
                    .add_channel(Channel::Voice),
            )
            .add_grouping(Grouping::Queue)
            .add_current_metric(CurrentMetric::new().with_name(CurrentMetricName::AgentsOnline))
            .add_current_metric(CurrentMetric::new().with_name(CurrentMetricName::ContactsInQueue))
    }

    pub fn metric_data_v2_request() -> GetMetricDataV2Request {
        GetMetricDataV2Request::new()
            .with_resource_arn(INSTANCE_ARN)
            .with_start_time(window_start())
            .with_end_time(window_end())
            .add_filter(FilterV2::new().with_filter_key("QUEUE").add_filter_value("queue-1"))
            .add_grouping("QUEUE")
            .add_metric(MetricV2::new().with_name(MetricNameV2::AvgHandleTime))
    }

    pub fn start_outbound_voice_contact_request() -> StartOutboundVoiceContactRequest {
        StartOutboundVoiceContactRequest::new()
            .with_destination_phone_number("+14255550100")
            .with_contact_flow_id("flow-1")
            .with_instance_id(INSTANCE_ID)
            .with_queue_id("queue-1")
    }

    pub fn tag_resource_request() -> TagResourceRequest {
        TagResourceRequest::new()
            .with_resource_arn(INSTANCE_ARN)
            .with_tags([("team", "support"), ("env", "test")])
    }

    pub fn create_evaluation_form_request() -> CreateEvaluationFormRequest {
        let question = EvaluationFormQuestion::new()
            .with_title("Did the agent greet the customer?")
            .with_ref_id("q1")
            .with_question_type(EvaluationFormQuestionType::Text);
        let section = EvaluationFormSection::new()
            .with_title("Greeting")
            .with_ref_id("s1")
            .add_item(question);
        CreateEvaluationFormRequest::new()
            .with_instance_id(INSTANCE_ID)
            .with_title("Call quality")
            .add_item(section)
    }

    pub fn list_users_request() -> ListUsersRequest {
        ListUsersRequest::new().with_instance_id(INSTANCE_ID)
    }

    pub fn list_queues_request() -> ListQueuesRequest {
        ListQueuesRequest::new().with_instance_id(INSTANCE_ID)
    }

    pub fn list_phone_numbers_request() -> ListPhoneNumbersRequest {
        ListPhoneNumbersRequest::new()
            .with_instance_id(INSTANCE_ID)
            .add_phone_number_type(PhoneNumberType::TollFree)
            .add_phone_number_country_code("US")
    }

    pub fn update_user_security_profiles_request(user_id: &str) -> UpdateUserSecurityProfilesRequest {
        UpdateUserSecurityProfilesRequest::new()
            .with_security_profile_ids(["sp-agent", "sp-supervisor"])
            .with_user_id(user_id)
            .with_instance_id(INSTANCE_ID)
    }

    /// A success response carrying `body` as JSON.
    pub fn json_response(body: serde_json::Value) -> TransportResponse {
        TransportResponse::success(body.to_string())
    }

    /// An error response whose code travels in the error-type header.
    pub fn fault_response(status: u16, code: &str, message: &str) -> TransportResponse {
        TransportResponse::error(status, serde_json::json!({ "message": message }).to_string())
            .with_header(ERROR_TYPE_HEADER, code)
    }

    /// One page of `ListUsers` results.
    pub fn users_page(usernames: &[&str], next_token: Option<&str>) -> TransportResponse {
        let summaries: Vec<serde_json::Value> = usernames
            .iter()
            .map(|name| serde_json::json!({ "Id": format!("id-{}", name), "Username": name }))
            .collect();
        let mut body = serde_json::json!({ "UserSummaryList": summaries });
        if let Some(token) = next_token {
            body["NextToken"] = serde_json::Value::from(token);
        }
        json_response(body)
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for validation errors, faults and rendered shapes.

    use super::*;

    /// Assert that a shape validates.
    #[track_caller]
    pub fn assert_valid<V: Validate + std::fmt::Debug>(value: &V) {
        if let Err(err) = value.validate() {
            panic!("Expected {:?} to validate, got: {}", value, err);
        }
    }

    /// Assert that validation fails on `field`.
    #[track_caller]
    pub fn assert_invalid_field<V: Validate>(value: &V, field: &str) {
        match value.validate() {
            Err(err) => assert_eq!(err.field(), field, "Wrong field in {}", err),
            Ok(()) => panic!("Expected validation to fail on {}", field),
        }
    }

    /// Assert that a client call was rejected before dispatch on `field`.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &ConnectResult<T>, field: &str) {
        match result {
            Err(ConnectError::Validation(err)) => assert_eq!(err.field(), field),
            other => panic!("Expected validation error on {}, got: {:?}", field, other),
        }
    }

    /// Assert that a client call failed with the service fault `code`.
    #[track_caller]
    pub fn assert_fault<T: std::fmt::Debug>(result: &ConnectResult<T>, code: &str) {
        match result {
            Err(ConnectError::Fault(fault)) => assert_eq!(fault.code(), code),
            other => panic!("Expected {} fault, got: {:?}", code, other),
        }
    }

    /// Assert that `rendered` shows exactly these wire names, in this order.
    #[track_caller]
    pub fn assert_rendered_fields(rendered: &str, expected: &[&str]) {
        let mut cursor = 0;
        for name in expected {
            let needle = format!("{}: ", name);
            match rendered[cursor..].find(&needle) {
                Some(offset) => cursor += offset + needle.len(),
                None => panic!("{} missing or out of order in {}", name, rendered),
            }
        }
        if expected.is_empty() {
            assert_eq!(rendered, "{}");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixtures_are_valid() {
        assertions::assert_valid(&fixtures::current_metric_data_request());
        assertions::assert_valid(&fixtures::metric_data_v2_request());
        assertions::assert_valid(&fixtures::start_outbound_voice_contact_request());
        assertions::assert_valid(&fixtures::tag_resource_request());
        assertions::assert_valid(&fixtures::create_evaluation_form_request());
        assertions::assert_valid(&fixtures::list_users_request());
        assertions::assert_valid(&fixtures::list_queues_request());
        assertions::assert_valid(&fixtures::list_phone_numbers_request());
        assertions::assert_valid(&fixtures::update_user_security_profiles_request("user-1"));
        assert!(fixtures::test_config().validate().is_ok());
    }

    #[test]
    fn test_window_is_a_fixed_hour() {
        assert_eq!(fixtures::window_start().epoch_millis(), 1_709_287_200_000);
        assert_eq!(
            fixtures::window_end().epoch_millis() - fixtures::window_start().epoch_millis(),
            3_600_000
        );
    }

    #[tokio::test]
    async fn test_mock_transport_replays_in_order() {
        let transport = MockTransport::new()
            .respond_with(TransportResponse::success("{}"))
            .fail_with("reset");
        let call = OperationCall {
            operation: "ListUsers",
            endpoint: "http://localhost".to_string(),
            body: serde_json::json!({}),
        };

        assert_eq!(
            transport.invoke(call.clone()).await,
            Ok(TransportResponse::success("{}"))
        );
        assert_eq!(
            transport.invoke(call.clone()).await,
            Err(TransportError::new("reset"))
        );
        let exhausted = transport.invoke(call).await.unwrap_err();
        assert!(exhausted.reason.contains("ListUsers"));
        assert_eq!(transport.call_count(), 3);
        assert_eq!(transport.remaining_responses(), 0);
    }

    #[test]
    fn test_rendered_field_assertion() {
        assertions::assert_rendered_fields("{Name: n,Size: 2}", &["Name", "Size"]);
        assertions::assert_rendered_fields("{}", &[]);
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_rendered_field_order_enforced() {
        assertions::assert_rendered_fields("{Name: n,Size: 2}", &["Size", "Name"]);
    }

    proptest! {
        #[test]
        fn prop_generated_current_metric_requests_validate(
            request in generators::arb_get_current_metric_data_request()
        ) {
            prop_assert!(request.validate().is_ok());
        }

        #[test]
        fn prop_generated_tag_requests_validate(request in generators::arb_tag_resource_request()) {
            prop_assert!(request.validate().is_ok());
        }

        #[test]
        fn prop_generated_configs_validate(config in generators::arb_valid_config()) {
            prop_assert!(config.validate().is_ok());
        }
    }
}
