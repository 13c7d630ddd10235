//! Real-time metrics (`GetCurrentMetricData`)

use connect_core::validation::{check_each, check_known, check_max_items, check_nested, require};
use connect_core::{shape, wire_enum, Double, Timestamp, Validate, ValidationError};

use super::common::{check_groupings, Dimensions, Filters, Grouping, Unit};
use crate::constraints::{check_instance_id, check_max_results};
use crate::operation::{impl_operation, impl_paginated};

wire_enum! {
    pub enum CurrentMetricName {
        AgentsOnline => "AGENTS_ONLINE",
        AgentsAvailable => "AGENTS_AVAILABLE",
        AgentsOnCall => "AGENTS_ON_CALL",
        AgentsNonProductive => "AGENTS_NON_PRODUCTIVE",
        AgentsAfterContactWork => "AGENTS_AFTER_CONTACT_WORK",
        AgentsError => "AGENTS_ERROR",
        AgentsStaffed => "AGENTS_STAFFED",
        ContactsInQueue => "CONTACTS_IN_QUEUE",
        OldestContactAge => "OLDEST_CONTACT_AGE",
        ContactsScheduled => "CONTACTS_SCHEDULED",
        AgentsOnContact => "AGENTS_ON_CONTACT",
        SlotsActive => "SLOTS_ACTIVE",
        SlotsAvailable => "SLOTS_AVAILABLE",
    }
}

wire_enum! {
    pub enum SortOrder {
        Ascending => "ASCENDING",
        Descending => "DESCENDING",
    }
}

shape! {
    pub struct CurrentMetric {
        nested name(set_name, with_name): CurrentMetricName => "Name";
        nested unit(set_unit, with_unit): Unit => "Unit";
    }
}

impl Validate for CurrentMetric {
    fn validate(&self) -> Result<(), ValidationError> {
        check_known("Name", Some(require("Name", self.name())?))?;
        check_known("Unit", self.unit())
    }
}

shape! {
    pub struct CurrentMetricSortCriteria {
        nested sort_by_metric(set_sort_by_metric, with_sort_by_metric): CurrentMetricName => "SortByMetric";
        nested sort_order(set_sort_order, with_sort_order): SortOrder => "SortOrder";
    }
}

shape! {
    pub struct CurrentMetricData {
        nested metric(set_metric, with_metric): CurrentMetric => "Metric";
        copy value(set_value, with_value): Double => "Value";
    }
}

shape! {
    pub struct CurrentMetricResult {
        nested dimensions(set_dimensions, with_dimensions): Dimensions => "Dimensions";
        list collections(set_collections, with_collections, add_collection): CurrentMetricData => "Collections";
    }
}

shape! {
    pub struct GetCurrentMetricDataRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        nested filters(set_filters, with_filters): Filters => "Filters";
        list groupings(set_groupings, with_groupings, add_grouping): Grouping => "Groupings";
        list current_metrics(set_current_metrics, with_current_metrics, add_current_metric): CurrentMetric => "CurrentMetrics";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
        list sort_criteria(set_sort_criteria, with_sort_criteria, add_sort_criterion): CurrentMetricSortCriteria => "SortCriteria";
    }
}

impl Validate for GetCurrentMetricDataRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_nested("Filters", Some(require("Filters", self.filters())?))?;
        check_groupings(self.groupings(), 2)?;
        check_each("CurrentMetrics", Some(require("CurrentMetrics", self.current_metrics())?))?;
        check_max_results(self.max_results(), 100)?;
        check_max_items("SortCriteria", self.sort_criteria(), 1)
    }
}

shape! {
    pub struct GetCurrentMetricDataResult {
        string next_token(set_next_token, with_next_token) => "NextToken";
        list metric_results(set_metric_results, with_metric_results, add_metric_result): CurrentMetricResult => "MetricResults";
        copy data_snapshot_time(set_data_snapshot_time, with_data_snapshot_time): Timestamp => "DataSnapshotTime";
        copy approximate_total_count(set_approximate_total_count, with_approximate_total_count): i64 => "ApproximateTotalCount";
    }
}

impl_operation!(GetCurrentMetricDataRequest => GetCurrentMetricDataResult, "GetCurrentMetricData");
impl_paginated!(GetCurrentMetricDataRequest => GetCurrentMetricDataResult, metric_results: CurrentMetricResult);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::common::Channel;

    fn valid_request() -> GetCurrentMetricDataRequest {
        GetCurrentMetricDataRequest::new()
            .with_instance_id("inst-1")
            .with_filters(Filters::new().with_queues(["q-1"]).with_channels([Channel::Voice]))
            .with_groupings([Grouping::Queue])
            .add_current_metric(
                CurrentMetric::new()
                    .with_name(CurrentMetricName::AgentsOnline)
                    .with_unit(Unit::Count),
            )
    }

    #[test]
    fn test_valid_request_passes() {
        valid_request().validate().unwrap();
    }

    #[test]
    fn test_metrics_required() {
        let mut request = valid_request();
        request.set_current_metrics(None);
        assert_eq!(request.validate().unwrap_err().field(), "CurrentMetrics");
    }

    #[test]
    fn test_too_many_groupings() {
        let request = valid_request()
            .add_grouping(Grouping::Channel)
            .add_grouping(Grouping::RoutingProfile);
        assert!(matches!(
            request.validate(),
            Err(ValidationError::TooManyItems { max: 2, .. })
        ));
    }

    #[test]
    fn test_metric_error_is_indexed() {
        let request = valid_request().add_current_metric(CurrentMetric::new());
        assert_eq!(request.validate().unwrap_err().field(), "CurrentMetrics[1].Name");
    }

    #[test]
    fn test_result_decodes_service_reply() {
        let body = r#"{
            "MetricResults": [{
                "Dimensions": {"Queue": {"Id": "q-1", "Arn": "arn:q-1"}, "Channel": "VOICE"},
                "Collections": [{"Metric": {"Name": "AGENTS_ONLINE", "Unit": "COUNT"}, "Value": 3.0}]
            }],
            "DataSnapshotTime": 1700000000,
            "ApproximateTotalCount": 1
        }"#;
        let result: GetCurrentMetricDataResult = serde_json::from_str(body).unwrap();
        let collection = &result.metric_results().unwrap()[0].collections().unwrap()[0];
        assert_eq!(collection.value(), Some(Double::new(3.0)));
        assert_eq!(
            collection.metric().and_then(CurrentMetric::name),
            Some(&CurrentMetricName::AgentsOnline)
        );
        assert_eq!(result.data_snapshot_time().map(|t| t.epoch_seconds()), Some(1_700_000_000));
        assert_eq!(result.next_token(), None);
    }
}
