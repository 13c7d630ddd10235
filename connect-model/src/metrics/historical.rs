//! Historical metrics (`GetMetricData`)
//!
//! Historical data covers the last 24 hours only, in 5-minute slots.

use connect_core::validation::{check_each, check_known, check_nested, require};
use connect_core::{shape, wire_enum, Double, Timestamp, Validate, ValidationError};

use super::common::{check_groupings, Dimensions, Filters, Grouping, Unit};
use crate::constraints::{check_day_range, check_instance_id, check_max_results};
use crate::operation::{impl_operation, impl_paginated};

/// Reporting interval boundaries must fall on multiples of this.
pub const INTERVAL_GRANULARITY_MILLIS: i64 = 5 * 60 * 1000;
pub use crate::constraints::MAX_RANGE_MILLIS;

wire_enum! {
    pub enum HistoricalMetricName {
        ContactsQueued => "CONTACTS_QUEUED",
        ContactsHandled => "CONTACTS_HANDLED",
        ContactsAbandoned => "CONTACTS_ABANDONED",
        ContactsConsulted => "CONTACTS_CONSULTED",
        ContactsAgentHungUpFirst => "CONTACTS_AGENT_HUNG_UP_FIRST",
        ContactsHandledIncoming => "CONTACTS_HANDLED_INCOMING",
        ContactsHandledOutbound => "CONTACTS_HANDLED_OUTBOUND",
        ContactsHoldAbandons => "CONTACTS_HOLD_ABANDONS",
        ContactsTransferredIn => "CONTACTS_TRANSFERRED_IN",
        ContactsTransferredOut => "CONTACTS_TRANSFERRED_OUT",
        ContactsTransferredInFromQueue => "CONTACTS_TRANSFERRED_IN_FROM_QUEUE",
        ContactsTransferredOutFromQueue => "CONTACTS_TRANSFERRED_OUT_FROM_QUEUE",
        ContactsMissed => "CONTACTS_MISSED",
        CallbackContactsHandled => "CALLBACK_CONTACTS_HANDLED",
        ApiContactsHandled => "API_CONTACTS_HANDLED",
        Occupancy => "OCCUPANCY",
        HandleTime => "HANDLE_TIME",
        AfterContactWorkTime => "AFTER_CONTACT_WORK_TIME",
        QueuedTime => "QUEUED_TIME",
        AbandonTime => "ABANDON_TIME",
        QueueAnswerTime => "QUEUE_ANSWER_TIME",
        HoldTime => "HOLD_TIME",
        InteractionTime => "INTERACTION_TIME",
        InteractionAndHoldTime => "INTERACTION_AND_HOLD_TIME",
        ServiceLevel => "SERVICE_LEVEL",
    }
}

wire_enum! {
    pub enum Statistic {
        Sum => "SUM",
        Max => "MAX",
        Avg => "AVG",
    }
}

wire_enum! {
    pub enum Comparison {
        Lt => "LT",
    }
}

shape! {
    /// Threshold for `SERVICE_LEVEL`, in seconds.
    pub struct Threshold {
        nested comparison(set_comparison, with_comparison): Comparison => "Comparison";
        copy threshold_value(set_threshold_value, with_threshold_value): Double => "ThresholdValue";
    }
}

shape! {
    pub struct HistoricalMetric {
        nested name(set_name, with_name): HistoricalMetricName => "Name";
        nested threshold(set_threshold, with_threshold): Threshold => "Threshold";
        nested statistic(set_statistic, with_statistic): Statistic => "Statistic";
        nested unit(set_unit, with_unit): Unit => "Unit";
    }
}

impl Validate for HistoricalMetric {
    fn validate(&self) -> Result<(), ValidationError> {
        check_known("Name", Some(require("Name", self.name())?))?;
        check_known("Statistic", self.statistic())?;
        check_known("Unit", self.unit())?;
        if self.name() == Some(&HistoricalMetricName::ServiceLevel) {
            require("Threshold", self.threshold())?;
        }
        Ok(())
    }
}

shape! {
    pub struct HistoricalMetricData {
        nested metric(set_metric, with_metric): HistoricalMetric => "Metric";
        copy value(set_value, with_value): Double => "Value";
    }
}

shape! {
    pub struct HistoricalMetricResult {
        nested dimensions(set_dimensions, with_dimensions): Dimensions => "Dimensions";
        list collections(set_collections, with_collections, add_collection): HistoricalMetricData => "Collections";
    }
}

shape! {
    pub struct GetMetricDataRequest {
        /// Instance identifier, the last segment of the instance ARN.
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        copy start_time(set_start_time, with_start_time): Timestamp => "StartTime";
        copy end_time(set_end_time, with_end_time): Timestamp => "EndTime";
        nested filters(set_filters, with_filters): Filters => "Filters";
        list groupings(set_groupings, with_groupings, add_grouping): Grouping => "Groupings";
        list historical_metrics(set_historical_metrics, with_historical_metrics, add_historical_metric): HistoricalMetric => "HistoricalMetrics";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for GetMetricDataRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        let (start, end) = check_day_range(self.start_time(), self.end_time())?;
        check_slot_boundary("StartTime", start)?;
        check_slot_boundary("EndTime", end)?;
        check_nested("Filters", Some(require("Filters", self.filters())?))?;
        check_groupings(self.groupings(), 2)?;
        check_each(
            "HistoricalMetrics",
            Some(require("HistoricalMetrics", self.historical_metrics())?),
        )?;
        check_max_results(self.max_results(), 100)
    }
}

fn check_slot_boundary(field: &str, value: Timestamp) -> Result<(), ValidationError> {
    if value.epoch_millis().rem_euclid(INTERVAL_GRANULARITY_MILLIS) != 0 {
        return Err(ValidationError::invalid(
            field,
            format!("{} is not a multiple of 5 minutes", value),
        ));
    }
    Ok(())
}

shape! {
    pub struct GetMetricDataResult {
        string next_token(set_next_token, with_next_token) => "NextToken";
        list metric_results(set_metric_results, with_metric_results, add_metric_result): HistoricalMetricResult => "MetricResults";
    }
}

impl_operation!(GetMetricDataRequest => GetMetricDataResult, "GetMetricData");
impl_paginated!(GetMetricDataRequest => GetMetricDataResult, metric_results: HistoricalMetricResult);
