//! Metrics V2 (`GetMetricDataV2`)
//!
//! Unlike the historical API, V2 filters and groupings are free-form keys
//! and results carry their dimensions as a string map.

use std::collections::BTreeSet;

use connect_core::validation::{
    check_each, check_known, check_length, check_max_items, check_nested, require,
};
use connect_core::{shape, wire_enum, Double, Timestamp, Validate, ValidationError};

use crate::constraints::{check_day_range, check_max_results};
use crate::operation::{impl_operation, impl_paginated};

pub const MAX_FILTER_KEYS: usize = 5;
/// Filter values across all keys except `CHANNEL`.
pub const MAX_FILTER_VALUES: usize = 100;
pub const MAX_GROUPINGS: usize = 4;
pub const NEXT_TOKEN_MAX_LEN: usize = 2500;

/// Filter key whose values do not count against [`MAX_FILTER_VALUES`].
pub const CHANNEL_FILTER_KEY: &str = "CHANNEL";

wire_enum! {
    pub enum IntervalPeriod {
        FifteenMin => "FIFTEEN_MIN",
        ThirtyMin => "THIRTY_MIN",
        Hour => "HOUR",
        Day => "DAY",
        Week => "WEEK",
        Total => "TOTAL",
    }
}

wire_enum! {
    pub enum MetricNameV2 {
        AgentAdherentTime => "AGENT_ADHERENT_TIME",
        AgentNonResponse => "AGENT_NON_RESPONSE",
        AgentOccupancy => "AGENT_OCCUPANCY",
        AgentScheduleAdherence => "AGENT_SCHEDULE_ADHERENCE",
        AgentScheduledTime => "AGENT_SCHEDULED_TIME",
        AvgAbandonTime => "AVG_ABANDON_TIME",
        AvgAfterContactWorkTime => "AVG_AFTER_CONTACT_WORK_TIME",
        AvgAgentConnectingTime => "AVG_AGENT_CONNECTING_TIME",
        AvgContactDuration => "AVG_CONTACT_DURATION",
        AvgConversationDuration => "AVG_CONVERSATION_DURATION",
        AvgGreetingTimeAgent => "AVG_GREETING_TIME_AGENT",
        AvgHandleTime => "AVG_HANDLE_TIME",
        AvgHoldTime => "AVG_HOLD_TIME",
        AvgHolds => "AVG_HOLDS",
        AvgInteractionAndHoldTime => "AVG_INTERACTION_AND_HOLD_TIME",
        AvgInteractionTime => "AVG_INTERACTION_TIME",
        AvgInterruptionsAgent => "AVG_INTERRUPTIONS_AGENT",
        AvgInterruptionTimeAgent => "AVG_INTERRUPTION_TIME_AGENT",
        AvgNonTalkTime => "AVG_NON_TALK_TIME",
        AvgQueueAnswerTime => "AVG_QUEUE_ANSWER_TIME",
        AvgTalkTime => "AVG_TALK_TIME",
        AvgTalkTimeAgent => "AVG_TALK_TIME_AGENT",
        AvgTalkTimeCustomer => "AVG_TALK_TIME_CUSTOMER",
        ContactsAbandoned => "CONTACTS_ABANDONED",
        ContactsCreated => "CONTACTS_CREATED",
        ContactsHandled => "CONTACTS_HANDLED",
        ContactsHoldAbandons => "CONTACTS_HOLD_ABANDONS",
        ContactsQueued => "CONTACTS_QUEUED",
        ContactsTransferredOut => "CONTACTS_TRANSFERRED_OUT",
        ContactsTransferredOutByAgent => "CONTACTS_TRANSFERRED_OUT_BY_AGENT",
        ContactsTransferredOutFromQueue => "CONTACTS_TRANSFERRED_OUT_FROM_QUEUE",
        MaxQueuedTime => "MAX_QUEUED_TIME",
        ServiceLevel => "SERVICE_LEVEL",
        SumContactsAnsweredInX => "SUM_CONTACTS_ANSWERED_IN_X",
        SumContactsAbandonedInX => "SUM_CONTACTS_ABANDONED_IN_X",
        SumContactsDisconnected => "SUM_CONTACTS_DISCONNECTED",
        SumRetryCallbackAttempts => "SUM_RETRY_CALLBACK_ATTEMPTS",
    }
}

shape! {
    pub struct IntervalDetails {
        /// IANA time zone, e.g. `America/New_York`.
        string time_zone(set_time_zone, with_time_zone) => "TimeZone";
        nested interval_period(set_interval_period, with_interval_period): IntervalPeriod => "IntervalPeriod";
    }
}

impl Validate for IntervalDetails {
    fn validate(&self) -> Result<(), ValidationError> {
        check_known("IntervalPeriod", self.interval_period())
    }
}

shape! {
    pub struct FilterV2 {
        string filter_key(set_filter_key, with_filter_key) => "FilterKey";
        list filter_values(set_filter_values, with_filter_values, add_filter_value): String => "FilterValues";
    }
}

impl Validate for FilterV2 {
    fn validate(&self) -> Result<(), ValidationError> {
        let key = require("FilterKey", self.filter_key())?;
        check_length("FilterKey", Some(key), 1, 128)
    }
}

shape! {
    pub struct ThresholdV2 {
        string comparison(set_comparison, with_comparison) => "Comparison";
        copy threshold_value(set_threshold_value, with_threshold_value): Double => "ThresholdValue";
    }
}

shape! {
    pub struct MetricFilterV2 {
        string metric_filter_key(set_metric_filter_key, with_metric_filter_key) => "MetricFilterKey";
        list metric_filter_values(set_metric_filter_values, with_metric_filter_values, add_metric_filter_value): String => "MetricFilterValues";
        copy negate(set_negate, with_negate): bool => "Negate";
    }
}

shape! {
    pub struct MetricV2 {
        nested name(set_name, with_name): MetricNameV2 => "Name";
        list threshold(set_threshold, with_threshold, add_threshold): ThresholdV2 => "Threshold";
        list metric_filters(set_metric_filters, with_metric_filters, add_metric_filter): MetricFilterV2 => "MetricFilters";
    }
}

impl Validate for MetricV2 {
    fn validate(&self) -> Result<(), ValidationError> {
        require("Name", self.name())?;
        check_max_items("MetricFilters", self.metric_filters(), 10)
    }
}

shape! {
    pub struct MetricInterval {
        nested interval(set_interval, with_interval): IntervalPeriod => "Interval";
        copy start_time(set_start_time, with_start_time): Timestamp => "StartTime";
        copy end_time(set_end_time, with_end_time): Timestamp => "EndTime";
    }
}

shape! {
    pub struct MetricDataV2 {
        nested metric(set_metric, with_metric): MetricV2 => "Metric";
        copy value(set_value, with_value): Double => "Value";
    }
}

shape! {
    pub struct MetricResultV2 {
        /// Grouping key to resource identifier, e.g. `QUEUE -> q-1`.
        map dimensions(set_dimensions, with_dimensions, add_dimensions_entry, clear_dimensions_entries): String => "Dimensions";
        nested metric_interval(set_metric_interval, with_metric_interval): MetricInterval => "MetricInterval";
        list collections(set_collections, with_collections, add_collection): MetricDataV2 => "Collections";
    }
}

shape! {
    pub struct GetMetricDataV2Request {
        string resource_arn(set_resource_arn, with_resource_arn) => "ResourceArn";
        copy start_time(set_start_time, with_start_time): Timestamp => "StartTime";
        copy end_time(set_end_time, with_end_time): Timestamp => "EndTime";
        nested interval(set_interval, with_interval): IntervalDetails => "Interval";
        list filters(set_filters, with_filters, add_filter): FilterV2 => "Filters";
        list groupings(set_groupings, with_groupings, add_grouping): String => "Groupings";
        list metrics(set_metrics, with_metrics, add_metric): MetricV2 => "Metrics";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for GetMetricDataV2Request {
    fn validate(&self) -> Result<(), ValidationError> {
        require("ResourceArn", self.resource_arn())?;
        check_day_range(self.start_time(), self.end_time())?;
        check_nested("Interval", self.interval())?;

        let filters = require("Filters", self.filters())?;
        check_each("Filters", Some(filters))?;
        check_filter_limits(filters)?;

        check_max_items("Groupings", self.groupings(), MAX_GROUPINGS)?;
        check_each("Metrics", Some(require("Metrics", self.metrics())?))?;
        check_length("NextToken", self.next_token(), 1, NEXT_TOKEN_MAX_LEN)?;
        check_max_results(self.max_results(), 100)
    }
}

fn check_filter_limits(filters: &[FilterV2]) -> Result<(), ValidationError> {
    let keys: BTreeSet<&str> = filters.iter().filter_map(FilterV2::filter_key).collect();
    if keys.len() > MAX_FILTER_KEYS {
        return Err(ValidationError::TooManyItems {
            field: "Filters".to_string(),
            count: keys.len(),
            max: MAX_FILTER_KEYS,
        });
    }

    let values: usize = filters
        .iter()
        .filter(|filter| filter.filter_key() != Some(CHANNEL_FILTER_KEY))
        .map(|filter| filter.filter_values().map_or(0, <[String]>::len))
        .sum();
    if values > MAX_FILTER_VALUES {
        return Err(ValidationError::TooManyItems {
            field: "Filters.FilterValues".to_string(),
            count: values,
            max: MAX_FILTER_VALUES,
        });
    }
    Ok(())
}

shape! {
    pub struct GetMetricDataV2Result {
        string next_token(set_next_token, with_next_token) => "NextToken";
        list metric_results(set_metric_results, with_metric_results, add_metric_result): MetricResultV2 => "MetricResults";
    }
}

impl_operation!(GetMetricDataV2Request => GetMetricDataV2Result, "GetMetricDataV2");
impl_paginated!(GetMetricDataV2Request => GetMetricDataV2Result, metric_results: MetricResultV2);
