//! Metrics API: real-time, historical and V2 metric retrieval

pub mod common;
pub mod current;
pub mod historical;
pub mod v2;

pub use common::{Channel, Dimensions, Filters, Grouping, QueueReference, RoutingProfileReference, Unit};
pub use current::{
    CurrentMetric, CurrentMetricData, CurrentMetricName, CurrentMetricResult,
    CurrentMetricSortCriteria, GetCurrentMetricDataRequest, GetCurrentMetricDataResult, SortOrder,
};
pub use historical::{
    Comparison, GetMetricDataRequest, GetMetricDataResult, HistoricalMetric, HistoricalMetricData,
    HistoricalMetricName, HistoricalMetricResult, Statistic, Threshold,
};
pub use v2::{
    FilterV2, GetMetricDataV2Request, GetMetricDataV2Result, IntervalDetails, IntervalPeriod,
    MetricDataV2, MetricFilterV2, MetricInterval, MetricNameV2, MetricResultV2, MetricV2,
    ThresholdV2,
};
