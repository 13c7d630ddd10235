//! Queues

use connect_core::validation::{check_known, check_max_items};
use connect_core::{shape, wire_enum, Validate, ValidationError};

use crate::constraints::{check_instance_id, check_max_results};
use crate::operation::{impl_operation, impl_paginated};

wire_enum! {
    pub enum QueueType {
        Standard => "STANDARD",
        /// Per-agent queue used for transfers to a specific agent.
        Agent => "AGENT",
    }
}

shape! {
    pub struct QueueSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
        nested queue_type(set_queue_type, with_queue_type): QueueType => "QueueType";
    }
}

shape! {
    pub struct ListQueuesRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        list queue_types(set_queue_types, with_queue_types, add_queue_type): QueueType => "QueueTypes";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for ListQueuesRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_max_items("QueueTypes", self.queue_types(), 2)?;
        for (index, queue_type) in self.queue_types().unwrap_or_default().iter().enumerate() {
            check_known(&format!("QueueTypes[{}]", index), Some(queue_type))?;
        }
        check_max_results(self.max_results(), 1000)
    }
}

shape! {
    pub struct ListQueuesResult {
        list queue_summary_list(set_queue_summary_list, with_queue_summary_list, add_queue_summary): QueueSummary => "QueueSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

impl_operation!(ListQueuesRequest => ListQueuesResult, "ListQueues");
impl_paginated!(ListQueuesRequest => ListQueuesResult, queue_summary_list: QueueSummary);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_type_filter() {
        let request = ListQueuesRequest::new()
            .with_instance_id("inst-1")
            .with_queue_types([QueueType::Standard]);
        assert!(request.validate().is_ok());

        let request = request.add_queue_type("PRIORITY");
        assert_eq!(request.validate().unwrap_err().field(), "QueueTypes[1]");
    }

    #[test]
    fn test_result_keeps_unknown_queue_type() {
        let result: ListQueuesResult = serde_json::from_str(
            r#"{"QueueSummaryList":[{"Id":"q-1","Name":"Support","QueueType":"OVERFLOW"}]}"#,
        )
        .unwrap();
        let summary = &result.queue_summary_list().unwrap()[0];
        assert_eq!(summary.queue_type(), Some(&QueueType::Unknown("OVERFLOW".to_string())));
        assert_eq!(
            serde_json::to_value(summary).unwrap()["QueueType"],
            serde_json::json!("OVERFLOW")
        );
    }
}
