//! Shapes shared by real-time and historical metrics

use connect_core::validation::{check_known, check_max_items};
use connect_core::{shape, wire_enum, Validate, ValidationError};

/// Queue and routing-profile filters each take at most this many entries.
pub const MAX_FILTER_ENTRIES: usize = 100;

wire_enum! {
    pub enum Channel {
        Voice => "VOICE",
        Chat => "CHAT",
        Task => "TASK",
        Email => "EMAIL",
    }
}

wire_enum! {
    pub enum Unit {
        Seconds => "SECONDS",
        Count => "COUNT",
        Percent => "PERCENT",
    }
}

wire_enum! {
    /// Dimension metric results are grouped by.
    pub enum Grouping {
        Queue => "QUEUE",
        Channel => "CHANNEL",
        RoutingProfile => "ROUTING_PROFILE",
        RoutingStepExpression => "ROUTING_STEP_EXPRESSION",
    }
}

shape! {
    pub struct QueueReference {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
    }
}

shape! {
    pub struct RoutingProfileReference {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
    }
}

shape! {
    /// The grouping a metric result applies to.
    pub struct Dimensions {
        nested queue(set_queue, with_queue): QueueReference => "Queue";
        nested channel(set_channel, with_channel): Channel => "Channel";
        nested routing_profile(set_routing_profile, with_routing_profile): RoutingProfileReference => "RoutingProfile";
        string routing_step_expression(set_routing_step_expression, with_routing_step_expression) => "RoutingStepExpression";
    }
}

shape! {
    /// Resources to restrict metric retrieval to.
    ///
    /// Queues and routing profiles accept IDs or ARNs interchangeably.
    pub struct Filters {
        list queues(set_queues, with_queues, add_queue): String => "Queues";
        list channels(set_channels, with_channels, add_channel): Channel => "Channels";
        list routing_profiles(set_routing_profiles, with_routing_profiles, add_routing_profile): String => "RoutingProfiles";
        list routing_step_expressions(set_routing_step_expressions, with_routing_step_expressions, add_routing_step_expression): String => "RoutingStepExpressions";
    }
}

impl Validate for Filters {
    fn validate(&self) -> Result<(), ValidationError> {
        check_max_items("Queues", self.queues(), MAX_FILTER_ENTRIES)?;
        check_max_items("RoutingProfiles", self.routing_profiles(), MAX_FILTER_ENTRIES)?;
        for (index, channel) in self.channels().unwrap_or_default().iter().enumerate() {
            check_known(&format!("Channels[{}]", index), Some(channel))?;
        }
        Ok(())
    }
}

/// Groupings must be recognized values, at most `max` of them.
pub(crate) fn check_groupings(groupings: Option<&[Grouping]>, max: usize) -> Result<(), ValidationError> {
    check_max_items("Groupings", groupings, max)?;
    for (index, grouping) in groupings.unwrap_or_default().iter().enumerate() {
        check_known(&format!("Groupings[{}]", index), Some(grouping))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_display_and_wire_names() {
        let filters = Filters::new()
            .with_queues(["q-1", "q-2"])
            .add_channel(Channel::Voice);
        assert_eq!(filters.to_string(), "{Queues: [q-1, q-2],Channels: [VOICE]}");

        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Queues": ["q-1", "q-2"], "Channels": ["VOICE"] })
        );
    }

    #[test]
    fn test_filters_queue_limit() {
        let filters = Filters::new().with_queues((0..101).map(|i| format!("q-{}", i)));
        assert!(matches!(
            filters.validate(),
            Err(ValidationError::TooManyItems { count: 101, .. })
        ));
    }

    #[test]
    fn test_filters_reject_unknown_channel() {
        let filters = Filters::new().with_channels(["VOICE", "FAX"]);
        assert_eq!(filters.validate().unwrap_err().field(), "Channels[1]");
    }

    #[test]
    fn test_dimensions_nested_display() {
        let dims = Dimensions::new()
            .with_queue(QueueReference::new().with_id("q-1"))
            .with_channel(Channel::Chat);
        assert_eq!(dims.to_string(), "{Queue: {Id: q-1},Channel: CHAT}");
    }
}
