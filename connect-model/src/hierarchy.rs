//! Agent hierarchies
//!
//! An instance arranges its agents in up to five named levels; each group
//! sits on one level and knows the path of groups above it.

use connect_core::validation::require;
use connect_core::{shape, Validate, ValidationError};

use crate::constraints::{check_instance_id, check_max_results};
use crate::operation::{impl_operation, impl_paginated};

shape! {
    pub struct HierarchyGroupSummary {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
    }
}

shape! {
    pub struct HierarchyPath {
        nested level_one(set_level_one, with_level_one): HierarchyGroupSummary => "LevelOne";
        nested level_two(set_level_two, with_level_two): HierarchyGroupSummary => "LevelTwo";
        nested level_three(set_level_three, with_level_three): HierarchyGroupSummary => "LevelThree";
        nested level_four(set_level_four, with_level_four): HierarchyGroupSummary => "LevelFour";
        nested level_five(set_level_five, with_level_five): HierarchyGroupSummary => "LevelFive";
    }
}

shape! {
    pub struct HierarchyGroup {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
        /// Level the group sits on, `1` to `5`.
        string level_id(set_level_id, with_level_id) => "LevelId";
        nested hierarchy_path(set_hierarchy_path, with_hierarchy_path): HierarchyPath => "HierarchyPath";
    }
}

shape! {
    pub struct HierarchyLevel {
        string id(set_id, with_id) => "Id";
        string arn(set_arn, with_arn) => "Arn";
        string name(set_name, with_name) => "Name";
    }
}

shape! {
    pub struct HierarchyStructure {
        nested level_one(set_level_one, with_level_one): HierarchyLevel => "LevelOne";
        nested level_two(set_level_two, with_level_two): HierarchyLevel => "LevelTwo";
        nested level_three(set_level_three, with_level_three): HierarchyLevel => "LevelThree";
        nested level_four(set_level_four, with_level_four): HierarchyLevel => "LevelFour";
        nested level_five(set_level_five, with_level_five): HierarchyLevel => "LevelFive";
    }
}

impl HierarchyPath {
    /// Groups from the top level down, skipping unset levels.
    pub fn groups(&self) -> impl Iterator<Item = &HierarchyGroupSummary> {
        [
            self.level_one(),
            self.level_two(),
            self.level_three(),
            self.level_four(),
            self.level_five(),
        ]
        .into_iter()
        .flatten()
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

shape! {
    pub struct DescribeUserHierarchyGroupRequest {
        string hierarchy_group_id(set_hierarchy_group_id, with_hierarchy_group_id) => "HierarchyGroupId";
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for DescribeUserHierarchyGroupRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require("HierarchyGroupId", self.hierarchy_group_id())?;
        check_instance_id(self.instance_id())
    }
}

shape! {
    pub struct DescribeUserHierarchyGroupResult {
        nested hierarchy_group(set_hierarchy_group, with_hierarchy_group): HierarchyGroup => "HierarchyGroup";
    }
}

shape! {
    pub struct DescribeUserHierarchyStructureRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
    }
}

impl Validate for DescribeUserHierarchyStructureRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())
    }
}

shape! {
    pub struct DescribeUserHierarchyStructureResult {
        nested hierarchy_structure(set_hierarchy_structure, with_hierarchy_structure): HierarchyStructure => "HierarchyStructure";
    }
}

shape! {
    pub struct ListUserHierarchyGroupsRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string next_token(set_next_token, with_next_token) => "NextToken";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
    }
}

impl Validate for ListUserHierarchyGroupsRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_max_results(self.max_results(), 1000)
    }
}

shape! {
    pub struct ListUserHierarchyGroupsResult {
        list user_hierarchy_group_summary_list(set_user_hierarchy_group_summary_list, with_user_hierarchy_group_summary_list, add_user_hierarchy_group_summary): HierarchyGroupSummary => "UserHierarchyGroupSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

impl_operation!(DescribeUserHierarchyGroupRequest => DescribeUserHierarchyGroupResult, "DescribeUserHierarchyGroup");
impl_operation!(DescribeUserHierarchyStructureRequest => DescribeUserHierarchyStructureResult, "DescribeUserHierarchyStructure");
impl_operation!(ListUserHierarchyGroupsRequest => ListUserHierarchyGroupsResult, "ListUserHierarchyGroups");
impl_paginated!(ListUserHierarchyGroupsRequest => ListUserHierarchyGroupsResult, user_hierarchy_group_summary_list: HierarchyGroupSummary);
