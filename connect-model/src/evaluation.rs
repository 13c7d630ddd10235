//! Evaluation forms
//!
//! A form is a tree of sections and questions. Each [`EvaluationFormItem`]
//! is a union: exactly one of `Section` or `Question` is set, and sections
//! hold further items.

use connect_core::validation::{check_each, check_known, check_length, check_nested, check_range, require};
use connect_core::{shape, wire_enum, Double, Timestamp, Validate, ValidationError};

use crate::constraints::{check_client_token, check_instance_id, check_max_results, check_required_id};
use crate::operation::{impl_idempotent, impl_operation, impl_paginated};

pub const TITLE_MAX_LEN: usize = 128;
pub const QUESTION_TITLE_MAX_LEN: usize = 350;
pub const DESCRIPTION_MAX_LEN: usize = 1024;
pub const INSTRUCTIONS_MAX_LEN: usize = 1024;
pub const REF_ID_MAX_LEN: usize = 40;
pub const MAX_ITEMS: usize = 100;
const EVALUATION_FORM_ID_MAX_LEN: usize = 500;

wire_enum! {
    pub enum EvaluationFormScoringMode {
        QuestionOnly => "QUESTION_ONLY",
        SectionOnly => "SECTION_ONLY",
    }
}

wire_enum! {
    pub enum EvaluationFormScoringStatus {
        Enabled => "ENABLED",
        Disabled => "DISABLED",
    }
}

wire_enum! {
    pub enum EvaluationFormVersionStatus {
        Draft => "DRAFT",
        Active => "ACTIVE",
    }
}

wire_enum! {
    pub enum EvaluationFormQuestionType {
        Text => "TEXT",
        SingleSelect => "SINGLESELECT",
        Numeric => "NUMERIC",
    }
}

shape! {
    pub struct EvaluationFormScoringStrategy {
        nested mode(set_mode, with_mode): EvaluationFormScoringMode => "Mode";
        nested status(set_status, with_status): EvaluationFormScoringStatus => "Status";
    }
}

impl Validate for EvaluationFormScoringStrategy {
    fn validate(&self) -> Result<(), ValidationError> {
        check_known("Mode", Some(require("Mode", self.mode())?))?;
        check_known("Status", Some(require("Status", self.status())?))
    }
}

shape! {
    pub struct EvaluationFormNumericQuestionProperties {
        copy min_value(set_min_value, with_min_value): i32 => "MinValue";
        copy max_value(set_max_value, with_max_value): i32 => "MaxValue";
    }
}

impl Validate for EvaluationFormNumericQuestionProperties {
    fn validate(&self) -> Result<(), ValidationError> {
        let min = require("MinValue", self.min_value())?;
        let max = require("MaxValue", self.max_value())?;
        if min > max {
            return Err(ValidationError::invalid(
                "MaxValue",
                format!("{} is below MinValue {}", max, min),
            ));
        }
        Ok(())
    }
}

shape! {
    pub struct EvaluationFormQuestionTypeProperties {
        nested numeric(set_numeric, with_numeric): EvaluationFormNumericQuestionProperties => "Numeric";
    }
}

shape! {
    pub struct EvaluationFormQuestion {
        string title(set_title, with_title) => "Title";
        string instructions(set_instructions, with_instructions) => "Instructions";
        string ref_id(set_ref_id, with_ref_id) => "RefId";
        copy not_applicable_enabled(set_not_applicable_enabled, with_not_applicable_enabled): bool => "NotApplicableEnabled";
        nested question_type(set_question_type, with_question_type): EvaluationFormQuestionType => "QuestionType";
        nested question_type_properties(set_question_type_properties, with_question_type_properties): EvaluationFormQuestionTypeProperties => "QuestionTypeProperties";
        copy weight(set_weight, with_weight): Double => "Weight";
    }
}

impl Validate for EvaluationFormQuestion {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required_id("Title", self.title(), QUESTION_TITLE_MAX_LEN)?;
        check_required_id("RefId", self.ref_id(), REF_ID_MAX_LEN)?;
        check_length("Instructions", self.instructions(), 0, INSTRUCTIONS_MAX_LEN)?;
        let question_type = require("QuestionType", self.question_type())?;
        check_known("QuestionType", Some(question_type))?;
        if *question_type == EvaluationFormQuestionType::Numeric {
            let numeric = self
                .question_type_properties()
                .and_then(EvaluationFormQuestionTypeProperties::numeric);
            let numeric = require("QuestionTypeProperties.Numeric", numeric)?;
            check_nested("QuestionTypeProperties.Numeric", Some(numeric))?;
        }
        check_weight(self.weight())
    }
}

shape! {
    pub struct EvaluationFormSection {
        string title(set_title, with_title) => "Title";
        string ref_id(set_ref_id, with_ref_id) => "RefId";
        string instructions(set_instructions, with_instructions) => "Instructions";
        list items(set_items, with_items, add_item): EvaluationFormItem => "Items";
        copy weight(set_weight, with_weight): Double => "Weight";
    }
}

impl Validate for EvaluationFormSection {
    fn validate(&self) -> Result<(), ValidationError> {
        check_required_id("Title", self.title(), TITLE_MAX_LEN)?;
        check_required_id("RefId", self.ref_id(), REF_ID_MAX_LEN)?;
        check_length("Instructions", self.instructions(), 0, INSTRUCTIONS_MAX_LEN)?;
        check_items(self.items())?;
        check_weight(self.weight())
    }
}

shape! {
    /// One entry in a form or section: a nested section or a question.
    pub struct EvaluationFormItem {
        nested section(set_section, with_section): EvaluationFormSection => "Section";
        nested question(set_question, with_question): EvaluationFormQuestion => "Question";
    }
}

impl From<EvaluationFormSection> for EvaluationFormItem {
    fn from(section: EvaluationFormSection) -> Self {
        EvaluationFormItem::new().with_section(section)
    }
}

impl From<EvaluationFormQuestion> for EvaluationFormItem {
    fn from(question: EvaluationFormQuestion) -> Self {
        EvaluationFormItem::new().with_question(question)
    }
}

impl Validate for EvaluationFormItem {
    fn validate(&self) -> Result<(), ValidationError> {
        match (self.section(), self.question()) {
            (Some(section), None) => check_nested("Section", Some(section)),
            (None, Some(question)) => check_nested("Question", Some(question)),
            (Some(_), Some(_)) => Err(ValidationError::invalid(
                "Section",
                "exactly one of Section or Question may be set",
            )),
            (None, None) => Err(ValidationError::invalid(
                "Section",
                "one of Section or Question must be set",
            )),
        }
    }
}

fn check_items(items: Option<&[EvaluationFormItem]>) -> Result<(), ValidationError> {
    let items = require("Items", items)?;
    if items.is_empty() || items.len() > MAX_ITEMS {
        return Err(ValidationError::LengthOutOfRange {
            field: "Items".to_string(),
            len: items.len(),
            min: 1,
            max: MAX_ITEMS,
        });
    }
    check_each("Items", Some(items))
}

fn check_weight(weight: Option<Double>) -> Result<(), ValidationError> {
    match weight.map(Double::value) {
        Some(value) if !(0.0..=100.0).contains(&value) => Err(ValidationError::invalid(
            "Weight",
            format!("{} is outside 0..=100", value),
        )),
        _ => Ok(()),
    }
}

shape! {
    pub struct EvaluationForm {
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        copy evaluation_form_version(set_evaluation_form_version, with_evaluation_form_version): i32 => "EvaluationFormVersion";
        copy locked(set_locked, with_locked): bool => "Locked";
        string evaluation_form_arn(set_evaluation_form_arn, with_evaluation_form_arn) => "EvaluationFormArn";
        string title(set_title, with_title) => "Title";
        string description(set_description, with_description) => "Description";
        nested status(set_status, with_status): EvaluationFormVersionStatus => "Status";
        list items(set_items, with_items, add_item): EvaluationFormItem => "Items";
        nested scoring_strategy(set_scoring_strategy, with_scoring_strategy): EvaluationFormScoringStrategy => "ScoringStrategy";
        copy created_time(set_created_time, with_created_time): Timestamp => "CreatedTime";
        string created_by(set_created_by, with_created_by) => "CreatedBy";
        copy last_modified_time(set_last_modified_time, with_last_modified_time): Timestamp => "LastModifiedTime";
        string last_modified_by(set_last_modified_by, with_last_modified_by) => "LastModifiedBy";
        map tags(set_tags, with_tags, add_tags_entry, clear_tags_entries): String => "Tags";
    }
}

shape! {
    pub struct EvaluationFormSummary {
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        string evaluation_form_arn(set_evaluation_form_arn, with_evaluation_form_arn) => "EvaluationFormArn";
        string title(set_title, with_title) => "Title";
        copy created_time(set_created_time, with_created_time): Timestamp => "CreatedTime";
        string created_by(set_created_by, with_created_by) => "CreatedBy";
        copy last_modified_time(set_last_modified_time, with_last_modified_time): Timestamp => "LastModifiedTime";
        string last_modified_by(set_last_modified_by, with_last_modified_by) => "LastModifiedBy";
        copy last_activated_time(set_last_activated_time, with_last_activated_time): Timestamp => "LastActivatedTime";
        copy latest_version(set_latest_version, with_latest_version): i32 => "LatestVersion";
        copy active_version(set_active_version, with_active_version): i32 => "ActiveVersion";
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

shape! {
    /// Creates a form in `DRAFT` status, version 1.
    pub struct CreateEvaluationFormRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string title(set_title, with_title) => "Title";
        string description(set_description, with_description) => "Description";
        list items(set_items, with_items, add_item): EvaluationFormItem => "Items";
        nested scoring_strategy(set_scoring_strategy, with_scoring_strategy): EvaluationFormScoringStrategy => "ScoringStrategy";
        string client_token(set_client_token, with_client_token) => "ClientToken";
    }
}

impl Validate for CreateEvaluationFormRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_required_id("Title", self.title(), TITLE_MAX_LEN)?;
        check_length("Description", self.description(), 0, DESCRIPTION_MAX_LEN)?;
        check_items(self.items())?;
        check_nested("ScoringStrategy", self.scoring_strategy())?;
        check_client_token(self.client_token())
    }
}

shape! {
    pub struct CreateEvaluationFormResult {
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        string evaluation_form_arn(set_evaluation_form_arn, with_evaluation_form_arn) => "EvaluationFormArn";
    }
}

shape! {
    /// Omitting the version describes the latest one.
    pub struct DescribeEvaluationFormRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        copy evaluation_form_version(set_evaluation_form_version, with_evaluation_form_version): i32 => "EvaluationFormVersion";
    }
}

shape! {
    pub struct DescribeEvaluationFormResult {
        nested evaluation_form(set_evaluation_form, with_evaluation_form): EvaluationForm => "EvaluationForm";
    }
}

shape! {
    pub struct ActivateEvaluationFormRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        copy evaluation_form_version(set_evaluation_form_version, with_evaluation_form_version): i32 => "EvaluationFormVersion";
    }
}

shape! {
    pub struct ActivateEvaluationFormResult {
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        string evaluation_form_arn(set_evaluation_form_arn, with_evaluation_form_arn) => "EvaluationFormArn";
        copy evaluation_form_version(set_evaluation_form_version, with_evaluation_form_version): i32 => "EvaluationFormVersion";
    }
}

shape! {
    pub struct DeleteEvaluationFormRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        string evaluation_form_id(set_evaluation_form_id, with_evaluation_form_id) => "EvaluationFormId";
        copy evaluation_form_version(set_evaluation_form_version, with_evaluation_form_version): i32 => "EvaluationFormVersion";
    }
}

shape! {
    pub struct DeleteEvaluationFormResult {}
}

/// Identifies one form version; `version_required` for operations that
/// act on a specific version.
fn check_form_version(
    instance_id: Option<&str>,
    form_id: Option<&str>,
    version: Option<i32>,
    version_required: bool,
) -> Result<(), ValidationError> {
    check_instance_id(instance_id)?;
    check_required_id("EvaluationFormId", form_id, EVALUATION_FORM_ID_MAX_LEN)?;
    if version_required {
        require("EvaluationFormVersion", version)?;
    }
    check_range("EvaluationFormVersion", version.map(i64::from), 1, i64::from(i32::MAX))
}

impl Validate for DescribeEvaluationFormRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_form_version(self.instance_id(), self.evaluation_form_id(), self.evaluation_form_version(), false)
    }
}

impl Validate for ActivateEvaluationFormRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_form_version(self.instance_id(), self.evaluation_form_id(), self.evaluation_form_version(), true)
    }
}

impl Validate for DeleteEvaluationFormRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_form_version(self.instance_id(), self.evaluation_form_id(), self.evaluation_form_version(), false)
    }
}

shape! {
    pub struct ListEvaluationFormsRequest {
        string instance_id(set_instance_id, with_instance_id) => "InstanceId";
        copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

impl Validate for ListEvaluationFormsRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_instance_id(self.instance_id())?;
        check_max_results(self.max_results(), 100)
    }
}

shape! {
    pub struct ListEvaluationFormsResult {
        list evaluation_form_summary_list(set_evaluation_form_summary_list, with_evaluation_form_summary_list, add_evaluation_form_summary): EvaluationFormSummary => "EvaluationFormSummaryList";
        string next_token(set_next_token, with_next_token) => "NextToken";
    }
}

impl_operation!(CreateEvaluationFormRequest => CreateEvaluationFormResult, "CreateEvaluationForm");
impl_idempotent!(CreateEvaluationFormRequest);
impl_operation!(DescribeEvaluationFormRequest => DescribeEvaluationFormResult, "DescribeEvaluationForm");
impl_operation!(ActivateEvaluationFormRequest => ActivateEvaluationFormResult, "ActivateEvaluationForm");
impl_operation!(DeleteEvaluationFormRequest => DeleteEvaluationFormResult, "DeleteEvaluationForm");
impl_operation!(ListEvaluationFormsRequest => ListEvaluationFormsResult, "ListEvaluationForms");
impl_paginated!(ListEvaluationFormsRequest => ListEvaluationFormsResult, evaluation_form_summary_list: EvaluationFormSummary);
