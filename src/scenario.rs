//! The Food API conformance scenario.
//!
//! The lifecycle cases hand the created id to each other explicitly:
//! `create_food` returns it, and `edit_created_food` / `delete_created_food`
//! take it as an argument. [`Scenario::run`] executes every case in order and
//! skips the dependent ones when creation did not produce an id.

use reqwest::StatusCode;
use std::fmt;
use tracing::{error, info, warn};

use crate::error::SuiteError;
use crate::models::{ApiResponseDto, FoodCreated, FoodDto, PatchOperation};
use crate::services::{ApiReply, FoodyClient};

pub const TEST_FOOD_NAME: &str = "Test Food by Zhekoni";
pub const TEST_FOOD_DESCRIPTION: &str = "This is a test food description";
pub const EDITED_FOOD_NAME: &str = "Edited Food Name";
pub const MISSING_FOOD_NAME: &str = "New Food Name";
pub const NAME_PATH: &str = "/name";

pub const MISSING_EDIT_ID: &str = "112223";
pub const MISSING_DELETE_ID: &str = "123434";

pub const MSG_EDITED: &str = "Successfully edited";
pub const MSG_DELETED: &str = "Deleted successfully!";
pub const MSG_NO_FOOD: &str = "No food revues...";
pub const MSG_UNABLE_TO_DELETE: &str = "Unable to delete this food revue!";

#[derive(Debug, thiserror::Error)]
pub enum CheckFailure {
    #[error("expected status {expected}, got {actual} (body: '{body}')")]
    Status {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },
    #[error("expected body to contain '{needle}', got '{body}'")]
    MissingContent { needle: &'static str, body: String },
    #[error("expected msg '{expected}', got {actual:?}")]
    Message {
        expected: &'static str,
        actual: Option<String>,
    },
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Request(#[from] SuiteError),
}

pub type CheckResult<T> = Result<T, CheckFailure>;

pub fn expect_status(reply: &ApiReply, expected: StatusCode) -> CheckResult<()> {
    if reply.status == expected {
        Ok(())
    } else {
        Err(CheckFailure::Status {
            expected,
            actual: reply.status,
            body: reply.body.clone(),
        })
    }
}

pub fn expect_contains(reply: &ApiReply, needle: &'static str) -> CheckResult<()> {
    if reply.contains(needle) {
        Ok(())
    } else {
        Err(CheckFailure::MissingContent {
            needle,
            body: reply.body.clone(),
        })
    }
}

pub fn expect_msg(reply: &ApiReply, expected: &'static str) -> CheckResult<()> {
    let envelope: ApiResponseDto = reply.json("response envelope")?;
    if envelope.msg.as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(CheckFailure::Message {
            expected,
            actual: envelope.msg,
        })
    }
}

/// POST `Food/Create` with a complete record; expects 201 and a non-empty `foodId`.
pub async fn create_food(client: &FoodyClient) -> CheckResult<String> {
    let food = FoodDto::new(TEST_FOOD_NAME, TEST_FOOD_DESCRIPTION, "");
    let reply = client.create_food(&food).await?;
    expect_status(&reply, StatusCode::CREATED)?;

    let created: FoodCreated = reply.json("create response")?;
    match created.food_id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CheckFailure::Invalid("Food ID should not be null or empty.".into())),
    }
}

pub async fn edit_created_food(client: &FoodyClient, food_id: &str) -> CheckResult<()> {
    let ops = [PatchOperation::replace(NAME_PATH, EDITED_FOOD_NAME)];
    let reply = client.edit_food(food_id, &ops).await?;
    expect_status(&reply, StatusCode::OK)?;
    expect_msg(&reply, MSG_EDITED)
}

/// GET `Food/All`; returns the number of records listed.
pub async fn list_foods(client: &FoodyClient) -> CheckResult<usize> {
    let reply = client.list_foods().await?;
    expect_status(&reply, StatusCode::OK)?;

    let items: Vec<ApiResponseDto> = reply.json("list response")?;
    if items.is_empty() {
        return Err(CheckFailure::Invalid("Food/All returned an empty collection".into()));
    }
    Ok(items.len())
}

pub async fn delete_created_food(client: &FoodyClient, food_id: &str) -> CheckResult<()> {
    let reply = client.delete_food(food_id).await?;
    expect_status(&reply, StatusCode::OK)?;
    expect_contains(&reply, MSG_DELETED)
}

pub async fn create_food_without_required_fields(client: &FoodyClient) -> CheckResult<()> {
    let reply = client.create_food(&FoodDto::default()).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST)
}

pub async fn edit_missing_food(client: &FoodyClient) -> CheckResult<()> {
    let ops = [PatchOperation::replace(NAME_PATH, MISSING_FOOD_NAME)];
    let reply = client.edit_food(MISSING_EDIT_ID, &ops).await?;
    expect_status(&reply, StatusCode::NOT_FOUND)?;
    expect_contains(&reply, MSG_NO_FOOD)
}

/// The server answers 400 here, not 404 as for edit.
pub async fn delete_missing_food(client: &FoodyClient) -> CheckResult<()> {
    let reply = client.delete_food(MISSING_DELETE_ID).await?;
    expect_status(&reply, StatusCode::BAD_REQUEST)?;
    expect_contains(&reply, MSG_UNABLE_TO_DELETE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    CreateFood,
    EditCreatedFood,
    ListFoods,
    DeleteCreatedFood,
    CreateFoodWithoutRequiredFields,
    EditMissingFood,
    DeleteMissingFood,
}

impl Case {
    pub const ALL: [Case; 7] = [
        Case::CreateFood,
        Case::EditCreatedFood,
        Case::ListFoods,
        Case::DeleteCreatedFood,
        Case::CreateFoodWithoutRequiredFields,
        Case::EditMissingFood,
        Case::DeleteMissingFood,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Case::CreateFood => "create_food_returns_created",
            Case::EditCreatedFood => "edit_created_food_returns_successfully_edited",
            Case::ListFoods => "list_foods_is_not_empty",
            Case::DeleteCreatedFood => "delete_created_food_returns_deleted_successfully",
            Case::CreateFoodWithoutRequiredFields => {
                "create_food_without_required_fields_returns_bad_request"
            }
            Case::EditMissingFood => "edit_missing_food_returns_not_found",
            Case::DeleteMissingFood => "delete_missing_food_returns_bad_request",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub case: Case,
    pub outcome: CaseOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn outcome(&self, case: Case) -> Option<&CaseOutcome> {
        self.cases
            .iter()
            .find(|report| report.case == case)
            .map(|report| &report.outcome)
    }

    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, CaseOutcome::Skipped(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases.iter().filter(|r| pred(&r.outcome)).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.cases {
            match &report.outcome {
                CaseOutcome::Passed => writeln!(f, "PASS {}", report.case)?,
                CaseOutcome::Failed(reason) => writeln!(f, "FAIL {}: {}", report.case, reason)?,
                CaseOutcome::Skipped(reason) => writeln!(f, "SKIP {}: {}", report.case, reason)?,
            }
        }
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}

/// Runs every case against one client, in declaration order.
pub struct Scenario<'a> {
    client: &'a FoodyClient,
    report: SuiteReport,
}

impl<'a> Scenario<'a> {
    pub fn new(client: &'a FoodyClient) -> Self {
        Self {
            client,
            report: SuiteReport::default(),
        }
    }

    pub async fn run(mut self) -> SuiteReport {
        let client = self.client;
        info!("Running Food API scenario against {}", client.base_url());

        let created_id = self.record(Case::CreateFood, create_food(client).await);

        match created_id.as_deref() {
            Some(id) => {
                self.record(Case::EditCreatedFood, edit_created_food(client, id).await);
            }
            None => self.skip(Case::EditCreatedFood),
        }

        self.record(Case::ListFoods, list_foods(client).await);

        match created_id.as_deref() {
            Some(id) => {
                self.record(Case::DeleteCreatedFood, delete_created_food(client, id).await);
            }
            None => self.skip(Case::DeleteCreatedFood),
        }

        self.record(
            Case::CreateFoodWithoutRequiredFields,
            create_food_without_required_fields(client).await,
        );
        self.record(Case::EditMissingFood, edit_missing_food(client).await);
        self.record(Case::DeleteMissingFood, delete_missing_food(client).await);

        self.report
    }

    fn record<T>(&mut self, case: Case, result: CheckResult<T>) -> Option<T> {
        let (outcome, value) = match result {
            Ok(value) => {
                info!(case = case.name(), "passed");
                (CaseOutcome::Passed, Some(value))
            }
            Err(failure) => {
                error!(case = case.name(), "failed: {}", failure);
                (CaseOutcome::Failed(failure.to_string()), None)
            }
        };
        self.report.cases.push(CaseReport { case, outcome });
        value
    }

    fn skip(&mut self, case: Case) {
        let reason = format!("depends on {}, which did not produce a food id", Case::CreateFood);
        warn!(case = case.name(), "skipped: {}", reason);
        self.report.cases.push(CaseReport {
            case,
            outcome: CaseOutcome::Skipped(reason),
        });
    }
}
