// @critical: Error responses for invalid input and missing records

use super::test_utils::FoodyMock;
use foody_suite::models::{FoodDto, PatchOperation};
use foody_suite::scenario::{
    self, CheckFailure, MISSING_DELETE_ID, MISSING_EDIT_ID, MSG_NO_FOOD, MSG_UNABLE_TO_DELETE,
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

#[tokio::test]
async fn test_create_without_required_fields_is_bad_request() {
    let mock = FoodyMock::start().await;
    scenario::create_food_without_required_fields(&mock.client())
        .await
        .expect("empty record should be rejected with 400");
}

#[tokio::test]
async fn test_create_without_required_fields_raw_reply() {
    let mock = FoodyMock::start().await;
    let reply = mock
        .client()
        .create_food(&FoodDto::new("", "", ""))
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_missing_food_is_not_found() {
    let mock = FoodyMock::start().await;
    scenario::edit_missing_food(&mock.client()).await.unwrap();

    let reply = mock
        .client()
        .edit_food(
            MISSING_EDIT_ID,
            &[PatchOperation::replace("/name", "New Food Name")],
        )
        .await
        .unwrap();
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.contains(MSG_NO_FOOD));
}

#[tokio::test]
async fn test_delete_missing_food_is_bad_request_not_404() {
    let mock = FoodyMock::start().await;
    scenario::delete_missing_food(&mock.client()).await.unwrap();

    let reply = mock.client().delete_food(MISSING_DELETE_ID).await.unwrap();
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.contains(MSG_UNABLE_TO_DELETE));
}

#[tokio::test]
async fn test_delete_missing_food_with_404_fails_check() {
    // A server answering 404 for delete would not match the observed behaviour
    let mock = FoodyMock::start().await;
    mock.override_with(
        Mock::given(method("DELETE"))
            .and(path(format!("/api/Food/Delete/{}", MISSING_DELETE_ID)))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "msg": MSG_UNABLE_TO_DELETE })),
            ),
    )
    .await;

    let err = scenario::delete_missing_food(&mock.client())
        .await
        .unwrap_err();
    match err {
        CheckFailure::Status {
            expected, actual, ..
        } => {
            assert_eq!(expected, StatusCode::BAD_REQUEST);
            assert_eq!(actual, StatusCode::NOT_FOUND);
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[tokio::test]
async fn test_edit_missing_food_with_wrong_body_fails_check() {
    let mock = FoodyMock::start().await;
    mock.override_with(
        Mock::given(method("PATCH"))
            .and(path(format!("/api/Food/Edit/{}", MISSING_EDIT_ID)))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found")),
    )
    .await;

    let err = scenario::edit_missing_food(&mock.client()).await.unwrap_err();
    assert!(matches!(err, CheckFailure::MissingContent { .. }));
}
