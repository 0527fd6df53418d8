use cartwheel_core::error::FlowError;
use cartwheel_core::matcher::NodeMatcher;
use cartwheel_scenarios::screens::SearchScreen;

use super::harness;

#[tokio::test]
async fn search_finds_mango_with_price() {
    let robot = harness::robot();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Mango").await.unwrap();
    search.await_results("$2.99", 1, 5000).await.unwrap();

    let detail = search.open_result("Mango", "$2.99").await.unwrap();
    detail.assert_product("Mango", "$2.99").await.unwrap();
    detail.assert_details().await.unwrap();
}

#[tokio::test]
async fn search_matches_by_substring() {
    let robot = harness::robot();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Chips").await.unwrap();
    // Both "Chips" and "Apple Chips" match the query. The field's value
    // echoes it too, so rows are told apart by their price marker.
    let rows = NodeMatcher::text_substring("Chips").and(NodeMatcher::text_substring("$"));
    let nodes = robot.wait_for_count(&rows, 2, Some(5000)).await.unwrap();
    assert_eq!(nodes.len(), 2);
    search.open_result("Apple Chips", "$2.49").await.unwrap();
    robot.assert_displayed("Apple Chips").await.unwrap();
}

#[tokio::test]
async fn search_with_no_matches_shows_empty_state() {
    let robot = harness::robot();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Durian").await.unwrap();
    robot
        .wait_for_count(&NodeMatcher::text("No matches"), 1, Some(5000))
        .await
        .unwrap();
}

#[tokio::test]
async fn waiting_for_absent_result_times_out() {
    let robot = harness::robot();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Mango").await.unwrap();

    let err = search.await_results("$9.99", 1, 200).await.unwrap_err();
    match err {
        FlowError::Timeout { target, timeout_ms } => {
            assert!(target.contains("$9.99"));
            assert_eq!(timeout_ms, 200);
        }
        other => panic!("expected Timeout, got {other}"),
    }
}

#[tokio::test]
async fn typing_without_field_focus_is_a_driver_error() {
    let robot = harness::robot();

    // Still on the home screen: no editable node exists to focus.
    let err = robot
        .type_into(&NodeMatcher::editable(), "Mango")
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Missing { .. }));
}
