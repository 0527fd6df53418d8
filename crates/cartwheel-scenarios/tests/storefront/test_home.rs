use cartwheel_core::error::FlowError;
use cartwheel_scenarios::screens::HomeScreen;
use cartwheel_scenarios::strings;

use super::harness;

#[tokio::test]
async fn scroll_reveals_newly_added_section() {
    let robot = harness::robot();

    let home = HomeScreen::open(&robot).await.unwrap();
    home.scroll_to_section(strings::SECTION_NEWLY_ADDED)
        .await
        .unwrap();
    robot
        .assert_displayed(strings::SECTION_NEWLY_ADDED)
        .await
        .unwrap();
}

#[tokio::test]
async fn newly_added_row_survives_carousel_exercise() {
    let robot = harness::robot();

    let home = HomeScreen::open(&robot).await.unwrap();
    home.scroll_to_section(strings::SECTION_NEWLY_ADDED)
        .await
        .unwrap();

    // Occurrence 1: the Chips card in the newly-added row, not the one in
    // the popular row at the top of the feed.
    home.exercise_card("Chips", 1).await.unwrap();
    robot
        .assert_displayed(strings::SECTION_NEWLY_ADDED)
        .await
        .unwrap();
}

#[tokio::test]
async fn single_swipes_shuttle_the_row() {
    let robot = harness::robot();

    let home = HomeScreen::open(&robot).await.unwrap();
    home.scroll_to_section(strings::SECTION_NEWLY_ADDED)
        .await
        .unwrap();

    robot.swipe_node_left("Chips", 1).await.unwrap();
    // The row shifted left; its Popcorn card is still partially on screen
    // and drags the row back.
    robot.swipe_node_right("Popcorn", 1).await.unwrap();
    robot
        .assert_displayed(strings::SECTION_NEWLY_ADDED)
        .await
        .unwrap();
}

#[tokio::test]
async fn scrolling_to_a_missing_section_exhausts_the_budget() {
    let robot = harness::robot();

    let home = HomeScreen::open(&robot).await.unwrap();
    let err = home
        .scroll_to_section("Seasonal specials")
        .await
        .unwrap_err();
    match err {
        FlowError::NotFound { target, attempts } => {
            assert_eq!(target, "Seasonal specials");
            assert_eq!(attempts, 15);
        }
        other => panic!("expected NotFound, got {other}"),
    }
    assert!(robot.journal_summary().contains("FAILED"));
}

#[tokio::test]
async fn carousel_on_offscreen_card_fails_fast() {
    let robot = harness::robot();

    let home = HomeScreen::open(&robot).await.unwrap();
    // Occurrence 1 of Chips lives in the newly-added row, far below the
    // fold at launch.
    let err = home.exercise_card("Chips", 1).await.unwrap_err();
    assert!(matches!(err, FlowError::Missing { .. }));
}
