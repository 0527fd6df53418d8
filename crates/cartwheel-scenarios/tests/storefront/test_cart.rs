use cartwheel_core::matcher::NodeMatcher;
use cartwheel_scenarios::screens::{
    assert_badge_count, assert_badge_gone, CartScreen, SearchScreen,
};

use super::harness;

#[tokio::test]
async fn add_to_cart_updates_badge_and_cart() {
    let (robot, sim) = harness::robot_with_sim();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Mango").await.unwrap();
    search.await_results("$2.99", 1, 5000).await.unwrap();
    let detail = search.open_result("Mango", "$2.99").await.unwrap();
    detail.add_to_cart().await.unwrap();

    assert_badge_count(&robot, 1).await.unwrap();
    assert_eq!(sim.cart_count(), 1);

    let cart = CartScreen::open(&robot).await.unwrap();
    cart.assert_item("Mango").await.unwrap();
}

#[tokio::test]
async fn adding_twice_merges_into_one_line() {
    let robot = harness::robot();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Mango").await.unwrap();
    search.await_results("$2.99", 1, 5000).await.unwrap();
    let detail = search.open_result("Mango", "$2.99").await.unwrap();
    detail.add_to_cart().await.unwrap();
    detail.add_to_cart().await.unwrap();

    assert_badge_count(&robot, 2).await.unwrap();

    let cart = CartScreen::open(&robot).await.unwrap();
    cart.assert_item("Mango").await.unwrap();
    robot.assert_displayed_substring("x2").await.unwrap();
}

#[tokio::test]
async fn remove_from_cart_restores_empty_state() {
    let (robot, sim) = harness::robot_with_sim();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Pretzels").await.unwrap();
    search.await_results("$1.99", 1, 5000).await.unwrap();
    let detail = search.open_result("Pretzels", "$1.99").await.unwrap();
    detail.add_to_cart().await.unwrap();

    let cart = CartScreen::open(&robot).await.unwrap();
    cart.assert_item("Pretzels").await.unwrap();
    cart.remove_first().await.unwrap();

    cart.assert_empty().await.unwrap();
    assert_badge_gone(&robot).await.unwrap();
    assert_eq!(sim.cart_count(), 0);
}

#[tokio::test]
async fn removing_one_product_keeps_the_other() {
    let robot = harness::robot();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Mango").await.unwrap();
    search.await_results("$2.99", 1, 5000).await.unwrap();
    let detail = search.open_result("Mango", "$2.99").await.unwrap();
    detail.add_to_cart().await.unwrap();

    let search = SearchScreen::open(&robot).await.unwrap();
    search.search("Chips").await.unwrap();
    search.await_results("$0.99", 1, 5000).await.unwrap();
    let detail = search.open_result("Chips", "$0.99").await.unwrap();
    detail.add_to_cart().await.unwrap();

    assert_badge_count(&robot, 2).await.unwrap();

    // Lines keep insertion order, so the first REMOVE drops the mango.
    let cart = CartScreen::open(&robot).await.unwrap();
    cart.remove_first().await.unwrap();
    cart.assert_item("Chips").await.unwrap();
    robot
        .wait_for_gone(&NodeMatcher::text("Mango"), None)
        .await
        .unwrap();
    assert_badge_count(&robot, 1).await.unwrap();
}

#[tokio::test]
async fn empty_cart_shows_placeholder() {
    let robot = harness::robot();

    let cart = CartScreen::open(&robot).await.unwrap();
    cart.assert_empty().await.unwrap();
    assert_badge_gone(&robot).await.unwrap();
}
