//! Page objects for the Snackshop screens.
//!
//! Each type wraps the robot with the vocabulary of one screen, so scenario
//! tests read as user intent rather than node plumbing. Constructors
//! navigate via the tab bar and verify a screen landmark before returning.

use cartwheel_core::error::FlowError;
use cartwheel_core::matcher::NodeMatcher;
use cartwheel_core::robot::Robot;

use crate::strings;

/// The home feed of horizontal product rows.
pub struct HomeScreen<'a> {
    robot: &'a Robot,
}

impl<'a> HomeScreen<'a> {
    /// Navigates to the home tab.
    pub async fn open(robot: &'a Robot) -> Result<Self, FlowError> {
        robot.tap_text(strings::TAB_HOME).await?;
        robot.settle().await;
        robot.assert_displayed(strings::SECTION_POPULAR).await?;
        Ok(Self { robot })
    }

    /// Scrolls down until the named section title is on screen.
    pub async fn scroll_to_section(&self, title: &str) -> Result<(), FlowError> {
        self.robot.scroll_until_visible(title).await
    }

    /// Drags the row holding the `occurrence`-th card with this name back
    /// and forth.
    pub async fn exercise_card(&self, name: &str, occurrence: usize) -> Result<(), FlowError> {
        self.robot.exercise_carousel(name, occurrence).await
    }
}

/// The search screen with its text field and result list.
pub struct SearchScreen<'a> {
    robot: &'a Robot,
}

impl<'a> SearchScreen<'a> {
    /// Navigates to the search tab and waits for the field to exist.
    pub async fn open(robot: &'a Robot) -> Result<Self, FlowError> {
        robot.tap_text(strings::TAB_SEARCH).await?;
        robot.settle().await;
        robot
            .wait_for_count(&NodeMatcher::editable(), 1, None)
            .await?;
        Ok(Self { robot })
    }

    /// Focuses the field and types a query.
    pub async fn search(&self, query: &str) -> Result<(), FlowError> {
        self.robot
            .type_into(&NodeMatcher::editable(), query)
            .await
    }

    /// Waits until at least `min_count` results carrying `price` exist,
    /// within `timeout_ms`.
    pub async fn await_results(
        &self,
        price: &str,
        min_count: usize,
        timeout_ms: u64,
    ) -> Result<(), FlowError> {
        let matcher = NodeMatcher::text_substring(price).and(NodeMatcher::clickable());
        self.robot
            .wait_for_count(&matcher, min_count, Some(timeout_ms))
            .await?;
        Ok(())
    }

    /// Opens the result row for this product.
    ///
    /// The row is matched by name and price together; the search field's
    /// value echoes the query, so name alone would hit the field first.
    pub async fn open_result(
        &self,
        name: &str,
        price: &str,
    ) -> Result<DetailScreen<'a>, FlowError> {
        let row = NodeMatcher::text(name).and(NodeMatcher::text_substring(price));
        self.robot.tap_matching(&row).await?;
        self.robot.settle().await;
        Ok(DetailScreen { robot: self.robot })
    }
}

/// A product detail screen.
pub struct DetailScreen<'a> {
    robot: &'a Robot,
}

impl<'a> DetailScreen<'a> {
    /// Asserts the screen shows this product and price.
    pub async fn assert_product(&self, name: &str, price: &str) -> Result<(), FlowError> {
        self.robot.assert_displayed(name).await?;
        self.robot.assert_displayed_substring(price).await
    }

    /// Asserts the descriptive body of the screen: tagline, ingredients
    /// heading, and ingredient list.
    pub async fn assert_details(&self) -> Result<(), FlowError> {
        self.robot
            .assert_displayed_substring(strings::DETAIL_TAGLINE)
            .await?;
        self.robot
            .assert_displayed(strings::INGREDIENTS_HEADING)
            .await?;
        self.robot
            .assert_displayed_substring(strings::INGREDIENTS_LIST)
            .await
    }

    /// Taps the add-to-cart button.
    pub async fn add_to_cart(&self) -> Result<(), FlowError> {
        self.robot.tap_text(strings::ADD_TO_CART).await?;
        self.robot.settle().await;
        Ok(())
    }
}

/// The cart screen.
pub struct CartScreen<'a> {
    robot: &'a Robot,
}

impl<'a> CartScreen<'a> {
    /// Navigates to the cart tab.
    pub async fn open(robot: &'a Robot) -> Result<Self, FlowError> {
        robot.tap_text(strings::TAB_CART).await?;
        robot.settle().await;
        robot.assert_displayed(strings::CART_TITLE).await?;
        Ok(Self { robot })
    }

    /// Asserts a line item with this product name is displayed.
    pub async fn assert_item(&self, name: &str) -> Result<(), FlowError> {
        self.robot.assert_displayed(name).await
    }

    /// Removes the topmost line item.
    pub async fn remove_first(&self) -> Result<(), FlowError> {
        self.robot.tap_text(strings::CART_REMOVE).await?;
        self.robot.settle().await;
        Ok(())
    }

    /// Asserts the empty-cart message is displayed.
    pub async fn assert_empty(&self) -> Result<(), FlowError> {
        self.robot.assert_displayed(strings::CART_EMPTY).await
    }
}

/// Asserts the tab-bar badge currently shows `count` items.
pub async fn assert_badge_count(robot: &Robot, count: u32) -> Result<(), FlowError> {
    let matcher =
        NodeMatcher::text(count.to_string()).and(NodeMatcher::role(strings::BADGE_ROLE));
    robot.wait_for_count(&matcher, 1, None).await?;
    Ok(())
}

/// Asserts the tab-bar badge is absent, meaning the cart is empty.
pub async fn assert_badge_gone(robot: &Robot) -> Result<(), FlowError> {
    robot
        .wait_for_gone(&NodeMatcher::role(strings::BADGE_ROLE), None)
        .await
}
