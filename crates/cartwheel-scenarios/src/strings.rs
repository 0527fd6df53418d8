//! UI labels of the Snackshop sample app.
//!
//! Scenario scripts and the in-process double both draw from these
//! constants, so a renamed label breaks in one place.

/// Bottom navigation tab labels.
pub const TAB_HOME: &str = "HOME";
pub const TAB_SEARCH: &str = "SEARCH";
pub const TAB_CART: &str = "CART";

/// Home feed section titles, top to bottom.
pub const SECTION_POPULAR: &str = "Popular on Snackshop";
pub const SECTION_WEEKENDS: &str = "Only on weekends";
pub const SECTION_BACK_IN_STOCK: &str = "Back in stock";
pub const SECTION_NEWLY_ADDED: &str = "Newly Added";

/// Placeholder shown in the empty search field.
pub const SEARCH_PLACEHOLDER: &str = "Search Snackshop";

/// Detail screen labels.
pub const ADD_TO_CART: &str = "ADD TO CART";
pub const DETAIL_TAGLINE: &str = "A tasty snack that everybody loves";
pub const INGREDIENTS_HEADING: &str = "Ingredients";
pub const INGREDIENTS_LIST: &str = "Oats, Honey, Sea Salt";

/// Cart screen labels.
pub const CART_TITLE: &str = "Cart";
pub const CART_REMOVE: &str = "REMOVE";
pub const CART_EMPTY: &str = "Your cart is empty";

/// Role assigned to the cart item-count badge node.
pub const BADGE_ROLE: &str = "Badge";
