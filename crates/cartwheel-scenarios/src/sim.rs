//! In-process double of the Snackshop app.
//!
//! [`SimulatedStorefront`] implements [`UiDriver`] over a small state machine
//! that mirrors the real app's screens: a home feed of horizontal product
//! rows, a search screen whose results materialize a few frames after typing,
//! a product detail screen, and a cart. Scenario suites run against it
//! headlessly; the same scripts run unchanged against a device agent.
//!
//! The tree it serves contains every composed node, on screen or not, so
//! visibility is decided by geometry exactly as it is against a real
//! backend.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use cartwheel_core::driver::{DriverError, UiDriver};
use cartwheel_core::element::{NodeFrame, Point, SemanticsNode};
use cartwheel_core::gesture::SwipeGesture;

use crate::strings;

/// Product catalog: name and display price.
pub const CATALOG: &[(&str, &str)] = &[
    ("Chips", "$0.99"),
    ("Popcorn", "$1.49"),
    ("Mango", "$2.99"),
    ("Pretzels", "$1.99"),
    ("Smoothies", "$3.49"),
    ("Mixed Nuts", "$4.99"),
    ("Apple Chips", "$2.49"),
    ("Fruit Leather", "$1.79"),
];

/// Home feed sections: title, content y-offset, and catalog indices.
const SECTIONS: &[(&str, f64, [usize; 4])] = &[
    (strings::SECTION_POPULAR, 90.0, [0, 1, 2, 3]),
    (strings::SECTION_WEEKENDS, 820.0, [4, 5, 6, 7]),
    (strings::SECTION_BACK_IN_STOCK, 1550.0, [3, 6, 5, 4]),
    (strings::SECTION_NEWLY_ADDED, 3000.0, [0, 1, 7, 5]),
];

const VIEWPORT_W: f64 = 390.0;
const VIEWPORT_H: f64 = 844.0;
const TAB_BAR_Y: f64 = 780.0;
const TAB_W: f64 = 130.0;
const TAB_H: f64 = 64.0;

const CARD_W: f64 = 160.0;
const CARD_H: f64 = 210.0;
const CARD_PITCH: f64 = 176.0;
const ROW_PAD: f64 = 16.0;
const TITLE_H: f64 = 40.0;
const ROW_TOP: f64 = 50.0;

/// Rightmost scroll position of a four-card row.
const ROW_MAX_SCROLL: f64 = ROW_PAD * 2.0 + 4.0 * CARD_PITCH - ROW_PAD - VIEWPORT_W;

/// Bottom of the home feed content.
const CONTENT_H: f64 = 3000.0 + ROW_TOP + CARD_H + 34.0;
const MAX_SCROLL: f64 = CONTENT_H - VIEWPORT_H;

/// Tree dumps between typing a query and its results appearing.
pub const DEFAULT_SEARCH_LATENCY_DUMPS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Screen {
    Home,
    Search,
    Detail(usize),
    Cart,
}

#[derive(Debug, Clone, Copy)]
enum TapAction {
    GoHome,
    GoSearch,
    GoCart,
    FocusSearch,
    OpenDetail(usize),
    AddToCart(usize),
    RemoveAt(usize),
}

#[derive(Debug, Clone)]
struct CartLine {
    product: usize,
    qty: u32,
}

#[derive(Debug)]
struct StoreState {
    screen: Screen,
    scroll_offset: f64,
    row_offsets: [f64; 4],
    cart: Vec<CartLine>,
    query: String,
    field_focused: bool,
    results_pending: usize,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            screen: Screen::Home,
            scroll_offset: 0.0,
            row_offsets: [0.0; 4],
            cart: Vec::new(),
            query: String::new(),
            field_focused: false,
            results_pending: 0,
        }
    }
}

/// An in-process [`UiDriver`] over the simulated Snackshop app.
pub struct SimulatedStorefront {
    state: Mutex<StoreState>,
    search_latency_dumps: usize,
}

impl Default for SimulatedStorefront {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedStorefront {
    /// A storefront at first launch: home screen, empty cart.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            search_latency_dumps: DEFAULT_SEARCH_LATENCY_DUMPS,
        }
    }

    /// Overrides how many tree dumps elapse before search results appear.
    pub fn with_search_latency_dumps(mut self, dumps: usize) -> Self {
        self.search_latency_dumps = dumps;
        self
    }

    /// Returns the app to its first-launch state.
    pub fn reset(&self) {
        *self.lock() = StoreState::default();
    }

    /// Total item count across cart lines.
    pub fn cart_count(&self) -> u32 {
        self.lock().cart.iter().map(|line| line.qty).sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn render(state: &StoreState) -> Vec<(SemanticsNode, Option<TapAction>)> {
        let mut nodes = Vec::new();
        match state.screen {
            Screen::Home => render_home(state, &mut nodes),
            Screen::Search => render_search(state, &mut nodes),
            Screen::Detail(product) => render_detail(product, &mut nodes),
            Screen::Cart => render_cart(state, &mut nodes),
        }
        render_tab_bar(state, &mut nodes);
        nodes
    }
}

fn label(text: &str, frame: NodeFrame) -> SemanticsNode {
    SemanticsNode {
        text: Some(text.to_string()),
        frame: Some(frame),
        ..Default::default()
    }
}

fn button(text: &str, frame: NodeFrame) -> SemanticsNode {
    SemanticsNode {
        text: Some(text.to_string()),
        clickable: true,
        frame: Some(frame),
        ..Default::default()
    }
}

fn product_card(product: usize, frame: NodeFrame) -> SemanticsNode {
    let (name, price) = CATALOG[product];
    SemanticsNode {
        text: Some(name.to_string()),
        value: Some(price.to_string()),
        clickable: true,
        frame: Some(frame),
        ..Default::default()
    }
}

fn render_tab_bar(state: &StoreState, nodes: &mut Vec<(SemanticsNode, Option<TapAction>)>) {
    let tabs = [
        (strings::TAB_HOME, TapAction::GoHome),
        (strings::TAB_SEARCH, TapAction::GoSearch),
        (strings::TAB_CART, TapAction::GoCart),
    ];
    for (i, (text, action)) in tabs.into_iter().enumerate() {
        let frame = NodeFrame::new(i as f64 * TAB_W, TAB_BAR_Y, TAB_W, TAB_H);
        nodes.push((button(text, frame), Some(action)));
    }

    let count: u32 = state.cart.iter().map(|line| line.qty).sum();
    if count > 0 {
        let badge = SemanticsNode {
            text: Some(count.to_string()),
            role: Some(strings::BADGE_ROLE.to_string()),
            frame: Some(NodeFrame::new(352.0, 756.0, 24.0, 24.0)),
            ..Default::default()
        };
        nodes.push((badge, None));
    }
}

fn render_home(state: &StoreState, nodes: &mut Vec<(SemanticsNode, Option<TapAction>)>) {
    for (section, (title, section_y, products)) in SECTIONS.iter().enumerate() {
        let title_y = section_y - state.scroll_offset;
        nodes.push((
            label(title, NodeFrame::new(ROW_PAD, title_y, 300.0, TITLE_H)),
            None,
        ));

        let card_y = section_y + ROW_TOP - state.scroll_offset;
        for (slot, product) in products.iter().enumerate() {
            let card_x = ROW_PAD + slot as f64 * CARD_PITCH - state.row_offsets[section];
            let frame = NodeFrame::new(card_x, card_y, CARD_W, CARD_H);
            nodes.push((product_card(*product, frame), Some(TapAction::OpenDetail(*product))));
        }
    }
}

fn render_search(state: &StoreState, nodes: &mut Vec<(SemanticsNode, Option<TapAction>)>) {
    let field = SemanticsNode {
        text: None,
        value: Some(if state.query.is_empty() {
            strings::SEARCH_PLACEHOLDER.to_string()
        } else {
            state.query.clone()
        }),
        editable: true,
        clickable: true,
        frame: Some(NodeFrame::new(20.0, 60.0, 350.0, 48.0)),
        ..Default::default()
    };
    nodes.push((field, Some(TapAction::FocusSearch)));

    if state.query.is_empty() || state.results_pending > 0 {
        return;
    }

    let needle = state.query.to_lowercase();
    let matches: Vec<usize> = (0..CATALOG.len())
        .filter(|&p| CATALOG[p].0.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        nodes.push((
            label("No matches", NodeFrame::new(20.0, 140.0, 350.0, 40.0)),
            None,
        ));
        return;
    }

    for (row, product) in matches.into_iter().enumerate() {
        let frame = NodeFrame::new(20.0, 130.0 + row as f64 * 90.0, 350.0, 80.0);
        nodes.push((product_card(product, frame), Some(TapAction::OpenDetail(product))));
    }
}

fn render_detail(product: usize, nodes: &mut Vec<(SemanticsNode, Option<TapAction>)>) {
    let (name, price) = CATALOG[product];
    nodes.push((label(name, NodeFrame::new(20.0, 100.0, 350.0, 40.0)), None));
    nodes.push((label(price, NodeFrame::new(20.0, 160.0, 120.0, 30.0)), None));
    nodes.push((
        label(strings::DETAIL_TAGLINE, NodeFrame::new(20.0, 210.0, 350.0, 60.0)),
        None,
    ));
    nodes.push((
        label(
            strings::INGREDIENTS_HEADING,
            NodeFrame::new(20.0, 290.0, 200.0, 30.0),
        ),
        None,
    ));
    nodes.push((
        label(strings::INGREDIENTS_LIST, NodeFrame::new(20.0, 330.0, 350.0, 40.0)),
        None,
    ));
    nodes.push((
        button(strings::ADD_TO_CART, NodeFrame::new(20.0, 700.0, 350.0, 56.0)),
        Some(TapAction::AddToCart(product)),
    ));
}

fn render_cart(state: &StoreState, nodes: &mut Vec<(SemanticsNode, Option<TapAction>)>) {
    nodes.push((
        label(strings::CART_TITLE, NodeFrame::new(20.0, 60.0, 200.0, 40.0)),
        None,
    ));

    if state.cart.is_empty() {
        nodes.push((
            label(strings::CART_EMPTY, NodeFrame::new(20.0, 200.0, 350.0, 40.0)),
            None,
        ));
        return;
    }

    for (row, line) in state.cart.iter().enumerate() {
        let y = 120.0 + row as f64 * 90.0;
        let (name, price) = CATALOG[line.product];
        let item = SemanticsNode {
            text: Some(name.to_string()),
            value: Some(format!("{} x{}", price, line.qty)),
            frame: Some(NodeFrame::new(20.0, y, 240.0, 80.0)),
            ..Default::default()
        };
        nodes.push((item, None));
        nodes.push((
            button(strings::CART_REMOVE, NodeFrame::new(280.0, y + 20.0, 90.0, 40.0)),
            Some(TapAction::RemoveAt(row)),
        ));
    }
}

#[async_trait]
impl UiDriver for SimulatedStorefront {
    async fn connect(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    async fn dump_tree(&self) -> Result<Vec<SemanticsNode>, DriverError> {
        let mut state = self.lock();
        let nodes = SimulatedStorefront::render(&state)
            .into_iter()
            .map(|(node, _)| node)
            .collect();
        if state.screen == Screen::Search && state.results_pending > 0 {
            state.results_pending -= 1;
        }
        Ok(nodes)
    }

    async fn viewport(&self) -> Result<NodeFrame, DriverError> {
        Ok(NodeFrame::new(0.0, 0.0, VIEWPORT_W, VIEWPORT_H))
    }

    async fn tap(&self, point: Point) -> Result<(), DriverError> {
        let mut state = self.lock();
        let hit = SimulatedStorefront::render(&state)
            .into_iter()
            .rev()
            .find_map(|(node, action)| {
                let frame = node.frame?;
                if frame.contains(point) {
                    action
                } else {
                    None
                }
            });

        match hit {
            None => Ok(()),
            Some(action) => {
                debug!(?action, x = point.x, y = point.y, "tap");
                match action {
                    TapAction::GoHome => state.screen = Screen::Home,
                    TapAction::GoSearch => state.screen = Screen::Search,
                    TapAction::GoCart => state.screen = Screen::Cart,
                    TapAction::FocusSearch => state.field_focused = true,
                    TapAction::OpenDetail(product) => state.screen = Screen::Detail(product),
                    TapAction::AddToCart(product) => {
                        match state.cart.iter_mut().find(|line| line.product == product) {
                            Some(line) => line.qty += 1,
                            None => state.cart.push(CartLine { product, qty: 1 }),
                        }
                    }
                    TapAction::RemoveAt(row) => {
                        if row < state.cart.len() {
                            state.cart.remove(row);
                        }
                    }
                }
                Ok(())
            }
        }
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        let mut state = self.lock();
        if state.screen != Screen::Search || !state.field_focused {
            return Err(DriverError::CommandFailed(
                "no focused text input".to_string(),
            ));
        }
        state.query = text.to_string();
        state.results_pending = self.search_latency_dumps;
        Ok(())
    }

    async fn perform_swipe(&self, gesture: &SwipeGesture) -> Result<(), DriverError> {
        let mut state = self.lock();
        if state.screen != Screen::Home {
            return Ok(());
        }

        let (dx, dy) = gesture.delta();
        if gesture.is_horizontal() {
            // A horizontal drag moves the row whose card band contains the
            // gesture's start point.
            let content_y = gesture.start.y + state.scroll_offset;
            for (section, (_, section_y, _)) in SECTIONS.iter().enumerate() {
                let band = section_y + ROW_TOP..=section_y + ROW_TOP + CARD_H;
                if band.contains(&content_y) {
                    state.row_offsets[section] =
                        (state.row_offsets[section] - dx).clamp(0.0, ROW_MAX_SCROLL);
                    break;
                }
            }
        } else {
            state.scroll_offset = (state.scroll_offset - dy).clamp(0.0, MAX_SCROLL);
        }
        Ok(())
    }
}
