pub mod harness;

mod test_cart;
mod test_home;
mod test_search;
