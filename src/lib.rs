//! CricHub
//!
//! Order and scoring state engines for the CricHub cricket equipment storefront: a cart with
//! promo codes and a checkout state machine, a wishlist, a persisted shop session, and a
//! ball-by-ball live match scoreboard.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
pub mod scoring;
pub mod session;
pub mod wishlist;
