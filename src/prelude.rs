//! CricHub prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::{ALL_CATEGORIES, Catalog, CatalogError},
    checkout::{CheckoutError, CheckoutForm, CheckoutPhase, PaymentMethod},
    persistence::{FileStore, MemoryStore, SnapshotStore, StoreError},
    pricing::{format_money, format_price},
    products::{Product, ProductId, ProductRecord},
    promotions::{PromoBook, PromoCode, PromoOutcome, SAVE10},
    receipt::{OrderConfirmation, ReceiptError},
    scoring::{
        Delivery, ExtraKind, LiveMatch, MatchDetails, Overs, Scoreboard, ScoringError,
        feed::{FeedError, FileSource, LiveScores, MatchSummary, ScoresSource},
    },
    session::{PersistenceWarning, SessionError, ShopSession},
    wishlist::Wishlist,
};
