//! Reusable components

mod nav;
mod stat_card;
mod status_badge;

pub use nav::Nav;
pub use stat_card::StatCard;
pub use status_badge::{ErrorBanner, StatusBadge};
