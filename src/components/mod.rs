//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to defined common UI elements like buttons, forms, and modals.

mod freshness;
pub use freshness::ReadingAge;

mod nav_link;
pub use nav_link::NavLink;

mod reading;
pub use reading::ReadingCard;

mod sparkline;
pub use sparkline::{HistoryPoint, Sparkline};
