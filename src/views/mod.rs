//! The views module contains the page components for every route of the dashboard, plus the
//! layout that wraps them.
//!
//! [`Dashboard`] is the catch-all route page. Its [`RouteOutlet`] is the rendering host: it asks
//! the navigator for the view behind the current location and renders [`Home`], [`SensorPage`] and the other pages once loaded.
//!
//! The [`Navbar`] component will be rendered on all pages of our app since every page is under the layout.

mod home;
pub use home::Home;

mod sensor;
pub use sensor::SensorPage;

mod settings;
pub use settings::SettingsPage;

mod webcam;
pub use webcam::WebcamPage;

mod fallback;
pub use fallback::{LoadFailed, NotFoundPage};

mod outlet;
pub use outlet::{Dashboard, RouteOutlet};

mod navbar;
pub use navbar::Navbar;
