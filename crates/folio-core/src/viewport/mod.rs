//! Viewport-driven UI state engine
//!
//! - `metrics`: injectable geometry (`ViewportMetrics`, `ViewportSnapshot`)
//! - `observer`: visibility-crossing notifications
//! - `reveal`: one-shot entrance reveal
//! - `counter`: time-driven count-up for stats
//! - `spy`: active-section resolution
//! - `navigation`: scroll-spy plus smooth scroll-to-section

pub mod counter;
pub mod metrics;
pub mod navigation;
pub mod observer;
pub mod reveal;
pub mod spy;

pub use counter::{CounterAnimator, CounterState, StatCounter};
pub use metrics::{Bounds, ViewportMetrics, ViewportSnapshot};
pub use navigation::{NavigationController, SmoothScroll};
pub use observer::{Crossing, ViewportObserver, WatchId};
pub use reveal::{RevealController, RevealState};
pub use spy::{ActiveSectionResolver, Section};
