//! Smooth scrolling for the portfolio page
//!
//! - `easing`: pure easing curves, shared with the entrance transitions
//! - `timing`: progress and interpolation helpers
//! - `config`: `ScrollConfig` helpers
//! - `animation`: `ScrollAnimator`, the page's `SmoothScroll` implementation
//!
//! ```ignore
//! let mut animator = ScrollAnimator::new(config.ui.scroll.clone());
//! animator.set_max_scroll(page.max_scroll(viewport_height));
//!
//! // keys
//! animator.scroll_by(1);
//! // nav
//! nav.go_to("about", &snapshot, &mut animator);
//!
//! // every frame
//! let offset = animator.update(Instant::now());
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
