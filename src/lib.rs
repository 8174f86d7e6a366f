// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive fruit panorama: textured fruit spheres arranged as a grape
//! bunch, cherries, an apple branch, a fruit bowl or a custom layout, viewed
//! through an orbiting camera that can fly into any fruit and back out.
//!
//! The crate is the interaction core. It turns mouse and touch input into
//! orbit rotation, zoom and picking, runs the animated focus transitions,
//! and hands each frame to a host-supplied renderer. Drawing, texture
//! fetching and on-screen widgets stay with the host.
//!
//! # Key entry points
//!
//! - [`engine::FruitPanorama`] - the viewer instance
//! - [`options::Options`] - configuration, loadable from TOML
//! - [`scene::Arrangement`] - the fruit layouts
//! - [`engine::FrameRenderer`] - the renderer seam
//!
//! # Frame loop
//!
//! ```ignore
//! let mut panorama = FruitPanorama::new(options, width, height)?;
//! panorama.handle_input(event);          // any number of times
//! panorama.tick(Instant::now(), &mut renderer);
//! ```
//!
//! Input handlers only record state. Everything that depends on time
//! (focus transitions, wheel zoom bursts, auto-rotation) advances inside
//! [`tick`](engine::FruitPanorama::tick), so one clock drives the whole
//! panorama.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod focus;
pub mod input;
pub mod loading;
pub mod options;
pub mod picking;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::FruitPanorama;
pub use error::PanoramaError;
pub use options::Options;
