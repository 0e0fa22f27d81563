//! Sea Turtle Echo asset library.
//!
//! The boundary between the synthesis core and the game loop. The game
//! asks for sounds by name; this crate knows how to synthesize each one
//! (via `seaturtle-audio`), caches the rendered WAV files on disk, and
//! drives fire-and-forget playback through rodio.
//!
//! # Lifecycle
//!
//! On first run, [`AudioLibrary::ensure_all`] renders every catalog asset
//! to the asset directory. Subsequent runs find the files in place and
//! skip synthesis entirely. Playback never interrupts gameplay: a missing
//! output device, busy channel pool, or unreadable file drops the cue and
//! logs at warn level.

pub mod catalog;
pub mod error;
pub mod library;
mod playback;

// Re-export main types at crate root
pub use catalog::{default_catalog, environment_track, AssetSpec, CatalogEntry, Environment};
pub use error::{AssetError, AssetResult};
pub use library::AudioLibrary;
