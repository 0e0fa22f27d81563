//! The audio library: generate-if-missing caching plus playback control.
//!
//! Assets are rendered once on first run and reused from disk afterwards.
//! Generation is synchronous and CPU-bound; it happens before gameplay
//! starts, never interleaved with the render loop. Playback commands are
//! fire-and-forget: a missing channel or device drops the cue silently.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use rodio::Sink;
use tracing::{debug, info, warn};

use seaturtle_audio::rng::create_keyed_rng;
use seaturtle_audio::{ambient, beep, track, WavWriter, SAMPLE_RATE};

use crate::catalog::{self, AssetSpec, CatalogEntry};
use crate::error::{AssetError, AssetResult};
use crate::playback::{fade_out_and_drop, Playback};

/// Base seed for per-asset noise stream derivation.
const BASE_SEED: u32 = 0x5EA7;
/// Volume for looping ambient beds.
const AMBIENT_VOLUME: f32 = 0.6;

/// Orchestrates asset generation, the on-disk cache, and playback.
///
/// One instance per process, owned by the game loop. Effect byte buffers
/// are cached in memory on first use and never invalidated during a run.
pub struct AudioLibrary {
    asset_dir: PathBuf,
    catalog: Vec<CatalogEntry>,
    playback: Option<Playback>,
    effect_cache: HashMap<String, Arc<Vec<u8>>>,
    music: Option<Sink>,
    ambient_sinks: HashMap<String, Sink>,
    music_volume: f32,
}

impl AudioLibrary {
    /// Creates a library that plays through the default output device.
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self::with_playback(asset_dir, Playback::open())
    }

    /// Creates a library with playback disabled. Generation and caching
    /// work as usual; every play call is a no-op. Used by batch tools and
    /// tests.
    pub fn headless(asset_dir: impl Into<PathBuf>) -> Self {
        Self::with_playback(asset_dir, None)
    }

    fn with_playback(asset_dir: impl Into<PathBuf>, playback: Option<Playback>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            catalog: catalog::default_catalog(),
            playback,
            effect_cache: HashMap::new(),
            music: None,
            ambient_sinks: HashMap::new(),
            music_volume: 0.8,
        }
    }

    /// The catalog entries this library can generate.
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Path an asset will be written to.
    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.asset_dir.join(catalog::file_name(name))
    }

    /// Synthesizes the named asset if its file does not exist yet, and
    /// returns the file path. A second call is a no-op once the file is in
    /// place. The file is written to completion or not at all: rendering
    /// goes to a temp file that is atomically renamed into place, so a
    /// failed write leaves nothing behind and the next call retries.
    pub fn ensure_generated(&self, name: &str) -> AssetResult<PathBuf> {
        let spec = self
            .catalog
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.spec)
            .ok_or_else(|| AssetError::unknown_asset(name))?;

        let path = self.asset_path(name);
        if path.exists() {
            debug!(name, path = %path.display(), "asset already cached");
            return Ok(path);
        }

        std::fs::create_dir_all(&self.asset_dir)?;

        let wav = render_asset(name, &spec)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.asset_dir)?;
        tmp.write_all(&wav)?;
        tmp.persist(&path).map_err(|err| AssetError::Io(err.error))?;

        info!(name, path = %path.display(), bytes = wav.len(), "asset generated");
        Ok(path)
    }

    /// Generates every catalog asset that is missing. Returns the paths in
    /// catalog order.
    pub fn ensure_all(&self) -> AssetResult<Vec<PathBuf>> {
        self.catalog
            .iter()
            .map(|entry| self.ensure_generated(entry.name))
            .collect()
    }

    /// Plays a short cue on any idle effect channel. Fire-and-forget: a
    /// busy pool, missing device, or failed load drops the cue silently.
    pub fn play_effect(&mut self, name: &str) {
        let Some(bytes) = self.effect_bytes(name) else {
            return;
        };
        if let Some(playback) = &self.playback {
            playback.play_effect_buffer(name, &bytes);
        }
    }

    /// Starts looped (or one-shot) streaming playback of a track, fading
    /// in over `fade_ms` while the previous track fades out.
    pub fn play_track(&mut self, name: &str, looped: bool, fade_ms: u64) {
        let path = match self.ensure_generated(name) {
            Ok(p) => p,
            Err(err) => {
                warn!(name, %err, "track unavailable; playback skipped");
                return;
            }
        };

        let Some(playback) = &self.playback else {
            return;
        };
        let next = playback.start_stream(&path, looped, fade_ms, self.music_volume);

        if let Some(previous) = self.music.take() {
            fade_out_and_drop(previous, fade_ms);
        }
        self.music = next;
    }

    /// Fades out ambience loops not in `desired` and fades in newly
    /// desired ones. The active set persists for the whole run.
    pub fn set_ambient_mix(&mut self, desired: &[&str], fade_ms: u64) {
        let dropped: Vec<String> = self
            .ambient_sinks
            .keys()
            .filter(|active| !desired.contains(&active.as_str()))
            .cloned()
            .collect();
        for name in dropped {
            if let Some(sink) = self.ambient_sinks.remove(&name) {
                debug!(name, "ambience fading out");
                fade_out_and_drop(sink, fade_ms);
            }
        }

        for &name in desired {
            if self.ambient_sinks.contains_key(name) {
                continue;
            }
            let path = match self.ensure_generated(name) {
                Ok(p) => p,
                Err(err) => {
                    warn!(name, %err, "ambience unavailable; skipped");
                    continue;
                }
            };
            let Some(playback) = &self.playback else {
                continue;
            };
            if let Some(sink) = playback.start_stream(&path, true, fade_ms, AMBIENT_VOLUME) {
                debug!(name, "ambience fading in");
                self.ambient_sinks.insert(name.to_string(), sink);
            }
        }
    }

    /// Sets the music volume (clamped to [0, 1]), applied to the current
    /// track and all future ones.
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        if let Some(music) = &self.music {
            music.set_volume(self.music_volume);
        }
    }

    /// Current music volume.
    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    /// Names of the currently active ambience loops.
    pub fn active_ambience(&self) -> Vec<&str> {
        self.ambient_sinks.keys().map(String::as_str).collect()
    }

    fn effect_bytes(&mut self, name: &str) -> Option<Arc<Vec<u8>>> {
        if let Some(bytes) = self.effect_cache.get(name) {
            return Some(Arc::clone(bytes));
        }

        let path = match self.ensure_generated(name) {
            Ok(p) => p,
            Err(err) => {
                warn!(name, %err, "effect unavailable; cue dropped");
                return None;
            }
        };
        match std::fs::read(&path) {
            Ok(data) => {
                let bytes = Arc::new(data);
                self.effect_cache.insert(name.to_string(), Arc::clone(&bytes));
                Some(bytes)
            }
            Err(err) => {
                warn!(name, %err, "effect file unreadable; cue dropped");
                None
            }
        }
    }
}

/// Renders one asset to complete WAV bytes, with its own seeded noise
/// stream so output is deterministic per name.
fn render_asset(name: &str, spec: &AssetSpec) -> AssetResult<Vec<u8>> {
    let mut rng = create_keyed_rng(BASE_SEED, name);
    let wav = match spec {
        AssetSpec::Track(params) => track::render_track(params, &mut rng)?.to_wav(params.sample_rate),
        AssetSpec::Effect(params) => {
            WavWriter::mono(SAMPLE_RATE).write_mono(&beep::render(params, SAMPLE_RATE))
        }
        AssetSpec::Ambient(params) => {
            WavWriter::mono(SAMPLE_RATE).write_mono(&ambient::render(params, SAMPLE_RATE, &mut rng))
        }
    };
    Ok(wav)
}
