//! The asset catalog: every named sound the game can request, mapped to
//! its generation parameters.
//!
//! Names are dotted (`music.beach`, `sfx.eat`, `ambient.hum`) and map 1:1
//! to file names in the asset directory. Music tempo presets follow the
//! zones: faster and brighter in the shallows, slower and heavier toward
//! the rig.

use serde::Serialize;

use seaturtle_audio::{AmbientKind, AmbientParams, BeepParams, BeepShape, TrackParams, SAMPLE_RATE};

/// Generation parameters for one named asset.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetSpec {
    /// A full background track.
    Track(TrackParams),
    /// A short beep cue.
    Effect(BeepParams),
    /// A looping ambient bed.
    Ambient(AmbientParams),
}

/// A named catalog entry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CatalogEntry {
    /// Dotted asset name, e.g. `music.beach`.
    pub name: &'static str,
    /// How to synthesize it.
    pub spec: AssetSpec,
}

/// The game's environment zones, shallowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Beach shallows.
    BeachShallows,
    /// Coral cove.
    CoralCove,
    /// Rocky reef.
    RockyReef,
    /// Ocean floor.
    OceanFloor,
    /// Oil rig.
    OilRig,
}

/// Music track for an environment zone.
pub fn environment_track(env: Environment) -> &'static str {
    match env {
        Environment::BeachShallows => "music.beach",
        Environment::CoralCove => "music.coral",
        Environment::RockyReef => "music.reef",
        Environment::OceanFloor => "music.ocean",
        Environment::OilRig => "music.rig",
    }
}

fn music(tempo_bpm: f64) -> AssetSpec {
    AssetSpec::Track(TrackParams {
        tempo_bpm,
        bars: 16,
        sample_rate: SAMPLE_RATE,
        stereo: true,
    })
}

fn effect(frequency: f64, duration_ms: u32, shape: BeepShape) -> AssetSpec {
    AssetSpec::Effect(BeepParams {
        frequency,
        duration_ms,
        shape,
        volume: 0.3,
    })
}

fn ambient(kind: AmbientKind, duration_seconds: f64, volume: f64) -> AssetSpec {
    AssetSpec::Ambient(AmbientParams {
        kind,
        duration_seconds,
        volume,
    })
}

/// The full built-in asset set.
pub fn default_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry { name: "music.beach", spec: music(118.0) },
        CatalogEntry { name: "music.coral", spec: music(104.0) },
        CatalogEntry { name: "music.reef", spec: music(96.0) },
        CatalogEntry { name: "music.ocean", spec: music(84.0) },
        CatalogEntry { name: "music.rig", spec: music(72.0) },
        CatalogEntry { name: "sfx.eat", spec: effect(523.0, 100, BeepShape::Sine) },
        CatalogEntry { name: "sfx.hurt", spec: effect(110.0, 300, BeepShape::Saw) },
        CatalogEntry { name: "sfx.dash", spec: effect(293.0, 150, BeepShape::Saw) },
        CatalogEntry { name: "sfx.powerup", spec: effect(440.0, 500, BeepShape::Powerup) },
        CatalogEntry { name: "ambient.waves", spec: ambient(AmbientKind::Waves, 8.0, 0.4) },
        CatalogEntry { name: "ambient.gulls", spec: ambient(AmbientKind::Gulls, 10.0, 0.35) },
        CatalogEntry { name: "ambient.hum", spec: ambient(AmbientKind::Hum, 6.0, 0.3) },
    ]
}

/// File name for an asset within the asset directory.
pub fn file_name(asset_name: &str) -> String {
    format!("{}.wav", asset_name.replace('.', "_"))
}
