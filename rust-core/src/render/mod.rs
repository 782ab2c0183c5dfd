//! Hand-off to an external spectrogram renderer
//!
//! The core never draws. It packages the matrix, the visible bin range and
//! the display normalization into a [`RenderRequest`] and passes it, with a
//! caller-supplied [`ColorMap`], to a [`Renderer`] the caller implements.

use crate::spectrum::spectrogram::Spectrogram;
use std::collections::HashMap;
use std::ops::Range;

/// 8-bit RGB triplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Maps a normalized magnitude in [0, 1] to a color
pub trait ColorMap {
    fn color(&self, value: f64) -> Rgb;
}

impl<F> ColorMap for F
where
    F: Fn(f64) -> Rgb,
{
    fn color(&self, value: f64) -> Rgb {
        self(value)
    }
}

/// Grayscale ramp, black at 0 and white at 1
#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl ColorMap for Grayscale {
    fn color(&self, value: f64) -> Rgb {
        let level = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(level, level, level)
    }
}

/// Named color maps owned by the caller
///
/// Lookup is explicit; there is no process-wide table.
#[derive(Default)]
pub struct ColorMapRegistry {
    maps: HashMap<String, Box<dyn ColorMap + Send + Sync>>,
}

impl ColorMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `map` under `name`, replacing any previous entry
    pub fn register<M>(&mut self, name: impl Into<String>, map: M)
    where
        M: ColorMap + Send + Sync + 'static,
    {
        self.maps.insert(name.into(), Box::new(map));
    }

    pub fn get(&self, name: &str) -> Option<&(dyn ColorMap + Send + Sync)> {
        self.maps.get(name).map(|m| m.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }
}

/// Map a dB value into [0, 1] for display
///
/// Values at or below -(gain + range) map to 0, values at or above -gain
/// map to 1.
#[inline]
pub fn normalize_db(db: f64, gain_db: f64, range_db: f64) -> f64 {
    ((db + gain_db) / range_db + 1.0).clamp(0.0, 1.0)
}

/// Everything a renderer needs for one spectrogram
pub struct RenderRequest<'a> {
    pub spectrogram: &'a Spectrogram,

    /// Bins to display, [i_min, i_max)
    pub bin_range: Range<usize>,

    pub gain_db: f64,
    pub range_db: f64,
    pub color_map: &'a dyn ColorMap,
}

impl<'a> RenderRequest<'a> {
    /// Normalized intensity at `(frame, bin)`
    ///
    /// Missing frames or bins read as the -100 dB fallback.
    pub fn intensity(&self, frame: usize, bin: usize) -> f64 {
        normalize_db(self.spectrogram.db_at(frame, bin), self.gain_db, self.range_db)
    }

    pub fn color_at(&self, frame: usize, bin: usize) -> Rgb {
        self.color_map.color(self.intensity(frame, bin))
    }

    pub fn num_frames(&self) -> usize {
        self.spectrogram.num_frames()
    }
}

/// Implemented by whatever owns the drawing surface
pub trait Renderer {
    type Output;

    fn render(&mut self, request: &RenderRequest<'_>) -> Self::Output;
}
