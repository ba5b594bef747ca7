//! Random color sampling from named buckets.
//!
//! [`ColorSampler`] owns a hue table, a saturation/value table, and its
//! random source. Every lookup is validated before any randomness is drawn,
//! so a failed call leaves the random stream exactly where it was.
//!
//! # Draw order
//!
//! For [`ColorSampler::sample_color`]:
//!
//! 1. bucket pick (only when the hue is a cycle alias)
//! 2. hue
//! 3. saturation
//! 4. value
//!
//! Each axis consumes exactly one uniform `f64`, including fixed buckets
//! where `lo == hi`.
//!
//! # Hue resolution
//!
//! A cycle alias can be resolved once per frame (every cell in the frame
//! shares a hue family) or once per cell. [`ColorSampler::begin_frame`]
//! applies a [`HuePolicy`] and returns the bucket to sample for each cell
//! along with the tag that names the frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::bucket::{
    BucketRange, BucketTable, ColorAxis, default_hues, default_levels, is_cycle_alias,
};
use crate::error::ColorError;
use crate::hsv::{Hsv, Rgb};

/// How often a cycle alias is resolved to a concrete hue bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuePolicy {
    /// Resolve once per frame; the frame is tagged with the bucket name.
    #[default]
    PerFrame,
    /// Resolve for every cell; the frame is tagged with the alias.
    PerCell,
}

/// Hue choice for one frame, produced by [`ColorSampler::begin_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHue {
    /// Hue selection to pass to [`ColorSampler::sample_color`] per cell.
    pub bucket: String,
    /// Name used to tag the persisted frame.
    pub tag: String,
}

/// Samples colors from bucket tables with an owned random source.
#[derive(Debug, Clone)]
pub struct ColorSampler<R = StdRng> {
    hues: BucketTable,
    levels: BucketTable,
    rng: R,
}

impl ColorSampler<StdRng> {
    /// Sampler over the default tables with a seeded [`StdRng`].
    pub fn seeded(seed: u64) -> Self {
        Self::with_default_tables(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ColorSampler<R> {
    /// Sampler over custom tables.
    pub const fn new(hues: BucketTable, levels: BucketTable, rng: R) -> Self {
        Self { hues, levels, rng }
    }

    /// Sampler over the default tables.
    pub fn with_default_tables(rng: R) -> Self {
        Self::new(default_hues().clone(), default_levels().clone(), rng)
    }

    /// The hue table.
    pub const fn hues(&self) -> &BucketTable {
        &self.hues
    }

    /// The saturation/value table.
    pub const fn levels(&self) -> &BucketTable {
        &self.levels
    }

    /// Resolve a hue selection to a concrete bucket name.
    ///
    /// Cycle aliases pick a bucket uniformly at random; any other name must
    /// exist in the hue table and is returned as-is without drawing.
    pub fn resolve_hue(&mut self, selection: &str) -> Result<String, ColorError> {
        if !is_cycle_alias(selection) {
            return self
                .hue_range(selection)
                .map(|_range| selection.to_owned());
        }
        if self.hues.is_empty() {
            return Err(ColorError::EmptyTable {
                axis: ColorAxis::Hue,
            });
        }
        let index = self.rng.random_range(0..self.hues.len());
        self.hues
            .nth_name(index)
            .map(str::to_owned)
            .ok_or(ColorError::EmptyTable {
                axis: ColorAxis::Hue,
            })
    }

    /// Draw a hue uniformly from the named bucket (resolving cycle aliases
    /// first).
    pub fn sample_hue(&mut self, bucket: &str) -> Result<f64, ColorError> {
        let name = self.resolve_hue(bucket)?;
        let range = self.hue_range(&name)?;
        Ok(self.draw(range))
    }

    /// Draw an HSV triple from the named buckets.
    ///
    /// Saturation and value names are looked up in the shared
    /// saturation/value table. All names are validated before anything is
    /// drawn.
    pub fn sample_hsv(
        &mut self,
        hue: &str,
        saturation: &str,
        value: &str,
    ) -> Result<Hsv, ColorError> {
        let s_range = self.level_range(ColorAxis::Saturation, saturation)?;
        let v_range = self.level_range(ColorAxis::Value, value)?;
        if !is_cycle_alias(hue) {
            self.hue_range(hue)?;
        }

        let name = self.resolve_hue(hue)?;
        let h_range = self.hue_range(&name)?;
        let h = self.draw(h_range);
        let s = self.draw(s_range);
        let v = self.draw(v_range);
        Ok(Hsv { h, s, v })
    }

    /// Draw a color from the named buckets and convert it to RGB.
    pub fn sample_color(
        &mut self,
        hue: &str,
        saturation: &str,
        value: &str,
    ) -> Result<Rgb, ColorError> {
        self.sample_hsv(hue, saturation, value).map(Hsv::to_rgb)
    }

    /// Decide the hue selection for a frame under `policy`.
    ///
    /// With [`HuePolicy::PerFrame`] a cycle alias is resolved now and every
    /// cell samples the same bucket. With [`HuePolicy::PerCell`] the alias
    /// is kept and each [`sample_color`](Self::sample_color) call resolves
    /// it again. Named buckets behave the same under both policies.
    pub fn begin_frame(&mut self, hue: &str, policy: HuePolicy) -> Result<FrameHue, ColorError> {
        let bucket = match policy {
            HuePolicy::PerFrame => self.resolve_hue(hue)?,
            HuePolicy::PerCell => {
                if is_cycle_alias(hue) {
                    if self.hues.is_empty() {
                        return Err(ColorError::EmptyTable {
                            axis: ColorAxis::Hue,
                        });
                    }
                } else {
                    self.hue_range(hue)?;
                }
                hue.to_owned()
            }
        };
        debug!(selection = hue, bucket = bucket.as_str(), ?policy, "frame hue chosen");
        Ok(FrameHue {
            tag: bucket.clone(),
            bucket,
        })
    }

    fn hue_range(&self, name: &str) -> Result<BucketRange, ColorError> {
        self.hues.get(name).ok_or_else(|| ColorError::UnknownBucket {
            axis: ColorAxis::Hue,
            name: name.to_owned(),
        })
    }

    fn level_range(&self, axis: ColorAxis, name: &str) -> Result<BucketRange, ColorError> {
        self.levels
            .get(name)
            .ok_or_else(|| ColorError::UnknownBucket {
                axis,
                name: name.to_owned(),
            })
    }

    fn draw(&mut self, range: BucketRange) -> f64 {
        let t: f64 = self.rng.random();
        range.at(t)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn sample_hue_stays_in_bucket() {
        let mut sampler = ColorSampler::seeded(1);
        let cyan = default_hues().get("cyan").unwrap();
        for _ in 0..200 {
            let h = sampler.sample_hue("cyan").unwrap();
            assert!((cyan.lo()..=cyan.hi()).contains(&h), "hue {h} outside cyan");
        }
    }

    #[test]
    fn cycle_hue_lands_in_some_bucket() {
        let mut sampler = ColorSampler::seeded(2);
        let hues = default_hues();
        for _ in 0..200 {
            let h = sampler.sample_hue("cycle").unwrap();
            let inside = hues
                .names()
                .filter_map(|n| hues.get(n))
                .any(|r| (r.lo()..=r.hi()).contains(&h));
            assert!(inside, "hue {h} outside every bucket");
        }
    }

    #[test]
    fn resolve_cycle_visits_every_bucket() {
        let mut sampler = ColorSampler::seeded(3);
        let mut seen = BTreeSet::new();
        for _ in 0..500 {
            seen.insert(sampler.resolve_hue("random_options").unwrap());
        }
        assert_eq!(seen.len(), default_hues().len());
    }

    #[test]
    fn resolve_named_hue_is_identity() {
        let mut sampler = ColorSampler::seeded(4);
        assert_eq!(sampler.resolve_hue("pink").unwrap(), "pink");
    }

    #[test]
    fn fixed_value_bucket_is_constant() {
        let mut sampler = ColorSampler::seeded(5);
        for _ in 0..50 {
            let hsv = sampler.sample_hsv("cycle", "full", "0.7").unwrap();
            assert_eq!(hsv.v, 0.7);
            let rgb = sampler.sample_color("cyan", "top", "0.7").unwrap();
            assert_eq!(rgb.r.max(rgb.g).max(rgb.b), 178);
        }
    }

    #[test]
    fn same_seed_same_colors() {
        let mut a = ColorSampler::seeded(9);
        let mut b = ColorSampler::seeded(9);
        for _ in 0..20 {
            assert_eq!(
                a.sample_color("cycle", "narrow_upper", "upper").unwrap(),
                b.sample_color("cycle", "narrow_upper", "upper").unwrap()
            );
        }
    }

    #[test]
    fn unknown_bucket_consumes_no_randomness() {
        let mut probe = ColorSampler::seeded(11);
        let mut control = ColorSampler::seeded(11);

        assert_eq!(
            probe.sample_hue("red").unwrap_err(),
            ColorError::UnknownBucket {
                axis: ColorAxis::Hue,
                name: "red".to_owned(),
            }
        );
        assert!(matches!(
            probe.sample_color("cycle", "loud", "upper"),
            Err(ColorError::UnknownBucket {
                axis: ColorAxis::Saturation,
                ..
            })
        ));
        assert!(matches!(
            probe.sample_color("cycle", "upper", "loud"),
            Err(ColorError::UnknownBucket {
                axis: ColorAxis::Value,
                ..
            })
        ));
        assert!(matches!(
            probe.sample_color("mauve", "upper", "upper"),
            Err(ColorError::UnknownBucket {
                axis: ColorAxis::Hue,
                ..
            })
        ));

        assert_eq!(
            probe.sample_color("cycle", "upper", "upper").unwrap(),
            control.sample_color("cycle", "upper", "upper").unwrap()
        );
    }

    #[test]
    fn hue_names_are_not_level_names() {
        let mut sampler = ColorSampler::seeded(12);
        assert!(sampler.sample_color("cyan", "cyan", "upper").is_err());
        assert!(sampler.sample_hue("upper").is_err());
    }

    #[test]
    fn custom_tables_are_used() {
        let hues = BucketTable::from_entries([("only", 0.25, 0.25)]).unwrap();
        let levels = BucketTable::from_entries([("one", 1.0, 1.0)]).unwrap();
        let mut sampler = ColorSampler::new(hues, levels, StdRng::seed_from_u64(0));
        let hsv = sampler.sample_hsv("cycle", "one", "one").unwrap();
        assert_eq!(hsv, Hsv { h: 0.25, s: 1.0, v: 1.0 });
        assert!(sampler.sample_hue("cyan").is_err());
    }

    #[test]
    fn empty_hue_table_cannot_cycle() {
        let levels = default_levels().clone();
        let mut sampler =
            ColorSampler::new(BucketTable::default(), levels, StdRng::seed_from_u64(0));
        assert_eq!(
            sampler.resolve_hue("cycle").unwrap_err(),
            ColorError::EmptyTable {
                axis: ColorAxis::Hue
            }
        );
    }

    #[test]
    fn per_frame_resolves_once() {
        let mut sampler = ColorSampler::seeded(13);
        let frame = sampler.begin_frame("cycle", HuePolicy::PerFrame).unwrap();
        assert!(default_hues().contains(&frame.bucket));
        assert_eq!(frame.tag, frame.bucket);

        let range = default_hues().get(&frame.bucket).unwrap();
        for _ in 0..50 {
            let hsv = sampler.sample_hsv(&frame.bucket, "upper", "upper").unwrap();
            assert!((range.lo()..=range.hi()).contains(&hsv.h));
        }
    }

    #[test]
    fn per_cell_keeps_alias() {
        let mut sampler = ColorSampler::seeded(14);
        let frame = sampler.begin_frame("cycle", HuePolicy::PerCell).unwrap();
        assert_eq!(frame.bucket, "cycle");
        assert_eq!(frame.tag, "cycle");

        let named = sampler.begin_frame("pink", HuePolicy::PerCell).unwrap();
        assert_eq!(named.tag, "pink");
        assert!(sampler.begin_frame("teal", HuePolicy::PerCell).is_err());
    }

    #[test]
    fn policy_deserializes_snake_case() {
        let policy: Option<HuePolicy> = serde_json::from_str("\"per_cell\"").ok();
        assert_eq!(policy, Some(HuePolicy::PerCell));
        assert_eq!(HuePolicy::default(), HuePolicy::PerFrame);
    }
}
