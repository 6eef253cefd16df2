//! Canvas cropping.
//!
//! Cropping keeps the top part of the canvas: the root height shrinks to
//! `floor(h * keep)` and every layer position moves up by
//! `floor(h * shift)`, both computed from the height *before* cropping.

use crate::number::{scale_floor, subtract};
use crate::{CropError, Fraction};
use lottie_data::model::{Keyframe, LottieJson, PositionValue};
use serde_json::Number;

/// What to do when the document has no root `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingHeight {
    /// Leave the whole document untouched.
    #[default]
    Skip,
    /// Return [`CropError::MissingHeight`].
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropConfig {
    /// Share of the original height that remains.
    pub keep: Fraction,
    /// Share of the original height that positions move up by.
    pub shift: Fraction,
    /// Also shift the legacy keyframe end values (`e`).
    pub shift_end_values: bool,
    pub missing_height: MissingHeight,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            keep: Fraction::HALF,
            shift: Fraction::QUARTER,
            shift_end_values: false,
            missing_height: MissingHeight::Skip,
        }
    }
}

/// Result of [`crop_height`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeightChange {
    pub original: Number,
    pub cropped: Number,
    /// Amount subtracted from every vertical position.
    pub shift: Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftStats {
    pub layers: usize,
    pub static_positions: usize,
    pub keyframes: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CropReport {
    /// `None` when the document had no height and nothing was changed.
    pub height: Option<HeightChange>,
    pub shifted: ShiftStats,
}

/// Crops the root height in place.
pub fn crop_height(
    doc: &mut LottieJson,
    config: &CropConfig,
) -> Result<Option<HeightChange>, CropError> {
    let Some(original) = doc.h.clone() else {
        return match config.missing_height {
            MissingHeight::Skip => {
                tracing::warn!("Animation has no canvas height; leaving it untouched");
                Ok(None)
            }
            MissingHeight::Fail => Err(CropError::MissingHeight),
        };
    };

    let cropped = scale_floor(&original, config.keep)?;
    let shift = scale_floor(&original, config.shift)?;
    tracing::info!(
        "Cropping height {} -> {} (keep {}), shifting positions up by {}",
        original,
        cropped,
        config.keep,
        shift
    );
    doc.h = Some(cropped.clone());

    Ok(Some(HeightChange {
        original,
        cropped,
        shift,
    }))
}

/// Moves every layer position up by `amount`.
///
/// Static positions need at least two components; keyframes are only touched
/// when their value has at least two components. Layers without a full
/// `ks.p.k` chain are skipped.
pub fn shift_layers(
    doc: &mut LottieJson,
    amount: &Number,
    config: &CropConfig,
) -> Result<ShiftStats, CropError> {
    let mut stats = ShiftStats::default();
    let Some(layers) = doc.layers.as_mut() else {
        return Ok(stats);
    };

    for (index, layer) in layers.iter_mut().enumerate() {
        let name = layer.name().unwrap_or("<unnamed>").to_string();
        let Some(position) = layer.position_mut() else {
            continue;
        };

        match position {
            PositionValue::Static(values) => {
                if shift_y(values, amount)? {
                    stats.static_positions += 1;
                    stats.layers += 1;
                    tracing::debug!("Layer {} ({}): shifted static position", index, name);
                }
            }
            PositionValue::Animated(keyframes) => {
                let count = shift_keyframes(keyframes, amount, config.shift_end_values)?;
                if count > 0 {
                    stats.keyframes += count;
                    stats.layers += 1;
                    tracing::debug!("Layer {} ({}): shifted {} keyframes", index, name, count);
                }
            }
            PositionValue::Other(_) => {
                tracing::debug!("Layer {} ({}): unrecognised position value", index, name);
            }
        }
    }

    Ok(stats)
}

/// Crops the height and, if the document had one, shifts all layer positions.
pub fn crop_animation(doc: &mut LottieJson, config: &CropConfig) -> Result<CropReport, CropError> {
    crop_animation_with(doc, config, |_| Ok::<(), CropError>(()))
}

/// Like [`crop_animation`], calling `on_height` after the height is cropped
/// and before any layer is touched.
pub fn crop_animation_with<E, F>(
    doc: &mut LottieJson,
    config: &CropConfig,
    on_height: F,
) -> Result<CropReport, E>
where
    E: From<CropError>,
    F: FnOnce(&HeightChange) -> Result<(), E>,
{
    let Some(height) = crop_height(doc, config)? else {
        return Ok(CropReport::default());
    };
    on_height(&height)?;
    let shifted = shift_layers(doc, &height.shift, config)?;
    tracing::info!(
        "Shifted {} layers ({} static, {} keyframes) up by {}",
        shifted.layers,
        shifted.static_positions,
        shifted.keyframes,
        height.shift
    );
    Ok(CropReport {
        height: Some(height),
        shifted,
    })
}

fn shift_keyframes(
    keyframes: &mut [Keyframe],
    amount: &Number,
    include_end: bool,
) -> Result<usize, CropError> {
    let mut count = 0;
    for keyframe in keyframes {
        let mut touched = false;
        if let Some(start) = keyframe.s.as_mut() {
            touched |= shift_y(start, amount)?;
        }
        if include_end {
            if let Some(end) = keyframe.e.as_mut() {
                touched |= shift_y(end, amount)?;
            }
        }
        if touched {
            count += 1;
        }
    }
    Ok(count)
}

fn shift_y(values: &mut [Number], amount: &Number) -> Result<bool, CropError> {
    match values.get_mut(1) {
        Some(y) => {
            *y = subtract(y, amount)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> LottieJson {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_crop_height_reports_original_and_shift() {
        let mut lottie = doc(json!({ "h": 512 }));
        let change = crop_height(&mut lottie, &CropConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(change.original, Number::from(512));
        assert_eq!(change.cropped, Number::from(256));
        assert_eq!(change.shift, Number::from(128));
        assert_eq!(lottie.h, Some(Number::from(256)));
    }

    #[test]
    fn test_missing_height_skip_and_fail() {
        let mut lottie = doc(json!({ "layers": [] }));
        assert_eq!(crop_height(&mut lottie, &CropConfig::default()).unwrap(), None);

        let strict = CropConfig {
            missing_height: MissingHeight::Fail,
            ..CropConfig::default()
        };
        assert!(matches!(
            crop_height(&mut lottie, &strict),
            Err(CropError::MissingHeight)
        ));
    }

    #[test]
    fn test_shift_layers_counts() {
        let mut lottie = doc(json!({
            "layers": [
                { "ks": { "p": { "k": [1, 2] } } },
                { "ks": { "p": { "k": [1] } } },
                { "ks": { "p": { "k": [{ "t": 0, "s": [0, 10] }, { "t": 5, "s": [0, 20] }, { "t": 9 }] } } },
                { "nm": "no transform" }
            ]
        }));
        let stats = shift_layers(&mut lottie, &Number::from(5), &CropConfig::default()).unwrap();
        assert_eq!(
            stats,
            ShiftStats {
                layers: 2,
                static_positions: 1,
                keyframes: 2,
            }
        );
    }

    #[test]
    fn test_end_values_shift_only_when_enabled() {
        let source = json!({
            "h": 100,
            "layers": [{ "ks": { "p": { "k": [{ "t": 0, "s": [0, 50], "e": [0, 80] }] } } }]
        });

        let mut plain = doc(source.clone());
        crop_animation(&mut plain, &CropConfig::default()).unwrap();
        let out = serde_json::to_value(&plain).unwrap();
        assert_eq!(out["layers"][0]["ks"]["p"]["k"][0]["s"], json!([0, 25]));
        assert_eq!(out["layers"][0]["ks"]["p"]["k"][0]["e"], json!([0, 80]));

        let mut with_end = doc(source);
        let config = CropConfig {
            shift_end_values: true,
            ..CropConfig::default()
        };
        crop_animation(&mut with_end, &config).unwrap();
        let out = serde_json::to_value(&with_end).unwrap();
        assert_eq!(out["layers"][0]["ks"]["p"]["k"][0]["e"], json!([0, 55]));
    }

    #[test]
    fn test_custom_fractions() {
        let mut lottie = doc(json!({
            "h": 500,
            "layers": [{ "ks": { "p": { "k": [250, 250] } } }]
        }));
        let config = CropConfig {
            keep: "0.6".parse().unwrap(),
            shift: "0.2".parse().unwrap(),
            ..CropConfig::default()
        };
        let report = crop_animation(&mut lottie, &config).unwrap();
        assert_eq!(report.height.unwrap().cropped, Number::from(300));
        assert_eq!(
            serde_json::to_value(&lottie).unwrap()["layers"][0]["ks"]["p"]["k"],
            json!([250, 150])
        );
    }

    #[test]
    fn test_height_hook_runs_before_layers_are_shifted() {
        let mut lottie = doc(json!({
            "h": 800,
            "layers": [{ "ks": { "p": { "k": [100, 400] } } }]
        }));
        let mut seen = None;
        let report = crop_animation_with(&mut lottie, &CropConfig::default(), |change| {
            seen = Some((change.original.clone(), change.cropped.clone()));
            Ok::<(), CropError>(())
        })
        .unwrap();
        assert_eq!(seen, Some((Number::from(800), Number::from(400))));
        assert_eq!(report.shifted.static_positions, 1);
    }

    #[test]
    fn test_height_hook_error_stops_before_layers() {
        let mut lottie = doc(json!({
            "h": 800,
            "layers": [{ "ks": { "p": { "k": [100, 400] } } }]
        }));
        let result = crop_animation_with(&mut lottie, &CropConfig::default(), |_| {
            Err(CropError::MissingHeight)
        });
        assert!(result.is_err());
        assert_eq!(
            serde_json::to_value(&lottie).unwrap()["layers"][0]["ks"]["p"]["k"],
            json!([100, 400])
        );
    }

    #[test]
    fn test_hook_not_called_without_height() {
        let mut lottie = doc(json!({ "w": 1 }));
        let mut called = false;
        crop_animation_with(&mut lottie, &CropConfig::default(), |_| {
            called = true;
            Ok::<(), CropError>(())
        })
        .unwrap();
        assert!(!called);
    }
}
