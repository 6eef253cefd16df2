use lottie_core::Fraction;
use std::path::Path;

const DISPLAY_WIDTH: u32 = 200;

/// React Native usage example for the cropped file.
///
/// The display height is the square display width scaled by the keep fraction,
/// so the view matches the new aspect ratio.
pub fn react_native_usage(output: &Path, keep: Fraction) -> String {
    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    let width = DISPLAY_WIDTH;
    let height =
        u64::from(width) * u64::from(keep.numerator()) / u64::from(keep.denominator());

    format!(
        r#"
import LottieView from 'lottie-react-native';

<LottieView
  source={{require('./assets/animations/{file_name}')}}
  autoPlay
  loop
  style={{{{ width: {width}, height: {height} }}}} // Height scaled to the cropped canvas
/>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_uses_output_name_and_scaled_height() {
        let snippet = react_native_usage(
            Path::new("out/assets/otro_oso_cropped.json"),
            Fraction::HALF,
        );
        assert!(snippet.contains("require('./assets/animations/otro_oso_cropped.json')"));
        assert!(snippet.contains("style={{ width: 200, height: 100 }}"));
        assert!(snippet.contains("import LottieView from 'lottie-react-native';"));
    }

    #[test]
    fn test_snippet_height_for_decimal_keep() {
        let snippet = react_native_usage(Path::new("a.json"), "0.6".parse().unwrap());
        assert!(snippet.contains("height: 120"));
    }
}
