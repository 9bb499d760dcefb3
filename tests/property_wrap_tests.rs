use chart_axis_labels::core::{
    EstimatingTextMeasurer, FontSpec, estimate_block_size, measure, wrap_to_fit,
};
use proptest::prelude::*;

fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9]{1,10}", 1..10)
}

proptest! {
    #[test]
    fn wrapping_only_replaces_spaces_with_breaks(
        words in words(),
        max_extent in 0.0f64..400.0,
        size_px in 8.0f64..24.0
    ) {
        let text = words.join(" ");
        let font = FontSpec::new(size_px, "sans-serif");
        let wrapped = wrap_to_fit(&text, max_extent, &font, &mut EstimatingTextMeasurer);

        prop_assert_eq!(wrapped.replace('\n', " "), text);
        prop_assert!(wrapped.split('\n').count() <= words.len());
    }

    #[test]
    fn widest_line_fits_or_cannot_be_broken(
        words in words(),
        max_extent in 0.0f64..400.0
    ) {
        let text = words.join(" ");
        let font = FontSpec::new(14.0, "sans-serif");
        let wrapped = wrap_to_fit(&text, max_extent, &font, &mut EstimatingTextMeasurer);
        let measured = measure(&wrapped, &font, &mut EstimatingTextMeasurer);

        prop_assert!(
            measured.widest_width <= max_extent || !measured.widest_line().contains(' '),
            "{:?} exceeds {}", wrapped, max_extent
        );
    }

    #[test]
    fn fitting_text_is_left_untouched(words in words()) {
        let text = words.join(" ");
        let font = FontSpec::new(14.0, "sans-serif");
        let width = EstimatingTextMeasurer::estimate(&text, 14.0);
        let wrapped = wrap_to_fit(&text, width + 1.0, &font, &mut EstimatingTextMeasurer);
        prop_assert_eq!(wrapped, text);
    }

    #[test]
    fn block_size_grows_with_line_count(
        lines in 1usize..8,
        size_px in 6.0f64..40.0,
        line_padding in 0.0f64..10.0,
        padding in 0.0f64..10.0
    ) {
        let fewer = estimate_block_size(lines, size_px, line_padding, padding, true);
        let more = estimate_block_size(lines + 1, size_px, line_padding, padding, true);
        prop_assert!(more.width > fewer.width);
        prop_assert_eq!(fewer.height, 0.0);

        let horizontal = estimate_block_size(lines, size_px, line_padding, padding, false);
        prop_assert_eq!(horizontal.width, 0.0);
        prop_assert!((horizontal.height - fewer.width).abs() <= 1e-9);
    }
}
