use crate::foundation::core::FrameSize;

/// Baseline edge used when the current frame is degenerate (zero-sized).
const FALLBACK_BASELINE: u32 = 1080;

/// Compute the frame size for a ratio preset, anchored on the larger edge
/// of the current frame.
///
/// The larger current edge becomes the larger edge of the new frame, so
/// switching presets never shrinks the working resolution: a landscape or
/// square ratio (`ratio_w >= ratio_h`) anchors the width, a portrait ratio
/// anchors the height, and the other edge is `round(baseline * ratio)`.
///
/// Ratios must be positive; callers pass the fixed preset set from
/// [`AspectRatio::ratio`](crate::AspectRatio::ratio).
pub fn resize_for_ratio(current: FrameSize, ratio_w: f64, ratio_h: f64) -> FrameSize {
    debug_assert!(ratio_w > 0.0 && ratio_h > 0.0);

    let baseline = match current.max_edge() {
        0 => FALLBACK_BASELINE,
        max => max,
    };
    let baseline_px = f64::from(baseline);

    if ratio_w >= ratio_h {
        FrameSize {
            width: baseline,
            height: (baseline_px * (ratio_h / ratio_w)).round() as u32,
        }
    } else {
        FrameSize {
            width: (baseline_px * (ratio_w / ratio_h)).round() as u32,
            height: baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::model::AspectRatio;

    fn frame(width: u32, height: u32) -> FrameSize {
        FrameSize { width, height }
    }

    #[test]
    fn landscape_anchors_width() {
        let (rw, rh) = AspectRatio::SixteenNine.ratio().unwrap();
        assert_eq!(
            resize_for_ratio(frame(1080, 1080), rw, rh),
            frame(1080, 608)
        );

        let (rw, rh) = AspectRatio::ThreeTwo.ratio().unwrap();
        assert_eq!(
            resize_for_ratio(frame(1920, 1080), rw, rh),
            frame(1920, 1280)
        );
    }

    #[test]
    fn portrait_anchors_height() {
        // The baseline is the larger *current* edge, whichever axis it is
        // on: 9:16 applied to 1080x608 keeps 1080 as the height.
        let (rw, rh) = AspectRatio::NineSixteen.ratio().unwrap();
        assert_eq!(resize_for_ratio(frame(1080, 608), rw, rh), frame(608, 1080));

        let (rw, rh) = AspectRatio::FourFive.ratio().unwrap();
        assert_eq!(
            resize_for_ratio(frame(1080, 1080), rw, rh),
            frame(864, 1080)
        );
    }

    #[test]
    fn square_keeps_baseline_on_both_edges() {
        let (rw, rh) = AspectRatio::Square.ratio().unwrap();
        assert_eq!(
            resize_for_ratio(frame(1080, 608), rw, rh),
            frame(1080, 1080)
        );
    }

    #[test]
    fn degenerate_current_falls_back_to_1080() {
        let (rw, rh) = AspectRatio::SixteenNine.ratio().unwrap();
        assert_eq!(resize_for_ratio(frame(0, 0), rw, rh), frame(1080, 608));
    }
}
