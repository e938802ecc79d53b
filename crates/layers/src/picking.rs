use foundation::math::Vec2;
use render::ScreenPath;
use scene::FeatureId;

/// Screen-space hit test against displayed outlines.
///
/// Ordering contract:
/// - Outlines are tested in reverse paint order; the last-drawn outline that
///   contains `point` wins.
/// - Containment uses the even-odd rule, so holes do not hit.
/// - Empty (fully hidden) outlines never hit.
pub fn pick_feature<'a, I>(paths: I, point: Vec2) -> Option<FeatureId>
where
    I: DoubleEndedIterator<Item = &'a ScreenPath> + ExactSizeIterator,
{
    if !point.is_finite() {
        return None;
    }
    paths
        .enumerate()
        .rev()
        .find(|(_, path)| !path.is_empty() && path.bounds().contains(point) && path.contains(point))
        .map(|(idx, _)| FeatureId(idx as u32))
}
