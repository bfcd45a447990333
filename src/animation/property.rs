use bitflags::bitflags;

/// A style property that a timeline can animate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    /// Horizontal translation in pixels
    X,
    /// Vertical translation in pixels
    Y,
    /// Horizontal translation as a percentage of the element's width
    XPercent,
    /// Vertical translation as a percentage of the element's height
    YPercent,
    Scale,
    /// Filter string such as `blur(20px)`
    Filter,
    /// Clip path string such as `inset(100% 0% 0% 0%)`
    ClipPath,
    /// Maximum width in pixels
    MaxWidth,
    /// Corner radius string such as `12px`
    BorderRadius,
}

bitflags! {
    /// Set of properties touched by a timeline
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct PropertySet: u16 {
        const OPACITY       = 1 << 0;
        const X             = 1 << 1;
        const Y             = 1 << 2;
        const X_PERCENT     = 1 << 3;
        const Y_PERCENT     = 1 << 4;
        const SCALE         = 1 << 5;
        const FILTER        = 1 << 6;
        const CLIP_PATH     = 1 << 7;
        const MAX_WIDTH     = 1 << 8;
        const BORDER_RADIUS = 1 << 9;
        /// Properties that move or resize the element without changing layout
        const TRANSFORM = Self::X.bits() | Self::Y.bits() | Self::X_PERCENT.bits()
            | Self::Y_PERCENT.bits() | Self::SCALE.bits();
    }
}

impl Property {
    pub const ALL: [Property; 10] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::YPercent,
        Property::Scale,
        Property::Filter,
        Property::ClipPath,
        Property::MaxWidth,
        Property::BorderRadius,
    ];

    /// The flag for this property in a [`PropertySet`]
    pub fn flag(self) -> PropertySet {
        match self {
            Property::Opacity => PropertySet::OPACITY,
            Property::X => PropertySet::X,
            Property::Y => PropertySet::Y,
            Property::XPercent => PropertySet::X_PERCENT,
            Property::YPercent => PropertySet::Y_PERCENT,
            Property::Scale => PropertySet::SCALE,
            Property::Filter => PropertySet::FILTER,
            Property::ClipPath => PropertySet::CLIP_PATH,
            Property::MaxWidth => PropertySet::MAX_WIDTH,
            Property::BorderRadius => PropertySet::BORDER_RADIUS,
        }
    }

    /// Style name of the property, as written in view code
    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::XPercent => "xPercent",
            Property::YPercent => "yPercent",
            Property::Scale => "scale",
            Property::Filter => "filter",
            Property::ClipPath => "clipPath",
            Property::MaxWidth => "maxWidth",
            Property::BorderRadius => "borderRadius",
        }
    }
}

impl PropertySet {
    /// Iterate the properties contained in this set
    pub fn properties(self) -> impl Iterator<Item = Property> {
        Property::ALL
            .into_iter()
            .filter(move |p| self.contains(p.flag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_distinct() {
        let mut seen = PropertySet::empty();
        for property in Property::ALL {
            assert!(!seen.intersects(property.flag()), "{:?}", property);
            seen |= property.flag();
        }
    }

    #[test]
    fn test_transform_group() {
        let set = PropertySet::TRANSFORM;
        assert!(set.contains(PropertySet::Y));
        assert!(set.contains(PropertySet::SCALE));
        assert!(!set.contains(PropertySet::OPACITY));
        assert_eq!(set.properties().count(), 5);
    }
}
