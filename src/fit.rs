//! Aspect-ratio fitting of content into a container.
//!
//! Computes the edge offsets that place a piece of content (an image, a
//! sprite) inside its container under a [`FitMode`]. Pure geometry — no
//! rendering, no allocations, `no_std` compatible.
//!
//! Offsets are relative to a rect that is stretched to the container: a zero
//! offset means the edge is flush with the container edge. The axis that needs
//! letterboxing (Contain) or overflow (Cover) gets a non-zero adjustment that
//! is split between its two edges according to the [`Pivot`].
//!
//! # Example
//!
//! ```
//! use lunekit::{AspectFitter, FitMode, Size};
//!
//! let rect = AspectFitter::new(FitMode::Contain)
//!     .compute(Size::new(100.0, 50.0), Size::new(200.0, 200.0))
//!     .unwrap();
//!
//! // 2:1 content in a square: width constrains, 50px bars top and bottom.
//! let bounds = rect.bounds(Size::new(200.0, 200.0));
//! assert_eq!((bounds.width, bounds.height), (200.0, 100.0));
//! assert_eq!(bounds.y, 50.0);
//! ```

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

/// How content is fitted into its container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FitMode {
    /// Fill the container on both axes, distorting aspect ratio.
    #[default]
    Stretch,

    /// Scale uniformly to fit entirely inside the container.
    /// Touches the container on the constraining axis, letterboxes the other.
    Contain,

    /// Scale uniformly to cover the whole container.
    /// Touches the container on the constraining axis, overflows the other.
    Cover,
}

impl FitMode {
    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stretch => "stretch",
            Self::Contain => "contain",
            Self::Cover => "cover",
        }
    }

    /// Whether the mode keeps the content's aspect ratio.
    pub const fn preserves_aspect(self) -> bool {
        !matches!(self, Self::Stretch)
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitMode {
    type Err = FitError;

    /// Accepts `stretch`, `contain`/`inside`, `cover`/`outside`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NAMES: [(&str, FitMode); 5] = [
            ("stretch", FitMode::Stretch),
            ("contain", FitMode::Contain),
            ("inside", FitMode::Contain),
            ("cover", FitMode::Cover),
            ("outside", FitMode::Cover),
        ];
        let s = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, mode)| mode)
            .ok_or(FitError::UnknownMode)
    }
}

/// A layout axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Left-right.
    Horizontal,
    /// Bottom-top.
    Vertical,
}

/// Width × height extent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<T = f32> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    /// Create a new size.
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}

impl<T: Float> Size<T> {
    /// Pixel size of an asset measured in world units.
    ///
    /// A sprite whose bounds are `2 × 1` units at `100` pixels per unit
    /// has a natural size of `200 × 100`.
    pub fn from_units(width: T, height: T, pixels_per_unit: T) -> Self {
        Self {
            width: width * pixels_per_unit,
            height: height * pixels_per_unit,
        }
    }

    /// Whether either dimension is zero, negative or NaN.
    pub fn is_empty(&self) -> bool {
        !(self.width > T::zero() && self.height > T::zero())
    }
}

/// Normalized anchor point. Both components lie in `0.0..=1.0`.
///
/// `(0, 0)` is the min corner, `(1, 1)` the max corner. When an axis is
/// adjusted, the pivot stays fixed and the edges move around it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "PivotRepr<T>",
        bound(deserialize = "T: Float + serde::Deserialize<'de>")
    )
)]
pub struct Pivot<T = f32> {
    x: T,
    y: T,
}

/// Unchecked wire form of [`Pivot`]; deserialization goes through [`Pivot::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PivotRepr<T> {
    x: T,
    y: T,
}

#[cfg(feature = "serde")]
impl<T: Float> TryFrom<PivotRepr<T>> for Pivot<T> {
    type Error = FitError;

    fn try_from(repr: PivotRepr<T>) -> Result<Self, FitError> {
        Self::new(repr.x, repr.y)
    }
}

impl<T: Float> Pivot<T> {
    /// Create a pivot, rejecting components outside `0.0..=1.0` (and NaN).
    pub fn new(x: T, y: T) -> Result<Self, FitError> {
        let unit = |v: T| v >= T::zero() && v <= T::one();
        if unit(x) && unit(y) {
            Ok(Self { x, y })
        } else {
            Err(FitError::PivotOutOfRange)
        }
    }

    /// `(0.5, 0.5)`.
    pub fn center() -> Self {
        let half = T::one() / (T::one() + T::one());
        Self { x: half, y: half }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    fn along(&self, axis: Axis) -> T {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

impl<T: Float> Default for Pivot<T> {
    fn default() -> Self {
        Self::center()
    }
}

/// 2D offset in container-local units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset<T = f32> {
    pub x: T,
    pub y: T,
}

impl<T> Offset<T> {
    /// Create a new offset.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle as origin plus extent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds<T = f32> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

/// Computed placement of content within its container.
///
/// `offset_min` and `offset_max` move the min and max edges away from the
/// container's edges. Positive values move an edge toward +x / +y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect<T = f32> {
    /// Offset of the min (left, bottom) edges.
    pub offset_min: Offset<T>,
    /// Offset of the max (right, top) edges.
    pub offset_max: Offset<T>,
    /// Pivot the edges were distributed around.
    pub pivot: Pivot<T>,
    /// Whether the renderer should keep the content's aspect ratio.
    pub preserve_aspect: bool,
    /// Axis that received a non-flush adjustment, if any.
    pub adjusted: Option<Axis>,
}

impl<T: Float> Rect<T> {
    /// Flush with the container on both axes, centered pivot.
    fn stretch() -> Self {
        Self {
            offset_min: Offset::new(T::zero(), T::zero()),
            offset_max: Offset::new(T::zero(), T::zero()),
            pivot: Pivot::center(),
            preserve_aspect: false,
            adjusted: None,
        }
    }

    /// Grow (or shrink, for negative `value`) one axis by `value`, split
    /// around the pivot. The other axis stays flush.
    fn adjust(axis: Axis, value: T, pivot: Pivot<T>) -> Self {
        let p = pivot.along(axis);
        let min = -p * value;
        let max = (T::one() - p) * value;
        let (offset_min, offset_max) = match axis {
            Axis::Horizontal => (Offset::new(min, T::zero()), Offset::new(max, T::zero())),
            Axis::Vertical => (Offset::new(T::zero(), min), Offset::new(T::zero(), max)),
        };
        Self {
            offset_min,
            offset_max,
            pivot,
            preserve_aspect: true,
            adjusted: Some(axis),
        }
    }

    /// Total adjustment applied to the adjusted axis (`offset_max - offset_min`).
    /// Zero for stretch.
    pub fn adjustment(&self) -> T {
        match self.adjusted {
            Some(Axis::Horizontal) => self.offset_max.x - self.offset_min.x,
            Some(Axis::Vertical) => self.offset_max.y - self.offset_min.y,
            None => T::zero(),
        }
    }

    /// Resolve to origin + extent in the container's local space,
    /// measured from the container's min corner.
    pub fn bounds(&self, container: Size<T>) -> Bounds<T> {
        Bounds {
            x: self.offset_min.x,
            y: self.offset_min.y,
            width: container.width + self.offset_max.x - self.offset_min.x,
            height: container.height + self.offset_max.y - self.offset_min.y,
        }
    }
}

/// Fitting configuration: a mode and the pivot to distribute adjustments around.
///
/// ```
/// use lunekit::{AspectFitter, Axis, FitMode, Pivot, Size};
///
/// let rect = AspectFitter::new(FitMode::Cover)
///     .pivot(Pivot::new(0.0, 0.0).unwrap())
///     .compute(Size::new(100.0, 50.0), Size::new(200.0, 200.0))
///     .unwrap();
///
/// // Overflow goes entirely past the right edge.
/// assert_eq!(rect.adjusted, Some(Axis::Horizontal));
/// assert_eq!(rect.offset_min.x, 0.0);
/// assert_eq!(rect.offset_max.x, 200.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AspectFitter<T = f32> {
    pub mode: FitMode,
    pub pivot: Pivot<T>,
}

impl<T: Float> AspectFitter<T> {
    /// Fitter with a centered pivot.
    pub fn new(mode: FitMode) -> Self {
        Self {
            mode,
            pivot: Pivot::center(),
        }
    }

    /// Set the pivot adjustments are distributed around.
    pub fn pivot(mut self, pivot: Pivot<T>) -> Self {
        self.pivot = pivot;
        self
    }

    /// Compute the placement for `content` inside `container`.
    pub fn compute(&self, content: Size<T>, container: Size<T>) -> Result<Rect<T>, FitError> {
        compute(content, container, self.mode, self.pivot)
    }
}

impl<T: Float> Default for AspectFitter<T> {
    fn default() -> Self {
        Self::new(FitMode::default())
    }
}

/// Compute the placement of `content` inside `container` under `mode`.
///
/// Errors when the content has no area, or the container has a negative
/// (or NaN) dimension. A zero-area container is valid: Contain collapses to
/// nothing, Cover may produce very large offsets.
///
/// When both scale ratios are equal, Contain and Cover both adjust the
/// horizontal axis, by zero.
pub fn compute<T: Float>(
    content: Size<T>,
    container: Size<T>,
    mode: FitMode,
    pivot: Pivot<T>,
) -> Result<Rect<T>, FitError> {
    if content.is_empty() {
        return Err(FitError::DegenerateContent);
    }
    if !(container.width >= T::zero() && container.height >= T::zero()) {
        return Err(FitError::NegativeContainer);
    }

    let ratio_w = container.width / content.width;
    let ratio_h = container.height / content.height;

    // The adjusted axis is the one not touching the container.
    let axis = match mode {
        FitMode::Stretch => {
            log::trace!("stretch fit, no adjustment");
            return Ok(Rect::stretch());
        }
        FitMode::Contain if ratio_w < ratio_h => Axis::Vertical,
        FitMode::Cover if ratio_w > ratio_h => Axis::Vertical,
        FitMode::Contain | FitMode::Cover => Axis::Horizontal,
    };

    let value = match axis {
        Axis::Vertical => container.width * (content.height / content.width) - container.height,
        Axis::Horizontal => container.height * (content.width / content.height) - container.width,
    };
    log::trace!("{mode} fit adjusts {axis:?} axis");

    Ok(Rect::adjust(axis, value, pivot))
}

/// Recomputes a placement only when its inputs change.
///
/// Hosts call [`update`](Self::update) on initialization and on every
/// resize; `Some` means the rect changed and should be re-applied.
#[derive(Clone, Debug)]
pub struct AutoFit<T = f32> {
    fitter: AspectFitter<T>,
    last: Option<(Size<T>, Size<T>, Rect<T>)>,
}

impl<T: Float> AutoFit<T> {
    pub fn new(fitter: AspectFitter<T>) -> Self {
        Self { fitter, last: None }
    }

    pub fn fitter(&self) -> &AspectFitter<T> {
        &self.fitter
    }

    /// Change the mode. The next update recomputes if it differs.
    pub fn set_mode(&mut self, mode: FitMode) {
        if self.fitter.mode != mode {
            self.fitter.mode = mode;
            self.last = None;
        }
    }

    /// Change the pivot. The next update recomputes if it differs.
    pub fn set_pivot(&mut self, pivot: Pivot<T>) {
        if self.fitter.pivot != pivot {
            self.fitter.pivot = pivot;
            self.last = None;
        }
    }

    /// Recompute for the given sizes. `Ok(None)` if nothing changed since
    /// the last successful update.
    pub fn update(
        &mut self,
        content: Size<T>,
        container: Size<T>,
    ) -> Result<Option<Rect<T>>, FitError> {
        if let Some((c, k, _)) = &self.last
            && *c == content
            && *k == container
        {
            return Ok(None);
        }
        self.last = None;
        let rect = self.fitter.compute(content, container)?;
        self.last = Some((content, container, rect));
        Ok(Some(rect))
    }

    /// Rect from the last successful update.
    pub fn current(&self) -> Option<&Rect<T>> {
        self.last.as_ref().map(|(_, _, rect)| rect)
    }
}

/// Fit computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitError {
    /// Content width or height is zero, negative or NaN.
    DegenerateContent,
    /// Container width or height is negative or NaN.
    NegativeContainer,
    /// A pivot component is outside `0.0..=1.0`.
    PivotOutOfRange,
    /// Unrecognized fit mode name.
    UnknownMode,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DegenerateContent => "content width and height must be positive",
            Self::NegativeContainer => "container width and height must not be negative",
            Self::PivotOutOfRange => "pivot components must lie in 0..=1",
            Self::UnknownMode => "unknown fit mode, expected stretch, contain or cover",
        })
    }
}

impl core::error::Error for FitError {}
