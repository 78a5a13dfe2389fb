//! Centering offsets.

use super::{Offset, Size};

/// Compute the offsets that center `image` inside `container`.
///
/// Offsets go negative when the image is larger than the container, which
/// keeps the overflow symmetric on both sides.
///
/// # Example
///
/// ```
/// use nd_image_core::geometry::{center, Offset, Size};
///
/// let offset = center(Size::new(100.0, 100.0), Size::new(50.0, 50.0));
/// assert_eq!(offset, Offset::new(25.0, 25.0));
/// ```
pub fn center(container: Size, image: Size) -> Offset {
    Offset {
        top: (container.height - image.height) / 2.0,
        left: (container.width - image.width) / 2.0,
    }
}
