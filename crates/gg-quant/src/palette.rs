use gg_core::Rgb;
use gg_core::color::nearest_color;

use crate::vbox::VBox;

/// Color map: the boxes kept by the quantizer, in emission order.
///
/// Only [`crate::quantize`] builds one, and never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    boxes: Vec<VBox>,
}

impl Palette {
    pub(crate) fn from_boxes(boxes: Vec<VBox>) -> Self {
        debug_assert!(!boxes.is_empty(), "palette vide");
        Self { boxes }
    }

    /// Representative colors, one per box.
    ///
    /// # Example
    /// ```
    /// use gg_core::Rgb;
    /// use gg_quant::quantize;
    /// let palette = quantize(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)], 2).unwrap();
    /// assert_eq!(palette.colors().len(), 2);
    /// ```
    #[must_use]
    pub fn colors(&self) -> Vec<Rgb> {
        self.boxes.iter().map(VBox::average).collect()
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Never true for a palette produced by the quantizer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Underlying boxes.
    #[must_use]
    pub fn boxes(&self) -> &[VBox] {
        &self.boxes
    }

    /// Map a pixel: the average of the first box containing it, else the nearest color.
    #[must_use]
    pub fn map(&self, pixel: Rgb) -> Rgb {
        self.boxes
            .iter()
            .find(|vbox| vbox.contains(pixel))
            .map_or_else(|| self.nearest(pixel), VBox::average)
    }

    /// Nearest box average by Euclidean distance, first minimum wins.
    #[must_use]
    pub fn nearest(&self, pixel: Rgb) -> Rgb {
        let colors = self.colors();
        nearest_color(&colors, pixel).unwrap_or(pixel)
    }
}
