use indexmap::IndexMap;

use crate::core::{EstimatingTextMeasurer, FontSpec};

/// Opaque reference to an element appended to a [`DomContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// Absolutely positioned text element owned by a label renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelElement {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub style: IndexMap<String, String>,
}

impl LabelElement {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|entry| entry == class)
    }

    #[must_use]
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Pixel value of a `<n>px` style property.
    #[must_use]
    pub fn style_px(&self, property: &str) -> Option<f64> {
        self.style_value(property)?
            .trim()
            .strip_suffix("px")?
            .trim()
            .parse()
            .ok()
    }
}

/// Container the DOM-based renderers place their elements into.
pub trait DomContainer {
    fn append(&mut self, element: LabelElement) -> ElementHandle;
    /// Outer size (content plus padding and margin) of a live element.
    fn outer_size(&self, handle: ElementHandle) -> Option<(f64, f64)>;
    fn remove(&mut self, handle: ElementHandle) -> bool;
    fn remove_by_id(&mut self, id: &str) -> usize;
    fn remove_by_class(&mut self, class: &str) -> usize;
    fn set_style(&mut self, handle: ElementHandle, property: &str, value: &str) -> bool;
}

/// In-memory container with deterministic text layout.
///
/// Lines are laid out as with `white-space: pre-line`; widths come from
/// [`EstimatingTextMeasurer`] using the element's `font-size` style when set.
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    elements: IndexMap<ElementHandle, LabelElement>,
    next_handle: u64,
    default_font: FontSpec,
    line_height_ratio: f64,
    box_padding: f64,
}

impl Default for MemoryContainer {
    fn default() -> Self {
        Self {
            elements: IndexMap::new(),
            next_handle: 1,
            default_font: FontSpec::new(14.0, "sans-serif"),
            line_height_ratio: 1.2,
            box_padding: 0.0,
        }
    }
}

impl MemoryContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Padding added on every side of an element when measuring its outer box.
    #[must_use]
    pub fn with_box_padding(mut self, padding: f64) -> Self {
        self.box_padding = padding.max(0.0);
        self
    }

    #[must_use]
    pub fn with_default_font(mut self, font: FontSpec) -> Self {
        self.default_font = font;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn element(&self, handle: ElementHandle) -> Option<&LabelElement> {
        self.elements.get(&handle)
    }

    pub fn elements(&self) -> impl Iterator<Item = &LabelElement> {
        self.elements.values()
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&LabelElement> {
        self.elements
            .values()
            .find(|element| element.id.as_deref() == Some(id))
    }

    pub fn find_by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a LabelElement> {
        self.elements
            .values()
            .filter(move |element| element.has_class(class))
    }

    fn natural_size(&self, element: &LabelElement) -> (f64, f64) {
        let font_size = element
            .style_px("font-size")
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(self.default_font.size_px);
        let mut line_count = 0usize;
        let mut widest = 0.0f64;
        for line in element.text.split('\n') {
            line_count += 1;
            widest = widest.max(EstimatingTextMeasurer::estimate(line, font_size));
        }
        let height = line_count as f64 * font_size * self.line_height_ratio;
        (
            widest + 2.0 * self.box_padding,
            height + 2.0 * self.box_padding,
        )
    }

    fn remove_where(&mut self, predicate: impl Fn(&LabelElement) -> bool) -> usize {
        let before = self.elements.len();
        self.elements.retain(|_, element| !predicate(element));
        before - self.elements.len()
    }
}

impl DomContainer for MemoryContainer {
    fn append(&mut self, element: LabelElement) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.elements.insert(handle, element);
        handle
    }

    fn outer_size(&self, handle: ElementHandle) -> Option<(f64, f64)> {
        self.elements
            .get(&handle)
            .map(|element| self.natural_size(element))
    }

    fn remove(&mut self, handle: ElementHandle) -> bool {
        self.elements.shift_remove(&handle).is_some()
    }

    fn remove_by_id(&mut self, id: &str) -> usize {
        self.remove_where(|element| element.id.as_deref() == Some(id))
    }

    fn remove_by_class(&mut self, class: &str) -> usize {
        self.remove_where(|element| element.has_class(class))
    }

    fn set_style(&mut self, handle: ElementHandle, property: &str, value: &str) -> bool {
        match self.elements.get_mut(&handle) {
            Some(element) => {
                element.style.insert(property.to_owned(), value.to_owned());
                true
            }
            None => false,
        }
    }
}
