//! `HtmlImageElement` as a loader image handle.

use gloo::events::EventListener;
use nd_image_core::ImageHandle;
use web_sys::HtmlImageElement;

/// A DOM image element watched by the loader.
#[derive(Debug, Clone)]
pub struct DomImage {
    element: HtmlImageElement,
}

impl DomImage {
    pub fn new(element: HtmlImageElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlImageElement {
        &self.element
    }

    pub fn into_element(self) -> HtmlImageElement {
        self.element
    }
}

impl ImageHandle for DomImage {
    type Binding = EventListener;

    fn src(&self) -> String {
        self.element.src()
    }

    fn set_src(&self, src: &str) {
        self.element.set_src(src);
    }

    fn width(&self) -> u32 {
        self.element.width()
    }

    fn height(&self) -> u32 {
        self.element.height()
    }

    fn complete(&self) -> bool {
        self.element.complete()
    }

    fn on_load(&self, mut callback: Box<dyn FnMut()>) -> EventListener {
        EventListener::new(&self.element, "load", move |_| callback())
    }

    fn on_error(&self, mut callback: Box<dyn FnMut()>) -> EventListener {
        EventListener::new(&self.element, "error", move |_| callback())
    }
}
