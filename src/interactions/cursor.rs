use std::cell::Cell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Window};

use crate::dom;
use crate::error::SetupError;

const INTERACTIVE_SELECTOR: &str =
    "a, button, .portfolio-item, .service-card, .skill-card, input, select, textarea";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub fn css_left(&self) -> String {
        format!("{}px", self.x)
    }

    pub fn css_top(&self) -> String {
        format!("{}px", self.y)
    }
}

fn place(el: &Element, pos: &PointerPosition) {
    dom::set_style(el, "left", &pos.css_left());
    dom::set_style(el, "top", &pos.css_top());
}

pub fn wire_pointer(
    window: &Window,
    document: &Document,
    pointer: Rc<Cell<PointerPosition>>,
) -> Result<(), SetupError> {
    let dot = dom::query(document, ".cursor-dot")?;
    let outline = dom::query(document, ".cursor-outline")?;

    dom::listen(window, "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pos = PointerPosition {
            x: event.client_x(),
            y: event.client_y(),
        };
        pointer.set(pos);

        // Both follow with zero delay
        place(&dot, &pos);
        place(&outline, &pos);
    })?;

    info!("Cursor tracking attached");
    Ok(())
}

pub fn wire_hover(document: &Document) -> Result<(), SetupError> {
    let body: Element = document
        .body()
        .ok_or(SetupError::MissingElement("body"))?
        .into();
    let targets = dom::query_all(document, INTERACTIVE_SELECTOR)?;

    for el in &targets {
        let body_enter = body.clone();
        dom::listen(el, "mouseenter", move |_| {
            dom::add_class(&body_enter, "hovering");
        })?;

        let body_leave = body.clone();
        dom::listen(el, "mouseleave", move |_| {
            dom::remove_class(&body_leave, "hovering");
        })?;
    }

    info!("Hover state attached to {} elements", targets.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_formats_as_pixels() {
        let pos = PointerPosition { x: 120, y: -4 };
        assert_eq!(pos.css_left(), "120px");
        assert_eq!(pos.css_top(), "-4px");
    }

    #[test]
    fn default_position_is_origin() {
        assert_eq!(PointerPosition::default(), PointerPosition { x: 0, y: 0 });
    }
}
