use log::info;
use web_sys::{Document, Element, Window};

use crate::dom;
use crate::error::SetupError;

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

fn update(header: &Element, scroll_y: f64, threshold: f64) {
    if is_scrolled(scroll_y, threshold) {
        dom::add_class(header, "scrolled");
    } else {
        dom::remove_class(header, "scrolled");
    }
}

pub fn wire(window: &Window, document: &Document, threshold: f64) -> Result<(), SetupError> {
    let header = dom::by_id(document, "header")?;

    // Initial check, the page may be restored mid-scroll
    update(&header, dom::scroll_y(window), threshold);

    let window_clone = window.clone();
    dom::listen(window, "scroll", move |_| {
        update(&header, dom::scroll_y(&window_clone), threshold);
    })?;

    info!("Sticky header attached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, 50.0));
        assert!(!is_scrolled(50.0, 50.0));
        assert!(is_scrolled(50.5, 50.0));
        assert!(is_scrolled(900.0, 50.0));
    }
}
