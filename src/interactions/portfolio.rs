use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{Document, Element};

use crate::config::InteractionConfig;
use crate::dom;
use crate::error::SetupError;

pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEffect {
    Show,
    Hide,
}

impl FilterEffect {
    pub fn for_item(filter: &str, category: Option<&str>) -> Self {
        if filter == ALL || category == Some(filter) {
            FilterEffect::Show
        } else {
            FilterEffect::Hide
        }
    }
}

fn apply(item: &Element, effect: FilterEffect, show_delay_ms: u32, hide_delay_ms: u32) {
    let item = item.clone();
    match effect {
        FilterEffect::Show => {
            dom::set_style(&item, "display", "block");
            Timeout::new(show_delay_ms, move || {
                dom::set_style(&item, "opacity", "1");
                dom::set_style(&item, "transform", "scale(1)");
            })
            .forget();
        }
        FilterEffect::Hide => {
            dom::set_style(&item, "opacity", "0");
            dom::set_style(&item, "transform", "scale(0.8)");
            // Let the fade finish before pulling it out of the layout
            Timeout::new(hide_delay_ms, move || {
                dom::set_style(&item, "display", "none");
            })
            .forget();
        }
    }
}

pub fn wire(document: &Document, config: &InteractionConfig) -> Result<(), SetupError> {
    let buttons = Rc::new(dom::query_all(document, ".filter-btn")?);
    let items = Rc::new(dom::query_all(document, ".portfolio-item")?);
    let show_delay_ms = config.filter_show_delay_ms;
    let hide_delay_ms = config.filter_hide_delay_ms;

    for button in buttons.iter() {
        let buttons = buttons.clone();
        let items = items.clone();
        let button_el = button.clone();
        dom::listen(button, "click", move |_| {
            for other in buttons.iter() {
                dom::remove_class(other, "active");
            }
            dom::add_class(&button_el, "active");

            let filter = button_el.get_attribute("data-filter").unwrap_or_default();
            debug!("Portfolio filter: {}", filter);

            for item in items.iter() {
                let category = item.get_attribute("data-category");
                let effect = FilterEffect::for_item(&filter, category.as_deref());
                apply(item, effect, show_delay_ms, hide_delay_ms);
            }
        })?;
    }

    info!(
        "Portfolio filtering attached ({} buttons, {} items)",
        buttons.len(),
        items.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: &[Option<&str>] = &[Some("video"), Some("photo"), Some("video"), None];

    fn shown(filter: &str) -> Vec<usize> {
        ITEMS
            .iter()
            .enumerate()
            .filter(|(_, category)| {
                FilterEffect::for_item(filter, **category) == FilterEffect::Show
            })
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn all_shows_every_item() {
        assert_eq!(shown(ALL), vec![0, 1, 2, 3]);
    }

    #[test]
    fn category_shows_only_matching_items() {
        assert_eq!(shown("video"), vec![0, 2]);
        assert_eq!(shown("photo"), vec![1]);
    }

    #[test]
    fn unknown_category_hides_everything() {
        assert!(shown("audio").is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(FilterEffect::for_item("Video", Some("video")), FilterEffect::Hide);
    }
}
