use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::InteractionConfig;
use crate::dom;
use crate::error::SetupError;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
}

pub fn scroll_target(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

/// Last section whose top, pulled up by `lookahead`, has been scrolled past.
/// A section without an id still counts, it just has no link to highlight.
pub fn current_section(sections: &[SectionBounds], scroll_y: f64, lookahead: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| scroll_y >= section.top - lookahead)
        .last()
        .map(|section| section.id.as_str())
        .filter(|id| !id.is_empty())
}

/// Where an in-page anchor click goes and whether the clicked link becomes active.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorJump<'a> {
    pub selector: &'a str,
    pub mark_active: bool,
}

impl<'a> AnchorJump<'a> {
    /// `None` for a bare `#`, which only swallows the click.
    pub fn from_click(href: &'a str, is_nav_link: bool) -> Option<Self> {
        if href == "#" {
            return None;
        }
        Some(Self {
            selector: href,
            mark_active: is_nav_link,
        })
    }
}

pub fn href_fragment(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

pub fn link_points_to(href: &str, section_id: &str) -> bool {
    href_fragment(href) == Some(section_id)
}

fn offset_top(el: &Element) -> Option<f64> {
    el.dyn_ref::<HtmlElement>().map(|html| html.offset_top() as f64)
}

fn clear_active(links: &[Element]) {
    for link in links {
        dom::remove_class(link, "active");
    }
}

pub fn wire_anchor_scrolling(
    window: &Window,
    document: &Document,
    config: &InteractionConfig,
) -> Result<(), SetupError> {
    let nav_links = Rc::new(dom::query_all(document, ".nav-link")?);
    let anchors = dom::query_all(document, "a[href^=\"#\"]")?;
    let header_offset = config.header_offset;

    for anchor in &anchors {
        let window = window.clone();
        let document = document.clone();
        let nav_links = nav_links.clone();
        let anchor_el = anchor.clone();
        dom::listen(anchor, "click", move |event| {
            event.prevent_default();

            let Some(href) = anchor_el.get_attribute("href") else {
                return;
            };
            let Some(jump) = AnchorJump::from_click(&href, dom::has_class(&anchor_el, "nav-link"))
            else {
                return;
            };
            // A malformed fragment is not a valid selector, just ignore the click
            let Some(target) = document.query_selector(jump.selector).ok().flatten() else {
                return;
            };
            let Some(top) = offset_top(&target) else {
                return;
            };

            clear_active(&nav_links);
            if jump.mark_active {
                dom::add_class(&anchor_el, "active");
            }

            let options = ScrollToOptions::new();
            options.set_top(scroll_target(top, header_offset));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
            debug!("Scrolling to {}", href);
        })?;
    }

    info!("Smooth scrolling attached to {} anchors", anchors.len());
    Ok(())
}

pub fn wire_section_highlighting(
    window: &Window,
    document: &Document,
    config: &InteractionConfig,
) -> Result<(), SetupError> {
    let nav_links = dom::query_all(document, ".nav-link")?;
    let lookahead = config.section_lookahead;

    let window_clone = window.clone();
    let document = document.clone();
    dom::listen(window, "scroll", move |_| {
        // Sections are re-read on every scroll, their offsets move with layout
        let sections: Vec<SectionBounds> = dom::query_all(&document, "section")
            .unwrap_or_default()
            .iter()
            .filter_map(|section| {
                Some(SectionBounds {
                    id: section.get_attribute("id").unwrap_or_default(),
                    top: offset_top(section)?,
                })
            })
            .collect();

        let current = current_section(&sections, dom::scroll_y(&window_clone), lookahead);

        clear_active(&nav_links);
        let Some(current) = current else {
            return;
        };
        for link in &nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            if link_points_to(&href, current) {
                dom::add_class(link, "active");
            }
        }
    })?;

    info!("Section highlighting attached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        [("home", 0.0), ("about", 800.0), ("portfolio", 1600.0), ("contact", 2400.0)]
            .iter()
            .map(|(id, top)| SectionBounds { id: id.to_string(), top: *top })
            .collect()
    }

    #[test]
    fn anchor_lands_below_sticky_header() {
        assert_eq!(scroll_target(1600.0, 80.0), 1520.0);
        assert_eq!(scroll_target(40.0, 80.0), -40.0);
    }

    #[test]
    fn picks_section_using_lookahead() {
        let sections = sections();
        assert_eq!(current_section(&sections, 0.0, 200.0), Some("home"));
        assert_eq!(current_section(&sections, 599.0, 200.0), Some("home"));
        assert_eq!(current_section(&sections, 600.0, 200.0), Some("about"));
        assert_eq!(current_section(&sections, 5000.0, 200.0), Some("contact"));
    }

    #[test]
    fn nothing_selected_above_first_section() {
        let sections = vec![SectionBounds { id: "about".into(), top: 900.0 }];
        assert_eq!(current_section(&sections, 100.0, 200.0), None);
    }

    #[test]
    fn section_without_id_clears_highlight() {
        let sections = vec![
            SectionBounds { id: "about".into(), top: 0.0 },
            SectionBounds { id: String::new(), top: 1000.0 },
        ];
        assert_eq!(current_section(&sections, 500.0, 200.0), Some("about"));
        assert_eq!(current_section(&sections, 1500.0, 200.0), None);
    }

    #[test]
    fn nav_anchor_click_marks_link_and_targets_section() {
        let jump = AnchorJump::from_click("#portfolio", true).unwrap();
        assert_eq!(jump, AnchorJump { selector: "#portfolio", mark_active: true });
        // Section at 1600 lands 80px below the viewport top
        assert_eq!(scroll_target(1600.0, 80.0), 1520.0);
    }

    #[test]
    fn plain_anchor_scrolls_without_marking() {
        let jump = AnchorJump::from_click("#contact", false).unwrap();
        assert!(!jump.mark_active);
    }

    #[test]
    fn bare_hash_does_nothing() {
        assert_eq!(AnchorJump::from_click("#", true), None);
    }

    #[test]
    fn links_match_on_fragment() {
        assert!(link_points_to("#about", "about"));
        assert!(link_points_to("index.html#about", "about"));
        assert!(!link_points_to("#about-us", "about"));
        assert!(!link_points_to("#", "about"));
        assert!(!link_points_to("/about", "about"));
    }

    #[test]
    fn empty_fragment_is_none() {
        assert_eq!(href_fragment("#"), None);
        assert_eq!(href_fragment("#work"), Some("work"));
    }
}
