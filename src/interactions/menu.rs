use log::{debug, info};
use web_sys::{Document, Element};

use crate::dom;
use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Bars,
    Close,
}

impl MenuIcon {
    pub fn for_open(open: bool) -> Self {
        if open {
            MenuIcon::Close
        } else {
            MenuIcon::Bars
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            MenuIcon::Bars => "fa-bars",
            MenuIcon::Close => "fa-xmark",
        }
    }

    fn other(self) -> Self {
        match self {
            MenuIcon::Bars => MenuIcon::Close,
            MenuIcon::Close => MenuIcon::Bars,
        }
    }
}

fn show_icon(toggle: &Element, icon: MenuIcon) {
    // The <i> is looked up on every click, icon fonts sometimes swap it out
    if let Some(i) = toggle.query_selector("i").ok().flatten() {
        dom::remove_class(&i, icon.other().class());
        dom::add_class(&i, icon.class());
    }
}

pub fn wire(document: &Document) -> Result<(), SetupError> {
    let toggle = dom::query(document, ".mobile-toggle")?;
    let menu = dom::query(document, ".nav-menu")?;
    let links = dom::query_all(document, ".nav-link")?;

    {
        let menu = menu.clone();
        let toggle_el = toggle.clone();
        dom::listen(&toggle, "click", move |_| {
            let open = menu.class_list().toggle("active").unwrap_or(false);
            show_icon(&toggle_el, MenuIcon::for_open(open));
            debug!("Mobile menu {}", if open { "opened" } else { "closed" });
        })?;
    }

    for link in &links {
        let menu = menu.clone();
        let toggle = toggle.clone();
        dom::listen(link, "click", move |_| {
            dom::remove_class(&menu, "active");
            show_icon(&toggle, MenuIcon::Bars);
        })?;
    }

    info!("Mobile menu attached ({} nav links)", links.len());
    Ok(())
}
