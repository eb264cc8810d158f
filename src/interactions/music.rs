use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::{Document, Element, HtmlMediaElement};

use crate::config::InteractionConfig;
use crate::dom;
use crate::error::SetupError;

const ICON_STOPPED: &str = r#"<i class="fa-solid fa-music"></i>"#;
const ICON_PLAYING: &str = r#"<i class="fa-solid fa-volume-high"></i>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    Play,
    Pause,
}

/// Mirrors whether the background audio is (supposed to be) playing.
#[derive(Debug, Default)]
pub struct MusicToggle {
    playing: bool,
}

impl MusicToggle {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) -> MusicAction {
        let action = if self.playing {
            MusicAction::Pause
        } else {
            MusicAction::Play
        };
        self.playing = !self.playing;
        action
    }

    pub fn play_rejected(&mut self) {
        self.playing = false;
    }
}

pub fn icon_markup(playing: bool) -> &'static str {
    if playing {
        ICON_PLAYING
    } else {
        ICON_STOPPED
    }
}

fn show(control: &Element, playing: bool) {
    if playing {
        dom::add_class(control, "playing");
    } else {
        dom::remove_class(control, "playing");
    }
    control.set_inner_html(icon_markup(playing));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayRejection {
    /// A pause or new source cut the pending play short, the toggle already moved on.
    Interrupted,
    Blocked(String),
}

impl PlayRejection {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("AbortError") => PlayRejection::Interrupted,
            Some(name) => PlayRejection::Blocked(name.to_string()),
            None => PlayRejection::Blocked("unknown error".to_string()),
        }
    }
}

fn reject(state: &RefCell<MusicToggle>, control: &Element, reason: JsValue) {
    let name = Reflect::get(&reason, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string());

    match PlayRejection::from_name(name.as_deref()) {
        PlayRejection::Interrupted => debug!("Pending music play interrupted"),
        PlayRejection::Blocked(name) => {
            warn!("Audio play rejected ({}), user interaction required", name);
            state.borrow_mut().play_rejected();
            show(control, false);
        }
    }
}

pub fn wire(
    document: &Document,
    config: &InteractionConfig,
    state: Rc<RefCell<MusicToggle>>,
) -> Result<(), SetupError> {
    let (Some(audio), Some(control)) = (
        document.get_element_by_id("bg-music"),
        document.get_element_by_id("music-toggle"),
    ) else {
        debug!("No background music on this page");
        return Ok(());
    };
    let audio = audio
        .dyn_into::<HtmlMediaElement>()
        .map_err(|_| SetupError::UnexpectedElement("bg-music"))?;

    audio.set_volume(config.music_volume.clamp(0.0, 1.0));

    let control_el = control.clone();
    dom::listen(&control, "click", move |_| {
        let action = state.borrow_mut().toggle();
        debug!("Music toggle: {:?}, playing = {}", action, state.borrow().is_playing());

        match action {
            MusicAction::Pause => {
                let _ = audio.pause();
                show(&control_el, false);
            }
            MusicAction::Play => {
                show(&control_el, true);
                match audio.play() {
                    Ok(promise) => {
                        let state = state.clone();
                        let control = control_el.clone();
                        spawn_local(async move {
                            if let Err(e) = JsFuture::from(promise).await {
                                reject(&state, &control, e);
                            }
                        });
                    }
                    Err(e) => reject(&state, &control_el, e),
                }
            }
        }
    })?;

    info!("Music control attached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped() {
        assert!(!MusicToggle::default().is_playing());
    }

    #[test]
    fn toggling_twice_restores_state_and_icon() {
        let mut music = MusicToggle::default();
        let icon_before = icon_markup(music.is_playing());

        assert_eq!(music.toggle(), MusicAction::Play);
        assert_eq!(icon_markup(music.is_playing()), ICON_PLAYING);

        assert_eq!(music.toggle(), MusicAction::Pause);
        assert!(!music.is_playing());
        assert_eq!(icon_markup(music.is_playing()), icon_before);
    }

    #[test]
    fn rejected_play_reads_as_stopped() {
        let mut music = MusicToggle::default();
        music.toggle();
        music.play_rejected();
        assert!(!music.is_playing());
        // Next click tries to play again instead of pausing
        assert_eq!(music.toggle(), MusicAction::Play);
    }

    #[test]
    fn autoplay_block_is_reported_by_name() {
        assert_eq!(
            PlayRejection::from_name(Some("NotAllowedError")),
            PlayRejection::Blocked("NotAllowedError".to_string())
        );
        assert_eq!(
            PlayRejection::from_name(None),
            PlayRejection::Blocked("unknown error".to_string())
        );
    }

    #[test]
    fn pause_during_pending_play_is_not_a_block() {
        assert_eq!(PlayRejection::from_name(Some("AbortError")), PlayRejection::Interrupted);
    }
}
