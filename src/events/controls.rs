use crate::audio::settings::on_off;
use crate::audio::AudioManager;
use crate::constants::*;
use crate::core::{Formation, ShowEngine};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Handles shared by the page controls and the frame loop.
#[derive(Clone)]
pub struct Controls {
    pub engine: Rc<RefCell<ShowEngine>>,
    pub audio: Rc<RefCell<AudioManager>>,
}

pub fn wire_controls(document: &web::Document, c: &Controls) {
    wire_formation_buttons(document, c);
    wire_show_controls(document, c);
    wire_audio_controls(document, c);
    refresh_labels(document, c);
}

fn wire_formation_buttons(document: &web::Document, c: &Controls) {
    for formation in Formation::ALL {
        let c = c.clone();
        dom::add_click_listener(document, formation.as_str(), move || {
            c.engine
                .borrow_mut()
                .request_formation(formation, dom::now_ms());
            // first click is the gesture browsers want before audio starts
            c.audio.borrow().ensure_music();
        });
    }
}

fn wire_show_controls(document: &web::Document, c: &Controls) {
    let engine = c.engine.clone();
    let doc = document.clone();
    dom::add_click_listener(document, FLICKER_BUTTON_ID, move || {
        let on = engine.borrow_mut().toggle_flicker();
        dom::set_text(&doc, FLICKER_BUTTON_ID, &format!("Flicker: {}", on_off(on)));
        log::info!("[ui] flicker {}", on_off(on));
    });

    let engine = c.engine.clone();
    dom::add_range_listener(document, SPEED_SLIDER_ID, move |v| {
        engine.borrow_mut().set_global_speed_factor(v);
    });
}

fn wire_audio_controls(document: &web::Document, c: &Controls) {
    let audio = c.audio.clone();
    let doc = document.clone();
    dom::add_click_listener(document, TOGGLE_SOUND_ID, move || {
        let on = audio.borrow_mut().toggle_sound();
        dom::set_text(&doc, TOGGLE_SOUND_ID, &format!("Sound: {}", on_off(on)));
    });

    let audio = c.audio.clone();
    let doc = document.clone();
    dom::add_click_listener(document, TOGGLE_MUSIC_ID, move || {
        let on = audio.borrow_mut().toggle_music();
        dom::set_text(&doc, TOGGLE_MUSIC_ID, &format!("Music: {}", on_off(on)));
    });

    let audio = c.audio.clone();
    let doc = document.clone();
    dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || {
        let on = audio.borrow_mut().toggle_all();
        dom::set_text(&doc, AUDIO_TOGGLE_ID, &format!("Audio: {}", on_off(on)));
        dom::set_text(&doc, TOGGLE_SOUND_ID, &format!("Sound: {}", on_off(on)));
        dom::set_text(&doc, TOGGLE_MUSIC_ID, &format!("Music: {}", on_off(on)));
    });

    let audio = c.audio.clone();
    dom::add_range_listener(document, VOLUME_SLIDER_ID, move |v| {
        audio.borrow_mut().set_volume(v);
    });
}

fn refresh_labels(document: &web::Document, c: &Controls) {
    let flicker = c.engine.borrow().flicker_enabled();
    dom::set_text(document, FLICKER_BUTTON_ID, &format!("Flicker: {}", on_off(flicker)));
    let s = *c.audio.borrow().settings();
    dom::set_text(document, TOGGLE_SOUND_ID, &format!("Sound: {}", on_off(s.sound_enabled)));
    dom::set_text(document, TOGGLE_MUSIC_ID, &format!("Music: {}", on_off(s.music_enabled)));
    dom::set_text(document, AUDIO_TOGGLE_ID, &format!("Audio: {}", on_off(s.any_enabled())));
}
