#![cfg(target_arch = "wasm32")]
use crate::core::{EngineConfig, ShowEngine};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod query;
mod render;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn build_engine() -> anyhow::Result<ShowEngine> {
    let (config, rejected) = query::apply_query(EngineConfig::default(), &dom::location_search());
    for r in rejected {
        log::warn!("[show] ignoring query parameter {}", r);
    }
    let engine = ShowEngine::new(config)?;
    Ok(engine)
}

fn build_camera() -> camera::OrbitCamera {
    camera::OrbitCamera::looking_at(
        Vec3::from_array(CAMERA_EYE),
        Vec3::ZERO,
        CAMERA_FOV_Y_DEG,
        CAMERA_NEAR,
        CAMERA_FAR,
    )
    .with_damping(CAMERA_DAMPING)
    .with_distance_limits(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE)
    .with_pitch_limit(CAMERA_PITCH_LIMIT)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("drone-show-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let engine = Rc::new(RefCell::new(build_engine()?));
    let audio = Rc::new(RefCell::new(audio::AudioManager::new(
        SOUNDS_DIR,
        audio::settings::AudioSettings::default(),
    )));
    // usually blocked until the first click; ensure_music retries then
    audio.borrow().play_music();
    let camera = Rc::new(RefCell::new(build_camera()));

    let controls = events::Controls {
        engine: engine.clone(),
        audio: audio.clone(),
    };
    events::wire_controls(&document, &controls);
    events::wire_orbit_handlers(&canvas, camera.clone());

    let capacity = engine.borrow().len();
    let gpu = frame::init_gpu(&canvas, capacity).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        audio,
        camera,
        document,
        canvas,
        gpu,
        frame_index: 0,
        tick_cost: Duration::ZERO,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
