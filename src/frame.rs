use crate::audio::AudioManager;
use crate::camera::OrbitCamera;
use crate::constants::{STATUS_EVERY_FRAMES, STATUS_ID};
use crate::core::ShowEngine;
use crate::dom;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub engine: Rc<RefCell<ShowEngine>>,
    pub audio: Rc<RefCell<AudioManager>>,
    pub camera: Rc<RefCell<OrbitCamera>>,

    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub frame_index: u32,
    pub tick_cost: Duration,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now_ms = dom::now_ms();

        let started = Instant::now();
        let cues = {
            let mut engine = self.engine.borrow_mut();
            engine.tick(now_ms);
            engine.take_cues()
        };
        self.tick_cost += started.elapsed();

        if !cues.is_empty() {
            let audio = self.audio.borrow();
            for cue in cues {
                audio.play_cue(cue);
            }
        }

        let (view, proj) = {
            let mut cam = self.camera.borrow_mut();
            cam.update();
            let aspect = match &self.gpu {
                Some(g) => g.aspect(),
                None => self.canvas.width().max(1) as f32 / self.canvas.height().max(1) as f32,
            };
            (cam.view(), cam.proj(aspect))
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            {
                let engine = self.engine.borrow();
                g.upload(engine.positions_flat(), engine.display_colors_flat());
            }
            if let Err(e) = g.render(view, proj) {
                log::error!("render error: {:?}", e);
            }
        }

        self.frame_index = self.frame_index.wrapping_add(1);
        if self.frame_index % STATUS_EVERY_FRAMES == 0 {
            self.update_status(now_ms);
        }
    }

    fn update_status(&mut self, now_ms: f64) {
        let engine = self.engine.borrow();
        let stats = engine.stats(now_ms);
        let name = engine.formation().map_or("grid", |f| f.as_str());
        let mean_ms = self.tick_cost.as_secs_f64() * 1000.0 / STATUS_EVERY_FRAMES as f64;
        dom::set_text(
            &self.document,
            STATUS_ID,
            &format!(
                "{name} | flying {} | waiting {} | resting {} | tick {mean_ms:.2} ms",
                stats.flying, stats.waiting, stats.idle
            ),
        );
        self.tick_cost = Duration::ZERO;
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error, simulating without a renderer: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
