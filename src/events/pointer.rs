use crate::camera::OrbitCamera;
use crate::constants::{ORBIT_RADIANS_PER_PX, ZOOM_PER_WHEEL_UNIT};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer drag in progress, in client pixels.
#[derive(Clone, Copy, Debug, Default)]
struct OrbitDrag {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
}

pub fn wire_orbit_handlers(canvas: &web::HtmlCanvasElement, camera: Rc<RefCell<OrbitCamera>>) {
    let drag = Rc::new(RefCell::new(OrbitDrag::default()));
    wire_pointerdown(canvas, drag.clone());
    wire_pointermove(drag.clone(), camera.clone());
    wire_pointerup(drag);
    wire_wheel(canvas, camera);
}

fn wire_pointerdown(canvas: &web::HtmlCanvasElement, drag: Rc<RefCell<OrbitDrag>>) {
    let target = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        *drag.borrow_mut() = OrbitDrag {
            active: true,
            last_x: ev.client_x() as f32,
            last_y: ev.client_y() as f32,
        };
        _ = target.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(drag: Rc<RefCell<OrbitDrag>>, camera: Rc<RefCell<OrbitCamera>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut d = drag.borrow_mut();
        if !d.active {
            return;
        }
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        // dragging right swings the eye left around the target
        camera.borrow_mut().orbit(
            -(x - d.last_x) * ORBIT_RADIANS_PER_PX,
            (y - d.last_y) * ORBIT_RADIANS_PER_PX,
        );
        d.last_x = x;
        d.last_y = y;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(drag: Rc<RefCell<OrbitDrag>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        drag.borrow_mut().active = false;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, camera: Rc<RefCell<OrbitCamera>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        camera
            .borrow_mut()
            .zoom(ev.delta_y() as f32 * ZOOM_PER_WHEEL_UNIT);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
