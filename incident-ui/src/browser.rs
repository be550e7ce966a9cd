//! Thin wrappers over browser APIs: geolocation and timers.

use incident_core::{Coordinates, GeoError};
use js_sys::{Function, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn number_at(value: &JsValue, path: &[&str]) -> Option<f64> {
    let mut current = value.clone();
    for key in path {
        current = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
    }
    current.as_f64()
}

/// One-shot position query. `on_fix` runs exactly once, with either the
/// browser's coordinates or the reason there are none.
pub fn request_location(on_fix: impl FnOnce(Result<Coordinates, GeoError>) + 'static) {
    let geolocation = web_sys::window().and_then(|w| w.navigator().geolocation().ok());
    let Some(geolocation) = geolocation else {
        on_fix(Err(GeoError::Unsupported));
        return;
    };

    let slot = RefCell::new(Some(on_fix));
    let deliver: Rc<dyn Fn(Result<Coordinates, GeoError>)> = Rc::new(move |fix| {
        let taken = slot.borrow_mut().take();
        if let Some(f) = taken {
            f(fix);
        }
    });

    let on_success = {
        let deliver = deliver.clone();
        Closure::once_into_js(move |position: JsValue| {
            let lat = number_at(&position, &["coords", "latitude"]);
            let lng = number_at(&position, &["coords", "longitude"]);
            deliver(match (lat, lng) {
                (Some(lat), Some(lng)) => Ok(Coordinates::new(lat, lng)),
                _ => Err(GeoError::Unavailable),
            });
        })
    };
    let on_error = {
        let deliver = deliver.clone();
        Closure::once_into_js(move |err: JsValue| {
            let code = number_at(&err, &["code"]).unwrap_or_default() as u16;
            deliver(Err(GeoError::from_code(code)));
        })
    };

    if geolocation
        .get_current_position_with_error_callback(
            on_success.unchecked_ref::<Function>(),
            Some(on_error.unchecked_ref::<Function>()),
        )
        .is_err()
    {
        deliver(Err(GeoError::Unavailable));
    }
}

/// Resolves after `duration` without blocking the event loop.
pub async fn sleep(duration: Duration) {
    let ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        let scheduled = web_sys::window()
            .map(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                    .is_ok()
            })
            .unwrap_or(false);
        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}
