//! Lazy image-metrics cache keyed by URL.
//!
//! Each distinct background image is decoded at most once; resize
//! recalculations hit the cache. The cache is a cloneable handle so panel
//! wiring, the resize handler and tests can share one instance.

use std::cell::RefCell;
use std::rc::Rc;

use fnv::FnvHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::pan::ImageDims;

#[derive(Clone, Default)]
pub struct MetricsCache {
    inner: Rc<RefCell<FnvHashMap<String, ImageDims>>>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<ImageDims> {
        self.inner.borrow().get(url).copied()
    }

    pub fn insert(&self, url: String, dims: ImageDims) {
        self.inner.borrow_mut().insert(url, dims);
    }

    /// Resolve natural dimensions for `url`, hitting the cache first.
    ///
    /// `done` receives `Some(dims)` on success and `None` on load failure.
    /// The network load has no timeout; a never-resolving fetch simply leaves
    /// the caller on its fallback metrics until resize runs again.
    pub fn get_or_fetch(&self, url: &str, done: impl FnOnce(Option<ImageDims>) + 'static) {
        if let Some(dims) = self.get(url) {
            done(Some(dims));
            return;
        }

        let img = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                log::warn!("[images] could not create probe element: {:?}", e);
                done(None);
                return;
            }
        };

        // onload and onerror race for the single completion callback.
        let done: Rc<RefCell<Option<Box<dyn FnOnce(Option<ImageDims>)>>>> =
            Rc::new(RefCell::new(Some(Box::new(done))));

        let cache = self.clone();
        let url_owned = url.to_string();
        let img_for_load = img.clone();
        let done_for_load = done.clone();
        let onload = Closure::wrap(Box::new(move || {
            let dims = ImageDims {
                width: img_for_load.natural_width() as f32,
                height: img_for_load.natural_height() as f32,
            };
            cache.insert(url_owned.clone(), dims);
            if let Some(f) = done_for_load.borrow_mut().take() {
                f(Some(dims));
            }
        }) as Box<dyn FnMut()>);
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();

        let url_for_err = url.to_string();
        let onerror = Closure::wrap(Box::new(move || {
            log::warn!("[images] failed to load {}", url_for_err);
            if let Some(f) = done.borrow_mut().take() {
                f(None);
            }
        }) as Box<dyn FnMut()>);
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();

        img.set_src(url);
    }
}
