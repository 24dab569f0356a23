use std::future::Future;
use std::ops::Deref;
use std::rc::Rc;

use super::SchedulerController;
use crate::services::{ApiService, BrowserDialogs};

/// The controller wired to `fetch` and the browser's dialogs.
pub type AppController = SchedulerController<ApiService, BrowserDialogs>;

/// Shared, cheaply cloned reference to the page's controller, usable as a
/// component prop. Two handles are equal when they point at the same
/// controller.
#[derive(Clone)]
pub struct ControllerHandle(Rc<AppController>);

impl ControllerHandle {
    pub fn new(controller: AppController) -> Self {
        Self(Rc::new(controller))
    }

    /// Runs an async controller action on the browser's event loop.
    pub fn spawn<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<AppController>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(action(self.0.clone()));
    }
}

impl Deref for ControllerHandle {
    type Target = AppController;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for ControllerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
