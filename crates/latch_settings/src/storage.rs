//! Storage collaborator
//!
//! The registry persists one payload per namespace through this trait. Backends
//! live in `latch_services::save`; they report failure as `false`/`None` and do
//! their own logging.

use std::rc::Rc;

pub trait SettingsStorage {
    /// Write `payload` under `namespace`. Returns whether the write succeeded.
    fn try_save(&self, namespace: &str, payload: &str) -> bool;

    /// Read the payload stored under `namespace`, if any.
    fn try_load(&self, namespace: &str) -> Option<String>;
}

impl<S: SettingsStorage + ?Sized> SettingsStorage for Rc<S> {
    fn try_save(&self, namespace: &str, payload: &str) -> bool {
        (**self).try_save(namespace, payload)
    }

    fn try_load(&self, namespace: &str) -> Option<String> {
        (**self).try_load(namespace)
    }
}

impl<S: SettingsStorage + ?Sized> SettingsStorage for Box<S> {
    fn try_save(&self, namespace: &str, payload: &str) -> bool {
        (**self).try_save(namespace, payload)
    }

    fn try_load(&self, namespace: &str) -> Option<String> {
        (**self).try_load(namespace)
    }
}
