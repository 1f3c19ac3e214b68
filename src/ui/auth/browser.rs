//! `localStorage` backing and the cross-tab `storage` listener

use std::sync::Arc;

use leptos::logging::{log, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::core::{
    ListenerRegistry, RoutePaths, Session, StorageArea, StorageChange, StorageError,
};

/// The page's `window.localStorage`
///
/// Looked up on every call; private browsing modes may refuse access.
pub struct LocalStorageArea;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    window
        .local_storage()
        .map_err(platform_error)?
        .ok_or(StorageError::Unavailable)
}

fn platform_error(err: JsValue) -> StorageError {
    StorageError::Platform(format!("{:?}", err))
}

impl StorageArea for LocalStorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(platform_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(platform_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(platform_error)
    }
}

/// Forward `storage` events fired by other tabs to `registry`
///
/// Browsers never deliver the event to the tab that made the write.
pub fn install_storage_listener(registry: Arc<ListenerRegistry>) {
    let Some(window) = web_sys::window() else {
        warn!("No window, cross-tab session sync disabled");
        return;
    };

    let handler = Closure::<dyn Fn(web_sys::StorageEvent)>::new(
        move |event: web_sys::StorageEvent| {
            let change = StorageChange::new(event.key());
            let notified = registry.dispatch(&change);
            if notified > 0 {
                log!(
                    "Session storage changed in another tab ({:?}), notified {} listener(s)",
                    change.key,
                    notified
                );
            }
        },
    );

    if let Err(e) =
        window.add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref())
    {
        warn!("Failed to install storage listener: {:?}", e);
        return;
    }

    // Keep the closure alive for the lifetime of the page
    handler.forget();
}

/// Session backed by `localStorage` with the window listener installed
pub fn browser_session(paths: RoutePaths) -> Session {
    let registry = Arc::new(ListenerRegistry::new());
    install_storage_listener(Arc::clone(&registry));
    Session::new(Arc::new(LocalStorageArea), registry, paths)
}
