//! Toast notifications
//!
//! The auth pages raise [`Notice`]s through a [`NotificationManager`] kept in
//! the session context; [`NotificationsContainer`] renders them in the top
//! right corner of every page.

use std::collections::VecDeque;

use leptos::prelude::*;

use crate::core::{Notice, NoticeKind};

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// Notice with a unique id for tracking
#[derive(Clone, Debug)]
pub struct NotificationItem {
    pub id: u64,
    pub notice: Notice,
}

#[component]
pub fn NotificationsContainer(
    /// Signal containing the list of notifications
    notifications: RwSignal<VecDeque<NotificationItem>>,
) -> impl IntoView {
    view! {
        <div class="toast-stack">
            {move || {
                notifications.get().into_iter().map(|item| {
                    view! {
                        <NotificationToast
                            notice=item.notice
                            id=item.id
                            notifications=notifications
                        />
                    }
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn NotificationToast(
    notice: Notice,
    id: u64,
    notifications: RwSignal<VecDeque<NotificationItem>>,
) -> impl IntoView {
    let (is_exiting, _set_is_exiting) = signal(false);

    if let Some(_ms) = notice.auto_dismiss_ms {
        #[cfg(feature = "hydrate")]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                let _ = _set_is_exiting.try_set(true);
                // exit animation
                TimeoutFuture::new(300).await;
                let _ = notifications.try_update(|n| n.retain(|i| i.id != id));
            });
        }
    }

    let (kind_class, icon_path) = match notice.kind {
        NoticeKind::Success => ("toast-success", "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z"),
        NoticeKind::Error => ("toast-error", "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z"),
        NoticeKind::Warning => (
            "toast-warning",
            "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z",
        ),
        NoticeKind::Info => ("toast-info", "M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z"),
    };

    let role = if notice.kind == NoticeKind::Error { "alert" } else { "status" };

    view! {
        <div
            class=format!("toast {kind_class}")
            class:toast-exiting=move || is_exiting.get()
            role=role
        >
            <svg class="toast-icon" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon_path />
            </svg>
            <div class="toast-body">
                <h4 class="toast-title">{notice.title}</h4>
                <p class="toast-message">{notice.message}</p>
            </div>
            <button
                type="button"
                class="toast-close"
                aria-label="Dismiss"
                on:click=move |_| notifications.update(|n| n.retain(|i| i.id != id))
            >
                <svg class="toast-close-icon" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
                </svg>
            </button>
        </div>
    }
}

/// Queue of visible notices
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Signal for [`NotificationsContainer`]
    pub fn notifications(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.notifications
    }

    pub fn notify(&self, notice: Notice) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.notifications.update(|n| {
            n.push_back(NotificationItem { id, notice });
            while n.len() > MAX_NOTIFICATIONS {
                n.pop_front();
            }
        });
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}
