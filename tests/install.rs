#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use toaster::toaster::GLOBAL_PROPERTY;
use toaster::{
    App, CONTAINER_ID, StoredToast, SurfaceEvent, ToastComponent, ToastOverrides, Toaster,
    ToasterOptions, ToasterOverrides, use_toaster,
};

fn toaster_with(global_mount: bool) -> Toaster {
    Toaster::new(ToasterOptions::with_overrides(ToasterOverrides {
        global_mount: Some(global_mount),
        ..ToasterOverrides::default()
    }))
    .unwrap()
}

struct Badge;

impl ToastComponent for Badge {
    fn render(&self, toast: &StoredToast) -> String {
        format!("<{}>", toast.message)
    }
}

#[test]
fn lookup_without_install_fails() {
    let app = App::new();
    let err = use_toaster(&app).unwrap_err();
    assert!(err.is_not_installed());
}

#[tokio::test(start_paused = true)]
async fn install_registers_and_mounts_once() {
    let toaster = toaster_with(true);
    let mut app = App::new();
    app.use_plugin(&toaster).use_plugin(&toaster);

    let document = app.document().unwrap();
    assert_eq!(document.mount_count(), 1);
    assert!(document.query_selector(CONTAINER_ID).is_some());

    let injected = use_toaster(&app).unwrap();
    injected.info("via injection", None);
    assert_eq!(toaster.len(), 1);

    let global: Toaster = app.global_property(GLOBAL_PROPERTY).unwrap();
    assert_eq!(global.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn second_toaster_does_not_mount_another_container() {
    let mut app = App::new();
    app.use_plugin(&toaster_with(true));
    app.use_plugin(&toaster_with(true));
    assert_eq!(app.document().unwrap().mount_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn global_mount_disabled_skips_container() {
    let mut app = App::new();
    app.use_plugin(&toaster_with(false));
    assert_eq!(app.document().unwrap().mount_count(), 0);
    assert!(use_toaster(&app).is_ok());
}

#[tokio::test(start_paused = true)]
async fn headless_app_only_registers() {
    let mut app = App::headless();
    app.use_plugin(&toaster_with(true));
    assert!(app.document().is_none());
    assert!(use_toaster(&app).is_ok());
}

#[tokio::test(start_paused = true)]
async fn mounted_container_uses_app_components_and_handles_clicks() {
    let toaster = toaster_with(true);
    let mut app = App::new();
    app.component("badge", Arc::new(Badge));
    app.use_plugin(&toaster);

    toaster.success(
        "done",
        Some(ToastOverrides::default().component("badge")),
    );
    let document = app.document().unwrap();
    assert_eq!(document.render(), "bottom\n  <done>\n");

    let key = toaster.toasts()[0].transition_key.clone();
    assert!(document.dispatch(CONTAINER_ID, &SurfaceEvent::Click(key.clone())));
    assert!(toaster.is_empty());
    assert!(!document.dispatch(CONTAINER_ID, &SurfaceEvent::Click(key)));
    assert_eq!(document.render(), "");
}
