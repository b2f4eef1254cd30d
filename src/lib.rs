#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod container;
pub mod error;
pub mod host;
pub mod options;
pub mod telemetry;
pub mod timer;
pub mod toaster;
pub mod types;

pub use container::{CONTAINER_ID, DefaultToast, ToastComponent, ToastContainer};
pub use host::{App, Document, InjectionKey, Plugin, RenderSurface, SurfaceEvent};
pub use options::{
    AutoDismiss, StoredToastOptions, ToastOptions, ToastOverrides, ToasterOptions,
    ToasterOverrides,
};
pub use timer::{Timer, TimerState};
pub use toaster::{StoredToast, ToastList, ToastSubscription, Toaster, use_toaster};
pub use types::{ToastPosition, ToastType};

pub type Result<T> = std::result::Result<T, error::Error>;
