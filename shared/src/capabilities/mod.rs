//! Capabilities the core asks the shell to perform.
//!
//! Both come straight from Crux: `Http` executes requests built by
//! [`crate::api::ApiClient`], `Render` tells the shell to re-read the view.
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
}
