pub use self::{
    app::App,
    panel::{Panel, PanelTabs},
    runtime::Runtime,
};

mod app;
mod frame_clock;
mod panel;
mod runtime;
