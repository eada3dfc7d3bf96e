mod app;
mod gui;
mod panel;

use anyhow::Result;

use lumina_engine::device::GpuInit;
use lumina_engine::logging::{LoggingConfig, init_logging};
use lumina_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "lumina viewer".to_string(),
        ..Default::default()
    };

    Runtime::run(config, GpuInit::default(), app::ViewerApp::new())
}
