//! Main application entry point.

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting SlideDesk");

    let config = slidedesk_app::AppConfig::from_env();
    if let Err(e) = pollster::block_on(slidedesk_app::App::run(config)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
