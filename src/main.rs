// native:
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use scatterfit::config::{Config, CONFIG_FILE};

    let (config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    scatterfit::log::init_native_log(&config.log_level);
    if let Some(err) = load_error {
        log::warn!("could not load {}, using defaults. Error: {}", CONFIG_FILE, err);
    }

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(
            config.canvas_width + 320.0,
            config.canvas_height + 80.0,
        )),
        ..Default::default()
    };
    eframe::run_native(
        "Scatterfit",
        native_options,
        Box::new(move |cc| Box::new(scatterfit::FitApp::new(cc, &config))),
    );
}

// web:
#[cfg(target_arch = "wasm32")]
fn main() {
    scatterfit::log::init_web_log();

    let web_options = eframe::WebOptions::default();
    let config = scatterfit::Config::default();
    eframe::start_web(
        "the_canvas_id", // hardcode it
        web_options,
        Box::new(move |cc| Box::new(scatterfit::FitApp::new(cc, &config))),
    )
    .expect("failed to start eframe");
}
