use group_aligner::AlignerConfig;

fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Optional first argument: path to a JSON config file
    let config = match std::env::args().nth(1) {
        Some(path) => AlignerConfig::load(&path).unwrap_or_else(|err| {
            log::error!("{path}: {err}; using defaults");
            AlignerConfig::default()
        }),
        None => AlignerConfig::default(),
    };
    log::info!(
        "Minimum group size {}x{}",
        config.min_node_size.width,
        config.min_node_size.height
    );

    group_aligner::run_app(config)
}
