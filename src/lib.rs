pub mod data;
pub mod layout;
pub mod solver;

/// dimensional analysis types
pub type Score = f64;

// yield model parameters
pub(crate) const STORAGE_BASE: u32 = 6000;
pub(crate) const TERRITORY_REVENUE: u32 = 2000;
pub(crate) const REVENUE_RATE_DIVISOR: u32 = 2;

// evolutionary solver parameters
pub(crate) const CONSTRAINT_AGE_PENALTY: u32 = 5;

/// progress bar
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress
}

/// initialize terminal logging
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
