//! Demo host: opens a window with the panorama described by a TOML options
//! file.
//!
//! ```text
//! fruitpano [options.toml]
//! ```
//!
//! Without an argument the default options are used, which show an empty
//! custom arrangement.

use std::path::Path;

use fruitpano::options::Options;
use fruitpano::viewer::Viewer;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
