use clap::Parser;

use log::error;

mod app;
mod args;

use app::App;
use args::Args;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let config = match args.resolve_config() {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            std::process::exit(-1);
        }
    };

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("{e}");
            std::process::exit(-1);
        }
    };

    app.run();
}
