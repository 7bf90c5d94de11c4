mod commands;
mod terminal;

use commands::{CommandLine, import};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.quiet);

    if commands.show_version {
        print::print(env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = commands.into_config()?;

    print::banner(cfg.quiet);
    import::import(&cfg).await
}
