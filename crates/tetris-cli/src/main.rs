mod command;
mod logging;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
