mod app;
mod effects;
mod input;
mod logging;
mod render;

fn main() -> anyhow::Result<()> {
    app::run()
}
