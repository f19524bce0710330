fn main() {
    env_logger::init();
    log::info!("Six Door Maze starting up");

    if let Err(e) = sixdoor::app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
