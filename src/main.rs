fn main() {
    if let Err(e) = putty_reg::cli::run() {
        log::error!("putty-reg failed: {e:#}");
        eprintln!("putty-reg: error: {e:#}");
        std::process::exit(1);
    }
}
