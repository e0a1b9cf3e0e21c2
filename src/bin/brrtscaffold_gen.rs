fn main() {
    if let Err(err) = brrtscaffold::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
