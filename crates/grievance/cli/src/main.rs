fn main() {
    if let Err(err) = grievance_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
