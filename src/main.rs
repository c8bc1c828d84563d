fn main() {
    if let Err(err) = csv_profile::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
