fn main() {
    if let Err(err) = esa_dashboard::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
