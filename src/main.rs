fn main() {
    if let Err(e) = storefront_analytics::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
