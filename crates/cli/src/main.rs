fn main() {
    if let Err(e) = quokka_cli::run() {
        eprintln!("quokka: {}", e);
        std::process::exit(1);
    }
}
