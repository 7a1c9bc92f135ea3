fn main() {
    if let Err(e) = osgood::cli::main() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
