fn main() {
    if let Err(err) = sheet_mapped::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
