fn main() {
    let command = match fontset::cli::parse_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}\n");
            eprint!("{}", fontset::cli::usage());
            std::process::exit(2);
        }
    };

    if let Err(e) = fontset::cli::run(command) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
