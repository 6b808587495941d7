fn main() {
    if let Err(err) = cryptoscope::cli::run() {
        cryptoscope::ui::eprintln_error(&err);
        std::process::exit(cryptoscope::exit::exit_code(&err));
    }
}
