use std::error::Error;

/// Writes `facture_clean_invoicecomply.pdf` (flow layout) into the working directory.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = facture_fixtures::fixtures::run_flow() {
        eprintln!("Erreur: {}", err);
        print_error_sources(&err);
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
