use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Write the default config file and exit, so users have something
    // to edit instead of guessing field names.
    if args.iter().any(|a| a == "--init-config") {
        match chromatone::config::Config::default().save() {
            Ok(path) => {
                log::info!("Wrote default config to {}", path.display());
                return;
            }
            Err(e) => {
                log::error!("Failed to write config: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    // Positional arguments: input image, output MIDI path. Either may
    // be omitted; missing paths are requested via file dialogs.
    let mut paths = args.iter().filter(|a| !a.starts_with("--"));
    let input = paths.next().map(PathBuf::from);
    let output = paths.next().map(PathBuf::from);

    if let Err(e) = chromatone::run(input, output) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
