fn main() {
    if let Err(err) = collage_synth::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
