use std::process;

fn main() {
    if let Err(err) = spookyctl::run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
