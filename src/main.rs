use convert_to_requests::context::Environment;
use convert_to_requests::core;
use convert_to_requests::status::ExitStatus;

/// Entry point; returns ExitStatus directly, which implements
/// std::process::Termination.
fn main() -> ExitStatus {
    let args: Vec<String> = std::env::args().collect();
    let env = Environment::init();

    core::run(args, env)
}
