//! worktimer main entrypoint.

use worktimer::run;
use worktimer::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
