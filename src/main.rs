//! rTaskflow main entrypoint.

use rtaskflow::run;
use rtaskflow::ui::messages::report;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        report(&e);
        std::process::exit(1);
    }
}
