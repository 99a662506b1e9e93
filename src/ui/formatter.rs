//! Pure formatting functions for UI output.
//!
//! Progress goes to stdout; warnings and errors go to stderr.

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Show what a push would have done during a dry run.
pub fn display_dry_run_push(refspec: &str, remote: &str) {
    println!(
        "\x1b[36m→\x1b[0m Dry run: would push \x1b[36m{}\x1b[0m to {}",
        refspec, remote
    );
}

/// Display the branches a release was merged into.
///
/// # Arguments
/// * `release_tag` - The tag created for the release
/// * `branches` - Production first, then every development branch
pub fn display_merge_summary(release_tag: &str, branches: &[String]) {
    println!("\n\x1b[1mRelease {} merged into:\x1b[0m", release_tag);
    for branch in branches {
        println!("  - {}", branch);
    }
}
