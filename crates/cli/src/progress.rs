use indicatif::{ProgressBar, ProgressStyle};

const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

/// Spinner on stderr shown while a request is in flight.
///
/// Hidden when `visible` is false or when running under CI.
pub fn request_spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible || is_ci() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg} {elapsed:.dim}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
