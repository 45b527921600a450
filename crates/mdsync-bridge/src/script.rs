//! Command text sent to the engine.

use std::borrow::Cow;

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// The command advancing the engine by `steps` timesteps.
///
/// `run_pre` and `run_post` select whether the engine performs its full
/// setup before the run and its summary after it.
pub fn run_command(steps: u64, run_pre: bool, run_post: bool) -> String {
    format!(
        "run {steps} pre {} post {}\n",
        yes_no(run_pre),
        yes_no(run_post)
    )
}

/// `command` with a trailing newline, borrowing when one is already there.
pub fn terminated(command: &str) -> Cow<'_, str> {
    if command.ends_with('\n') {
        Cow::Borrowed(command)
    } else {
        Cow::Owned(format!("{command}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_command_format() {
        assert_eq!(run_command(100, true, false), "run 100 pre yes post no\n");
        assert_eq!(run_command(1, false, true), "run 1 pre no post yes\n");
    }

    #[test]
    fn terminated_appends_once() {
        assert_eq!(terminated("print hi"), "print hi\n");
        assert!(matches!(terminated("print hi\n"), Cow::Borrowed(_)));
    }
}
