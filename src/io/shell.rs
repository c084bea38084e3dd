use std::process::{Command, Stdio};

/// Error type for launching the editor or the interactive filter
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("could not run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
    },
}

/// Quote `s` as a single POSIX shell word.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// `editor 'file1' 'file2' ...` as one shell command line
pub fn editor_command(editor: &str, files: &[&str]) -> String {
    let mut command = editor.to_string();
    for file in files {
        command.push(' ');
        command.push_str(&shell_quote(file));
    }
    command
}

/// Open `files` in `editor`, attached to the terminal, and wait for it.
pub fn run_editor(editor: &str, files: &[&str]) -> Result<(), ShellError> {
    let command = editor_command(editor, files);
    tracing::debug!(%command, "launching editor");
    let status = Command::new("sh")
        .arg("-c")
        .arg(&command)
        .status()
        .map_err(|e| ShellError::Spawn {
            command: command.clone(),
            source: e,
        })?;
    if !status.success() {
        return Err(ShellError::Failed { command, status });
    }
    Ok(())
}

/// Run a shell pipeline whose stdout is captured (e.g. `find ... | fzf`).
/// Stdin and stderr stay on the terminal so an interactive filter works.
pub fn run_capture(command: &str) -> Result<String, ShellError> {
    tracing::debug!(%command, "launching filter");
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| ShellError::Spawn {
            command: command.to_string(),
            source: e,
        })?;
    if !output.status.success() {
        return Err(ShellError::Failed {
            command: command.to_string(),
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("plain.md"), "'plain.md'");
        assert_eq!(shell_quote("it's here.md"), r"'it'\''s here.md'");
    }

    #[test]
    fn test_editor_command() {
        assert_eq!(
            editor_command("vi", &["/tmp/a b.md"]),
            "vi '/tmp/a b.md'"
        );
        assert_eq!(editor_command("code -w", &[]), "code -w");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_returns_stdout() {
        let out = run_capture("printf 'one\\ntwo\\n' | tail -n 1").unwrap();
        assert_eq!(out, "two\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_reports_failure() {
        assert!(matches!(
            run_capture("exit 3"),
            Err(ShellError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_editor_passes_quoted_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let target = tmp.path().join("touched file");
        run_editor("touch", &[target.to_str().unwrap()]).unwrap();
        assert!(target.exists());
    }
}
