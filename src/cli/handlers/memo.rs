use std::io::{BufRead, Write};

use crate::io::shell::{self, shell_quote};
use crate::model::config::Config;

/// Interactively choose the memo file for a new todo.
///
/// Answering `y` picks an existing file under `memodir` through the filter.
/// Anything else asks for a new file name and picks the directory to put it
/// in. Prompts go to stderr.
pub fn pick_memo<R: BufRead>(
    config: &Config,
    input: &mut R,
) -> Result<String, Box<dyn std::error::Error>> {
    if config.memodir.is_empty() {
        return Err("please set memodir in the config file".into());
    }
    if config.filtercmd.is_empty() {
        return Err("please set filtercmd (peco/fzf) in the config file".into());
    }

    let memodir = shell_quote(&config.memodir);
    if ask("existing file? (y/n)", input)? {
        let picked = shell::run_capture(&format!(
            "find {} -type f | {}",
            memodir, config.filtercmd
        ))?;
        Ok(selection(&picked)?.to_string())
    } else {
        let name = read_word("new file name", input)?;
        if name.is_empty() {
            return Err("memo file name cannot be empty".into());
        }
        let dir = shell::run_capture(&format!(
            "find {} -type d | {}",
            memodir, config.filtercmd
        ))?;
        Ok(format!("{}/{}", selection(&dir)?, name))
    }
}

/// Filter output without the trailing newline. A cancelled filter prints
/// nothing.
fn selection(output: &str) -> Result<&str, Box<dyn std::error::Error>> {
    let picked = output.trim_end_matches('\n');
    if picked.is_empty() {
        return Err("no memo file selected".into());
    }
    Ok(picked)
}

fn ask<R: BufRead>(prompt: &str, input: &mut R) -> std::io::Result<bool> {
    let answer = read_word(prompt, input)?;
    Ok(answer == "y" || answer == "Y")
}

fn read_word<R: BufRead>(prompt: &str, input: &mut R) -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}: ", prompt)?;
    stderr.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &std::path::Path) -> Config {
        Config {
            memodir: dir.to_string_lossy().into_owned(),
            filtercmd: "head -n 1".into(),
            ..Config::default()
        }
    }

    #[test]
    fn test_pick_existing_file() {
        let tmp = TempDir::new().unwrap();
        let memo = tmp.path().join("notes.md");
        fs::write(&memo, "").unwrap();

        let picked = pick_memo(&config_for(tmp.path()), &mut "y\n".as_bytes()).unwrap();
        assert_eq!(picked, memo.to_string_lossy());
    }

    #[test]
    fn test_pick_new_file_in_directory() {
        let tmp = TempDir::new().unwrap();
        // `find -type d` lists the root itself first
        let picked = pick_memo(&config_for(tmp.path()), &mut "n\nplan.md\n".as_bytes()).unwrap();
        assert_eq!(picked, format!("{}/plan.md", tmp.path().display()));
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.md"), "").unwrap();
        let config = Config {
            filtercmd: "cat > /dev/null".into(),
            ..config_for(tmp.path())
        };

        let err = pick_memo(&config, &mut "y\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "no memo file selected");

        let err = pick_memo(&config, &mut "n\nplan.md\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "no memo file selected");
    }

    #[test]
    fn test_requires_memodir_and_filter() {
        let err = pick_memo(&Config::default(), &mut "y\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("memodir"));

        let config = Config {
            memodir: "/tmp".into(),
            ..Config::default()
        };
        let err = pick_memo(&config, &mut "y\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("filtercmd"));
    }
}
