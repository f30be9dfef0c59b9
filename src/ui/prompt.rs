//! Line-based prompts on stdin.

use std::io::{self, BufRead, Write};

/// Ask for a comma separated tag list. Returns the raw answer; an empty
/// answer (or EOF) means "keep the default".
pub fn prompt_tags(default_tag: &str) -> io::Result<String> {
    print!("Enter tags (comma separated) [{default_tag}]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Yes/no confirmation, default "no".
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();
    Ok(ans == "y" || ans == "yes")
}

/// Read one trimmed line; `None` on EOF.
pub fn read_command(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
