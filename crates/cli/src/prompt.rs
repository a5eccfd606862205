//! Interactive confirmation on the terminal

use std::io::{BufRead, Write};

use s3c_core::ops::{is_affirmative, Confirm};
use s3c_core::Result;

/// Asks questions on stdout and reads the answer from stdin
///
/// End of input counts as a "no".
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        read_answer(std::io::stdin().lock())
    }
}

fn read_answer(mut input: impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_answer() {
        assert!(read_answer("y\n".as_bytes()).unwrap());
        assert!(read_answer("YES\r\n".as_bytes()).unwrap());
        assert!(!read_answer("n\n".as_bytes()).unwrap());
        assert!(!read_answer("\n".as_bytes()).unwrap());
        assert!(!read_answer("".as_bytes()).unwrap());
    }
}
