//! Interactive configuration prompts.
//!
//! Asks for one parameter per line: cache size exponent, line size exponent,
//! whether the cache is fully associative, whether it is direct mapped, the
//! ways exponent (1 to 4), the replacement policy, and the trace file. Then
//! replays the trace and prints a one-line summary.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::{Result, SimError, sim};

/// Smallest and largest ways exponent accepted at the prompt (2 to 16 lines per set).
const WAYS_EXP_RANGE: std::ops::RangeInclusive<u32> = 1..=4;

/// Line-oriented prompter over any reader/writer pair.
struct Prompt<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")
            .and_then(|()| self.out.flush())
            .map_err(|source| SimError::Output {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }

    /// Prints `question` and returns the trimmed answer.
    fn ask(&mut self, question: &str) -> Result<String> {
        self.say(question)?;
        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| SimError::config(format!("could not read answer: {e}")))?;
        if read == 0 {
            return Err(SimError::config(format!("no answer to: {question}")));
        }
        Ok(answer.trim().to_string())
    }

    fn number(&mut self, question: &str) -> Result<u32> {
        let answer = self.ask(question)?;
        answer
            .parse()
            .map_err(|_| SimError::config(format!("expected a non-negative number, got '{answer}'")))
    }

    /// `true` when the answer starts with `y` or `Y`.
    fn yes(&mut self, question: &str) -> Result<bool> {
        self.first_char_is(question, 'y')
    }

    fn first_char_is(&mut self, question: &str, wanted: char) -> Result<bool> {
        let answer = self.ask(question)?;
        Ok(answer
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&wanted)))
    }
}

/// Runs the prompt flow and prints the result.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfiguration`] for unparsable answers or an
/// invalid geometry, and the usual trace errors from the run itself.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    let mut prompt = Prompt { input, out };
    prompt.say(
        "Cache and line sizes are entered as exponents of 2: an exponent of 3 means 2^3 = 8 bytes.",
    )?;

    let cache_size_exp = prompt.number("Enter the exponent for the cache size")?;
    let line_size_exp = prompt.number("Enter the exponent for the line size")?;
    let num_lines_exp = cache_size_exp.saturating_sub(line_size_exp);

    let set_assoc_exp = if prompt.yes("Is the cache fully associative? (y/n)")? {
        num_lines_exp
    } else if prompt.yes("Is the cache direct mapped? (y/n)")? {
        0
    } else {
        let exp = prompt.number(
            "Enter 1 for 2 lines per set, 2 for 4 lines per set, 3 for 8 lines per set, or 4 for 16 lines per set",
        )?;
        if !WAYS_EXP_RANGE.contains(&exp) {
            return Err(SimError::config(format!(
                "lines-per-set exponent {exp} is not between 1 and 4"
            )));
        }
        exp
    };

    let lru = prompt.first_char_is("Replacement policy? L for LRU, anything else for FIFO", 'l')?;
    let policy = if lru {
        ReplacementPolicy::Lru
    } else {
        ReplacementPolicy::Fifo
    };

    let trace_path = prompt.ask("Enter the trace file name")?;

    let config =
        CacheConfig::with_set_assoc_exp(cache_size_exp, line_size_exp, set_assoc_exp, policy)?;
    let result = sim::run_file(&config, &trace_path)?;
    prompt.say(&result.to_string())
}
